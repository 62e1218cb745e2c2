use std::slice;

use derive_more::{Index, IndexMut};
use log::{debug, trace};
use zeroize::Zeroize;

use crate::engine::assign::copy_vector;
use crate::engine::{
    Engine, EnginePromotion, ResizableVectorEngine, ResizableVectorTag, VectorEngine,
    VectorEngineMut,
};
use crate::error::Result;
use crate::resolution::Present;
use crate::storage::{HeapStorage, Rebound, StorageProvider};
use crate::traits::Scalar;

/// Dense vector engine whose size can change at runtime. Storage comes from the provider `A`.
#[derive(Clone, Debug, Index, IndexMut)]
pub struct DynVectorEngine<T, A = HeapStorage<T>>
where
    A: StorageProvider<Element = T>,
{
    #[index]
    #[index_mut]
    elems: Vec<T>,
    provider: A,
}

impl<T: Scalar, A: StorageProvider<Element = T>> DynVectorEngine<T, A> {
    pub fn new() -> Self {
        Self::with_capacity(0, 0)
    }

    pub fn with_size(n: usize) -> Self {
        Self::with_capacity(n, n)
    }

    /// `n` default elements with room for `capacity` (at least `n`).
    pub fn with_capacity(n: usize, capacity: usize) -> Self {
        let provider = A::default();
        let mut elems = provider.allocate(capacity.max(n));
        elems.resize(n, T::default());
        Self { elems, provider }
    }

    pub fn from_fn(n: usize, f: impl FnMut(usize) -> T) -> Self {
        let provider = A::default();
        let mut elems = provider.allocate(n);
        elems.extend((0..n).map(f));
        Self { elems, provider }
    }

    /// One element per supplied value.
    pub fn from_values<U: Into<T>>(values: impl IntoIterator<Item = U>) -> Self {
        let values = values.into_iter();
        let mut engine = Self::with_capacity(0, values.size_hint().0);
        engine.elems.extend(values.map(Into::into));
        engine
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elems
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elems
    }

    pub fn provider(&self) -> &A {
        &self.provider
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> Default for DynVectorEngine<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> From<Vec<T>> for DynVectorEngine<T, A> {
    fn from(v: Vec<T>) -> Self {
        Self::from_values(v)
    }
}

impl<T: PartialEq, A: StorageProvider<Element = T>> PartialEq for DynVectorEngine<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.elems == other.elems
    }
}

impl<T: Eq, A: StorageProvider<Element = T>> Eq for DynVectorEngine<T, A> {}

impl<T: Scalar, A: StorageProvider<Element = T>> Engine for DynVectorEngine<T, A> {
    type Tag = ResizableVectorTag;
    type Element = T;
}

impl<T: Scalar, A: StorageProvider<Element = T>> VectorEngine for DynVectorEngine<T, A> {
    type Iter<'a> = slice::Iter<'a, T>
    where
        Self: 'a;

    #[inline]
    fn get(&self, i: usize) -> &T {
        debug_assert!(i < self.elems.len());
        &self.elems[i]
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.elems.iter()
    }

    #[inline]
    fn size(&self) -> usize {
        self.elems.len()
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.elems.capacity()
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> VectorEngineMut for DynVectorEngine<T, A> {
    type IterMut<'a> = slice::IterMut<'a, T>
    where
        Self: 'a;

    #[inline]
    fn get_mut(&mut self, i: usize) -> &mut T {
        debug_assert!(i < self.elems.len());
        &mut self.elems[i]
    }

    fn iter_mut(&mut self) -> Self::IterMut<'_> {
        self.elems.iter_mut()
    }

    #[inline]
    fn swap_elements(&mut self, i: usize, j: usize) {
        self.elems.swap(i, j);
    }

    fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    fn assign_from<S>(&mut self, src: &S) -> Result<()>
    where
        S: VectorEngine,
        S::Element: Into<T>,
    {
        if src.size() != self.size() {
            debug!(
                "resizing vector engine from {} to {} elements for assignment",
                self.size(),
                src.size()
            );
            self.resize(src.size());
        }
        copy_vector(self, src);
        Ok(())
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> ResizableVectorEngine for DynVectorEngine<T, A> {
    fn resize(&mut self, n: usize) {
        self.reserve(n);
        self.elems.resize(n, T::default());
    }

    fn reserve(&mut self, capacity: usize) {
        if capacity > self.elems.capacity() {
            trace!(
                "reallocating vector engine storage from {} to {} elements",
                self.elems.capacity(),
                capacity
            );
            let mut elems = self.provider.allocate(capacity);
            elems.extend_from_slice(&self.elems);
            self.elems = elems;
        }
    }
}

impl<T1: Scalar, A, E2> EnginePromotion<E2> for DynVectorEngine<T1, A>
where
    A: StorageProvider<Element = T1>,
    E2: VectorEngine,
{
    type Output<T> = Present<DynVectorEngine<T, Rebound<A, T>>>;
}

impl<T: Zeroize, A: StorageProvider<Element = T>> Zeroize for DynVectorEngine<T, A> {
    fn zeroize(&mut self) {
        for x in self.elems.iter_mut() {
            x.zeroize();
        }
    }
}
