use std::slice;

use ark_std::{rand, UniformRand};
use derive_more::{Index, IndexMut};
use serde::Serialize;
use serde_with::serde_as;
use zeroize::Zeroize;

use crate::engine::assign::{check_fixed_shape, copy_vector};
use crate::engine::{
    DynVectorEngine, Engine, EnginePromotion, MutableVectorTag, VectorEngine, VectorEngineMut,
};
use crate::error::Result;
use crate::resolution::Present;
use crate::storage::{Rebound, StorageProvider};
use crate::traits::Scalar;

/// Dense vector engine holding exactly `N` elements inline.
///
/// `N` must be at least one. Every way of building an engine, deserialization included, checks
/// this when the type is instantiated, so a zero-length engine fails the build:
///
/// ```compile_fail
/// use linalg_engine::engine::FixedVectorEngine;
///
/// let _ = FixedVectorEngine::<f32, 0>::new();
/// ```
///
/// ```compile_fail
/// use linalg_engine::engine::FixedVectorEngine;
///
/// let bytes: Vec<u8> = Vec::new();
/// let _ = bincode::deserialize::<FixedVectorEngine<f32, 0>>(&bytes);
/// ```
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Index, IndexMut, Serialize)]
#[serde(bound(serialize = "T: Serialize"))]
pub struct FixedVectorEngine<T, const N: usize> {
    #[serde_as(as = "[_; N]")]
    elems: [T; N],
}

impl<T, const N: usize> FixedVectorEngine<T, N> {
    const NONEMPTY: () = assert!(N >= 1, "a fixed vector engine needs at least one element");

    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        let () = Self::NONEMPTY;
        Self {
            elems: std::array::from_fn(f),
        }
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elems
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elems
    }

    pub fn into_array(self) -> [T; N] {
        self.elems
    }
}

impl<T: Scalar, const N: usize> FixedVectorEngine<T, N> {
    pub fn new() -> Self {
        Self::from_fn(|_| T::default())
    }

    /// Takes the first `N` values in order; missing values stay at `T::default()` and surplus
    /// values are dropped.
    pub fn from_values<U: Into<T>>(values: impl IntoIterator<Item = U>) -> Self {
        let mut engine = Self::new();
        for (slot, value) in engine.elems.iter_mut().zip(values) {
            *slot = value.into();
        }
        engine
    }
}

impl<T: Scalar + UniformRand, const N: usize> FixedVectorEngine<T, N> {
    pub fn rand<Rng: rand::Rng + ?Sized>(rng: &mut Rng) -> Self {
        Self::from_fn(|_| T::rand(rng))
    }
}

impl<T: Scalar, const N: usize> Default for FixedVectorEngine<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> From<[T; N]> for FixedVectorEngine<T, N> {
    fn from(elems: [T; N]) -> Self {
        let () = Self::NONEMPTY;
        Self { elems }
    }
}

impl<T: Scalar, const N: usize> Engine for FixedVectorEngine<T, N> {
    type Tag = MutableVectorTag;
    type Element = T;
}

impl<T: Scalar, const N: usize> VectorEngine for FixedVectorEngine<T, N> {
    type Iter<'a> = slice::Iter<'a, T>
    where
        Self: 'a;

    #[inline]
    fn get(&self, i: usize) -> &T {
        debug_assert!(i < N);
        &self.elems[i]
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.elems.iter()
    }

    #[inline]
    fn size(&self) -> usize {
        N
    }

    #[inline]
    fn capacity(&self) -> usize {
        N
    }
}

impl<T: Scalar, const N: usize> VectorEngineMut for FixedVectorEngine<T, N> {
    type IterMut<'a> = slice::IterMut<'a, T>
    where
        Self: 'a;

    #[inline]
    fn get_mut(&mut self, i: usize) -> &mut T {
        debug_assert!(i < N);
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
        std::mem::swap(&mut self.elems, &mut other.elems);
    }

    fn assign_from<S>(&mut self, src: &S) -> Result<()>
    where
        S: VectorEngine,
        S::Element: Into<T>,
    {
        check_fixed_shape((1, N), (1, src.size()))?;
        copy_vector(self, src);
        Ok(())
    }
}

impl<T1: Scalar, T2: Scalar, const N: usize> EnginePromotion<FixedVectorEngine<T2, N>>
    for FixedVectorEngine<T1, N>
{
    type Output<T> = Present<FixedVectorEngine<T, N>>;
}

impl<T1: Scalar, T2: Scalar, A, const N: usize> EnginePromotion<DynVectorEngine<T2, A>>
    for FixedVectorEngine<T1, N>
where
    A: StorageProvider<Element = T2>,
{
    type Output<T> = Present<DynVectorEngine<T, Rebound<A, T>>>;
}

impl<T: Zeroize, const N: usize> Zeroize for FixedVectorEngine<T, N> {
    fn zeroize(&mut self) {
        self.elems.zeroize();
    }
}
