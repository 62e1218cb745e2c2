use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use delegate::delegate;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::engine::{ResizableVectorEngine, VectorEngine, VectorEngineMut};
use crate::error::Result;
use crate::operations::{DefaultOperations, OperationTraits};
use crate::traits::MatrixElement;

/// A vector owning exactly one engine `E`, with result typing configured by `OT`.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(serialize = "E: Serialize", deserialize = "E: Deserialize<'de>"))]
pub struct Vector<E, OT = DefaultOperations>(
    pub(crate) E,
    #[serde(skip)] PhantomData<fn() -> OT>,
);

impl<E, OT> Vector<E, OT> {
    pub fn from_engine(engine: E) -> Self {
        Vector(engine, PhantomData)
    }

    pub fn engine(&self) -> &E {
        &self.0
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.0
    }

    pub fn into_engine(self) -> E {
        self.0
    }
}

impl<E, OT> Vector<E, OT>
where
    E: VectorEngine,
    E::Element: MatrixElement,
    OT: OperationTraits,
{
    delegate! {
        to self.0 {
            pub fn size(&self) -> usize;
            pub fn capacity(&self) -> usize;
            pub fn elements(&self) -> usize;
            pub fn iter(&self) -> E::Iter<'_>;
        }
    }

    /// Element `i`, or `None` when `i` is out of range.
    pub fn get(&self, i: usize) -> Option<&E::Element> {
        (i < self.size()).then(|| self.0.get(i))
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

impl<E, OT> Vector<E, OT>
where
    E: VectorEngineMut,
    E::Element: MatrixElement,
    OT: OperationTraits,
{
    delegate! {
        to self.0 {
            pub fn iter_mut(&mut self) -> E::IterMut<'_>;
            pub fn swap_elements(&mut self, i: usize, j: usize);
        }
    }

    pub fn get_mut(&mut self, i: usize) -> Option<&mut E::Element> {
        if i < self.size() {
            Some(self.0.get_mut(i))
        } else {
            None
        }
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.0.swap(&mut other.0);
    }

    /// Copies `other` into `self`, converting elements. See [`VectorEngineMut::assign_from`].
    pub fn assign<E2, OT2>(&mut self, other: &Vector<E2, OT2>) -> Result<()>
    where
        E2: VectorEngine,
        E2::Element: Into<E::Element>,
    {
        self.0.assign_from(&other.0)
    }
}

impl<E, OT> Vector<E, OT>
where
    E: ResizableVectorEngine,
    E::Element: MatrixElement,
    OT: OperationTraits,
{
    delegate! {
        to self.0 {
            pub fn resize(&mut self, n: usize);
            pub fn reserve(&mut self, capacity: usize);
        }
    }
}

impl<E: Clone, OT> Clone for Vector<E, OT> {
    fn clone(&self) -> Self {
        Vector(self.0.clone(), PhantomData)
    }
}

impl<E: Copy, OT> Copy for Vector<E, OT> {}

impl<E: Default, OT> Default for Vector<E, OT> {
    fn default() -> Self {
        Vector(E::default(), PhantomData)
    }
}

impl<E: fmt::Debug, OT> fmt::Debug for Vector<E, OT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Vector").field(&self.0).finish()
    }
}

impl<E: PartialEq, OT> PartialEq for Vector<E, OT> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<E: Eq, OT> Eq for Vector<E, OT> {}

impl<E, OT> From<E> for Vector<E, OT>
where
    E: VectorEngine,
{
    fn from(engine: E) -> Self {
        Vector::from_engine(engine)
    }
}

impl<E: VectorEngine, OT> Index<usize> for Vector<E, OT> {
    type Output = E::Element;

    #[inline]
    fn index(&self, i: usize) -> &E::Element {
        self.0.get(i)
    }
}

impl<E: VectorEngineMut, OT> IndexMut<usize> for Vector<E, OT> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut E::Element {
        self.0.get_mut(i)
    }
}

impl<E: Zeroize, OT> Zeroize for Vector<E, OT> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {
    use ark_std::test_rng;

    use super::*;
    use crate::engine::{DynVectorEngine, FixedVectorEngine};
    use crate::error::EngineError;
    use crate::{DynVector, FixedVector};

    #[test]
    fn test_default_fixed() {
        let v = FixedVector::<f32, 3>::default();
        assert_eq!(v.size(), 3);
        assert_eq!(v.capacity(), 3);
        assert_eq!(v.elements(), 3);
        assert!(v.iter().all(|x| *x == 0.0));
        assert!(!v.is_empty());
    }

    #[test]
    fn test_checked_get() {
        let mut v = FixedVector::<i32, 2>::from(FixedVectorEngine::from([4, 5]));
        assert_eq!(v.get(1), Some(&5));
        assert_eq!(v.get(2), None);
        *v.get_mut(0).unwrap() = 9;
        assert!(v.get_mut(2).is_none());
        assert_eq!(v[0], 9);
        v[1] = 8;
        assert_eq!(v.engine().into_array(), [9, 8]);
    }

    #[test]
    #[should_panic]
    fn test_index_out_of_range() {
        let v = FixedVector::<u8, 2>::default();
        let _ = v[2];
    }

    #[test]
    fn test_swaps() {
        let rng = &mut test_rng();
        let original = FixedVector::<u64, 6>::from(FixedVectorEngine::rand(rng));
        let mut v = original;
        v.swap_elements(0, 5);
        v.swap_elements(0, 5);
        assert_eq!(v, original);

        let mut w = FixedVector::<u64, 6>::default();
        v.swap(&mut w);
        assert_eq!(w, original);
        assert_eq!(v, FixedVector::default());
    }

    #[test]
    fn test_assign_across_engines() {
        let src = DynVector::<f32>::from(DynVectorEngine::from_values([1.0f32, 2.0, 3.0]));
        let mut fixed = FixedVector::<f64, 3>::default();
        fixed.assign(&src).unwrap();
        assert_eq!(fixed.engine().into_array(), [1.0, 2.0, 3.0]);

        let mut short = FixedVector::<f64, 2>::from(FixedVectorEngine::from([7.0, 7.0]));
        assert_eq!(
            short.assign(&src),
            Err(EngineError::invalid_size((1, 2), (1, 3)))
        );
        assert_eq!(short.engine().into_array(), [7.0, 7.0]);

        let mut dynamic = DynVector::<f64>::default();
        dynamic.assign(&src).unwrap();
        assert_eq!(dynamic.engine().as_slice(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_resize_and_reserve() {
        let mut v = DynVector::<i64>::default();
        assert!(v.is_empty());
        v.resize(3);
        v[2] = 5;
        v.reserve(50);
        assert!(v.capacity() >= 50);
        assert_eq!(v.engine().as_slice(), &[0, 0, 5]);
        for x in v.iter_mut() {
            *x += 1;
        }
        assert_eq!(v.into_engine().as_slice(), &[1, 1, 6]);
    }

    #[test]
    fn test_serde_is_transparent() {
        let v = FixedVector::<u32, 2>::from(FixedVectorEngine::from([1u32, 2]));
        let bytes = bincode::serialize(&v).unwrap();
        assert_eq!(bytes, bincode::serialize(v.engine()).unwrap());
        assert_eq!(bincode::deserialize::<FixedVector<u32, 2>>(&bytes).unwrap(), v);
    }
}
