use std::ops::{Index, IndexMut};

use ark_std::{rand, UniformRand};
use serde::Serialize;
use serde_with::serde_as;
use zeroize::Zeroize;

use crate::engine::assign::{check_fixed_shape, copy_matrix};
use crate::engine::{
    DynMatrixEngine, Engine, EnginePromotion, MatrixEngine, MatrixEngineMut, MutableMatrixTag,
    Transpose,
};
use crate::error::Result;
use crate::resolution::Present;
use crate::storage::{Rebound, StorageProvider};
use crate::traits::Scalar;

/// Dense `R x C` matrix engine stored inline in row-major order: element `(i, j)` is slot
/// `i * C + j` of [`as_slice`](Self::as_slice).
///
/// Both extents must be at least one; a zero extent fails the build wherever the type is
/// instantiated:
///
/// ```compile_fail
/// use linalg_engine::engine::FixedMatrixEngine;
///
/// let _ = FixedMatrixEngine::<f32, 0, 2>::new();
/// ```
///
/// ```compile_fail
/// use linalg_engine::engine::FixedMatrixEngine;
///
/// let _ = FixedMatrixEngine::<f32, 2, 0>::new();
/// ```
///
/// ```compile_fail
/// use linalg_engine::engine::FixedMatrixEngine;
///
/// let bytes: Vec<u8> = Vec::new();
/// let _ = bincode::deserialize::<FixedMatrixEngine<f32, 0, 3>>(&bytes);
/// ```
#[serde_as]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(bound(serialize = "T: Serialize"))]
pub struct FixedMatrixEngine<T, const R: usize, const C: usize> {
    #[serde_as(as = "[[_; C]; R]")]
    elems: [[T; C]; R],
}

impl<T, const R: usize, const C: usize> FixedMatrixEngine<T, R, C> {
    const NONEMPTY: () = {
        assert!(R >= 1, "a fixed matrix engine needs at least one row");
        assert!(C >= 1, "a fixed matrix engine needs at least one column");
    };

    pub fn from_fn(mut f: impl FnMut(usize, usize) -> T) -> Self {
        let () = Self::NONEMPTY;
        Self {
            elems: std::array::from_fn(|i| std::array::from_fn(|j| f(i, j))),
        }
    }

    /// All elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.elems.as_flattened()
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.elems.as_flattened_mut()
    }

    /// The element at row-major offset `k`, i.e. `(k / C, k % C)`.
    #[inline]
    pub fn at_offset(&self, k: usize) -> &T {
        &self.as_slice()[k]
    }

    #[inline]
    pub fn at_offset_mut(&mut self, k: usize) -> &mut T {
        &mut self.as_mut_slice()[k]
    }

    pub fn into_rows(self) -> [[T; C]; R] {
        self.elems
    }
}

impl<T: Scalar, const R: usize, const C: usize> FixedMatrixEngine<T, R, C> {
    pub fn new() -> Self {
        Self::from_fn(|_, _| T::default())
    }

    /// Fills the matrix row by row from `values`. Missing values stay at `T::default()` and
    /// values beyond `R * C` are dropped.
    pub fn from_values<U: Into<T>>(values: impl IntoIterator<Item = U>) -> Self {
        let mut engine = Self::new();
        for (slot, value) in engine.as_mut_slice().iter_mut().zip(values) {
            *slot = value.into();
        }
        engine
    }
}

impl<T: Scalar + UniformRand, const R: usize, const C: usize> FixedMatrixEngine<T, R, C> {
    pub fn rand<Rng: rand::Rng + ?Sized>(rng: &mut Rng) -> Self {
        Self::from_fn(|_, _| T::rand(rng))
    }
}

impl<T: Scalar, const R: usize, const C: usize> Default for FixedMatrixEngine<T, R, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const R: usize, const C: usize> From<[[T; C]; R]> for FixedMatrixEngine<T, R, C> {
    fn from(elems: [[T; C]; R]) -> Self {
        let () = Self::NONEMPTY;
        Self { elems }
    }
}

impl<T, const R: usize, const C: usize> Index<(usize, usize)> for FixedMatrixEngine<T, R, C> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.elems[i][j]
    }
}

impl<T, const R: usize, const C: usize> IndexMut<(usize, usize)> for FixedMatrixEngine<T, R, C> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        &mut self.elems[i][j]
    }
}

impl<T: Scalar, const R: usize, const C: usize> Engine for FixedMatrixEngine<T, R, C> {
    type Tag = MutableMatrixTag;
    type Element = T;
}

impl<T: Scalar, const R: usize, const C: usize> MatrixEngine for FixedMatrixEngine<T, R, C> {
    #[inline]
    fn get(&self, i: usize, j: usize) -> &T {
        debug_assert!(i < R && j < C);
        &self.elems[i][j]
    }

    #[inline]
    fn rows(&self) -> usize {
        R
    }

    #[inline]
    fn columns(&self) -> usize {
        C
    }

    #[inline]
    fn row_capacity(&self) -> usize {
        R
    }

    #[inline]
    fn column_capacity(&self) -> usize {
        C
    }
}

impl<T: Scalar, const R: usize, const C: usize> MatrixEngineMut for FixedMatrixEngine<T, R, C> {
    #[inline]
    fn get_mut(&mut self, i: usize, j: usize) -> &mut T {
        debug_assert!(i < R && j < C);
        &mut self.elems[i][j]
    }

    fn swap_rows(&mut self, i1: usize, i2: usize) {
        self.elems.swap(i1, i2);
    }

    fn swap_columns(&mut self, j1: usize, j2: usize) {
        if j1 != j2 {
            for row in self.elems.iter_mut() {
                row.swap(j1, j2);
            }
        }
    }

    fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.elems, &mut other.elems);
    }

    fn assign_from<S>(&mut self, src: &S) -> Result<()>
    where
        S: MatrixEngine,
        S::Element: Into<T>,
    {
        check_fixed_shape((R, C), src.size())?;
        copy_matrix(self, src);
        Ok(())
    }
}

impl<T: Scalar, const R: usize, const C: usize> Transpose for FixedMatrixEngine<T, R, C> {
    type Output = FixedMatrixEngine<T, C, R>;

    fn transpose(&self) -> Self::Output {
        FixedMatrixEngine::from_fn(|i, j| self.elems[j][i])
    }
}

impl<T1: Scalar, T2: Scalar, const R: usize, const C: usize>
    EnginePromotion<FixedMatrixEngine<T2, R, C>> for FixedMatrixEngine<T1, R, C>
{
    type Output<T> = Present<FixedMatrixEngine<T, R, C>>;
}

impl<T1: Scalar, T2: Scalar, A, const R: usize, const C: usize>
    EnginePromotion<DynMatrixEngine<T2, A>> for FixedMatrixEngine<T1, R, C>
where
    A: StorageProvider<Element = T2>,
{
    type Output<T> = Present<DynMatrixEngine<T, Rebound<A, T>>>;
}

impl<T: Zeroize, const R: usize, const C: usize> Zeroize for FixedMatrixEngine<T, R, C> {
    fn zeroize(&mut self) {
        self.elems.zeroize();
    }
}
