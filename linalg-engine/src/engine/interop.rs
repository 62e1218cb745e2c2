//! Conversions between engines and `nalgebra` matrices.
//!
//! `nalgebra` stores column-major, the engines store row-major, so every conversion goes through
//! `(i, j)` indexing rather than a raw buffer copy.

use nalgebra::{DMatrix, DVector, SMatrix, SVector};

use crate::engine::{
    DynMatrixEngine, DynVectorEngine, FixedMatrixEngine, FixedVectorEngine, MatrixEngine,
    VectorEngine,
};
use crate::storage::StorageProvider;
use crate::traits::Scalar;

impl<T: Scalar, const N: usize> From<FixedVectorEngine<T, N>> for SVector<T, N> {
    fn from(v: FixedVectorEngine<T, N>) -> Self {
        SVector::<T, N>::from_fn(|i, _| v[i])
    }
}

impl<T: Scalar, const N: usize> From<SVector<T, N>> for FixedVectorEngine<T, N> {
    fn from(v: SVector<T, N>) -> Self {
        FixedVectorEngine::from_fn(|i| v[i])
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<FixedMatrixEngine<T, R, C>>
    for SMatrix<T, R, C>
{
    fn from(m: FixedMatrixEngine<T, R, C>) -> Self {
        SMatrix::<T, R, C>::from_fn(|i, j| m[(i, j)])
    }
}

impl<T: Scalar, const R: usize, const C: usize> From<SMatrix<T, R, C>>
    for FixedMatrixEngine<T, R, C>
{
    fn from(m: SMatrix<T, R, C>) -> Self {
        FixedMatrixEngine::from_fn(|i, j| m[(i, j)])
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> From<DynVectorEngine<T, A>> for DVector<T> {
    fn from(v: DynVectorEngine<T, A>) -> Self {
        DVector::from_iterator(v.size(), v.iter().copied())
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> From<DVector<T>> for DynVectorEngine<T, A> {
    fn from(v: DVector<T>) -> Self {
        DynVectorEngine::from_values(v.iter().copied())
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> From<DynMatrixEngine<T, A>> for DMatrix<T> {
    fn from(m: DynMatrixEngine<T, A>) -> Self {
        DMatrix::from_fn(m.rows(), m.columns(), |i, j| m[(i, j)])
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> From<DMatrix<T>> for DynMatrixEngine<T, A> {
    fn from(m: DMatrix<T>) -> Self {
        DynMatrixEngine::from_fn(m.nrows(), m.ncols(), |i, j| m[(i, j)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ResizableMatrixEngine;

    #[test]
    fn test_fixed_matrix_layout() {
        let m = FixedMatrixEngine::from([[1, 2, 3], [4, 5, 6]]);
        let n: SMatrix<i32, 2, 3> = m.into();
        assert_eq!(n, SMatrix::<i32, 2, 3>::new(1, 2, 3, 4, 5, 6));
        assert_eq!(FixedMatrixEngine::from(n), m);
    }

    #[test]
    fn test_fixed_vector() {
        let v = FixedVectorEngine::from([1.0, 2.0]);
        let n: SVector<f64, 2> = v.into();
        assert_eq!(n, SVector::<f64, 2>::new(1.0, 2.0));
    }

    #[test]
    fn test_dynamic_matrix_layout() {
        let mut m = DynMatrixEngine::<u16>::from_values(2, 2, [1u16, 2, 3, 4]);
        m.reserve(4, 4);
        let n: DMatrix<u16> = m.clone().into();
        assert_eq!(n, DMatrix::from_row_slice(2, 2, &[1, 2, 3, 4]));
        assert_eq!(DynMatrixEngine::<u16>::from(n), m);
    }

    #[test]
    fn test_dynamic_vector() {
        let v = DynVectorEngine::<i8>::from_values([3i8, -1]);
        let n: DVector<i8> = v.clone().into();
        assert_eq!(n.as_slice(), &[3, -1]);
        assert_eq!(DynVectorEngine::<i8>::from(n), v);
    }
}
