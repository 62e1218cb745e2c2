use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};

use delegate::delegate;
use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::engine::{MatrixEngine, MatrixEngineMut, ResizableMatrixEngine, Transpose};
use crate::error::Result;
use crate::operations::{DefaultOperations, OperationTraits};
use crate::traits::{Conjugate, MatrixElement};

/// A matrix owning exactly one engine `E`, with result typing configured by `OT`.
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(serialize = "E: Serialize", deserialize = "E: Deserialize<'de>"))]
pub struct Matrix<E, OT = DefaultOperations>(
    pub(crate) E,
    #[serde(skip)] PhantomData<fn() -> OT>,
);

impl<E, OT> Matrix<E, OT> {
    pub fn from_engine(engine: E) -> Self {
        Matrix(engine, PhantomData)
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

impl<E, OT> Matrix<E, OT>
where
    E: MatrixEngine,
    E::Element: MatrixElement,
    OT: OperationTraits,
{
    delegate! {
        to self.0 {
            pub fn rows(&self) -> usize;
            pub fn columns(&self) -> usize;
            pub fn size(&self) -> (usize, usize);
            pub fn row_capacity(&self) -> usize;
            pub fn column_capacity(&self) -> usize;
            pub fn capacity(&self) -> (usize, usize);
        }
    }

    /// Element `(i, j)`, or `None` when either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<&E::Element> {
        (i < self.rows() && j < self.columns()).then(|| self.0.get(i, j))
    }

    pub fn is_square(&self) -> bool {
        self.rows() == self.columns()
    }
}

impl<E, OT> Matrix<E, OT>
where
    E: MatrixEngineMut,
    E::Element: MatrixElement,
    OT: OperationTraits,
{
    delegate! {
        to self.0 {
            pub fn swap_rows(&mut self, i1: usize, i2: usize);
            pub fn swap_columns(&mut self, j1: usize, j2: usize);
        }
    }

    pub fn get_mut(&mut self, i: usize, j: usize) -> Option<&mut E::Element> {
        if i < self.rows() && j < self.columns() {
            Some(self.0.get_mut(i, j))
        } else {
            None
        }
    }

    pub fn swap(&mut self, other: &mut Self) {
        self.0.swap(&mut other.0);
    }

    /// Copies `other` into `self`, converting elements. See [`MatrixEngineMut::assign_from`].
    pub fn assign<E2, OT2>(&mut self, other: &Matrix<E2, OT2>) -> Result<()>
    where
        E2: MatrixEngine,
        E2::Element: Into<E::Element>,
    {
        self.0.assign_from(&other.0)
    }
}

impl<E, OT> Matrix<E, OT>
where
    E: ResizableMatrixEngine,
    E::Element: MatrixElement,
    OT: OperationTraits,
{
    delegate! {
        to self.0 {
            pub fn resize(&mut self, rows: usize, columns: usize);
            pub fn reserve(&mut self, row_capacity: usize, column_capacity: usize);
            pub fn resize_with_capacity(
                &mut self,
                rows: usize,
                columns: usize,
                row_capacity: usize,
                column_capacity: usize,
            );
        }
    }
}

impl<E, OT> Matrix<E, OT>
where
    E: Transpose,
    E::Element: MatrixElement,
    OT: OperationTraits,
{
    /// The transpose, in a new engine.
    pub fn t(&self) -> Matrix<E::Output, OT> {
        Matrix::from_engine(self.0.transpose())
    }

    /// The conjugate transpose. Same as [`t`](Self::t) for real elements.
    pub fn h(&self) -> Matrix<E::Output, OT>
    where
        E::Element: Conjugate,
    {
        let mut out = self.0.transpose();
        if <E::Element as Conjugate>::IS_COMPLEX {
            let (rows, columns) = out.size();
            for i in 0..rows {
                for j in 0..columns {
                    let x = *out.get(i, j);
                    *out.get_mut(i, j) = x.conjugate();
                }
            }
        }
        Matrix::from_engine(out)
    }
}

impl<E: Clone, OT> Clone for Matrix<E, OT> {
    fn clone(&self) -> Self {
        Matrix(self.0.clone(), PhantomData)
    }
}

impl<E: Copy, OT> Copy for Matrix<E, OT> {}

impl<E: Default, OT> Default for Matrix<E, OT> {
    fn default() -> Self {
        Matrix(E::default(), PhantomData)
    }
}

impl<E: fmt::Debug, OT> fmt::Debug for Matrix<E, OT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Matrix").field(&self.0).finish()
    }
}

impl<E: PartialEq, OT> PartialEq for Matrix<E, OT> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<E: Eq, OT> Eq for Matrix<E, OT> {}

impl<E, OT> From<E> for Matrix<E, OT>
where
    E: MatrixEngine,
{
    fn from(engine: E) -> Self {
        Matrix::from_engine(engine)
    }
}

impl<E: MatrixEngine, OT> Index<(usize, usize)> for Matrix<E, OT> {
    type Output = E::Element;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &E::Element {
        self.0.get(i, j)
    }
}

impl<E: MatrixEngineMut, OT> IndexMut<(usize, usize)> for Matrix<E, OT> {
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut E::Element {
        self.0.get_mut(i, j)
    }
}

impl<E: Zeroize, OT> Zeroize for Matrix<E, OT> {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
