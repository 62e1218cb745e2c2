use std::ops::{Index, IndexMut};

use log::{debug, trace};
use zeroize::Zeroize;

use crate::engine::assign::copy_matrix;
use crate::engine::{
    Engine, EnginePromotion, MatrixEngine, MatrixEngineMut, ResizableMatrixEngine,
    ResizableMatrixTag, Transpose,
};
use crate::error::Result;
use crate::resolution::Present;
use crate::storage::{HeapStorage, Rebound, StorageProvider};
use crate::traits::Scalar;

/// Slots needed for a `row_capacity x column_capacity` buffer.
fn buffer_len(row_capacity: usize, column_capacity: usize) -> usize {
    row_capacity
        .checked_mul(column_capacity)
        .unwrap_or_else(|| {
            panic!("matrix engine capacity overflow: {row_capacity}x{column_capacity}")
        })
}

/// Dense matrix engine whose shape can change at runtime.
///
/// The buffer always spans `row_capacity * column_capacity` slots laid out row-major with a
/// stride of `column_capacity`; slots outside the current shape hold `T::default()`.
#[derive(Clone, Debug)]
pub struct DynMatrixEngine<T, A = HeapStorage<T>>
where
    A: StorageProvider<Element = T>,
{
    elems: Vec<T>,
    rows: usize,
    columns: usize,
    row_capacity: usize,
    column_capacity: usize,
    provider: A,
}

impl<T: Scalar, A: StorageProvider<Element = T>> DynMatrixEngine<T, A> {
    pub fn new() -> Self {
        Self::with_capacity(0, 0, 0, 0)
    }

    pub fn with_size(rows: usize, columns: usize) -> Self {
        Self::with_capacity(rows, columns, rows, columns)
    }

    pub fn with_capacity(
        rows: usize,
        columns: usize,
        row_capacity: usize,
        column_capacity: usize,
    ) -> Self {
        let row_capacity = row_capacity.max(rows);
        let column_capacity = column_capacity.max(columns);
        let len = buffer_len(row_capacity, column_capacity);
        let provider = A::default();
        let mut elems = provider.allocate(len);
        elems.resize(len, T::default());
        Self {
            elems,
            rows,
            columns,
            row_capacity,
            column_capacity,
            provider,
        }
    }

    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut engine = Self::with_size(rows, columns);
        for i in 0..rows {
            for j in 0..columns {
                engine.elems[i * columns + j] = f(i, j);
            }
        }
        engine
    }

    /// A `rows x columns` matrix filled row by row from `values`. Missing values stay at
    /// `T::default()` and surplus values are dropped.
    pub fn from_values<U: Into<T>>(
        rows: usize,
        columns: usize,
        values: impl IntoIterator<Item = U>,
    ) -> Self {
        let mut engine = Self::with_size(rows, columns);
        for (slot, value) in engine.elems.iter_mut().zip(values) {
            *slot = value.into();
        }
        engine
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.rows && j < self.columns);
        i * self.column_capacity + j
    }

    /// Row `i` as a contiguous slice.
    pub fn row(&self, i: usize) -> &[T] {
        let start = i * self.column_capacity;
        &self.elems[start..start + self.columns]
    }

    /// The elements of the current shape in row-major order.
    pub fn iter_row_major(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.rows).flat_map(move |i| self.row(i).iter())
    }

    pub fn provider(&self) -> &A {
        &self.provider
    }

    fn clear_outside(&mut self, rows: usize, columns: usize) {
        for i in 0..self.rows {
            let start = if i < rows { columns } else { 0 };
            for j in start..self.columns {
                self.elems[i * self.column_capacity + j] = T::default();
            }
        }
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> Default for DynMatrixEngine<T, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> PartialEq for DynMatrixEngine<T, A> {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.iter_row_major().eq(other.iter_row_major())
    }
}

impl<T: Scalar + Eq, A: StorageProvider<Element = T>> Eq for DynMatrixEngine<T, A> {}

impl<T: Scalar, A: StorageProvider<Element = T>> Index<(usize, usize)> for DynMatrixEngine<T, A> {
    type Output = T;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &T {
        &self.elems[self.offset(i, j)]
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> IndexMut<(usize, usize)>
    for DynMatrixEngine<T, A>
{
    #[inline]
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut T {
        let k = self.offset(i, j);
        &mut self.elems[k]
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> Engine for DynMatrixEngine<T, A> {
    type Tag = ResizableMatrixTag;
    type Element = T;
}

impl<T: Scalar, A: StorageProvider<Element = T>> MatrixEngine for DynMatrixEngine<T, A> {
    #[inline]
    fn get(&self, i: usize, j: usize) -> &T {
        &self[(i, j)]
    }

    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    fn row_capacity(&self) -> usize {
        self.row_capacity
    }

    #[inline]
    fn column_capacity(&self) -> usize {
        self.column_capacity
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> MatrixEngineMut for DynMatrixEngine<T, A> {
    #[inline]
    fn get_mut(&mut self, i: usize, j: usize) -> &mut T {
        &mut self[(i, j)]
    }

    fn swap_rows(&mut self, i1: usize, i2: usize) {
        if i1 != i2 {
            for j in 0..self.columns {
                self.elems
                    .swap(i1 * self.column_capacity + j, i2 * self.column_capacity + j);
            }
        }
    }

    fn swap_columns(&mut self, j1: usize, j2: usize) {
        if j1 != j2 {
            for i in 0..self.rows {
                self.elems
                    .swap(i * self.column_capacity + j1, i * self.column_capacity + j2);
            }
        }
    }

    fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    fn assign_from<S>(&mut self, src: &S) -> Result<()>
    where
        S: MatrixEngine,
        S::Element: Into<T>,
    {
        if src.size() != self.size() {
            debug!(
                "resizing matrix engine from {}x{} to {}x{} for assignment",
                self.rows,
                self.columns,
                src.rows(),
                src.columns()
            );
            self.resize(src.rows(), src.columns());
        }
        copy_matrix(self, src);
        Ok(())
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> ResizableMatrixEngine for DynMatrixEngine<T, A> {
    fn resize(&mut self, rows: usize, columns: usize) {
        self.reserve(rows, columns);
        self.clear_outside(rows, columns);
        self.rows = rows;
        self.columns = columns;
    }

    fn reserve(&mut self, row_capacity: usize, column_capacity: usize) {
        if row_capacity <= self.row_capacity && column_capacity <= self.column_capacity {
            return;
        }
        let row_capacity = row_capacity.max(self.row_capacity);
        let column_capacity = column_capacity.max(self.column_capacity);
        trace!(
            "reallocating matrix engine storage from {}x{} to {}x{}",
            self.row_capacity,
            self.column_capacity,
            row_capacity,
            column_capacity
        );

        let len = buffer_len(row_capacity, column_capacity);
        let mut elems = self.provider.allocate(len);
        elems.resize(len, T::default());
        for i in 0..self.rows {
            let dst = i * column_capacity;
            elems[dst..dst + self.columns].copy_from_slice(self.row(i));
        }
        self.elems = elems;
        self.row_capacity = row_capacity;
        self.column_capacity = column_capacity;
    }
}

impl<T: Scalar, A: StorageProvider<Element = T>> Transpose for DynMatrixEngine<T, A> {
    type Output = Self;

    fn transpose(&self) -> Self {
        Self::from_fn(self.columns, self.rows, |i, j| self[(j, i)])
    }
}

impl<T1: Scalar, A, E2> EnginePromotion<E2> for DynMatrixEngine<T1, A>
where
    A: StorageProvider<Element = T1>,
    E2: MatrixEngine,
{
    type Output<T> = Present<DynMatrixEngine<T, Rebound<A, T>>>;
}

impl<T: Zeroize, A: StorageProvider<Element = T>> Zeroize for DynMatrixEngine<T, A> {
    fn zeroize(&mut self) {
        for x in self.elems.iter_mut() {
            x.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::FixedMatrixEngine;

    crate::test_matrix_engine_contract!(
        DynMatrixEngine<f32>,
        DynMatrixEngine::with_capacity(3, 4, 5, 6)
    );

    fn counting(rows: usize, columns: usize) -> DynMatrixEngine<i32> {
        DynMatrixEngine::from_fn(rows, columns, |i, j| (10 * i + j) as i32)
    }

    #[test]
    fn test_from_values() {
        let m = DynMatrixEngine::<i32>::from_values(2, 3, [1, 2, 3, 4]);
        assert_eq!(m.row(0), &[1, 2, 3]);
        assert_eq!(m.row(1), &[4, 0, 0]);
    }

    #[test]
    fn test_with_capacity() {
        let m = DynMatrixEngine::<u8>::with_capacity(2, 3, 4, 5);
        assert_eq!(m.size(), (2, 3));
        assert_eq!(m.capacity(), (4, 5));

        let m = DynMatrixEngine::<u8>::with_capacity(2, 3, 1, 1);
        assert_eq!(m.capacity(), (2, 3));
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_with_capacity_overflow() {
        let _ = DynMatrixEngine::<u8>::with_capacity(0, 0, usize::MAX, 2);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn test_reserve_overflow() {
        let mut m = counting(1, 1);
        m.reserve(usize::MAX / 2, 3);
    }

    #[test]
    fn test_resize_grow_and_shrink() {
        let mut m = counting(2, 2);
        m.resize(3, 4);
        assert_eq!(m.size(), (3, 4));
        assert_eq!(m.row(0), &[0, 1, 0, 0]);
        assert_eq!(m.row(1), &[10, 11, 0, 0]);
        assert_eq!(m.row(2), &[0, 0, 0, 0]);

        m.resize(1, 1);
        assert_eq!(m.row(0), &[0]);
        m.resize(2, 2);
        assert_eq!(m.row(0), &[0, 0]);
        assert_eq!(m.row(1), &[0, 0]);
    }

    #[test]
    fn test_reserve_keeps_elements() {
        let mut m = counting(2, 3);
        m.reserve(8, 8);
        assert_eq!(m.capacity(), (8, 8));
        assert_eq!(m, counting(2, 3));
        m.reserve(1, 1);
        assert_eq!(m.capacity(), (8, 8));
    }

    #[test]
    fn test_resize_with_capacity() {
        let mut m = counting(1, 1);
        m.resize_with_capacity(2, 2, 6, 7);
        assert_eq!(m.size(), (2, 2));
        assert_eq!(m.capacity(), (6, 7));
    }

    #[test]
    fn test_swap_rows_and_columns() {
        let mut m = counting(3, 2);
        m.reserve(5, 5);
        m.swap_rows(0, 2);
        assert_eq!(m.row(0), &[20, 21]);
        assert_eq!(m.row(2), &[0, 1]);
        m.swap_columns(0, 1);
        assert_eq!(m.row(0), &[21, 20]);
        m.swap_columns(0, 1);
        m.swap_rows(0, 2);
        assert_eq!(m, counting(3, 2));
    }

    #[test]
    fn test_assign_resizes() {
        let mut dst = DynMatrixEngine::<f64>::with_size(5, 1);
        let src = FixedMatrixEngine::<f32, 2, 3>::from_values([1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0]);
        dst.assign_from(&src).unwrap();
        assert_eq!(dst.size(), (2, 3));
        assert_eq!(dst.row(1), &[4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_transpose() {
        let m = counting(2, 3);
        let t = m.transpose();
        assert_eq!(t.size(), (3, 2));
        assert_eq!(t[(2, 1)], 12);
        assert_eq!(t.transpose(), m);
    }
}
