//! The storage engine contract.
//!
//! An engine owns the elements of one vector or matrix and knows nothing about arithmetic. The
//! contract is split by capability: every engine implements [`Engine`] and one of
//! [`VectorEngine`] / [`MatrixEngine`]; mutable engines add [`VectorEngineMut`] /
//! [`MatrixEngineMut`]; only resizable engines implement [`ResizableVectorEngine`] /
//! [`ResizableMatrixEngine`]. Each engine carries exactly one category tag from a closed set.
//!
//! Indexed access takes indices the caller has to keep in range. An out-of-range index panics
//! rather than reading foreign memory.

use crate::error::Result;
use crate::resolution::TypeOption;
use crate::traits::Scalar;

pub(crate) mod assign;
mod dynamic_matrix;
mod dynamic_vector;
mod fixed_matrix;
mod fixed_vector;
mod interop;
mod serialization;

pub use dynamic_matrix::DynMatrixEngine;
pub use dynamic_vector::DynVectorEngine;
pub use fixed_matrix::FixedMatrixEngine;
pub use fixed_vector::FixedVectorEngine;

/// Runtime view of an engine's category tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EngineCategory {
    ReadOnlyVector,
    MutableVector,
    ResizableVector,
    ReadOnlyMatrix,
    MutableMatrix,
    ResizableMatrix,
}

impl EngineCategory {
    pub const fn is_vector(self) -> bool {
        matches!(
            self,
            EngineCategory::ReadOnlyVector
                | EngineCategory::MutableVector
                | EngineCategory::ResizableVector
        )
    }

    pub const fn is_matrix(self) -> bool {
        !self.is_vector()
    }

    pub const fn is_mutable(self) -> bool {
        !matches!(
            self,
            EngineCategory::ReadOnlyVector | EngineCategory::ReadOnlyMatrix
        )
    }

    pub const fn is_resizable(self) -> bool {
        matches!(
            self,
            EngineCategory::ResizableVector | EngineCategory::ResizableMatrix
        )
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Compile-time category marker. The set of tags is closed.
pub trait EngineTag: sealed::Sealed + Copy + Default + 'static {
    const CATEGORY: EngineCategory;

    /// Engine holding `T` that a result of this shape falls back to when nothing better is known.
    type Fallback<T>;
}

macro_rules! engine_tag {
    ($(#[$doc:meta])* $name:ident, $category:ident, $fallback:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name;

        impl sealed::Sealed for $name {}

        impl EngineTag for $name {
            const CATEGORY: EngineCategory = EngineCategory::$category;
            type Fallback<T> = $fallback<T>;
        }
    };
}

engine_tag!(
    /// Vector engines without mutable element access (views).
    ReadOnlyVectorTag, ReadOnlyVector, DynVectorEngine
);
engine_tag!(MutableVectorTag, MutableVector, DynVectorEngine);
engine_tag!(ResizableVectorTag, ResizableVector, DynVectorEngine);
engine_tag!(
    /// Matrix engines without mutable element access (views).
    ReadOnlyMatrixTag, ReadOnlyMatrix, DynMatrixEngine
);
engine_tag!(MutableMatrixTag, MutableMatrix, DynMatrixEngine);
engine_tag!(ResizableMatrixTag, ResizableMatrix, DynMatrixEngine);

pub trait Engine {
    type Tag: EngineTag;
    type Element: Scalar;

    const CATEGORY: EngineCategory = <Self::Tag as EngineTag>::CATEGORY;
    const IS_RESIZABLE: bool = Self::CATEGORY.is_resizable();
}

pub trait VectorEngine: Engine {
    type Iter<'a>: ExactSizeIterator<Item = &'a Self::Element> + Clone
    where
        Self: 'a;

    /// Element `i`. Requires `i < self.size()`.
    fn get(&self, i: usize) -> &Self::Element;

    /// Iterates over exactly `size()` elements, in index order.
    fn iter(&self) -> Self::Iter<'_>;

    fn size(&self) -> usize;
    fn capacity(&self) -> usize;

    /// Number of live elements; equal to `size()` for every dense engine.
    fn elements(&self) -> usize {
        self.size()
    }
}

pub trait VectorEngineMut: VectorEngine {
    type IterMut<'a>: ExactSizeIterator<Item = &'a mut Self::Element>
    where
        Self: 'a;

    /// Element `i`. Requires `i < self.size()`.
    fn get_mut(&mut self, i: usize) -> &mut Self::Element;

    fn iter_mut(&mut self) -> Self::IterMut<'_>;

    /// Exchanges elements `i` and `j`; a no-op when `i == j`.
    fn swap_elements(&mut self, i: usize, j: usize);

    /// Exchanges the full contents of two engines of the same type.
    fn swap(&mut self, other: &mut Self);

    /// Copies `src` element-wise into `self`.
    ///
    /// Resizable engines first take on the size of `src`. Fixed engines return
    /// [`EngineError::InvalidSize`](crate::error::EngineError::InvalidSize) on a size mismatch
    /// and are left untouched.
    fn assign_from<S>(&mut self, src: &S) -> Result<()>
    where
        S: VectorEngine,
        S::Element: Into<Self::Element>;
}

pub trait ResizableVectorEngine: VectorEngineMut {
    /// Changes the size to `n`, keeping the first `min(n, size())` elements and
    /// default-filling the rest.
    fn resize(&mut self, n: usize);

    /// Makes room for at least `capacity` elements without changing the size.
    fn reserve(&mut self, capacity: usize);
}

pub trait MatrixEngine: Engine {
    /// Element `(i, j)`. Requires `i < self.rows()` and `j < self.columns()`.
    fn get(&self, i: usize, j: usize) -> &Self::Element;

    fn rows(&self) -> usize;
    fn columns(&self) -> usize;

    fn size(&self) -> (usize, usize) {
        (self.rows(), self.columns())
    }

    fn row_capacity(&self) -> usize;
    fn column_capacity(&self) -> usize;

    fn capacity(&self) -> (usize, usize) {
        (self.row_capacity(), self.column_capacity())
    }
}

pub trait MatrixEngineMut: MatrixEngine {
    /// Element `(i, j)`. Requires `i < self.rows()` and `j < self.columns()`.
    fn get_mut(&mut self, i: usize, j: usize) -> &mut Self::Element;

    /// Exchanges rows `i1` and `i2`; a no-op when they are equal.
    fn swap_rows(&mut self, i1: usize, i2: usize);

    /// Exchanges columns `j1` and `j2`; a no-op when they are equal.
    fn swap_columns(&mut self, j1: usize, j2: usize);

    fn swap(&mut self, other: &mut Self);

    /// Copies `src` element-wise into `self`.
    ///
    /// Resizable engines first take on the shape of `src`. Fixed engines return
    /// [`EngineError::InvalidSize`](crate::error::EngineError::InvalidSize) on a shape mismatch
    /// and are left untouched.
    fn assign_from<S>(&mut self, src: &S) -> Result<()>
    where
        S: MatrixEngine,
        S::Element: Into<Self::Element>;
}

pub trait ResizableMatrixEngine: MatrixEngineMut {
    /// Changes the shape, keeping the overlapping block and default-filling the rest.
    fn resize(&mut self, rows: usize, columns: usize);

    /// Makes room for at least `row_capacity x column_capacity` elements without changing the shape.
    fn reserve(&mut self, row_capacity: usize, column_capacity: usize);

    fn resize_with_capacity(
        &mut self,
        rows: usize,
        columns: usize,
        row_capacity: usize,
        column_capacity: usize,
    ) {
        self.reserve(row_capacity, column_capacity);
        self.resize(rows, columns);
    }
}

/// Owned transpose of a matrix engine.
pub trait Transpose: MatrixEngine {
    type Output: MatrixEngineMut<Element = Self::Element>;

    fn transpose(&self) -> Self::Output;
}

/// The engine computed for a result that combines `Self` with `E2` and holds elements of type `T`.
///
/// `Output<T>` is [`Present`](crate::resolution::Present) when a combination has a natural
/// result engine and [`Absent`](crate::resolution::Absent) when the caller should use the
/// tag's fallback. Combinations that make no sense at all (a vector with a matrix, fixed extents
/// that disagree) have no implementation and are rejected at compile time.
pub trait EnginePromotion<E2: Engine>: Engine {
    type Output<T>: TypeOption;
}

/// Checks the vector engine contract on `$E`, whose elements must be convertible from `u8`.
///
/// The engine under test comes from `$make`, which must yield freshly default-filled engines of
/// one size; it defaults to `<$E>::default()`. Resizable engines should pass a non-empty one.
#[macro_export]
macro_rules! test_vector_engine_contract {
    ($E:ty) => {
        $crate::test_vector_engine_contract!($E, <$E>::default());
    };
    ($E:ty, $make:expr) => {
        #[test]
        fn test_vector_engine_contract() {
            use $crate::engine::{Engine, VectorEngine, VectorEngineMut};
            type Elem = <$E as Engine>::Element;

            let make = || -> $E { $make };
            let mut engine = make();
            assert!(<$E as Engine>::CATEGORY.is_vector());
            assert_eq!(engine.iter().len(), engine.size());
            assert_eq!(engine.elements(), engine.size());
            assert!(engine.capacity() >= engine.size());
            assert!(engine.iter().all(|x| *x == Elem::default()));

            for (k, x) in engine.iter_mut().enumerate() {
                *x = Elem::from((k % 251) as u8);
            }
            let original = engine.clone();
            let n = engine.size();
            for i in 0..n {
                for j in 0..n {
                    engine.swap_elements(i, j);
                    engine.swap_elements(i, j);
                    assert!(engine.iter().eq(original.iter()));
                }
            }

            let mut other = make();
            engine.swap(&mut other);
            assert!(other.iter().eq(original.iter()));
            engine.swap(&mut other);
            assert!(engine.iter().eq(original.iter()));
        }
    };
}

/// Checks the matrix engine contract on `$E`, whose elements must be convertible from `u8`.
///
/// `$make` works as in [`test_vector_engine_contract!`].
#[macro_export]
macro_rules! test_matrix_engine_contract {
    ($E:ty) => {
        $crate::test_matrix_engine_contract!($E, <$E>::default());
    };
    ($E:ty, $make:expr) => {
        #[test]
        fn test_matrix_engine_contract() {
            use $crate::engine::{Engine, MatrixEngine, MatrixEngineMut};
            type Elem = <$E as Engine>::Element;

            let make = || -> $E { $make };
            let mut engine = make();
            assert!(<$E as Engine>::CATEGORY.is_matrix());
            assert_eq!(engine.size(), (engine.rows(), engine.columns()));
            assert!(engine.row_capacity() >= engine.rows());
            assert!(engine.column_capacity() >= engine.columns());

            let (rows, columns) = engine.size();
            for i in 0..rows {
                for j in 0..columns {
                    assert!(*engine.get(i, j) == Elem::default());
                    *engine.get_mut(i, j) = Elem::from(((i * columns + j) % 251) as u8);
                }
            }
            let original = engine.clone();
            let same = |a: &$E, b: &$E| {
                (0..rows).all(|i| (0..columns).all(|j| a.get(i, j) == b.get(i, j)))
            };
            for i in 0..rows {
                for k in 0..rows {
                    engine.swap_rows(i, k);
                    engine.swap_rows(i, k);
                    assert!(same(&engine, &original));
                }
            }
            for j in 0..columns {
                for k in 0..columns {
                    engine.swap_columns(j, k);
                    engine.swap_columns(j, k);
                    assert!(same(&engine, &original));
                }
            }

            let mut other = make();
            engine.swap(&mut other);
            engine.swap(&mut other);
            assert!(same(&engine, &original));
        }
    };
}
