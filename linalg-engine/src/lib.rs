//! Vector and matrix value types over pluggable storage engines.
//!
//! A façade ([`Vector`], [`Matrix`]) owns one engine and adds checked access on top of the
//! engine contract in [`engine`]. Which element and engine type a combined result uses is decided
//! at compile time by the precedence rules in [`resolution`], configured per façade through
//! [`operations::OperationTraits`].

pub mod engine;
pub mod error;
pub mod matrix;
pub mod operations;
pub mod resolution;
pub mod storage;
pub mod traits;
pub mod vector;

pub use error::{EngineError, Result};
pub use matrix::Matrix;
pub use operations::{DefaultOperations, OperationTraits};
pub use vector::Vector;

pub type FixedVector<T, const N: usize, OT = DefaultOperations> =
    Vector<engine::FixedVectorEngine<T, N>, OT>;
pub type FixedMatrix<T, const R: usize, const C: usize, OT = DefaultOperations> =
    Matrix<engine::FixedMatrixEngine<T, R, C>, OT>;
pub type DynVector<T, OT = DefaultOperations> = Vector<engine::DynVectorEngine<T>, OT>;
pub type DynMatrix<T, OT = DefaultOperations> = Matrix<engine::DynMatrixEngine<T>, OT>;
