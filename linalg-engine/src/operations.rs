//! Result typing for arithmetic between façades.
//!
//! An [`OperationTraits`] implementation is the second type parameter of
//! [`Vector`](crate::Vector) and [`Matrix`](crate::Matrix). Each of its associated types is an
//! optional override: [`Absent`] defers to the computed default, [`Present<T>`] forces `T`.
//! The aliases in this module run the three-way resolution for a concrete pair of operands.

use std::ops::{Add, Mul};

use crate::engine::{Engine, EnginePromotion, EngineTag};
use crate::resolution::{Absent, Present, Resolved, TypeOption};

/// Per-operation overrides for element and engine result types.
pub trait OperationTraits: 'static {
    /// Element type of `T1 + T2`.
    type AdditionElement<T1, T2>: TypeOption;

    /// Element type of `T1 * T2`.
    type MultiplicationElement<T1, T2>: TypeOption;

    /// Engine holding the sum of an `E1` and an `E2`.
    type AdditionEngine<E1: Engine, E2: Engine>: TypeOption;
}

/// No overrides: every result type is computed from the operands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DefaultOperations;

impl OperationTraits for DefaultOperations {
    type AdditionElement<T1, T2> = Absent;
    type MultiplicationElement<T1, T2> = Absent;
    type AdditionEngine<E1: Engine, E2: Engine> = Absent;
}

/// Element type of `T1 + T2` under `OT`. Falls back to `T1`.
pub type AdditionElement<OT, T1, T2> = Resolved<
    <OT as OperationTraits>::AdditionElement<T1, T2>,
    Present<<T1 as Add<T2>>::Output>,
    T1,
>;

/// Element type of `T1 * T2` under `OT`. Falls back to `T1`.
pub type MultiplicationElement<OT, T1, T2> = Resolved<
    <OT as OperationTraits>::MultiplicationElement<T1, T2>,
    Present<<T1 as Mul<T2>>::Output>,
    T1,
>;

type AdditionEngineElement<OT, E1, E2> =
    AdditionElement<OT, <E1 as Engine>::Element, <E2 as Engine>::Element>;

/// Engine holding the sum of an `E1` and an `E2` under `OT`.
///
/// Without an override the engines' [`EnginePromotion`] decides; when that yields [`Absent`]
/// the result goes into the resizable engine of `E1`'s shape.
pub type AdditionEngine<OT, E1, E2> = Resolved<
    <OT as OperationTraits>::AdditionEngine<E1, E2>,
    <E1 as EnginePromotion<E2>>::Output<AdditionEngineElement<OT, E1, E2>>,
    <<E1 as Engine>::Tag as EngineTag>::Fallback<AdditionEngineElement<OT, E1, E2>>,
>;

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use nalgebra::Complex;

    use super::*;
    use crate::engine::{
        DynMatrixEngine, DynVectorEngine, FixedMatrixEngine, FixedVectorEngine, ReadOnlyVectorTag,
    };

    fn same<A: 'static, B: 'static>() -> bool {
        TypeId::of::<A>() == TypeId::of::<B>()
    }

    /// Widens every sum to `i64` and stores it on the heap.
    struct Widening;

    impl OperationTraits for Widening {
        type AdditionElement<T1, T2> = Present<i64>;
        type MultiplicationElement<T1, T2> = Absent;
        type AdditionEngine<E1: Engine, E2: Engine> = Present<DynVectorEngine<i64>>;
    }

    /// A read-only engine that does not know how to combine with anything.
    struct Constant;

    impl Engine for Constant {
        type Tag = ReadOnlyVectorTag;
        type Element = f32;
    }

    impl<const N: usize> EnginePromotion<FixedVectorEngine<f32, N>> for Constant {
        type Output<T> = Absent;
    }

    #[test]
    fn test_computed_elements() {
        assert!(same::<AdditionElement<DefaultOperations, f32, f32>, f32>());
        assert!(same::<MultiplicationElement<DefaultOperations, u8, u8>, u8>());
        assert!(same::<
            AdditionElement<DefaultOperations, Complex<f64>, Complex<f64>>,
            Complex<f64>,
        >());
    }

    #[test]
    fn test_element_override() {
        assert!(same::<AdditionElement<Widening, i8, i8>, i64>());
        assert!(same::<MultiplicationElement<Widening, i8, i8>, i8>());
    }

    #[test]
    fn test_fixed_promotion() {
        assert!(same::<
            AdditionEngine<DefaultOperations, FixedVectorEngine<f32, 3>, FixedVectorEngine<f32, 3>>,
            FixedVectorEngine<f32, 3>,
        >());
        assert!(same::<
            AdditionEngine<
                DefaultOperations,
                FixedMatrixEngine<u16, 2, 3>,
                FixedMatrixEngine<u16, 2, 3>,
            >,
            FixedMatrixEngine<u16, 2, 3>,
        >());
    }

    #[test]
    fn test_mixed_promotion_is_resizable() {
        assert!(same::<
            AdditionEngine<DefaultOperations, FixedVectorEngine<f64, 4>, DynVectorEngine<f64>>,
            DynVectorEngine<f64>,
        >());
        assert!(same::<
            AdditionEngine<DefaultOperations, DynMatrixEngine<i32>, FixedMatrixEngine<i32, 2, 2>>,
            DynMatrixEngine<i32>,
        >());
    }

    #[test]
    fn test_engine_override() {
        assert!(same::<
            AdditionEngine<Widening, FixedVectorEngine<i8, 3>, FixedVectorEngine<i8, 3>>,
            DynVectorEngine<i64>,
        >());
    }

    #[test]
    fn test_engine_fallback() {
        assert!(same::<
            AdditionEngine<DefaultOperations, Constant, FixedVectorEngine<f32, 2>>,
            DynVectorEngine<f32>,
        >());
    }
}
