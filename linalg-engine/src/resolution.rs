//! Three-way precedence between an explicit override, a computed default and a fallback.
//!
//! Resolution happens entirely in the type system: `(override, computed, fallback)` triples
//! implement [`Resolve`], and [`Resolved`] names the winner. An override always wins, a computed
//! default wins when no override is given, and the fallback is taken otherwise. A triple that
//! cannot be resolved (for example because the computed default requires a trait the operands do
//! not implement) fails to type-check.

use std::marker::PhantomData;

/// The empty slot of a type-level option.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Absent;

/// A filled slot of a type-level option, carrying `T`.
#[derive(Debug)]
pub struct Present<T>(PhantomData<T>);

pub trait TypeOption {
    const IS_PRESENT: bool;
}

impl TypeOption for Absent {
    const IS_PRESENT: bool = false;
}

impl<T> TypeOption for Present<T> {
    const IS_PRESENT: bool = true;
}

pub trait Resolve {
    type Output;
}

impl<T, C, F> Resolve for (Present<T>, C, F) {
    type Output = T;
}

impl<C, F> Resolve for (Absent, Present<C>, F) {
    type Output = C;
}

impl<F> Resolve for (Absent, Absent, F) {
    type Output = F;
}

/// The winning type among override `O`, computed default `C` and fallback `F`.
pub type Resolved<O, C, F> = <(O, C, F) as Resolve>::Output;

/// Value-level counterpart of [`Resolved`], for strategies picked once at construction time.
pub fn resolve<T>(overriding: Option<T>, computed: Option<T>, fallback: T) -> T {
    overriding.or(computed).unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::*;

    fn same<A: 'static, B: 'static>() -> bool {
        TypeId::of::<A>() == TypeId::of::<B>()
    }

    #[test]
    fn test_override_wins() {
        assert!(same::<Resolved<Present<u8>, Present<u16>, u32>, u8>());
        assert!(same::<Resolved<Present<u8>, Absent, u32>, u8>());
    }

    #[test]
    fn test_computed_wins_without_override() {
        assert!(same::<Resolved<Absent, Present<u16>, u32>, u16>());
    }

    #[test]
    fn test_fallback() {
        assert!(same::<Resolved<Absent, Absent, u32>, u32>());
    }

    #[test]
    fn test_is_present() {
        assert!(<Present<f64> as TypeOption>::IS_PRESENT);
        assert!(!<Absent as TypeOption>::IS_PRESENT);
    }

    #[test]
    fn test_resolve_values() {
        assert_eq!(resolve(Some(1), Some(2), 3), 1);
        assert_eq!(resolve(None, Some(2), 3), 2);
        assert_eq!(resolve(None, None, 3), 3);
    }
}
