use std::ops::{Add, Mul, Neg, Sub};

use nalgebra::Complex;
use num_traits::{Num, Zero};

/// Anything an engine can store: copyable, default-constructible and comparable.
///
/// Engines fill fresh slots with `T::default()`, which is the additive identity for every
/// arithmetic type. Non-arithmetic elements are left at whatever their own default is.
pub trait Scalar: nalgebra::Scalar + Copy + Default {}
impl<T> Scalar for T where T: nalgebra::Scalar + Copy + Default {}

/// A valid vector/matrix element: a [`Scalar`] that is closed under the ring operations.
pub trait MatrixElement:
    Scalar + Zero + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self>
{
}
impl<T> MatrixElement for T where
    T: Scalar + Zero + Add<Output = T> + Sub<Output = T> + Mul<Output = T>
{
}

/// Classifies elements as real- or complex-valued.
///
/// The façade uses this to decide whether a conjugate transpose has to touch the elements.
pub trait Conjugate: Scalar {
    const IS_COMPLEX: bool = false;

    fn conjugate(self) -> Self {
        self
    }
}

macro_rules! impl_real_conjugate {
    ($($t:ty),*) => {
        $(impl Conjugate for $t {})*
    };
}

impl_real_conjugate!(f32, f64, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T> Conjugate for Complex<T>
where
    T: Scalar + Num + Neg<Output = T>,
{
    const IS_COMPLEX: bool = true;

    fn conjugate(self) -> Self {
        self.conj()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_complex<T: Conjugate>() -> bool {
        T::IS_COMPLEX
    }

    #[test]
    fn test_complex_classification() {
        assert!(!is_complex::<f64>());
        assert!(!is_complex::<i32>());
        assert!(is_complex::<Complex<f32>>());
    }

    #[test]
    fn test_conjugate() {
        assert_eq!(3.5f64.conjugate(), 3.5);
        assert_eq!(Complex::new(1, 2).conjugate(), Complex::new(1, -2));
    }
}
