//! Scalar abstraction for the dense solvers
//!
//! [`ComplexField`] unifies real and complex scalars so the LU factorisation
//! can be written once and used for both the complex BEM systems and the
//! real-valued matrices that show up in tests and diagnostics.

use num_complex::Complex64;
use num_traits::{Float, FromPrimitive, NumAssign, One, Zero};
use std::fmt::Debug;
use std::ops::Neg;

/// Trait for scalar types usable in the dense solvers.
///
/// Provided for `Complex64` (BEM systems) and `f64`.
pub trait ComplexField:
    NumAssign + Clone + Copy + Send + Sync + Debug + Zero + One + Neg<Output = Self> + 'static
{
    /// The real number type underlying this field
    type Real: Float + NumAssign + FromPrimitive + Send + Sync + Debug + 'static;

    /// Squared magnitude |z|²
    fn norm_sqr(&self) -> Self::Real;

    /// Magnitude |z|
    fn norm(&self) -> Self::Real {
        self.norm_sqr().sqrt()
    }

    /// Create from a real value
    fn from_real(r: Self::Real) -> Self;

    /// Multiplicative inverse (1/z)
    fn inv(&self) -> Self;
}

impl ComplexField for Complex64 {
    type Real = f64;

    #[inline]
    fn norm_sqr(&self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        Complex64::new(r, 0.0)
    }

    #[inline]
    fn inv(&self) -> Self {
        let denom = ComplexField::norm_sqr(self);
        Complex64::new(self.re / denom, -self.im / denom)
    }
}

impl ComplexField for f64 {
    type Real = f64;

    #[inline]
    fn norm_sqr(&self) -> f64 {
        *self * *self
    }

    #[inline]
    fn norm(&self) -> f64 {
        self.abs()
    }

    #[inline]
    fn from_real(r: f64) -> Self {
        r
    }

    #[inline]
    fn inv(&self) -> Self {
        1.0 / *self
    }
}
