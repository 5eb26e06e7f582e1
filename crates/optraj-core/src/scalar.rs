//! Scalar field abstraction for model evaluation.
//!
//! Cost and dynamics functions are written once against [`Scalar`] and can
//! then be evaluated on plain `f64` or differentiated by running them on the
//! dual types in [`crate::dual`]. The operator bounds include the assigning
//! forms so nalgebra's blanket `Closed*` impls apply and generic matrix
//! arithmetic over any `Scalar` works out of the box.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

/// Field over which caller-supplied cost and dynamics functions are
/// evaluated.
///
/// Implemented by `f64`, [`Dual`](crate::dual::Dual), and
/// [`HyperDual`](crate::dual::HyperDual). Constants must enter a generic
/// computation through [`Scalar::from_f64`]; mixing `f64` literals directly
/// into dual arithmetic does not compile, which is what keeps derivative
/// propagation airtight.
pub trait Scalar:
    nalgebra::Scalar
    + Copy
    + Zero
    + One
    + Neg<Output = Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
{
    /// Lift an `f64` constant into the field (zero derivative parts).
    fn from_f64(value: f64) -> Self;

    /// Primal part: the plain value with derivative information stripped.
    fn value(&self) -> f64;

    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn exp(self) -> Self;
    fn ln(self) -> Self;
    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn floor(self) -> Self;
    fn powi(self, n: i32) -> Self;
}

impl Scalar for f64 {
    fn from_f64(value: f64) -> Self {
        value
    }

    fn value(&self) -> f64 {
        *self
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn abs(self) -> Self {
        f64::abs(self)
    }

    fn floor(self) -> Self {
        f64::floor(self)
    }

    fn powi(self, n: i32) -> Self {
        f64::powi(self, n)
    }
}
