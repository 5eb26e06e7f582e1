//! Forward-mode dual numbers.
//!
//! [`Dual`] carries the primal value and one directional first derivative;
//! [`HyperDual`] carries two directional first derivatives plus the mixed
//! second derivative. Seeding the inputs of a [`Scalar`]-generic function
//! with unit derivative parts and reading the result recovers derivatives
//! that are exact to floating-point roundoff, never finite-difference
//! estimates.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

use crate::scalar::Scalar;

// ---------------------------------------------------------------------------
// Dual
// ---------------------------------------------------------------------------

/// First-order dual number `re + eps·ε` with `ε² = 0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dual {
    /// Primal value.
    pub re: f64,
    /// Directional derivative.
    pub eps: f64,
}

impl Dual {
    #[must_use]
    pub const fn new(re: f64, eps: f64) -> Self {
        Self { re, eps }
    }

    /// Lift a constant: zero derivative part.
    #[must_use]
    pub const fn constant(re: f64) -> Self {
        Self { re, eps: 0.0 }
    }

    /// Chain rule for a unary function with value `f` and derivative `df`
    /// at `self.re`.
    fn chain(self, f: f64, df: f64) -> Self {
        Self {
            re: f,
            eps: df * self.eps,
        }
    }
}

impl Add for Dual {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.eps + rhs.eps)
    }
}

impl Sub for Dual {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.eps - rhs.eps)
    }
}

impl Mul for Dual {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(self.re * rhs.re, self.re * rhs.eps + self.eps * rhs.re)
    }
}

impl Div for Dual {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.re / rhs.re,
            (self.eps * rhs.re - self.re * rhs.eps) / (rhs.re * rhs.re),
        )
    }
}

impl Neg for Dual {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.re, -self.eps)
    }
}

impl AddAssign for Dual {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Dual {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Dual {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Dual {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Zero for Dual {
    fn zero() -> Self {
        Self::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.eps == 0.0
    }
}

impl One for Dual {
    fn one() -> Self {
        Self::constant(1.0)
    }
}

impl Scalar for Dual {
    fn from_f64(value: f64) -> Self {
        Self::constant(value)
    }

    fn value(&self) -> f64 {
        self.re
    }

    fn sin(self) -> Self {
        self.chain(self.re.sin(), self.re.cos())
    }

    fn cos(self) -> Self {
        self.chain(self.re.cos(), -self.re.sin())
    }

    fn exp(self) -> Self {
        let e = self.re.exp();
        self.chain(e, e)
    }

    fn ln(self) -> Self {
        self.chain(self.re.ln(), self.re.recip())
    }

    fn sqrt(self) -> Self {
        let s = self.re.sqrt();
        self.chain(s, 0.5 / s)
    }

    fn abs(self) -> Self {
        self.chain(self.re.abs(), self.re.signum())
    }

    fn floor(self) -> Self {
        // Piecewise constant: derivative is zero wherever it exists.
        self.chain(self.re.floor(), 0.0)
    }

    fn powi(self, n: i32) -> Self {
        self.chain(self.re.powi(n), f64::from(n) * self.re.powi(n - 1))
    }
}

// ---------------------------------------------------------------------------
// HyperDual
// ---------------------------------------------------------------------------

/// Second-order hyper-dual number `re + e1·ε₁ + e2·ε₂ + e12·ε₁ε₂` with
/// `ε₁² = ε₂² = 0`.
///
/// Seeding `ε₁` on input coordinate `i` and `ε₂` on coordinate `j` makes
/// `e12` the mixed second derivative `∂²f/∂vᵢ∂vⱼ` after evaluation, and `e1`
/// the first derivative along `i`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HyperDual {
    /// Primal value.
    pub re: f64,
    /// First derivative along the first seeded direction.
    pub e1: f64,
    /// First derivative along the second seeded direction.
    pub e2: f64,
    /// Mixed second derivative.
    pub e12: f64,
}

impl HyperDual {
    #[must_use]
    pub const fn new(re: f64, e1: f64, e2: f64, e12: f64) -> Self {
        Self { re, e1, e2, e12 }
    }

    /// Lift a constant: all derivative parts zero.
    #[must_use]
    pub const fn constant(re: f64) -> Self {
        Self {
            re,
            e1: 0.0,
            e2: 0.0,
            e12: 0.0,
        }
    }

    /// Chain rule for a unary function with value `f`, first derivative
    /// `df`, and second derivative `ddf` at `self.re`.
    fn chain(self, f: f64, df: f64, ddf: f64) -> Self {
        Self {
            re: f,
            e1: df * self.e1,
            e2: df * self.e2,
            e12: df * self.e12 + ddf * self.e1 * self.e2,
        }
    }

    fn recip(self) -> Self {
        let r = self.re.recip();
        self.chain(r, -r * r, 2.0 * r * r * r)
    }
}

impl Add for HyperDual {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.re + rhs.re,
            self.e1 + rhs.e1,
            self.e2 + rhs.e2,
            self.e12 + rhs.e12,
        )
    }
}

impl Sub for HyperDual {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.re - rhs.re,
            self.e1 - rhs.e1,
            self.e2 - rhs.e2,
            self.e12 - rhs.e12,
        )
    }
}

impl Mul for HyperDual {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re,
            self.re * rhs.e1 + self.e1 * rhs.re,
            self.re * rhs.e2 + self.e2 * rhs.re,
            self.re * rhs.e12 + self.e12 * rhs.re + self.e1 * rhs.e2 + self.e2 * rhs.e1,
        )
    }
}

impl Div for HyperDual {
    type Output = Self;
    fn div(self, rhs: Self) -> Self {
        self * rhs.recip()
    }
}

impl Neg for HyperDual {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.re, -self.e1, -self.e2, -self.e12)
    }
}

impl AddAssign for HyperDual {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for HyperDual {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for HyperDual {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for HyperDual {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl Zero for HyperDual {
    fn zero() -> Self {
        Self::constant(0.0)
    }

    fn is_zero(&self) -> bool {
        self.re == 0.0 && self.e1 == 0.0 && self.e2 == 0.0 && self.e12 == 0.0
    }
}

impl One for HyperDual {
    fn one() -> Self {
        Self::constant(1.0)
    }
}

impl Scalar for HyperDual {
    fn from_f64(value: f64) -> Self {
        Self::constant(value)
    }

    fn value(&self) -> f64 {
        self.re
    }

    fn sin(self) -> Self {
        self.chain(self.re.sin(), self.re.cos(), -self.re.sin())
    }

    fn cos(self) -> Self {
        self.chain(self.re.cos(), -self.re.sin(), -self.re.cos())
    }

    fn exp(self) -> Self {
        let e = self.re.exp();
        self.chain(e, e, e)
    }

    fn ln(self) -> Self {
        let r = self.re.recip();
        self.chain(self.re.ln(), r, -r * r)
    }

    fn sqrt(self) -> Self {
        let s = self.re.sqrt();
        self.chain(s, 0.5 / s, -0.25 / (s * self.re))
    }

    fn abs(self) -> Self {
        self.chain(self.re.abs(), self.re.signum(), 0.0)
    }

    fn floor(self) -> Self {
        self.chain(self.re.floor(), 0.0, 0.0)
    }

    fn powi(self, n: i32) -> Self {
        let nf = f64::from(n);
        self.chain(
            self.re.powi(n),
            nf * self.re.powi(n - 1),
            nf * (nf - 1.0) * self.re.powi(n - 2),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seeded(x: f64) -> Dual {
        Dual::new(x, 1.0)
    }

    fn seeded2(x: f64) -> HyperDual {
        HyperDual::new(x, 1.0, 1.0, 0.0)
    }

    #[test]
    fn dual_product_rule() {
        // d/dx [x * sin(x)] = sin(x) + x cos(x)
        let x = 0.7;
        let y = seeded(x) * seeded(x).sin();
        assert_relative_eq!(y.re, x * x.sin(), epsilon = 1e-15);
        assert_relative_eq!(y.eps, x.sin() + x * x.cos(), epsilon = 1e-15);
    }

    #[test]
    fn dual_quotient_rule() {
        // d/dx [x / (1 + x²)] = (1 - x²) / (1 + x²)²
        let x = 1.3;
        let denom = Dual::constant(1.0) + seeded(x) * seeded(x);
        let y = seeded(x) / denom;
        let d = (1.0 - x * x) / (1.0 + x * x).powi(2);
        assert_relative_eq!(y.eps, d, epsilon = 1e-14);
    }

    #[test]
    fn dual_exp_ln_roundtrip() {
        let x = 2.1;
        let y = seeded(x).ln().exp();
        assert_relative_eq!(y.re, x, epsilon = 1e-14);
        assert_relative_eq!(y.eps, 1.0, epsilon = 1e-14);
    }

    #[test]
    fn dual_constant_has_no_derivative() {
        let y = Dual::constant(4.0).sqrt();
        assert_relative_eq!(y.re, 2.0, epsilon = 1e-15);
        assert_relative_eq!(y.eps, 0.0, epsilon = 1e-15);
    }

    #[test]
    fn hyperdual_second_derivative_of_cube() {
        // f(x) = x³: f'' = 6x
        let x = 1.7;
        let y = seeded2(x).powi(3);
        assert_relative_eq!(y.re, x.powi(3), epsilon = 1e-12);
        assert_relative_eq!(y.e1, 3.0 * x * x, epsilon = 1e-12);
        assert_relative_eq!(y.e12, 6.0 * x, epsilon = 1e-12);
    }

    #[test]
    fn hyperdual_mixed_partial() {
        // f(x, y) = x² y: ∂²f/∂x∂y = 2x
        let (x, y) = (0.8, -1.2);
        let xd = HyperDual::new(x, 1.0, 0.0, 0.0);
        let yd = HyperDual::new(y, 0.0, 1.0, 0.0);
        let f = xd * xd * yd;
        assert_relative_eq!(f.re, x * x * y, epsilon = 1e-14);
        assert_relative_eq!(f.e1, 2.0 * x * y, epsilon = 1e-14);
        assert_relative_eq!(f.e2, x * x, epsilon = 1e-14);
        assert_relative_eq!(f.e12, 2.0 * x, epsilon = 1e-14);
    }

    #[test]
    fn hyperdual_division_second_derivative() {
        // f(x) = 1/x: f'' = 2/x³
        let x = 0.6;
        let y = HyperDual::constant(1.0) / seeded2(x);
        assert_relative_eq!(y.e1, -1.0 / (x * x), epsilon = 1e-12);
        assert_relative_eq!(y.e12, 2.0 / (x * x * x), epsilon = 1e-12);
    }

    #[test]
    fn hyperdual_trig_second_derivative() {
        // f(x) = sin(x): f'' = -sin(x)
        let x = 0.4;
        let y = seeded2(x).sin();
        assert_relative_eq!(y.e1, x.cos(), epsilon = 1e-15);
        assert_relative_eq!(y.e12, -x.sin(), epsilon = 1e-15);
    }

    #[test]
    fn zero_and_one_identities() {
        let x = seeded(3.0);
        assert_eq!(x + Dual::zero(), x);
        assert_eq!(x * Dual::one(), x);
        assert!(Dual::zero().is_zero());
        assert!(HyperDual::zero().is_zero());
    }
}
