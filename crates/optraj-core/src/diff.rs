//! Differentiation drivers for caller-supplied models.
//!
//! Each driver re-runs the model with seeded dual inputs, one sweep per
//! coordinate (Jacobians) or per unordered coordinate pair (Hessians), and
//! assembles the results into dense matrices. No finite differences anywhere:
//! the downstream iLQR exactness properties depend on these being exact.

use nalgebra::{DMatrix, DVector};

use crate::dual::{Dual, HyperDual};
use crate::model::{Dynamics, StageCost};

/// Gradient and Hessian blocks of a stage cost at an evaluation point.
#[derive(Clone, Debug)]
pub struct CostExpansion {
    /// Gradient with respect to the state.
    pub grad_x: DVector<f64>,
    /// Gradient with respect to the control.
    pub grad_u: DVector<f64>,
    /// State/state Hessian block, n×n.
    pub hess_xx: DMatrix<f64>,
    /// Control/control Hessian block, m×m.
    pub hess_uu: DMatrix<f64>,
    /// Mixed control/state block, control rows by state columns, m×n.
    pub hess_ux: DMatrix<f64>,
}

/// State and control Jacobians of `dynamics` at `(t, x, u)`.
///
/// Returns `(A, B)` with `A` n×n and `B` n×m, where n is the state dimension
/// and m the control dimension.
pub fn dynamics_jacobians<D: Dynamics>(
    dynamics: &D,
    t: usize,
    x: &DVector<f64>,
    u: &DVector<f64>,
) -> (DMatrix<f64>, DMatrix<f64>) {
    let n = x.len();
    let m = u.len();
    let mut jac_x = DMatrix::zeros(n, n);
    let mut jac_u = DMatrix::zeros(n, m);

    for dir in 0..n + m {
        let xd = DVector::from_fn(n, |i, _| {
            Dual::new(x[i], if i == dir { 1.0 } else { 0.0 })
        });
        let ud = DVector::from_fn(m, |i, _| {
            Dual::new(u[i], if n + i == dir { 1.0 } else { 0.0 })
        });
        let next = dynamics.step(t, &xd, &ud);
        assert_eq!(next.len(), n, "dynamics must preserve the state dimension");

        for row in 0..n {
            if dir < n {
                jac_x[(row, dir)] = next[row].eps;
            } else {
                jac_u[(row, dir - n)] = next[row].eps;
            }
        }
    }

    (jac_x, jac_u)
}

/// Gradient plus full Hessian blocks of `cost` at `(t, x, u)`.
///
/// One [`HyperDual`] sweep per unordered pair of input coordinates; the
/// diagonal sweeps also yield the gradient. Symmetry of the Hessian is by
/// construction (both triangle entries are written from the same sweep).
pub fn cost_expansion<C: StageCost>(
    cost: &C,
    t: usize,
    x: &DVector<f64>,
    u: &DVector<f64>,
) -> CostExpansion {
    let n = x.len();
    let m = u.len();
    let dim = n + m;
    let mut grad = DVector::zeros(dim);
    let mut hess = DMatrix::zeros(dim, dim);

    for i in 0..dim {
        for j in i..dim {
            let xd = DVector::from_fn(n, |k, _| seed(x[k], k == i, k == j));
            let ud = DVector::from_fn(m, |k, _| seed(u[k], n + k == i, n + k == j));
            let y = cost.evaluate(t, &xd, &ud);

            if i == j {
                grad[i] = y.e1;
            }
            hess[(i, j)] = y.e12;
            hess[(j, i)] = y.e12;
        }
    }

    CostExpansion {
        grad_x: grad.rows(0, n).into_owned(),
        grad_u: grad.rows(n, m).into_owned(),
        hess_xx: hess.view((0, 0), (n, n)).into_owned(),
        hess_uu: hess.view((n, n), (m, m)).into_owned(),
        hess_ux: hess.view((n, 0), (m, n)).into_owned(),
    }
}

fn seed(value: f64, first: bool, second: bool) -> HyperDual {
    HyperDual::new(
        value,
        if first { 1.0 } else { 0.0 },
        if second { 1.0 } else { 0.0 },
        0.0,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scalar::Scalar;
    use approx::assert_relative_eq;

    /// x_{t+1} = A x + B u with fixed matrices, plus a nonlinear variant.
    struct Affine {
        a: DMatrix<f64>,
        b: DMatrix<f64>,
    }

    impl Dynamics for Affine {
        fn step<S: Scalar>(&self, _t: usize, x: &DVector<S>, u: &DVector<S>) -> DVector<S> {
            let a = self.a.map(S::from_f64);
            let b = self.b.map(S::from_f64);
            &a * x + &b * u
        }
    }

    struct Pendulum;

    impl Dynamics for Pendulum {
        fn step<S: Scalar>(&self, _t: usize, x: &DVector<S>, u: &DVector<S>) -> DVector<S> {
            // angle, angular velocity; gravity torque plus direct actuation
            let dt = S::from_f64(0.1);
            DVector::from_vec(vec![
                x[0] + dt * x[1],
                x[1] + dt * (x[0].sin() + u[0]),
            ])
        }
    }

    struct QuadraticCost;

    impl StageCost for QuadraticCost {
        fn evaluate<S: Scalar>(&self, _t: usize, x: &DVector<S>, u: &DVector<S>) -> S {
            // 2x₀² + x₀x₁ + 3u₀² + x₁u₀
            let two = S::from_f64(2.0);
            let three = S::from_f64(3.0);
            two * x[0] * x[0] + x[0] * x[1] + three * u[0] * u[0] + x[1] * u[0]
        }
    }

    #[test]
    fn jacobians_of_affine_dynamics_are_the_matrices() {
        let a = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, -0.3, 0.9]);
        let b = DMatrix::from_row_slice(2, 1, &[0.2, 1.1]);
        let model = Affine {
            a: a.clone(),
            b: b.clone(),
        };
        let x = DVector::from_vec(vec![0.4, -0.7]);
        let u = DVector::from_vec(vec![0.9]);

        let (jx, ju) = dynamics_jacobians(&model, 0, &x, &u);
        assert_relative_eq!(jx, a, epsilon = 1e-14);
        assert_relative_eq!(ju, b, epsilon = 1e-14);
    }

    #[test]
    fn jacobians_of_pendulum_match_hand_derivation() {
        let x = DVector::from_vec(vec![0.3, -0.1]);
        let u = DVector::from_vec(vec![0.5]);
        let (jx, ju) = dynamics_jacobians(&Pendulum, 0, &x, &u);

        assert_relative_eq!(jx[(0, 0)], 1.0, epsilon = 1e-14);
        assert_relative_eq!(jx[(0, 1)], 0.1, epsilon = 1e-14);
        assert_relative_eq!(jx[(1, 0)], 0.1 * x[0].cos(), epsilon = 1e-14);
        assert_relative_eq!(jx[(1, 1)], 1.0, epsilon = 1e-14);
        assert_relative_eq!(ju[(1, 0)], 0.1, epsilon = 1e-14);
        assert_relative_eq!(ju[(0, 0)], 0.0, epsilon = 1e-14);
    }

    #[test]
    fn cost_expansion_of_quadratic_matches_hand_derivation() {
        let x = DVector::from_vec(vec![0.6, -0.4]);
        let u = DVector::from_vec(vec![0.8]);
        let e = cost_expansion(&QuadraticCost, 0, &x, &u);

        // ∇ₓ = [4x₀ + x₁, x₀ + u₀]
        assert_relative_eq!(e.grad_x[0], 4.0 * x[0] + x[1], epsilon = 1e-14);
        assert_relative_eq!(e.grad_x[1], x[0] + u[0], epsilon = 1e-14);
        // ∇ᵤ = [6u₀ + x₁]
        assert_relative_eq!(e.grad_u[0], 6.0 * u[0] + x[1], epsilon = 1e-14);

        // ∂²/∂x² = [[4, 1], [1, 0]]
        assert_relative_eq!(e.hess_xx[(0, 0)], 4.0, epsilon = 1e-14);
        assert_relative_eq!(e.hess_xx[(0, 1)], 1.0, epsilon = 1e-14);
        assert_relative_eq!(e.hess_xx[(1, 0)], 1.0, epsilon = 1e-14);
        assert_relative_eq!(e.hess_xx[(1, 1)], 0.0, epsilon = 1e-14);
        // ∂²/∂u² = [[6]]
        assert_relative_eq!(e.hess_uu[(0, 0)], 6.0, epsilon = 1e-14);
        // ∂²/∂u∂x = [[0, 1]]
        assert_relative_eq!(e.hess_ux[(0, 0)], 0.0, epsilon = 1e-14);
        assert_relative_eq!(e.hess_ux[(0, 1)], 1.0, epsilon = 1e-14);
    }

    #[test]
    fn expansion_blocks_have_declared_shapes() {
        let x = DVector::zeros(3);
        let u = DVector::zeros(2);

        struct Sum;
        impl StageCost for Sum {
            fn evaluate<S: Scalar>(&self, _t: usize, x: &DVector<S>, u: &DVector<S>) -> S {
                x.dot(x) + u.dot(u)
            }
        }

        let e = cost_expansion(&Sum, 0, &x, &u);
        assert_eq!(e.hess_xx.shape(), (3, 3));
        assert_eq!(e.hess_uu.shape(), (2, 2));
        assert_eq!(e.hess_ux.shape(), (2, 3));
        assert_eq!(e.grad_x.len(), 3);
        assert_eq!(e.grad_u.len(), 2);
    }
}
