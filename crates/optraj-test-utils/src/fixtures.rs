//! Canonical problems used across the solver test suites.

use nalgebra::{DMatrix, DVector};

use optraj_core::model::{Dynamics, StageCost};
use optraj_core::scalar::Scalar;
use optraj_mpc::types::{ControlProblem, LqrProblem};

/// The one-step regulator: identity state cost, free controls, and
/// `x_{t+1} = x + u`.
///
/// Its unique optimal feedback law is `u = -x` at every stage, which makes
/// it the standard exactness check for the Riccati solver.
pub fn one_step_regulator(dim: usize, horizon: usize) -> LqrProblem {
    LqrProblem {
        q_xx: vec![DMatrix::identity(dim, dim); horizon],
        r_x: vec![DVector::zeros(dim); horizon],
        q_uu: vec![DMatrix::zeros(dim, dim); horizon],
        r_u: vec![DVector::zeros(dim); horizon],
        q_ux: vec![DMatrix::zeros(dim, dim); horizon],
        a: vec![DMatrix::identity(dim, dim); horizon],
        b: vec![DMatrix::identity(dim, dim); horizon],
    }
}

/// An [`LqrProblem`] re-expressed as a general nonlinear model.
///
/// Evaluates the quadratic cost
/// `x'Qx + q'x + u'Ru + r'u + u'Mx` and the linear dynamics
/// `Ax + Bu` literally, generically over [`Scalar`]. Linearizing this model
/// anywhere reproduces an exact local description of the original problem,
/// so iLQR run on it must land on the direct LQR solution.
#[derive(Clone, Debug)]
pub struct LinearQuadraticModel {
    problem: LqrProblem,
}

impl LinearQuadraticModel {
    #[must_use]
    pub const fn new(problem: LqrProblem) -> Self {
        Self { problem }
    }

    pub const fn problem(&self) -> &LqrProblem {
        &self.problem
    }
}

impl Dynamics for LinearQuadraticModel {
    fn step<S: Scalar>(&self, t: usize, x: &DVector<S>, u: &DVector<S>) -> DVector<S> {
        let a = self.problem.a[t].map(S::from_f64);
        let b = self.problem.b[t].map(S::from_f64);
        &a * x + &b * u
    }
}

impl StageCost for LinearQuadraticModel {
    fn evaluate<S: Scalar>(&self, t: usize, x: &DVector<S>, u: &DVector<S>) -> S {
        let q_xx = self.problem.q_xx[t].map(S::from_f64);
        let r_x = self.problem.r_x[t].map(S::from_f64);
        let q_uu = self.problem.q_uu[t].map(S::from_f64);
        let r_u = self.problem.r_u[t].map(S::from_f64);
        let q_ux = self.problem.q_ux[t].map(S::from_f64);

        (&q_xx * x).dot(x) + r_x.dot(x) + (&q_uu * u).dot(u) + r_u.dot(u) + (&q_ux * x).dot(u)
    }
}

/// Wrap an [`LqrProblem`] into a [`ControlProblem`] over
/// [`LinearQuadraticModel`].
pub fn lq_control_problem(
    problem: LqrProblem,
) -> ControlProblem<LinearQuadraticModel, LinearQuadraticModel> {
    let horizon = problem.horizon();
    let state_dim = problem.state_dim();
    let control_dim = problem.control_dim();
    let model = LinearQuadraticModel::new(problem);
    ControlProblem::new(model.clone(), model, horizon, state_dim, control_dim)
        .expect("fixture dimensions are valid")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_step_regulator_is_well_formed() {
        let p = one_step_regulator(3, 5);
        assert!(p.validate().is_ok());
        assert_eq!(p.horizon(), 5);
        assert_eq!(p.state_dim(), 3);
        assert_eq!(p.control_dim(), 3);
    }

    #[test]
    fn lq_model_evaluates_the_quadratic_form() {
        let mut p = one_step_regulator(2, 3);
        p.r_x[0] = DVector::from_vec(vec![1.0, -1.0]);
        let model = LinearQuadraticModel::new(p);

        let x = DVector::from_vec(vec![2.0, 3.0]);
        let u = DVector::from_vec(vec![0.5, 0.5]);
        // x'Ix + q'x = (4 + 9) + (2 - 3) = 12
        let c: f64 = model.evaluate(0, &x, &u);
        assert!((c - 12.0).abs() < 1e-12);
    }

    #[test]
    fn lq_model_steps_the_linear_dynamics() {
        let p = one_step_regulator(2, 3);
        let model = LinearQuadraticModel::new(p);

        let x = DVector::from_vec(vec![1.0, -2.0]);
        let u = DVector::from_vec(vec![0.25, 0.75]);
        let next: DVector<f64> = model.step(0, &x, &u);
        assert!((next[0] - 1.25).abs() < 1e-12);
        assert!((next[1] + 1.25).abs() < 1e-12);
    }
}
