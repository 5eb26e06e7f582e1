//! Local linear-quadratic approximation around a nominal trajectory.

use nalgebra::DVector;

use optraj_core::diff::{cost_expansion, dynamics_jacobians};
use optraj_core::model::{Dynamics, StageCost};

use crate::types::{ControlProblem, LqrProblem};

/// Build the time-varying LQ model of `problem` around the nominal
/// trajectory `(states, controls)`.
///
/// For each stage the dynamics are linearized and the cost is expanded to
/// second order at `(states[t], controls[t])`. The resulting problem lives
/// in deviation coordinates `Δx = x - X[t]`, `Δu = u - U[t]`: its solution
/// is a feedback law on deviations, not on absolute state and control. The
/// conversion back to absolute coordinates is the iLQR forward pass, and
/// only there.
pub fn linearize<D: Dynamics, C: StageCost>(
    problem: &ControlProblem<D, C>,
    states: &[DVector<f64>],
    controls: &[DVector<f64>],
) -> LqrProblem {
    let horizon = problem.horizon();
    assert_eq!(controls.len(), horizon);
    assert!(states.len() > horizon);

    let mut q_xx = Vec::with_capacity(horizon);
    let mut r_x = Vec::with_capacity(horizon);
    let mut q_uu = Vec::with_capacity(horizon);
    let mut r_u = Vec::with_capacity(horizon);
    let mut q_ux = Vec::with_capacity(horizon);
    let mut a = Vec::with_capacity(horizon);
    let mut b = Vec::with_capacity(horizon);

    for t in 0..horizon {
        let expansion = cost_expansion(problem.cost(), t, &states[t], &controls[t]);
        let (jac_x, jac_u) = dynamics_jacobians(problem.dynamics(), t, &states[t], &controls[t]);

        q_xx.push(expansion.hess_xx);
        r_x.push(expansion.grad_x);
        q_uu.push(expansion.hess_uu);
        r_u.push(expansion.grad_u);
        q_ux.push(expansion.hess_ux);
        a.push(jac_x);
        b.push(jac_u);
    }

    LqrProblem {
        q_xx,
        r_x,
        q_uu,
        r_u,
        q_ux,
        a,
        b,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
