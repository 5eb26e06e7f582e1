//! Iterative LQR: repeated local linear-quadratic refinement.
//!
//! Each round linearizes the problem around the current nominal trajectory,
//! solves the resulting LQR problem, and rolls the deviation-coordinate
//! feedback law through the *true* nonlinear dynamics to obtain the next
//! nominal. Exactly `iterations` rounds run unconditionally: there is no
//! convergence check, no step damping, and no cost-acceptance test, so each
//! round takes the full Riccati-implied step. On strongly nonlinear problems
//! far from the optimum this can diverge; that is a known property of the
//! scheme, not a bug to be silently compensated for here.

use log::debug;
use nalgebra::DVector;

use optraj_core::error::OptrajError;
use optraj_core::model::{Dynamics, StageCost};

use crate::linearize::linearize;
use crate::lqr::lqr_solve;
use crate::simulate::rollout;
use crate::types::{ControlProblem, Policy, Trajectory};

/// Run `iterations` rounds of iLQR from `x0` with the warm-start control
/// sequence `u_init`.
///
/// The initial nominal trajectory is a plain rollout of `u_init` through the
/// true dynamics. `states[0]` of the result is exactly `x0` in every round.
pub fn ilqr<D: Dynamics, C: StageCost>(
    iterations: usize,
    problem: &ControlProblem<D, C>,
    x0: &DVector<f64>,
    u_init: &[DVector<f64>],
) -> Result<Trajectory, OptrajError> {
    problem.validate_start(x0, u_init)?;

    let mut controls = u_init.to_vec();
    let mut states = rollout(problem.dynamics(), &controls, x0);

    for round in 0..iterations {
        let local = linearize(problem, &states, &controls);
        let policy = lqr_solve(&local)?;
        (states, controls) = forward_pass(problem, &states, &controls, &policy, x0);

        if log::log_enabled!(log::Level::Debug) {
            let cost: f64 = controls
                .iter()
                .enumerate()
                .map(|(t, u)| problem.cost().evaluate::<f64>(t, &states[t], u))
                .sum();
            debug!(
                "ilqr round {}/{}: nominal cost {:.6e}",
                round + 1,
                iterations,
                cost
            );
        }
    }

    Ok(Trajectory { states, controls })
}

/// Roll the deviation-coordinate policy through the true dynamics.
///
/// This is the one place where the two coordinate systems meet: the gain is
/// applied to `Δx = x - X_nominal[t]`, the correction is added to the
/// nominal control, and the resulting absolute control drives the nonlinear
/// model.
fn forward_pass<D: Dynamics, C: StageCost>(
    problem: &ControlProblem<D, C>,
    nominal_states: &[DVector<f64>],
    nominal_controls: &[DVector<f64>],
    policy: &Policy,
    x0: &DVector<f64>,
) -> (Vec<DVector<f64>>, Vec<DVector<f64>>) {
    let horizon = nominal_controls.len();
    let mut states = Vec::with_capacity(horizon + 1);
    let mut controls = Vec::with_capacity(horizon);
    states.push(x0.clone());

    for t in 0..horizon {
        let deviation = &states[t] - &nominal_states[t];
        let u = &nominal_controls[t] + policy.control(t, &deviation);
        let next = problem.dynamics().step(t, &states[t], &u);
        controls.push(u);
        states.push(next);
    }

    (states, controls)
}

// ---------------------------------------------------------------------------
// IlqrSolver
// ---------------------------------------------------------------------------

/// Iteration-count-bound iLQR solver, usable wherever a
/// [`Solver`](crate::mpc::Solver) is expected.
#[derive(Clone, Copy, Debug)]
pub struct IlqrSolver {
    /// Number of refinement rounds to run, unconditionally.
    pub iterations: usize,
}

impl IlqrSolver {
    #[must_use]
    pub const fn new(iterations: usize) -> Self {
        Self { iterations }
    }
}

impl Default for IlqrSolver {
    fn default() -> Self {
        Self { iterations: 10 }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
