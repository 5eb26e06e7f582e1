//! Solver-agnostic receding-horizon entry point.
//!
//! A caller running a real receding-horizon loop (apply the first control,
//! observe the new state, re-plan) goes through [`mpc_predict`] so the
//! solving algorithm can be swapped without touching the calling convention.
//! The re-solve loop itself belongs to the caller; this module performs no
//! optimization of its own.

use nalgebra::DVector;

use optraj_core::error::OptrajError;
use optraj_core::model::{Dynamics, StageCost};

use crate::ilqr::{IlqrSolver, ilqr};
use crate::types::{ControlProblem, Trajectory};

/// Anything that can plan a trajectory for a control problem from an initial
/// state and a warm-start control sequence.
///
/// Implemented by [`IlqrSolver`] and by any conforming closure, so ad-hoc
/// solvers drop in without a wrapper type.
pub trait Solver<D: Dynamics, C: StageCost> {
    fn solve(
        &self,
        problem: &ControlProblem<D, C>,
        x0: &DVector<f64>,
        u_init: &[DVector<f64>],
    ) -> Result<Trajectory, OptrajError>;
}

impl<D: Dynamics, C: StageCost, F> Solver<D, C> for F
where
    F: Fn(&ControlProblem<D, C>, &DVector<f64>, &[DVector<f64>]) -> Result<Trajectory, OptrajError>,
{
    fn solve(
        &self,
        problem: &ControlProblem<D, C>,
        x0: &DVector<f64>,
        u_init: &[DVector<f64>],
    ) -> Result<Trajectory, OptrajError> {
        self(problem, x0, u_init)
    }
}

impl<D: Dynamics, C: StageCost> Solver<D, C> for IlqrSolver {
    fn solve(
        &self,
        problem: &ControlProblem<D, C>,
        x0: &DVector<f64>,
        u_init: &[DVector<f64>],
    ) -> Result<Trajectory, OptrajError> {
        ilqr(self.iterations, problem, x0, u_init)
    }
}

/// Plan one horizon with the given solver. Pure delegation: the output is
/// exactly what `solver` produces.
pub fn mpc_predict<D: Dynamics, C: StageCost>(
    solver: &impl Solver<D, C>,
    problem: &ControlProblem<D, C>,
    x0: &DVector<f64>,
    u_init: &[DVector<f64>],
) -> Result<Trajectory, OptrajError> {
    solver.solve(problem, x0, u_init)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
