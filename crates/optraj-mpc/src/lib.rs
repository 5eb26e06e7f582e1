//! Finite-horizon trajectory optimization: LQR, iLQR, and a solver-agnostic
//! receding-horizon entry point.
//!
//! Given a state-transition model and a stage cost over a planning horizon,
//! this crate computes a control sequence (and the resulting state
//! trajectory) minimizing total cost:
//!
//! 1. **Rollout** — deterministic forward simulation of a control sequence
//! 2. **LQR** — exact backward Riccati recursion for time-varying
//!    linear-quadratic problems
//! 3. **Local approximator** — builds a time-varying LQ model around a
//!    nominal trajectory via the dual-number differentiation in
//!    [`optraj_core`]
//! 4. **iLQR** — fixed-round refinement: approximate, solve, roll the
//!    feedback law through the true dynamics, adopt as the new nominal
//! 5. **MPC** — a pass-through entry point decoupling the solving algorithm
//!    from the receding-horizon caller
//!
//! # Coordinate systems
//!
//! The LQR solver and the local approximator are deliberately coordinate
//! blind. An [`LqrProblem`](types::LqrProblem) produced by
//! [`linearize`](linearize::linearize) lives in *deviation* coordinates
//! around the nominal trajectory; one produced directly by the caller lives
//! in absolute coordinates. The single conversion point between the two is
//! the iLQR forward pass, which applies gains to deviations but integrates
//! the true nonlinear dynamics on absolute states.
//!
//! All operations are synchronous and side-effect free over immutable
//! inputs; independent solves may be run in parallel by the caller.

pub mod ilqr;
pub mod linearize;
pub mod lqr;
pub mod mpc;
pub mod simulate;
pub mod types;

pub use ilqr::{IlqrSolver, ilqr};
pub use linearize::linearize;
pub use lqr::{lqr_predict, lqr_solve};
pub use mpc::{Solver, mpc_predict};
pub use simulate::rollout;
pub use types::{ControlProblem, LqrProblem, Policy, Trajectory};
