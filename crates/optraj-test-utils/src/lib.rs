//! Shared test fixtures and utilities for the optraj crates.
//!
//! Provides canonical linear-quadratic problems, the same problems
//! re-expressed as general nonlinear models, and deterministic RNG helpers.

pub mod fixtures;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use fixtures::{LinearQuadraticModel, lq_control_problem, one_step_regulator};
pub use rng::{random_state, seeded_rng};
