//! Problem-definition traits supplied by the caller.

use nalgebra::DVector;

use crate::scalar::Scalar;

/// Discrete-time state-transition model `x_{t+1} = f(t, x_t, u_t)`.
///
/// Implementations must be pure and stateless: the same `(t, x, u)` always
/// yields the same next state. The method is generic over [`Scalar`] so a
/// single definition serves both plain evaluation (`f64`) and exact
/// differentiation through the dual types in [`crate::dual`].
///
/// A panic raised inside an implementation (out-of-domain input, dimension
/// mismatch in the model's own algebra) propagates to the caller unchanged;
/// the solvers never catch it.
pub trait Dynamics {
    /// Advance the state by one step.
    fn step<S: Scalar>(&self, t: usize, x: &DVector<S>, u: &DVector<S>) -> DVector<S>;
}

/// Per-stage scalar cost `c(t, x, u)`.
///
/// Same purity and genericity requirements as [`Dynamics`].
pub trait StageCost {
    /// Evaluate the cost of applying `u` in state `x` at stage `t`.
    fn evaluate<S: Scalar>(&self, t: usize, x: &DVector<S>, u: &DVector<S>) -> S;
}
