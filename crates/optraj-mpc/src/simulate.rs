//! Deterministic forward rollout of a control sequence.

use nalgebra::DVector;

use optraj_core::model::Dynamics;

/// Unroll `X[t+1] = dynamics(t, X[t], U[t])` from `X[0] = x0`.
///
/// Strictly sequential in increasing time order; two calls with the same
/// inputs produce bit-identical output. The simulator adds nothing of its
/// own: panics raised by the model propagate to the caller unmasked.
#[must_use]
pub fn rollout<D: Dynamics>(
    dynamics: &D,
    controls: &[DVector<f64>],
    x0: &DVector<f64>,
) -> Vec<DVector<f64>> {
    let mut states = Vec::with_capacity(controls.len() + 1);
    states.push(x0.clone());
    for (t, u) in controls.iter().enumerate() {
        let next = dynamics.step(t, &states[t], u);
        states.push(next);
    }
    states
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
