//! Time-varying LQR via the backward Riccati recursion.
//!
//! The value function `V_t(x) = x' P_t x + p_t' x + const` is propagated
//! backward in time. With stage cost terms `(Q, q, R, r, M)` and dynamics
//! `(A, B)` at stage `t`:
//!
//! ```text
//! R̂ = R + B' P B          r̂ = r + B' p
//! M̂ = M + B' P A
//! K = -R̂⁻¹ M̂              k = -R̂⁻¹ r̂
//! P ← Q + A' P A + K' M̂   p ← q + A' p + K' r̂
//! ```
//!
//! The terminal value is seeded from the final stage cost
//! `(P, p) = (Q[T-1], q[T-1])`; there is no separate terminal-cost term.
//! `R̂` must be invertible at every stage. A singular block is a hard
//! [`SolveError::SingularControlCost`], never patched with a pseudo-inverse
//! or a diagonal shift: posing a well-conditioned problem is the caller's
//! responsibility.
//!
//! The recursion is exact for genuinely linear-quadratic input and is reused
//! unmodified on the local approximations inside [`crate::ilqr`].

use nalgebra::DVector;

use optraj_core::error::{OptrajError, SolveError};

use crate::types::{LqrProblem, Policy, Trajectory};

/// Solve the backward Riccati recursion, producing the per-stage feedback
/// law `u_t = K[t] x + k[t]`.
pub fn lqr_solve(problem: &LqrProblem) -> Result<Policy, OptrajError> {
    problem.validate()?;
    let horizon = problem.horizon();

    let mut p_mat = problem.q_xx[horizon - 1].clone();
    let mut p_vec = problem.r_x[horizon - 1].clone();

    let mut gains = Vec::with_capacity(horizon);
    let mut feedforward = Vec::with_capacity(horizon);

    for t in (0..horizon).rev() {
        let a = &problem.a[t];
        let b = &problem.b[t];
        let at = a.transpose();
        let bt = b.transpose();
        let bt_p = &bt * &p_mat;

        let r_hat = &problem.q_uu[t] + &bt_p * b;
        let m_hat = &problem.q_ux[t] + &bt_p * a;
        let r_lin = &problem.r_u[t] + &bt * &p_vec;

        let r_hat_inv = r_hat
            .try_inverse()
            .ok_or(SolveError::SingularControlCost { stage: t })?;
        let k_mat = -(&r_hat_inv * &m_hat);
        let k_vec = -(&r_hat_inv * &r_lin);

        let p_next = &problem.q_xx[t] + &at * &p_mat * a + k_mat.transpose() * &m_hat;
        p_vec = &problem.r_x[t] + &at * &p_vec + k_mat.transpose() * &r_lin;
        // Keep P symmetric against roundoff drift.
        p_mat = (&p_next + &p_next.transpose()) * 0.5;

        gains.push(k_mat);
        feedforward.push(k_vec);
    }

    gains.reverse();
    feedforward.reverse();
    Ok(Policy { gains, feedforward })
}

/// Solve the problem and roll the resulting feedback law through the
/// *linear* dynamics from `x0`.
pub fn lqr_predict(problem: &LqrProblem, x0: &DVector<f64>) -> Result<Trajectory, OptrajError> {
    let policy = lqr_solve(problem)?;
    let horizon = problem.horizon();

    let mut states = Vec::with_capacity(horizon + 1);
    let mut controls = Vec::with_capacity(horizon);
    states.push(x0.clone());
    for t in 0..horizon {
        let u = policy.control(t, &states[t]);
        let next = &problem.a[t] * &states[t] + &problem.b[t] * &u;
        controls.push(u);
        states.push(next);
    }

    Ok(Trajectory { states, controls })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
