//! Problem and result types for the trajectory optimizers.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use optraj_core::error::ShapeError;
use optraj_core::model::{Dynamics, StageCost};

// ---------------------------------------------------------------------------
// ControlProblem
// ---------------------------------------------------------------------------

/// Nonlinear finite-horizon optimal control problem.
///
/// Owns the caller-supplied dynamics and stage cost plus the declared
/// dimensions. Immutable after construction; solvers never mutate it.
#[derive(Clone, Debug)]
pub struct ControlProblem<D, C> {
    dynamics: D,
    cost: C,
    horizon: usize,
    state_dim: usize,
    control_dim: usize,
}

impl<D: Dynamics, C: StageCost> ControlProblem<D, C> {
    /// Create a problem over `horizon` stages with the given state and
    /// control dimensions.
    pub fn new(
        dynamics: D,
        cost: C,
        horizon: usize,
        state_dim: usize,
        control_dim: usize,
    ) -> Result<Self, ShapeError> {
        if horizon == 0 {
            return Err(ShapeError::EmptyHorizon);
        }
        if state_dim == 0 || control_dim == 0 {
            return Err(ShapeError::ZeroDimension);
        }
        Ok(Self {
            dynamics,
            cost,
            horizon,
            state_dim,
            control_dim,
        })
    }

    pub fn dynamics(&self) -> &D {
        &self.dynamics
    }

    pub fn cost(&self) -> &C {
        &self.cost
    }

    pub const fn horizon(&self) -> usize {
        self.horizon
    }

    pub const fn state_dim(&self) -> usize {
        self.state_dim
    }

    pub const fn control_dim(&self) -> usize {
        self.control_dim
    }

    /// Check a solve's starting point against the declared dimensions.
    pub fn validate_start(
        &self,
        x0: &DVector<f64>,
        u_init: &[DVector<f64>],
    ) -> Result<(), ShapeError> {
        if x0.len() != self.state_dim {
            return Err(ShapeError::InitialState {
                expected: self.state_dim,
                got: x0.len(),
            });
        }
        if u_init.len() != self.horizon {
            return Err(ShapeError::StageCount {
                field: "U",
                expected: self.horizon,
                got: u_init.len(),
            });
        }
        for (t, u) in u_init.iter().enumerate() {
            if u.len() != self.control_dim {
                return Err(ShapeError::VectorLength {
                    field: "U",
                    stage: t,
                    expected: self.control_dim,
                    got: u.len(),
                });
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// LqrProblem
// ---------------------------------------------------------------------------

/// Time-varying linear-quadratic problem, one entry per stage `t = 0..T-1`.
///
/// Stage cost terms follow the quadratic/linear naming convention: `q_*` are
/// second-order coefficients, `r_*` first-order ones. Dynamics are
/// `x_{t+1} = a[t] x + b[t] u`. When produced by
/// [`linearize`](crate::linearize::linearize) the whole problem lives in
/// deviation coordinates around the nominal trajectory; the solver does not
/// know or care which coordinate system is in force.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LqrProblem {
    /// State/state cost blocks, n×n symmetric.
    pub q_xx: Vec<DMatrix<f64>>,
    /// Linear state cost terms, length n.
    pub r_x: Vec<DVector<f64>>,
    /// Control/control cost blocks, m×m symmetric.
    pub q_uu: Vec<DMatrix<f64>>,
    /// Linear control cost terms, length m.
    pub r_u: Vec<DVector<f64>>,
    /// Control/state cross blocks, m×n.
    pub q_ux: Vec<DMatrix<f64>>,
    /// State-transition matrices, n×n.
    pub a: Vec<DMatrix<f64>>,
    /// Control matrices, n×m.
    pub b: Vec<DMatrix<f64>>,
}

impl LqrProblem {
    pub fn horizon(&self) -> usize {
        self.a.len()
    }

    pub fn state_dim(&self) -> usize {
        self.a.first().map_or(0, |a| a.nrows())
    }

    pub fn control_dim(&self) -> usize {
        self.b.first().map_or(0, |b| b.ncols())
    }

    /// Check every stage against the dimensions implied by stage 0.
    ///
    /// Runs before the recursion starts so a malformed problem is rejected
    /// whole rather than truncated or padded.
    pub fn validate(&self) -> Result<(), ShapeError> {
        let horizon = self.a.len();
        if horizon == 0 {
            return Err(ShapeError::EmptyHorizon);
        }
        let n = self.state_dim();
        let m = self.control_dim();
        if n == 0 || m == 0 {
            return Err(ShapeError::ZeroDimension);
        }

        check_stage_count("Q", &self.q_xx, horizon)?;
        check_stage_count("q", &self.r_x, horizon)?;
        check_stage_count("R", &self.q_uu, horizon)?;
        check_stage_count("r", &self.r_u, horizon)?;
        check_stage_count("M", &self.q_ux, horizon)?;
        check_stage_count("B", &self.b, horizon)?;

        for t in 0..horizon {
            check_matrix("Q", t, &self.q_xx[t], n, n)?;
            check_vector("q", t, &self.r_x[t], n)?;
            check_matrix("R", t, &self.q_uu[t], m, m)?;
            check_vector("r", t, &self.r_u[t], m)?;
            check_matrix("M", t, &self.q_ux[t], m, n)?;
            check_matrix("A", t, &self.a[t], n, n)?;
            check_matrix("B", t, &self.b[t], n, m)?;
        }
        Ok(())
    }
}

fn check_stage_count<T>(
    field: &'static str,
    entries: &[T],
    expected: usize,
) -> Result<(), ShapeError> {
    if entries.len() == expected {
        Ok(())
    } else {
        Err(ShapeError::StageCount {
            field,
            expected,
            got: entries.len(),
        })
    }
}

fn check_matrix(
    field: &'static str,
    stage: usize,
    matrix: &DMatrix<f64>,
    rows: usize,
    cols: usize,
) -> Result<(), ShapeError> {
    if matrix.shape() == (rows, cols) {
        Ok(())
    } else {
        Err(ShapeError::MatrixShape {
            field,
            stage,
            rows,
            cols,
            got_rows: matrix.nrows(),
            got_cols: matrix.ncols(),
        })
    }
}

fn check_vector(
    field: &'static str,
    stage: usize,
    vector: &DVector<f64>,
    expected: usize,
) -> Result<(), ShapeError> {
    if vector.len() == expected {
        Ok(())
    } else {
        Err(ShapeError::VectorLength {
            field,
            stage,
            expected,
            got: vector.len(),
        })
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Time-varying affine feedback law `u_t = K[t] x + k[t]`.
///
/// For a policy from [`lqr_solve`](crate::lqr::lqr_solve) on an absolute
/// problem, `x` is the absolute state; for one solved on a linearization,
/// `x` is the deviation from the nominal trajectory.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Policy {
    /// Feedback gain matrices `K[t]`, m×n.
    pub gains: Vec<DMatrix<f64>>,
    /// Feedforward terms `k[t]`, length m.
    pub feedforward: Vec<DVector<f64>>,
}

impl Policy {
    /// Number of stages.
    pub fn horizon(&self) -> usize {
        self.gains.len()
    }

    /// Apply the stage-`t` law to `x`.
    #[must_use]
    pub fn control(&self, t: usize, x: &DVector<f64>) -> DVector<f64> {
        &self.gains[t] * x + &self.feedforward[t]
    }
}

// ---------------------------------------------------------------------------
// Trajectory
// ---------------------------------------------------------------------------

/// A state sequence of length T+1 paired with the control sequence of
/// length T that produced it.
///
/// `states[0]` is always exactly the caller-supplied initial state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// States `X[0..=T]`.
    pub states: Vec<DVector<f64>>,
    /// Controls `U[0..T]`.
    pub controls: Vec<DVector<f64>>,
}

impl Trajectory {
    /// Number of control stages.
    pub fn horizon(&self) -> usize {
        self.controls.len()
    }

    /// Sum of stage costs over `t = 0..T-1`. The terminal state carries no
    /// cost of its own.
    pub fn total_cost<C: StageCost>(&self, cost: &C) -> f64 {
        self.controls
            .iter()
            .enumerate()
            .map(|(t, u)| cost.evaluate::<f64>(t, &self.states[t], u))
            .sum()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
