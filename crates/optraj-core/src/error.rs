use thiserror::Error;

/// Top-level error type for the optraj solvers.
#[derive(Debug, Error)]
pub enum OptrajError {
    #[error("shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("solve error: {0}")]
    Solve(#[from] SolveError),
}

/// Input dimensions disagree with the declared horizon or state/control
/// sizes.
///
/// Detected up front, before any recursion runs; inputs are never silently
/// truncated or padded. Copy + static messages for cheap propagation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("horizon must be at least one stage")]
    EmptyHorizon,

    #[error("state and control dimensions must be positive")]
    ZeroDimension,

    #[error("{field} has {got} stages, expected {expected}")]
    StageCount {
        field: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{field}[{stage}] is {got_rows}x{got_cols}, expected {rows}x{cols}")]
    MatrixShape {
        field: &'static str,
        stage: usize,
        rows: usize,
        cols: usize,
        got_rows: usize,
        got_cols: usize,
    },

    #[error("{field}[{stage}] has length {got}, expected {expected}")]
    VectorLength {
        field: &'static str,
        stage: usize,
        expected: usize,
        got: usize,
    },

    #[error("initial state has length {got}, expected {expected}")]
    InitialState { expected: usize, got: usize },
}

/// Numerical failure inside the Riccati recursion.
///
/// Non-recoverable: there is no pseudo-inverse or regularization fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error("control-cost block is singular at stage {stage}")]
    SingularControlCost { stage: usize },
}
