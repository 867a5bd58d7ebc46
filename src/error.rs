use std::fmt;

use thiserror::Error;

/// Top-level error type for the quadwarp kernel.
#[derive(Debug, Error)]
pub enum QuadwarpError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Errors raised by degenerate geometric input.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("zero-length segment at ({x}, {y})")]
    ZeroLengthSegment { x: f64, y: f64 },

    #[error("lines are parallel or coincident")]
    ParallelLines,

    #[error("lines are not parallel")]
    NotParallel,

    #[error("singular matrix: {0}")]
    SingularMatrix(&'static str),
}

/// Errors raised by the linear solvers.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("linear solve failed: {status}")]
    Failure { status: SolverStatus },
}

/// Numeric status reported alongside a [`SolverError::Failure`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolverStatus {
    /// The coefficient matrix has no LU decomposition.
    Singular,
    /// The coefficient matrix is too close to singular to trust.
    IllConditioned { rcond: f64 },
    /// The system solved, but the resulting homography is rank deficient.
    DegenerateSolution { rcond: f64 },
    /// The solution contains NaN or infinite entries.
    NonFinite,
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singular => write!(f, "singular system"),
            Self::IllConditioned { rcond } => {
                write!(f, "ill-conditioned system (rcond = {rcond:e})")
            }
            Self::DegenerateSolution { rcond } => {
                write!(f, "rank-deficient homography (rcond = {rcond:e})")
            }
            Self::NonFinite => write!(f, "non-finite solution"),
        }
    }
}

impl From<SolverStatus> for QuadwarpError {
    fn from(status: SolverStatus) -> Self {
        SolverError::Failure { status }.into()
    }
}

/// Convenience type alias for results using [`QuadwarpError`].
pub type Result<T> = std::result::Result<T, QuadwarpError>;
