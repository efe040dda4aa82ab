//! Error types for structured error handling.
//!
//! This module provides:
//! - `InterpolationError`: Errors from data-bundle construction, interpolation,
//!   extrapolation and sensitivity calculations
//! - `SolverError`: Errors from root-finding solvers and linear systems
//! - `ErrorKind`: The coarse category every `InterpolationError` belongs to

use thiserror::Error;

/// Coarse error category.
///
/// Callers that only need to distinguish "my input was wrong" from "the
/// data does not support this algorithm" can match on the kind instead of
/// the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed or missing input, or an out-of-range configuration parameter.
    InvalidArgument,
    /// Well-formed query outside the interval the component interpolates on.
    OutOfDomain,
    /// Insufficient data for a local algorithm, or a solver failure.
    Numerical,
    /// A capability the component structurally cannot provide.
    UnsupportedOperation,
}

/// Interpolation-related errors.
///
/// # Variants
/// - `InvalidInput`: General invalid input error
/// - `NonMonotonicData`: Data violates a monotonicity requirement
/// - `OutOfDomain`: Query point outside valid interpolation domain
/// - `InsufficientData`: Not enough data points for the local algorithm
/// - `Numerical`: Ill-conditioned or degenerate numerical problem
/// - `Solver`: A nested root-finding or linear solve failed
/// - `UnsupportedOperation`: Operation not provided by this component
///
/// # Examples
/// ```
/// use interp_core::types::{ErrorKind, InterpolationError};
///
/// let err = InterpolationError::OutOfDomain { x: 5.0, min: 0.0, max: 3.0 };
/// assert!(format!("{}", err).contains("outside valid domain"));
/// assert_eq!(err.kind(), ErrorKind::OutOfDomain);
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Invalid input data or parameters.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Data is not monotonic when monotonicity is required.
    #[error("Data is not monotonic at index {index}")]
    NonMonotonicData {
        /// Index where monotonicity violation was detected
        index: usize,
    },

    /// Query point outside valid interpolation domain.
    #[error("Query point {x} outside valid domain [{min}, {max}]")]
    OutOfDomain {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Insufficient data points for interpolation.
    #[error("Insufficient data points: got {got}, need at least {need}")]
    InsufficientData {
        /// Number of points available
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Degenerate or ill-conditioned numerical problem.
    #[error("Numerical failure: {0}")]
    Numerical(String),

    /// Nested solver failure.
    #[error("Solver failure: {0}")]
    Solver(#[from] SolverError),

    /// Capability not provided by this component.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl InterpolationError {
    /// Returns the coarse category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            InterpolationError::InvalidInput(_) | InterpolationError::NonMonotonicData { .. } => {
                ErrorKind::InvalidArgument
            }
            InterpolationError::OutOfDomain { .. } => ErrorKind::OutOfDomain,
            InterpolationError::InsufficientData { .. }
            | InterpolationError::Numerical(_)
            | InterpolationError::Solver(_) => ErrorKind::Numerical,
            InterpolationError::UnsupportedOperation(_) => ErrorKind::UnsupportedOperation,
        }
    }

    /// Shorthand for an `InvalidInput` error.
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        InterpolationError::InvalidInput(msg.into())
    }
}

/// Root-finding and linear-system solver errors.
///
/// # Examples
/// ```
/// use interp_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Singular matrix in a linear solve.
    #[error("Singular matrix of size {size}")]
    SingularMatrix {
        /// Dimension of the square system
        size: usize,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

/// Result alias used throughout the crate.
pub type InterpolationResult<T> = Result<T, InterpolationError>;
