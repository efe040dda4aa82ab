//! Core error types.
//!
//! # Re-exports
//!
//! [`InterpolationError`], [`SolverError`], [`ErrorKind`] and
//! [`InterpolationResult`] are re-exported at this module level.

pub mod error;

pub use error::{ErrorKind, InterpolationError, InterpolationResult, SolverError};
