//! Solver configuration types.

use crate::types::SolverError;
use num_traits::Float;
use serde::Deserialize;

/// Configuration for bounded iterative solvers.
///
/// Shared by [`BrentSolver`](super::BrentSolver) and
/// [`BracketRoot`](super::BracketRoot). Every iterative process in the crate
/// runs under one of these, so none of them can loop indefinitely.
///
/// # Example
///
/// ```
/// use interp_core::math::solvers::SolverConfig;
///
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
///
/// let custom = SolverConfig::new(1e-12, 200).unwrap();
/// assert_eq!(custom.max_iterations, 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance on both `|f(x)|` and the bracket half-width.
    pub tolerance: T,

    /// Maximum number of iterations before reporting failure.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values: `tolerance = 1e-10`, `max_iterations = 100`.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap_or_else(T::epsilon),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a configuration, validating both fields.
    ///
    /// # Errors
    ///
    /// `SolverError::NumericalInstability` if `tolerance` is not strictly
    /// positive or `max_iterations` is zero.
    pub fn new(tolerance: T, max_iterations: usize) -> Result<Self, SolverError> {
        if !(tolerance > T::zero()) {
            return Err(SolverError::NumericalInstability(
                "tolerance must be positive".to_string(),
            ));
        }
        if max_iterations == 0 {
            return Err(SolverError::NumericalInstability(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(Self {
            tolerance,
            max_iterations,
        })
    }

    /// Tight tolerance (1e-14) and a generous iteration budget (500).
    pub fn high_precision() -> Self {
        Self {
            tolerance: T::from(1e-14).unwrap_or_else(T::epsilon),
            max_iterations: 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config: SolverConfig<f64> = SolverConfig::default();
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
        assert_eq!(config.max_iterations, 100);
    }

    #[test]
    fn test_new_rejects_bad_values() {
        assert!(SolverConfig::<f64>::new(0.0, 10).is_err());
        assert!(SolverConfig::<f64>::new(-1.0, 10).is_err());
        assert!(SolverConfig::<f64>::new(f64::NAN, 10).is_err());
        assert!(SolverConfig::<f64>::new(1e-8, 0).is_err());
    }

    #[test]
    fn test_high_precision() {
        let config: SolverConfig<f64> = SolverConfig::high_precision();
        assert!(config.tolerance < 1e-12);
        assert_eq!(config.max_iterations, 500);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: SolverConfig<f64> = toml::from_str("max_iterations = 42").unwrap();
        assert_eq!(config.max_iterations, 42);
        assert!((config.tolerance - 1e-10).abs() < 1e-15);
    }
}
