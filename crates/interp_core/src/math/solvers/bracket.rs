//! Geometric bracket expansion for root finders.

use crate::types::SolverError;
use num_traits::Float;

/// Expands an initial interval until the function changes sign across it.
///
/// Each iteration pushes the endpoint with the smaller `|f|` outwards by
/// `growth` times the current width. The number of expansions is bounded by
/// `max_expansions`.
///
/// # Example
///
/// ```
/// use interp_core::math::solvers::BracketRoot;
///
/// let bracketer = BracketRoot::default();
/// let (a, b) = bracketer.bracket(|x: f64| x - 10.0, -0.01, 0.01).unwrap();
/// assert!((a - 10.0) * (b - 10.0) <= 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BracketRoot {
    /// Width multiplier applied at each expansion.
    pub growth: f64,
    /// Maximum number of expansions before giving up.
    pub max_expansions: usize,
}

impl Default for BracketRoot {
    fn default() -> Self {
        Self {
            growth: 1.6,
            max_expansions: 50,
        }
    }
}

impl BracketRoot {
    /// Returns `(lower, upper)` with `f(lower)` and `f(upper)` of opposite sign
    /// (or one of them exactly zero).
    ///
    /// # Errors
    ///
    /// `SolverError::NoBracket` with the last tried interval when the budget
    /// is exhausted or the function turns non-finite.
    pub fn bracket<T, F>(&self, f: F, lower: T, upper: T) -> Result<(T, T), SolverError>
    where
        T: Float,
        F: Fn(T) -> T,
    {
        let growth = T::from(self.growth).unwrap_or_else(T::one);
        let (mut a, mut b) = if lower < upper {
            (lower, upper)
        } else {
            (upper, lower)
        };
        let mut fa = f(a);
        let mut fb = f(b);

        for _ in 0..=self.max_expansions {
            if !fa.is_finite() || !fb.is_finite() {
                break;
            }
            if fa == T::zero() || fb == T::zero() || fa.signum() != fb.signum() {
                return Ok((a, b));
            }
            let width = b - a;
            if fa.abs() < fb.abs() {
                a = a - growth * width;
                fa = f(a);
            } else {
                b = b + growth * width;
                fb = f(b);
            }
        }

        Err(SolverError::NoBracket {
            a: a.to_f64().unwrap_or(f64::NAN),
            b: b.to_f64().unwrap_or(f64::NAN),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_bracketed() {
        let (a, b) = BracketRoot::default()
            .bracket(|x: f64| x, -1.0, 1.0)
            .unwrap();
        assert_eq!((a, b), (-1.0, 1.0));
    }

    #[test]
    fn test_expands_downwards() {
        let (a, b) = BracketRoot::default()
            .bracket(|x: f64| x + 3.0, 0.0, 0.5)
            .unwrap();
        assert!(a <= -3.0 && b > -3.0);
    }

    #[test]
    fn test_swapped_inputs() {
        let (a, b) = BracketRoot::default()
            .bracket(|x: f64| x - 2.0, 1.0, 0.0)
            .unwrap();
        assert!(a < b);
        assert!((a - 2.0) * (b - 2.0) <= 0.0);
    }

    #[test]
    fn test_no_root_fails() {
        let bracketer = BracketRoot {
            growth: 1.6,
            max_expansions: 10,
        };
        let result = bracketer.bracket(|x: f64| x * x + 1.0, -0.1, 0.1);
        assert!(matches!(result, Err(SolverError::NoBracket { .. })));
    }
}
