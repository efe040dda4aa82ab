//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Brent's method root finder.
///
/// Combines bisection, the secant step and inverse quadratic interpolation.
/// Needs a sign-changing bracket and no derivative.
///
/// # Example
///
/// ```
/// use interp_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!(f(root).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(SolverConfig::default())
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Find a root of `f` in the bracket `[a, b]` (either order).
    ///
    /// # Errors
    ///
    /// * `SolverError::NoBracket` - `f(a)` and `f(b)` have the same sign
    /// * `SolverError::MaxIterationsExceeded` - iteration budget exhausted
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let two = T::one() + T::one();
        let three = two + T::one();
        let tol = self.config.tolerance;

        let (mut a, mut b) = (a, b);
        let (mut fa, mut fb) = (f(a), f(b));

        if fa == T::zero() {
            return Ok(a);
        }
        if fb == T::zero() {
            return Ok(b);
        }
        if fa.signum() == fb.signum() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        // c is the contrapoint: f(b) and f(c) always straddle zero
        let mut c = a;
        let mut fc = fa;
        let mut step = b - a;
        let mut prev_step = step;

        for _ in 0..self.config.max_iterations {
            if fb.signum() == fc.signum() {
                c = a;
                fc = fa;
                step = b - a;
                prev_step = step;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let half = (c - b) / two;
            if fb.abs() < tol || half.abs() <= tol {
                return Ok(b);
            }

            let interpolation_ok = prev_step.abs() >= tol && fa.abs() > fb.abs();
            if interpolation_ok {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    // secant
                    (two * half * s, T::one() - s)
                } else {
                    // inverse quadratic
                    let r = fb / fc;
                    let t = fa / fc;
                    (
                        s * (two * half * t * (t - r) - (b - a) * (r - T::one())),
                        (t - T::one()) * (r - T::one()) * (s - T::one()),
                    )
                };
                if p > T::zero() {
                    q = -q;
                } else {
                    p = -p;
                }
                let accept = two * p < (three * half * q - (tol * q).abs())
                    && two * p < (prev_step * q).abs();
                if accept {
                    prev_step = step;
                    step = p / q;
                } else {
                    step = half;
                    prev_step = half;
                }
            } else {
                step = half;
                prev_step = half;
            }

            a = b;
            fa = fb;
            b = if step.abs() > tol {
                b + step
            } else if half > T::zero() {
                b + tol
            } else {
                b - tol
            };
            fb = f(b);
            if fb == T::zero() {
                return Ok(b);
            }
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}
