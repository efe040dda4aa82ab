//! Rational-function interpolation (Bulirsch–Stoer).

use super::{FiniteDifferenceInterpolator1DNodeSensitivityCalculator, Interpolator1D, Interpolator1DDataBundle};
use crate::math::finite_difference::{self, DifferenceScheme};
use crate::types::{InterpolationError, InterpolationResult};

/// Guards the first column of the tableau against a zero-over-zero.
const TINY: f64 = 1e-25;

/// Step for the finite-difference first derivative.
const DERIVATIVE_STEP: f64 = 1e-6;

/// Diagonal rational function through a window of `degree + 1` nodes.
///
/// The window is centred on the query and clamped into the data. Values
/// come from the Bulirsch–Stoer tableau; the scheme has no closed-form
/// derivative, so the first derivative and node sensitivities are finite
/// differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RationalFunctionInterpolator1D {
    degree: usize,
}

impl Default for RationalFunctionInterpolator1D {
    /// Four-node window.
    fn default() -> Self {
        Self { degree: 3 }
    }
}

impl RationalFunctionInterpolator1D {
    /// Rational interpolator over `degree + 1` nodes.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `degree` is zero.
    pub fn new(degree: usize) -> InterpolationResult<Self> {
        if degree == 0 {
            return Err(InterpolationError::invalid(
                "rational function degree must be at least 1",
            ));
        }
        Ok(Self { degree })
    }

    /// Window size minus one.
    pub fn degree(&self) -> usize {
        self.degree
    }

    fn window(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<usize> {
        let n = bundle.size();
        let need = self.degree + 1;
        if n < need {
            return Err(InterpolationError::InsufficientData { got: n, need });
        }
        let centre = bundle.lower_bound_index(x);
        Ok(centre.saturating_sub(self.degree / 2).min(n - need))
    }

    /// Bulirsch–Stoer evaluation of the diagonal rational through `(xa, ya)`.
    fn tableau(xa: &[f64], ya: &[f64], x: f64) -> InterpolationResult<f64> {
        let n = xa.len();
        let mut nearest = 0;
        let mut nearest_distance = (x - xa[0]).abs();
        let mut c = Vec::with_capacity(n);
        let mut d = Vec::with_capacity(n);
        for i in 0..n {
            let distance = (x - xa[i]).abs();
            if distance == 0.0 {
                return Ok(ya[i]);
            }
            if distance < nearest_distance {
                nearest = i;
                nearest_distance = distance;
            }
            c.push(ya[i]);
            d.push(ya[i] + TINY);
        }

        let mut y = ya[nearest];
        let mut ns = nearest as isize - 1;
        for m in 1..n {
            for i in 0..n - m {
                let w = c[i + 1] - d[i];
                let h = xa[i + m] - x;
                let t = (xa[i] - x) * d[i] / h;
                let dd = t - c[i + 1];
                if dd == 0.0 {
                    return Err(InterpolationError::Numerical(format!(
                        "rational interpolant has a pole at {}",
                        x
                    )));
                }
                let dd = w / dd;
                d[i] = c[i + 1] * dd;
                c[i] = t * dd;
            }
            // Walk the tableau towards the straightest path
            let correction = if 2 * (ns + 1) < (n - m) as isize {
                c[(ns + 1) as usize]
            } else {
                let value = d[ns as usize];
                ns -= 1;
                value
            };
            y += correction;
        }
        if y.is_finite() {
            Ok(y)
        } else {
            Err(InterpolationError::Numerical(format!(
                "rational interpolant is not finite at {}",
                x
            )))
        }
    }
}

impl Interpolator1D for RationalFunctionInterpolator1D {
    fn name(&self) -> &'static str {
        "RationalFunction"
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        let start = self.window(bundle, x)?;
        let end = start + self.degree + 1;
        Self::tableau(&bundle.xs()[start..end], &bundle.ys()[start..end], x)
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        let (lower, upper) = bundle.domain();
        let scheme = DifferenceScheme::for_domain(x, DERIVATIVE_STEP, lower, upper);
        finite_difference::first_derivative(
            |z| self.interpolate(bundle, z),
            x,
            DERIVATIVE_STEP,
            scheme,
        )
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        FiniteDifferenceInterpolator1DNodeSensitivityCalculator::default().calculate(self, bundle, x)
    }
}
