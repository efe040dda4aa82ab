//! Time-square interpolation.

use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::{InterpolationError, InterpolationResult};

/// Linear interpolation of the total variance `x·y²`.
///
/// Used for volatility term structures: with `y` a volatility and `x` a
/// time, `x·y²` is the total variance and interpolating it linearly keeps
/// forward variance piecewise constant.
///
/// ```text
/// y(x) = sqrt( ((1 - t)·x0·y0² + t·x1·y1²) / x )
/// ```
///
/// Node coordinates and values must be strictly positive.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{Interpolator1D, TimeSquareInterpolator1D};
///
/// let interp = TimeSquareInterpolator1D;
/// let bundle = interp.data_bundle(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(interp.interpolate(&bundle, 3.0).unwrap(), 6.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TimeSquareInterpolator1D;

impl TimeSquareInterpolator1D {
    /// Interval, blend weight, value and the slope of total variance.
    fn evaluate(bundle: &Interpolator1DDataBundle, x: f64) -> (usize, f64, f64, f64) {
        let (xs, ys) = (bundle.xs(), bundle.ys());
        if bundle.size() == 1 {
            return (0, 0.0, ys[0], 0.0);
        }
        let i = bundle.interval_index(x);
        let h = xs[i + 1] - xs[i];
        let t = (x - xs[i]) / h;
        let v0 = xs[i] * ys[i] * ys[i];
        let v1 = xs[i + 1] * ys[i + 1] * ys[i + 1];
        let variance = (1.0 - t) * v0 + t * v1;
        (i, t, (variance / x).sqrt(), (v1 - v0) / h)
    }
}

impl Interpolator1D for TimeSquareInterpolator1D {
    fn name(&self) -> &'static str {
        "TimeSquare"
    }

    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        if bundle.first_x() <= 0.0 {
            return Err(InterpolationError::invalid(format!(
                "time-square interpolation needs positive x, got {}",
                bundle.first_x()
            )));
        }
        bundle.require_positive_ys("time-square")?;
        Ok(bundle)
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        Ok(Self::evaluate(bundle, x).2)
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        if bundle.size() == 1 {
            return Ok(0.0);
        }
        let (_, _, y, variance_slope) = Self::evaluate(bundle, x);
        // y² = v/x, so 2·y·y' = (v' - y²)/x
        Ok((variance_slope - y * y) / (2.0 * x * y))
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        if bundle.size() == 1 {
            return Ok(vec![1.0]);
        }
        let (i, t, y, _) = Self::evaluate(bundle, x);
        let (xs, ys) = (bundle.xs(), bundle.ys());
        let mut result = vec![0.0; bundle.size()];
        result[i] = (1.0 - t) * xs[i] * ys[i] / (x * y);
        result[i + 1] = t * xs[i + 1] * ys[i + 1] / (x * y);
        Ok(result)
    }
}
