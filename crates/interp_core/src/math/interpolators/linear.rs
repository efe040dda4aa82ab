//! Linear interpolation implementation.

use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::InterpolationResult;

/// Piecewise linear interpolator.
///
/// # Formula
///
/// ```text
/// y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)
/// ```
///
/// The sensitivities are the two blend weights `(1 - t, t)`.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{Interpolator1D, LinearInterpolator1D};
///
/// let interp = LinearInterpolator1D;
/// let bundle = interp.data_bundle(&[0.0, 1.0, 2.0], &[0.0, 2.0, 4.0]).unwrap();
///
/// let y = interp.interpolate(&bundle, 0.5).unwrap();
/// assert!((y - 1.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LinearInterpolator1D;

impl LinearInterpolator1D {
    /// Interval index and blend weight `t ∈ [0, 1]` for an in-domain `x`.
    #[inline]
    fn locate(bundle: &Interpolator1DDataBundle, x: f64) -> (usize, f64) {
        let i = bundle.interval_index(x);
        let xs = bundle.xs();
        (i, (x - xs[i]) / (xs[i + 1] - xs[i]))
    }
}

impl Interpolator1D for LinearInterpolator1D {
    fn name(&self) -> &'static str {
        "Linear"
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        if bundle.size() == 1 {
            return Ok(bundle.first_y());
        }
        let (i, t) = Self::locate(bundle, x);
        let ys = bundle.ys();
        Ok(ys[i] + (ys[i + 1] - ys[i]) * t)
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        if bundle.size() == 1 {
            return Ok(0.0);
        }
        let i = bundle.interval_index(x);
        let (xs, ys) = (bundle.xs(), bundle.ys());
        Ok((ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i]))
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        let mut result = vec![0.0; bundle.size()];
        if bundle.size() == 1 {
            result[0] = 1.0;
            return Ok(result);
        }
        let (i, t) = Self::locate(bundle, x);
        result[i] = 1.0 - t;
        result[i + 1] = t;
        Ok(result)
    }

    fn node_sensitivities_for_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        let mut result = vec![0.0; bundle.size()];
        if bundle.size() == 1 {
            return Ok(result);
        }
        let i = bundle.interval_index(x);
        let h = bundle.xs()[i + 1] - bundle.xs()[i];
        result[i] = -1.0 / h;
        result[i + 1] = 1.0 / h;
        Ok(result)
    }
}
