//! Log-linear interpolation.

use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::InterpolationResult;

/// Linear interpolation of `ln y`, i.e. geometric interpolation of `y`.
///
/// ```text
/// y = y0^(1 - t) * y1^t,   t = (x - x0) / (x1 - x0)
/// ```
///
/// All node values must be strictly positive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LogLinearInterpolator1D;

impl LogLinearInterpolator1D {
    /// Interval, blend weight, value and log-slope at an in-domain `x`.
    fn evaluate(bundle: &Interpolator1DDataBundle, x: f64) -> (usize, f64, f64, f64) {
        let (xs, ys) = (bundle.xs(), bundle.ys());
        if bundle.size() == 1 {
            return (0, 0.0, ys[0], 0.0);
        }
        let i = bundle.interval_index(x);
        let h = xs[i + 1] - xs[i];
        let t = (x - xs[i]) / h;
        let (l0, l1) = (ys[i].ln(), ys[i + 1].ln());
        let value = (l0 + (l1 - l0) * t).exp();
        (i, t, value, (l1 - l0) / h)
    }
}

impl Interpolator1D for LogLinearInterpolator1D {
    fn name(&self) -> &'static str {
        "LogLinear"
    }

    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        bundle.require_positive_ys("log-linear")?;
        Ok(bundle)
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        Ok(Self::evaluate(bundle, x).2)
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        let (_, _, value, slope) = Self::evaluate(bundle, x);
        Ok(value * slope)
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
        let (i, t, value, _) = Self::evaluate(bundle, x);
        let ys = bundle.ys();
        let mut result = vec![0.0; bundle.size()];
        result[i] = value * (1.0 - t) / ys[i];
        result[i + 1] = value * t / ys[i + 1];
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
        let (i, t, value, slope) = Self::evaluate(bundle, x);
        let (xs, ys) = (bundle.xs(), bundle.ys());
        let h = xs[i + 1] - xs[i];
        // d(value * slope) = d(value) * slope + value * d(slope)
        result[i] = value * ((1.0 - t) * slope - 1.0 / h) / ys[i];
        result[i + 1] = value * (t * slope + 1.0 / h) / ys[i + 1];
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::InterpolationError;
    use approx::assert_relative_eq;

    #[test]
    fn test_geometric_midpoint() {
        let interp = LogLinearInterpolator1D;
        let bundle = interp.data_bundle(&[1.0, 2.0], &[1.0, 4.0]).unwrap();
        assert_relative_eq!(interp.interpolate(&bundle, 1.5).unwrap(), 2.0, epsilon = 1e-12);
        assert_relative_eq!(
            interp.first_derivative(&bundle, 1.5).unwrap(),
            2.0 * 4f64.ln(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_rejects_non_positive_values() {
        let result = LogLinearInterpolator1D.data_bundle(&[1.0, 2.0], &[1.0, 0.0]);
        assert!(matches!(result, Err(InterpolationError::InvalidInput(_))));
    }

    #[test]
    fn test_sensitivities_match_finite_difference() {
        let interp = LogLinearInterpolator1D;
        let bundle = interp
            .data_bundle(&[0.5, 1.0, 2.0, 5.0], &[0.99, 0.97, 0.93, 0.80])
            .unwrap();
        for x in [0.5, 0.8, 1.7, 4.9] {
            let analytic = interp.node_sensitivities_for_value(&bundle, x).unwrap();
            let fd = interp.node_sensitivities(&bundle, x, true).unwrap();
            for (a, b) in analytic.iter().zip(&fd) {
                assert_relative_eq!(a, b, epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn test_derivative_sensitivities_match_finite_difference() {
        let interp = LogLinearInterpolator1D;
        let xs = [0.5, 1.0, 2.0, 5.0];
        let ys = [0.99, 0.97, 0.93, 0.80];
        let bundle = interp.data_bundle(&xs, &ys).unwrap();
        let x = 1.3;
        let analytic = interp.node_sensitivities_for_derivative(&bundle, x).unwrap();
        let eps = 1e-6;
        for j in 0..xs.len() {
            let mut up = ys;
            let mut down = ys;
            up[j] += eps;
            down[j] -= eps;
            let d_up = interp
                .first_derivative(&interp.data_bundle(&xs, &up).unwrap(), x)
                .unwrap();
            let d_down = interp
                .first_derivative(&interp.data_bundle(&xs, &down).unwrap(), x)
                .unwrap();
            assert_relative_eq!(analytic[j], (d_up - d_down) / (2.0 * eps), epsilon = 1e-6);
        }
    }
}
