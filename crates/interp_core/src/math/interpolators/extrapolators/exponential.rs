use crate::math::interpolators::{Extrapolator1D, Interpolator1DDataBundle, Side};
use crate::types::{InterpolationError, InterpolationResult};

/// Keeps the continuously-compounded rate of the boundary node.
///
/// With boundary node `(x_b, y_b)` the rate `r = ln(y_b)/x_b` is held and
/// the extrapolant is `exp(x·r)`. Pairs with the exponential interpolator
/// for discount-factor curves. Needs `y_b > 0` and `x_b ≠ 0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExponentialExtrapolator1D;

impl ExponentialExtrapolator1D {
    fn rate(bundle: &Interpolator1DDataBundle, side: Side) -> InterpolationResult<(f64, f64, f64)> {
        let (xb, yb) = (side.boundary_x(bundle), side.boundary_y(bundle));
        if yb <= 0.0 || xb == 0.0 {
            return Err(InterpolationError::invalid(format!(
                "exponential extrapolation needs a positive boundary value away from x = 0, got ({}, {})",
                xb, yb
            )));
        }
        Ok((xb, yb, yb.ln() / xb))
    }
}

impl Extrapolator1D for ExponentialExtrapolator1D {
    fn name(&self) -> &'static str {
        "ExponentialExtrapolator"
    }

    fn extrapolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (_, _, r) = Self::rate(bundle, Side::locate(bundle, x)?)?;
        Ok((x * r).exp())
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (_, _, r) = Self::rate(bundle, Side::locate(bundle, x)?)?;
        Ok(r * (x * r).exp())
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        let side = Side::locate(bundle, x)?;
        let (xb, yb, r) = Self::rate(bundle, side)?;
        let mut result = vec![0.0; bundle.size()];
        result[side.boundary_index(bundle)] = (x * r).exp() * x / (xb * yb);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interpolators::{
        Extrapolator1DNodeSensitivityCalculator, ExponentialInterpolator1D, Interpolator1D,
    };
    use approx::assert_relative_eq;

    #[test]
    fn test_keeps_boundary_rate() {
        let interp = ExponentialInterpolator1D;
        let xs = [1.0, 2.0, 5.0];
        let ys = [(-0.02f64).exp(), (-0.05f64).exp(), (-0.2f64).exp()];
        let bundle = interp.data_bundle(&xs, &ys).unwrap();
        // Right boundary rate is -0.04
        assert_relative_eq!(
            ExponentialExtrapolator1D.extrapolate(&bundle, 10.0).unwrap(),
            (-0.4f64).exp(),
            epsilon = 1e-14
        );
        // Left boundary rate is -0.02
        assert_relative_eq!(
            ExponentialExtrapolator1D.extrapolate(&bundle, 0.5).unwrap(),
            (-0.01f64).exp(),
            epsilon = 1e-14
        );
    }

    #[test]
    fn test_derivative_and_sensitivities() {
        let interp = ExponentialInterpolator1D;
        let xs = [1.0, 2.0, 5.0];
        let ys = [0.98, 0.95, 0.82];
        let bundle = interp.data_bundle(&xs, &ys).unwrap();
        let h = 1e-6;
        for x in [0.2, 0.7, 6.0, 12.0] {
            let fd = (ExponentialExtrapolator1D.extrapolate(&bundle, x + h).unwrap()
                - ExponentialExtrapolator1D.extrapolate(&bundle, x - h).unwrap())
                / (2.0 * h);
            assert_relative_eq!(
                ExponentialExtrapolator1D.first_derivative(&bundle, x).unwrap(),
                fd,
                epsilon = 1e-8
            );
            let analytic = ExponentialExtrapolator1D
                .node_sensitivities_for_value(&bundle, x)
                .unwrap();
            let bumped = Extrapolator1DNodeSensitivityCalculator::default()
                .calculate(&ExponentialExtrapolator1D, &interp, &bundle, x)
                .unwrap();
            for (a, b) in analytic.iter().zip(&bumped) {
                assert_relative_eq!(a, b, epsilon = 1e-7);
            }
        }
    }
}
