use crate::math::interpolators::{Extrapolator1D, Interpolator1D, Interpolator1DDataBundle, Side};
use crate::types::{InterpolationError, InterpolationResult};
use std::sync::Arc;

/// Continues `ln y` along its tangent at the boundary node.
///
/// With boundary node `(x_b, y_b)` and the wrapped interpolator's boundary
/// derivative `y'_b`, the extrapolant is `y_b·exp(m·(x - x_b))` with
/// `m = y'_b / y_b`. Needs `y_b > 0`.
#[derive(Debug, Clone)]
pub struct LogLinearExtrapolator1D {
    interpolator: Arc<dyn Interpolator1D>,
}

impl PartialEq for LogLinearExtrapolator1D {
    fn eq(&self, other: &Self) -> bool {
        *self.interpolator == *other.interpolator
    }
}

impl LogLinearExtrapolator1D {
    /// Extrapolator taking its boundary slope from `interpolator`.
    pub fn new(interpolator: Arc<dyn Interpolator1D>) -> Self {
        Self { interpolator }
    }

    /// The interpolator providing the boundary slope.
    pub fn interpolator(&self) -> &Arc<dyn Interpolator1D> {
        &self.interpolator
    }

    /// Boundary node and log-slope.
    fn boundary(&self, bundle: &Interpolator1DDataBundle, side: Side) -> InterpolationResult<(f64, f64, f64)> {
        let (xb, yb) = (side.boundary_x(bundle), side.boundary_y(bundle));
        if yb <= 0.0 {
            return Err(InterpolationError::invalid(format!(
                "log-linear extrapolation needs a positive boundary value, got {}",
                yb
            )));
        }
        let slope = if bundle.size() == 1 {
            0.0
        } else {
            self.interpolator.first_derivative(bundle, xb)?
        };
        Ok((xb, yb, slope / yb))
    }
}

impl Extrapolator1D for LogLinearExtrapolator1D {
    fn name(&self) -> &'static str {
        "LogLinearExtrapolator"
    }

    fn extrapolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (xb, yb, m) = self.boundary(bundle, Side::locate(bundle, x)?)?;
        Ok(yb * (m * (x - xb)).exp())
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (xb, yb, m) = self.boundary(bundle, Side::locate(bundle, x)?)?;
        Ok(m * yb * (m * (x - xb)).exp())
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        let side = Side::locate(bundle, x)?;
        let (xb, yb, m) = self.boundary(bundle, side)?;
        let value = yb * (m * (x - xb)).exp();
        let b = side.boundary_index(bundle);
        let distance = x - xb;

        // ∂m/∂yⱼ = ∂y'_b/∂yⱼ / y_b - m·[j = b] / y_b
        let mut result: Vec<f64> = if bundle.size() == 1 {
            vec![0.0]
        } else {
            self.interpolator
                .node_sensitivities_for_derivative(bundle, xb)?
                .into_iter()
                .map(|d| value * distance * d / yb)
                .collect()
        };
        result[b] += value * (1.0 - m * distance) / yb;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interpolators::{
        Extrapolator1DNodeSensitivityCalculator, LinearInterpolator1D, LogLinearInterpolator1D,
    };
    use approx::assert_relative_eq;

    const XS: [f64; 4] = [0.5, 1.0, 2.0, 4.0];
    const YS: [f64; 4] = [0.99, 0.975, 0.94, 0.87];

    #[test]
    fn test_continues_log_linear_segment() {
        // Log-linear interpolator has constant log-slope on the last interval
        let interp = LogLinearInterpolator1D;
        let extrapolator = LogLinearExtrapolator1D::new(Arc::new(interp));
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        let m = (0.87f64.ln() - 0.94f64.ln()) / 2.0;
        assert_relative_eq!(
            extrapolator.extrapolate(&bundle, 6.0).unwrap(),
            0.87 * (2.0 * m).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let interp = LogLinearInterpolator1D;
        let extrapolator = LogLinearExtrapolator1D::new(Arc::new(interp));
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        let h = 1e-6;
        for x in [0.1, 5.0] {
            let fd = (extrapolator.extrapolate(&bundle, x + h).unwrap()
                - extrapolator.extrapolate(&bundle, x - h).unwrap())
                / (2.0 * h);
            assert_relative_eq!(extrapolator.first_derivative(&bundle, x).unwrap(), fd, epsilon = 1e-8);
        }
    }

    #[test]
    fn test_sensitivities_match_finite_difference() {
        for interp in [
            Arc::new(LogLinearInterpolator1D) as Arc<dyn Interpolator1D>,
            Arc::new(LinearInterpolator1D) as Arc<dyn Interpolator1D>,
        ] {
            let extrapolator = LogLinearExtrapolator1D::new(Arc::clone(&interp));
            let bundle = interp.data_bundle(&XS, &YS).unwrap();
            for x in [0.1, 0.4, 4.5, 8.0] {
                let analytic = extrapolator.node_sensitivities_for_value(&bundle, x).unwrap();
                let fd = Extrapolator1DNodeSensitivityCalculator::default()
                    .calculate(&extrapolator, interp.as_ref(), &bundle, x)
                    .unwrap();
                for (a, b) in analytic.iter().zip(&fd) {
                    assert_relative_eq!(a, b, epsilon = 1e-7);
                }
            }
        }
    }

    #[test]
    fn test_equality_by_interpolator() {
        let a = LogLinearExtrapolator1D::new(Arc::new(LogLinearInterpolator1D));
        assert_eq!(a, LogLinearExtrapolator1D::new(Arc::new(LogLinearInterpolator1D)));
        assert_ne!(a, LogLinearExtrapolator1D::new(Arc::new(LinearInterpolator1D)));
    }
}
