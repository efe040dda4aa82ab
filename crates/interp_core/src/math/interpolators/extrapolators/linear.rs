use crate::math::interpolators::{Extrapolator1D, Interpolator1D, Interpolator1DDataBundle, Side};
use crate::types::{InterpolationError, InterpolationResult};
use std::sync::Arc;

/// Continues along the tangent line at the boundary node.
///
/// The slope comes from the wrapped interpolator: its analytic
/// `first_derivative` at the boundary, or with an `epsilon` a one-sided
/// difference taken `epsilon` inside the domain. The latter serves
/// interpolators whose derivative at the exact boundary is unreliable.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use interp_core::math::interpolators::{
///     Extrapolator1D, Interpolator1D, LinearExtrapolator1D, LinearInterpolator1D,
/// };
///
/// let extrapolator = LinearExtrapolator1D::new(Arc::new(LinearInterpolator1D));
/// let bundle = LinearInterpolator1D.data_bundle(&[1.0, 2.0], &[3.0, 5.0]).unwrap();
/// assert_eq!(extrapolator.extrapolate(&bundle, 4.0).unwrap(), 9.0);
/// ```
#[derive(Debug, Clone)]
pub struct LinearExtrapolator1D {
    interpolator: Arc<dyn Interpolator1D>,
    epsilon: Option<f64>,
}

impl PartialEq for LinearExtrapolator1D {
    fn eq(&self, other: &Self) -> bool {
        *self.interpolator == *other.interpolator && self.epsilon == other.epsilon
    }
}

impl LinearExtrapolator1D {
    /// Extrapolator using the analytic boundary derivative.
    pub fn new(interpolator: Arc<dyn Interpolator1D>) -> Self {
        Self {
            interpolator,
            epsilon: None,
        }
    }

    /// Extrapolator using a one-sided difference of width `epsilon`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `epsilon` is finite and strictly positive.
    pub fn with_epsilon(interpolator: Arc<dyn Interpolator1D>, epsilon: f64) -> InterpolationResult<Self> {
        if !(epsilon.is_finite() && epsilon > 0.0) {
            return Err(InterpolationError::invalid(format!(
                "epsilon must be positive and finite, got {}",
                epsilon
            )));
        }
        Ok(Self {
            interpolator,
            epsilon: Some(epsilon),
        })
    }

    /// The interpolator providing the boundary slope.
    pub fn interpolator(&self) -> &Arc<dyn Interpolator1D> {
        &self.interpolator
    }

    /// One-sided difference width, if any.
    pub fn epsilon(&self) -> Option<f64> {
        self.epsilon
    }

    /// Inner point for the one-sided difference and its signed offset.
    fn inner_point(side: Side, xb: f64, eps: f64) -> (f64, f64) {
        match side {
            Side::Left => (xb + eps, eps),
            Side::Right => (xb - eps, -eps),
        }
    }

    fn boundary_slope(&self, bundle: &Interpolator1DDataBundle, side: Side) -> InterpolationResult<f64> {
        if bundle.size() == 1 {
            return Ok(0.0);
        }
        let (xb, yb) = (side.boundary_x(bundle), side.boundary_y(bundle));
        match self.epsilon {
            None => self.interpolator.first_derivative(bundle, xb),
            Some(eps) => {
                let (inner, offset) = Self::inner_point(side, xb, eps);
                Ok((self.interpolator.interpolate(bundle, inner)? - yb) / offset)
            }
        }
    }

    fn boundary_slope_sensitivities(
        &self,
        bundle: &Interpolator1DDataBundle,
        side: Side,
    ) -> InterpolationResult<Vec<f64>> {
        if bundle.size() == 1 {
            return Ok(vec![0.0]);
        }
        let xb = side.boundary_x(bundle);
        match self.epsilon {
            None => self.interpolator.node_sensitivities_for_derivative(bundle, xb),
            Some(eps) => {
                let (inner, offset) = Self::inner_point(side, xb, eps);
                let mut s = self.interpolator.node_sensitivities_for_value(bundle, inner)?;
                s[side.boundary_index(bundle)] -= 1.0;
                Ok(s.into_iter().map(|v| v / offset).collect())
            }
        }
    }
}

impl Extrapolator1D for LinearExtrapolator1D {
    fn name(&self) -> &'static str {
        "LinearExtrapolator"
    }

    fn extrapolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let side = Side::locate(bundle, x)?;
        let slope = self.boundary_slope(bundle, side)?;
        Ok(side.boundary_y(bundle) + slope * (x - side.boundary_x(bundle)))
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let side = Side::locate(bundle, x)?;
        self.boundary_slope(bundle, side)
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        let side = Side::locate(bundle, x)?;
        let distance = x - side.boundary_x(bundle);
        let mut result: Vec<f64> = self
            .boundary_slope_sensitivities(bundle, side)?
            .into_iter()
            .map(|s| s * distance)
            .collect();
        result[side.boundary_index(bundle)] += 1.0;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interpolators::{
        Extrapolator1DNodeSensitivityCalculator, LinearInterpolator1D,
        NaturalCubicSplineInterpolator1D,
    };
    use approx::assert_relative_eq;

    const XS: [f64; 5] = [1.0, 1.5, 2.5, 3.0, 4.0];
    const YS: [f64; 5] = [2.0, 2.4, 2.1, 3.3, 3.0];

    #[test]
    fn test_tangent_line() {
        let interp = LinearInterpolator1D;
        let extrapolator = LinearExtrapolator1D::new(Arc::new(interp));
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        // Left slope (2.4 - 2.0) / 0.5 = 0.8
        assert_relative_eq!(extrapolator.extrapolate(&bundle, 0.0).unwrap(), 2.0 - 0.8, epsilon = 1e-12);
        // Right slope (3.0 - 3.3) / 1.0 = -0.3
        assert_relative_eq!(extrapolator.extrapolate(&bundle, 6.0).unwrap(), 3.0 - 0.6, epsilon = 1e-12);
        assert_relative_eq!(extrapolator.first_derivative(&bundle, 6.0).unwrap(), -0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_epsilon_matches_analytic_for_linear() {
        let interp = LinearInterpolator1D;
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        let analytic = LinearExtrapolator1D::new(Arc::new(interp));
        let shifted = LinearExtrapolator1D::with_epsilon(Arc::new(interp), 1e-4).unwrap();
        for x in [-1.0, 0.5, 4.5, 7.0] {
            assert_relative_eq!(
                analytic.extrapolate(&bundle, x).unwrap(),
                shifted.extrapolate(&bundle, x).unwrap(),
                epsilon = 1e-9
            );
        }
        assert!(LinearExtrapolator1D::with_epsilon(Arc::new(interp), 0.0).is_err());
    }

    #[test]
    fn test_sensitivities_match_finite_difference() {
        let spline = NaturalCubicSplineInterpolator1D::default();
        let bundle = spline.data_bundle(&XS, &YS).unwrap();
        for extrapolator in [
            LinearExtrapolator1D::new(Arc::new(spline)),
            LinearExtrapolator1D::with_epsilon(Arc::new(spline), 1e-3).unwrap(),
        ] {
            for x in [-0.5, 0.9, 4.2, 6.0] {
                let analytic = extrapolator.node_sensitivities_for_value(&bundle, x).unwrap();
                let fd = Extrapolator1DNodeSensitivityCalculator::default()
                    .calculate(&extrapolator, &spline, &bundle, x)
                    .unwrap();
                for (a, b) in analytic.iter().zip(&fd) {
                    assert_relative_eq!(a, b, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_equality_by_parameters() {
        let a = LinearExtrapolator1D::new(Arc::new(LinearInterpolator1D));
        let b = LinearExtrapolator1D::new(Arc::new(LinearInterpolator1D));
        let c = LinearExtrapolator1D::new(Arc::new(NaturalCubicSplineInterpolator1D::default()));
        assert_eq!(a, b);
        assert_ne!(a, c);
        let with_eps = LinearExtrapolator1D::with_epsilon(Arc::new(LinearInterpolator1D), 1e-4).unwrap();
        assert_ne!(a, with_eps);
        assert_eq!(
            with_eps,
            LinearExtrapolator1D::with_epsilon(Arc::new(LinearInterpolator1D), 1e-4).unwrap()
        );
    }
}
