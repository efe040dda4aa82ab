//! An interpolator paired with boundary extrapolators.

use super::{Extrapolator1D, Interpolator1D, Interpolator1DDataBundle, Side};
use crate::math::finite_difference::DEFAULT_NODE_BUMP;
use crate::types::InterpolationResult;
use std::sync::Arc;

/// Dispatches each query to an interpolator or one of two extrapolators.
///
/// - `x < first_x`: left extrapolator
/// - `x > last_x`: right extrapolator
/// - otherwise: the interpolator
///
/// A missing extrapolator lets the interpolator's own domain error through.
/// The combination is itself an [`Interpolator1D`] and builds its bundles
/// with the wrapped interpolator, so it can be nested wherever a plain
/// interpolator is expected.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use interp_core::math::interpolators::{
///     CombinedInterpolatorExtrapolator, FlatExtrapolator1D, Interpolator1D, LinearInterpolator1D,
/// };
///
/// let combined = CombinedInterpolatorExtrapolator::with_extrapolator(
///     Arc::new(LinearInterpolator1D),
///     Arc::new(FlatExtrapolator1D),
/// );
/// let bundle = combined.data_bundle(&[1.0, 2.0], &[10.0, 20.0]).unwrap();
/// assert_eq!(combined.interpolate(&bundle, 0.0).unwrap(), 10.0);
/// assert_eq!(combined.interpolate(&bundle, 1.5).unwrap(), 15.0);
/// assert_eq!(combined.interpolate(&bundle, 3.0).unwrap(), 20.0);
/// ```
#[derive(Debug, Clone)]
pub struct CombinedInterpolatorExtrapolator {
    interpolator: Arc<dyn Interpolator1D>,
    left: Option<Arc<dyn Extrapolator1D>>,
    right: Option<Arc<dyn Extrapolator1D>>,
}

impl PartialEq for CombinedInterpolatorExtrapolator {
    fn eq(&self, other: &Self) -> bool {
        *self.interpolator == *other.interpolator
            && same_side(&self.left, &other.left)
            && same_side(&self.right, &other.right)
    }
}

fn same_side(a: &Option<Arc<dyn Extrapolator1D>>, b: &Option<Arc<dyn Extrapolator1D>>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => **a == **b,
        (None, None) => true,
        _ => false,
    }
}

/// Where a query lands.
enum Route<'a> {
    Inside,
    Outside(&'a dyn Extrapolator1D),
}

impl CombinedInterpolatorExtrapolator {
    /// Interpolator without extrapolation.
    pub fn new(interpolator: Arc<dyn Interpolator1D>) -> Self {
        Self {
            interpolator,
            left: None,
            right: None,
        }
    }

    /// The same extrapolator on both sides.
    pub fn with_extrapolator(
        interpolator: Arc<dyn Interpolator1D>,
        extrapolator: Arc<dyn Extrapolator1D>,
    ) -> Self {
        Self {
            interpolator,
            left: Some(Arc::clone(&extrapolator)),
            right: Some(extrapolator),
        }
    }

    /// Distinct extrapolators for the two sides.
    pub fn with_extrapolators(
        interpolator: Arc<dyn Interpolator1D>,
        left: Arc<dyn Extrapolator1D>,
        right: Arc<dyn Extrapolator1D>,
    ) -> Self {
        Self {
            interpolator,
            left: Some(left),
            right: Some(right),
        }
    }

    /// Any combination of extrapolator slots; `None` leaves that side
    /// without extrapolation.
    pub fn from_parts(
        interpolator: Arc<dyn Interpolator1D>,
        left: Option<Arc<dyn Extrapolator1D>>,
        right: Option<Arc<dyn Extrapolator1D>>,
    ) -> Self {
        Self {
            interpolator,
            left,
            right,
        }
    }

    /// The wrapped interpolator.
    pub fn interpolator(&self) -> &Arc<dyn Interpolator1D> {
        &self.interpolator
    }

    /// Extrapolator below the data, if any.
    pub fn left_extrapolator(&self) -> Option<&Arc<dyn Extrapolator1D>> {
        self.left.as_ref()
    }

    /// Extrapolator above the data, if any.
    pub fn right_extrapolator(&self) -> Option<&Arc<dyn Extrapolator1D>> {
        self.right.as_ref()
    }

    fn route(&self, bundle: &Interpolator1DDataBundle, x: f64) -> Route<'_> {
        let extrapolator = if x < bundle.first_x() {
            self.left.as_deref()
        } else if x > bundle.last_x() {
            self.right.as_deref()
        } else {
            None
        };
        match extrapolator {
            Some(e) => Route::Outside(e),
            None => Route::Inside,
        }
    }
}

impl Interpolator1D for CombinedInterpolatorExtrapolator {
    fn name(&self) -> &'static str {
        "CombinedInterpolatorExtrapolator"
    }

    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        self.interpolator.prepare(bundle)
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        match self.route(bundle, x) {
            Route::Inside => self.interpolator.interpolate(bundle, x),
            Route::Outside(e) => e.extrapolate(bundle, x),
        }
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        match self.route(bundle, x) {
            Route::Inside => self.interpolator.first_derivative(bundle, x),
            Route::Outside(e) => e.first_derivative(bundle, x),
        }
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        match self.route(bundle, x) {
            Route::Inside => self.interpolator.node_sensitivities_for_value(bundle, x),
            Route::Outside(e) => e.node_sensitivities_for_value(bundle, x),
        }
    }

    fn node_sensitivities_for_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        match self.route(bundle, x) {
            Route::Inside => self.interpolator.node_sensitivities_for_derivative(bundle, x),
            Route::Outside(e) => {
                // Difference away from the domain so both points stay outside
                let h = DEFAULT_NODE_BUMP;
                let (a, b) = match Side::locate(bundle, x)? {
                    Side::Left => (x - h, x),
                    Side::Right => (x, x + h),
                };
                let lower = e.node_sensitivities_for_value(bundle, a)?;
                let upper = e.node_sensitivities_for_value(bundle, b)?;
                Ok(upper.iter().zip(&lower).map(|(u, l)| (u - l) / h).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interpolators::{
        FlatExtrapolator1D, LinearExtrapolator1D, LinearInterpolator1D,
        NaturalCubicSplineInterpolator1D,
    };
    use crate::types::InterpolationError;
    use approx::assert_relative_eq;

    const XS: [f64; 5] = [1.0, 2.0, 3.0, 4.5, 6.0];
    const YS: [f64; 5] = [1.2, 1.9, 1.4, 2.2, 2.0];

    fn spline_flat_linear() -> CombinedInterpolatorExtrapolator {
        let spline: Arc<dyn Interpolator1D> = Arc::new(NaturalCubicSplineInterpolator1D::default());
        CombinedInterpolatorExtrapolator::with_extrapolators(
            Arc::clone(&spline),
            Arc::new(FlatExtrapolator1D),
            Arc::new(LinearExtrapolator1D::new(spline)),
        )
    }

    // ========================================
    // Dispatch Tests
    // ========================================

    #[test]
    fn test_inside_matches_interpolator() {
        let combined = spline_flat_linear();
        let spline = NaturalCubicSplineInterpolator1D::default();
        let bundle = combined.data_bundle(&XS, &YS).unwrap();
        for x in [1.0, 1.7, 3.3, 6.0] {
            assert_eq!(
                combined.interpolate(&bundle, x).unwrap(),
                spline.interpolate(&bundle, x).unwrap()
            );
        }
    }

    #[test]
    fn test_left_flat_right_tangent() {
        let combined = spline_flat_linear();
        let spline = NaturalCubicSplineInterpolator1D::default();
        let bundle = combined.data_bundle(&XS, &YS).unwrap();
        for x in [-5.0, 0.0, 0.99] {
            assert_eq!(combined.interpolate(&bundle, x).unwrap(), 1.2);
        }
        let slope = spline.first_derivative(&bundle, 6.0).unwrap();
        for x in [6.5, 10.0] {
            assert_relative_eq!(
                combined.interpolate(&bundle, x).unwrap(),
                2.0 + slope * (x - 6.0),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_without_extrapolator_propagates_domain_error() {
        let combined = CombinedInterpolatorExtrapolator::new(Arc::new(LinearInterpolator1D));
        let bundle = combined.data_bundle(&XS, &YS).unwrap();
        assert!(matches!(
            combined.interpolate(&bundle, 0.0),
            Err(InterpolationError::OutOfDomain { .. })
        ));
    }

    // ========================================
    // Sensitivity Tests
    // ========================================

    #[test]
    fn test_sensitivities_match_finite_difference_everywhere() {
        let combined = spline_flat_linear();
        let bundle = combined.data_bundle(&XS, &YS).unwrap();
        for x in [-1.0, 1.0, 2.4, 5.1, 6.0, 7.5] {
            let analytic = combined.node_sensitivities_for_value(&bundle, x).unwrap();
            let fd = combined.node_sensitivities(&bundle, x, true).unwrap();
            for (a, b) in analytic.iter().zip(&fd) {
                assert_relative_eq!(a, b, epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn test_derivative_sensitivities_outside() {
        let combined = spline_flat_linear();
        let bundle = combined.data_bundle(&XS, &YS).unwrap();
        // The tangent slope beyond the right edge is the spline's edge slope
        let spline = NaturalCubicSplineInterpolator1D::default();
        let expected = spline.node_sensitivities_for_derivative(&bundle, 6.0).unwrap();
        let outside = combined.node_sensitivities_for_derivative(&bundle, 8.0).unwrap();
        for (a, b) in outside.iter().zip(&expected) {
            assert_relative_eq!(a, b, epsilon = 1e-6);
        }
        let left = combined.node_sensitivities_for_derivative(&bundle, -3.0).unwrap();
        assert!(left.iter().all(|s| s.abs() < 1e-9));
    }

    #[test]
    fn test_equality() {
        assert_eq!(spline_flat_linear(), spline_flat_linear());
        assert_ne!(
            spline_flat_linear(),
            CombinedInterpolatorExtrapolator::new(Arc::new(LinearInterpolator1D))
        );
        // Same interpolator, extrapolators on one side only
        let spline: Arc<dyn Interpolator1D> = Arc::new(NaturalCubicSplineInterpolator1D::default());
        let left_only = CombinedInterpolatorExtrapolator::from_parts(
            Arc::clone(&spline),
            Some(Arc::new(FlatExtrapolator1D)),
            None,
        );
        assert_eq!(
            left_only,
            CombinedInterpolatorExtrapolator::from_parts(
                Arc::clone(&spline),
                Some(Arc::new(FlatExtrapolator1D)),
                None,
            )
        );
        assert_ne!(
            left_only,
            CombinedInterpolatorExtrapolator::with_extrapolator(spline, Arc::new(FlatExtrapolator1D))
        );
    }
}
