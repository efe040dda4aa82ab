//! Cubic spline with monotonicity-preserving node slopes.

use super::data_bundle::{BundleState, HermiteSlopes};
use super::hermite::{self, secant_sensitivity};
use super::{
    Interpolator1D, Interpolator1DDataBundle, NaturalCubicSplineInterpolator1D, SplineBoundary,
};
use crate::types::{InterpolationError, InterpolationResult};

/// Cubic Hermite interpolator through filtered cubic-spline slopes.
///
/// The node slopes of a cubic spline (natural by default, clamped on
/// request) pass through Hyman's filter before the Hermite cubics are
/// built:
///
/// - where the secants `δᵢ₋₁` and `δᵢ` share a sign, the slope keeps that
///   sign and its size is capped at `3·min(|δᵢ₋₁|, |δᵢ|)`
/// - at a local extremum of the data or next to a flat secant the slope
///   is zero
/// - an end node has one secant, which serves as both neighbours
///
/// Every interval's cubic then stays monotone between its two node values,
/// so monotone data give a monotone curve. Where the filter leaves both
/// node slopes alone the curve coincides with the spline.
///
/// The filter is piecewise linear in the node values, so node
/// sensitivities are analytic away from the switching points.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{
///     Interpolator1D, MonotonicityPreservingCubicSplineInterpolator1D,
/// };
///
/// let interp = MonotonicityPreservingCubicSplineInterpolator1D::default();
/// let bundle = interp.data_bundle(&[1.0, 2.0, 3.0, 4.0], &[0.0, 0.1, 2.0, 2.0]).unwrap();
/// // No overshoot past the plateau
/// assert!(interp.interpolate(&bundle, 3.5).unwrap() <= 2.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonotonicityPreservingCubicSplineInterpolator1D {
    spline: NaturalCubicSplineInterpolator1D,
}

impl MonotonicityPreservingCubicSplineInterpolator1D {
    /// Filtered spline with the given end conditions.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on a non-finite clamped gradient.
    pub fn new(left: SplineBoundary, right: SplineBoundary) -> InterpolationResult<Self> {
        Ok(Self {
            spline: NaturalCubicSplineInterpolator1D::new(left, right)?,
        })
    }

    /// The spline supplying the raw node slopes.
    pub fn spline(&self) -> &NaturalCubicSplineInterpolator1D {
        &self.spline
    }

    fn slopes<'a>(
        &self,
        bundle: &'a Interpolator1DDataBundle,
    ) -> InterpolationResult<Option<&'a HermiteSlopes>> {
        match bundle.state() {
            BundleState::MonotoneSpline(slopes) => Ok(Some(slopes)),
            BundleState::Plain if bundle.size() == 1 => Ok(None),
            _ => Err(InterpolationError::invalid(
                "data bundle was not built by a monotonicity-preserving cubic spline",
            )),
        }
    }
}

impl Interpolator1D for MonotonicityPreservingCubicSplineInterpolator1D {
    fn name(&self) -> &'static str {
        "MonotonicityPreservingCubicSpline"
    }

    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        let n = bundle.size();
        if n == 1 {
            return Ok(bundle);
        }
        let spline_bundle = self.spline.prepare(bundle.clone())?;
        let (xs, ys) = (bundle.xs(), bundle.ys());
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let delta: Vec<f64> = (0..n - 1).map(|k| (ys[k + 1] - ys[k]) / h[k]).collect();

        let mut slopes = Vec::with_capacity(n);
        let mut slope_sensitivities = Vec::with_capacity(n);
        for (i, &x) in xs.iter().enumerate() {
            let raw = self.spline.first_derivative(&spline_bundle, x)?;
            let (lo, hi) = match i {
                0 => (0, 0),
                _ if i == n - 1 => (n - 2, n - 2),
                _ => (i - 1, i),
            };
            let (before, after) = (delta[lo], delta[hi]);
            if before * after <= 0.0 || raw * after <= 0.0 {
                slopes.push(0.0);
                slope_sensitivities.push(vec![0.0; n]);
                continue;
            }
            let k = if before.abs() <= after.abs() { lo } else { hi };
            if raw.abs() > 3.0 * delta[k].abs() {
                slopes.push(3.0 * delta[k]);
                slope_sensitivities.push(secant_sensitivity(n, &h, k).iter().map(|s| 3.0 * s).collect());
            } else {
                slopes.push(raw);
                slope_sensitivities.push(self.spline.node_sensitivities_for_derivative(&spline_bundle, x)?);
            }
        }

        let zeroed = slopes.iter().filter(|&&m| m == 0.0).count();
        tracing::debug!(nodes = n, zeroed, "built monotonicity-preserving spline data bundle");
        Ok(bundle.with_state(BundleState::MonotoneSpline(HermiteSlopes {
            slopes,
            slope_sensitivities,
        })))
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        match self.slopes(bundle)? {
            Some(state) => Ok(hermite::value(bundle, state, x)),
            None => Ok(bundle.first_y()),
        }
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        match self.slopes(bundle)? {
            Some(state) => Ok(hermite::derivative(bundle, state, x)),
            None => Ok(0.0),
        }
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        match self.slopes(bundle)? {
            Some(state) => Ok(hermite::coefficients(bundle, state, x).0),
            None => Ok(vec![1.0]),
        }
    }

    fn node_sensitivities_for_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        match self.slopes(bundle)? {
            Some(state) => Ok(hermite::coefficients(bundle, state, x).1),
            None => Ok(vec![0.0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    const XS: [f64; 10] = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];

    fn grid(lo: f64, hi: f64, steps: usize) -> impl Iterator<Item = f64> {
        (0..=steps).map(move |k| lo + (hi - lo) * k as f64 / steps as f64)
    }

    // ========================================
    // Shape Tests
    // ========================================

    #[test]
    fn test_increasing_data_without_overshoot() {
        let ys = [-1.9, -1.3, 1.9, 1.95, 2.0, 3.0, 3.01, 3.02, 3.02, 3.02];
        let spline = NaturalCubicSplineInterpolator1D::default();
        let spline_bundle = spline.data_bundle(&XS, &ys).unwrap();
        // The plain spline rises past the plateau
        assert!(grid(1.0, 10.0, 900).any(|x| spline.interpolate(&spline_bundle, x).unwrap() > 3.05));

        let interp = MonotonicityPreservingCubicSplineInterpolator1D::default();
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        let mut previous = f64::NEG_INFINITY;
        for x in grid(1.0, 10.0, 900) {
            let y = interp.interpolate(&bundle, x).unwrap();
            assert!(y >= previous - 1e-12, "decreases at {}", x);
            assert!(y <= 3.02 + 1e-12);
            previous = y;
        }
    }

    #[test]
    fn test_decreasing_data() {
        let ys = [11.02, 11.01, 11.001, 10.999, 10.9, 3.01, 3.01, 3.0, 3.0, -3.0];
        let interp = MonotonicityPreservingCubicSplineInterpolator1D::default();
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        let mut previous = f64::INFINITY;
        for x in grid(1.0, 10.0, 900) {
            let y = interp.interpolate(&bundle, x).unwrap();
            assert!(y <= previous + 1e-12, "increases at {}", x);
            previous = y;
        }
    }

    #[test]
    fn test_unfiltered_clamped_spline_is_reproduced() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 0.5, 1.5, 3.0, 5.0];
        let left = SplineBoundary::Clamped(0.3);
        let right = SplineBoundary::Clamped(2.5);
        let interp = MonotonicityPreservingCubicSplineInterpolator1D::new(left, right).unwrap();
        let spline = NaturalCubicSplineInterpolator1D::new(left, right).unwrap();
        let bundle = interp.data_bundle(&xs, &ys).unwrap();
        let spline_bundle = spline.data_bundle(&xs, &ys).unwrap();
        for x in grid(0.0, 4.0, 37) {
            assert_relative_eq!(
                interp.interpolate(&bundle, x).unwrap(),
                spline.interpolate(&spline_bundle, x).unwrap(),
                epsilon = 1e-12
            );
        }
        assert_relative_eq!(interp.first_derivative(&bundle, 0.0).unwrap(), 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_steep_clamped_gradient_is_capped() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 0.5, 1.5, 3.0, 5.0];
        let interp = MonotonicityPreservingCubicSplineInterpolator1D::new(
            SplineBoundary::Clamped(0.3),
            SplineBoundary::Clamped(9.0),
        )
        .unwrap();
        let bundle = interp.data_bundle(&xs, &ys).unwrap();
        // Three times the last secant
        assert_relative_eq!(interp.first_derivative(&bundle, 4.0).unwrap(), 6.0, epsilon = 1e-12);
        assert!(MonotonicityPreservingCubicSplineInterpolator1D::new(
            SplineBoundary::Natural,
            SplineBoundary::Clamped(f64::NAN)
        )
        .is_err());
    }

    // ========================================
    // Derivative and Sensitivity Tests
    // ========================================

    #[test]
    fn test_derivative_and_sensitivities_match_finite_difference() {
        let xs = [1.0, 2.0, 3.5, 5.5, 8.0, 11.0, 13.0, 14.0, 16.0, 17.0];
        let interp = MonotonicityPreservingCubicSplineInterpolator1D::new(
            SplineBoundary::Clamped(0.5),
            SplineBoundary::Natural,
        )
        .unwrap();
        for ys in [
            [3.0, 6.0, 4.0, 5.0, 9.0, 3.0, 4.0, 8.0, 0.5, 2.0],
            [5.0, 8.0, 1.0, 5.0, 9.0, 3.0, 9.0, 0.5, 6.0, 7.0],
        ] {
            let bundle = interp.data_bundle(&xs, &ys).unwrap();
            let h = 1e-6;
            for x in [1.3, 2.9, 4.4, 7.1, 9.6, 12.2, 13.5, 15.1, 16.8] {
                let fd = (interp.interpolate(&bundle, x + h).unwrap()
                    - interp.interpolate(&bundle, x - h).unwrap())
                    / (2.0 * h);
                assert_relative_eq!(interp.first_derivative(&bundle, x).unwrap(), fd, epsilon = 1e-6);

                let analytic = interp.node_sensitivities_for_value(&bundle, x).unwrap();
                let numeric = interp.node_sensitivities(&bundle, x, true).unwrap();
                for (a, b) in analytic.iter().zip(&numeric) {
                    assert_relative_eq!(a, b, epsilon = 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_single_node_and_foreign_bundle() {
        let interp = MonotonicityPreservingCubicSplineInterpolator1D::default();
        let single = interp.data_bundle(&[2.0], &[4.0]).unwrap();
        assert_eq!(interp.interpolate(&single, 2.0).unwrap(), 4.0);
        assert_eq!(interp.node_sensitivities_for_value(&single, 2.0).unwrap(), vec![1.0]);

        let foreign = NaturalCubicSplineInterpolator1D::default()
            .data_bundle(&[1.0, 2.0, 3.0], &[1.0, 2.0, 1.0])
            .unwrap();
        assert!(interp.interpolate(&foreign, 1.5).is_err());
    }

    // ========================================
    // Property-based Tests
    // ========================================

    proptest! {
        #[test]
        fn prop_each_interval_stays_between_its_nodes(
            ys in proptest::collection::vec(-5.0f64..5.0, 3..12),
            t in 0.0f64..1.0,
        ) {
            let xs: Vec<f64> = (0..ys.len()).map(|i| i as f64 * 0.7 + (i * i) as f64 * 0.05).collect();
            let interp = MonotonicityPreservingCubicSplineInterpolator1D::default();
            let bundle = interp.data_bundle(&xs, &ys).unwrap();
            for i in 0..ys.len() - 1 {
                let x = xs[i] + t * (xs[i + 1] - xs[i]);
                let y = interp.interpolate(&bundle, x).unwrap();
                let (lo, hi) = (ys[i].min(ys[i + 1]), ys[i].max(ys[i + 1]));
                prop_assert!(y >= lo - 1e-9 && y <= hi + 1e-9);
            }
        }
    }
}
