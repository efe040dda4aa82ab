//! Monotone cubic Hermite interpolation for non-decreasing data.

use super::data_bundle::{BundleState, HermiteSlopes};
use super::hermite::{self, secant_sensitivity};
use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::{InterpolationError, InterpolationResult};

/// Cubic Hermite interpolator that never decreases between non-decreasing
/// nodes.
///
/// Node slopes start from the three-point estimate and are passed through
/// Hyman's filter, which clamps each slope into `[0, 3·min(δᵢ₋₁, δᵢ)]` where
/// `δ` are the adjacent secant slopes. The filter is piecewise linear in the
/// node values, so the bundle also carries `∂slope/∂y` and sensitivities
/// are analytic away from the clamping kinks.
///
/// Below the first node the interpolant continues along the straight line
/// through the origin and the first node instead of failing with a domain
/// error. That requires `x₀ > 0`.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{Interpolator1D, MonotonicIncreasingInterpolator1D};
///
/// let interp = MonotonicIncreasingInterpolator1D;
/// let bundle = interp.data_bundle(&[1.0, 2.0, 3.0, 4.0], &[1.0, 1.0, 5.0, 5.5]).unwrap();
/// // Flat between equal nodes
/// assert_eq!(interp.interpolate(&bundle, 1.5).unwrap(), 1.0);
/// // Through the origin below the first node
/// assert_eq!(interp.interpolate(&bundle, 0.5).unwrap(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MonotonicIncreasingInterpolator1D;

impl MonotonicIncreasingInterpolator1D {
    fn slopes<'a>(&self, bundle: &'a Interpolator1DDataBundle) -> InterpolationResult<&'a HermiteSlopes> {
        match bundle.state() {
            BundleState::Monotonic(slopes) => Ok(slopes),
            _ => Err(InterpolationError::invalid(
                "data bundle was not built by a monotonic-increasing interpolator",
            )),
        }
    }

    /// `x` below the first node, on the line through the origin.
    fn below_first(bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<bool> {
        if x.is_nan() {
            return Err(InterpolationError::invalid("query point is NaN"));
        }
        if x < bundle.first_x() && bundle.first_x() > 0.0 {
            return Ok(true);
        }
        bundle.check_domain(x)?;
        Ok(false)
    }

    /// Coefficients on the full node vector for the value and derivative.
    fn coefficients(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<(Vec<f64>, Vec<f64>)> {
        let state = self.slopes(bundle)?;
        let n = bundle.size();
        if Self::below_first(bundle, x)? {
            let mut value = vec![0.0; n];
            let mut slope = vec![0.0; n];
            let x0 = bundle.first_x();
            value[0] = x / x0;
            slope[0] = 1.0 / x0;
            return Ok((value, slope));
        }
        if n == 1 {
            return Ok((vec![1.0], vec![0.0]));
        }

        Ok(hermite::coefficients(bundle, state, x))
    }

    fn dot(coefficients: &[f64], ys: &[f64]) -> f64 {
        coefficients.iter().zip(ys).map(|(c, y)| c * y).sum()
    }
}

/// `a·u + b·v` for sensitivity vectors.
fn combine(a: f64, u: &[f64], b: f64, v: &[f64]) -> Vec<f64> {
    u.iter().zip(v).map(|(ui, vi)| a * ui + b * vi).collect()
}

/// Apply Hyman's filter to a raw slope estimate bounded by `3·delta`.
fn hyman_filter(raw: f64, raw_sens: Vec<f64>, delta: f64, delta_sens: &[f64]) -> (f64, Vec<f64>) {
    let cap = 3.0 * delta;
    if raw <= 0.0 {
        (0.0, vec![0.0; raw_sens.len()])
    } else if raw > cap {
        (cap, delta_sens.iter().map(|d| 3.0 * d).collect())
    } else {
        (raw, raw_sens)
    }
}

impl Interpolator1D for MonotonicIncreasingInterpolator1D {
    fn name(&self) -> &'static str {
        "MonotonicIncreasing"
    }

    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        let (xs, ys) = (bundle.xs(), bundle.ys());
        if let Some(i) = ys.windows(2).position(|w| w[1] < w[0]) {
            return Err(InterpolationError::NonMonotonicData { index: i + 1 });
        }
        let n = xs.len();
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let delta: Vec<f64> = (0..n - 1).map(|k| (ys[k + 1] - ys[k]) / h[k]).collect();
        let delta_sens: Vec<Vec<f64>> = (0..n - 1).map(|k| secant_sensitivity(n, &h, k)).collect();

        let (slopes, slope_sensitivities): (Vec<f64>, Vec<Vec<f64>>) = match n {
            1 => (vec![0.0], vec![vec![0.0]]),
            2 => (
                vec![delta[0]; 2],
                vec![delta_sens[0].clone(), delta_sens[0].clone()],
            ),
            _ => (0..n)
                .map(|i| {
                    if i == 0 || i == n - 1 {
                        // One-sided three-point estimate
                        let (near, far) = if i == 0 { (0, 1) } else { (n - 2, n - 3) };
                        let s = h[near] + h[far];
                        let a = (2.0 * h[near] + h[far]) / s;
                        let b = -h[near] / s;
                        let raw = a * delta[near] + b * delta[far];
                        let raw_sens = combine(a, &delta_sens[near], b, &delta_sens[far]);
                        hyman_filter(raw, raw_sens, delta[near], &delta_sens[near])
                    } else {
                        let s = h[i - 1] + h[i];
                        let a = h[i] / s;
                        let b = h[i - 1] / s;
                        let raw = a * delta[i - 1] + b * delta[i];
                        let raw_sens = combine(a, &delta_sens[i - 1], b, &delta_sens[i]);
                        let bound = if delta[i - 1] <= delta[i] { i - 1 } else { i };
                        hyman_filter(raw, raw_sens, delta[bound], &delta_sens[bound])
                    }
                })
                .unzip(),
        };

        tracing::debug!(nodes = n, "built monotonic Hermite data bundle");
        Ok(bundle.with_state(BundleState::Monotonic(HermiteSlopes {
            slopes,
            slope_sensitivities,
        })))
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        if Self::below_first(bundle, x)? {
            return Ok(bundle.first_y() * x / bundle.first_x());
        }
        let state = self.slopes(bundle)?;
        if bundle.size() == 1 {
            return Ok(bundle.first_y());
        }
        Ok(hermite::value(bundle, state, x))
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (_, slope) = self.coefficients(bundle, x)?;
        Ok(Self::dot(&slope, bundle.ys()))
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        Ok(self.coefficients(bundle, x)?.0)
    }

    fn node_sensitivities_for_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        Ok(self.coefficients(bundle, x)?.1)
    }
}
