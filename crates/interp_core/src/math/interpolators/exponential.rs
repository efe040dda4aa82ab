//! Exponential interpolation: linear in the continuously-compounded rate.

use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::{InterpolationError, InterpolationResult};

/// Interpolates the rate `r = ln(y)/x` linearly and returns `exp(x·r(x))`.
///
/// This is the natural scheme for discount factors: `yᵢ = exp(xᵢ·rᵢ)` at
/// every node and the zero rate moves linearly in between. Node values must
/// be strictly positive and no node may sit at `x = 0`.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{ExponentialInterpolator1D, Interpolator1D};
///
/// let interp = ExponentialInterpolator1D;
/// // Flat 5% curve
/// let xs: [f64; 3] = [1.0, 2.0, 5.0];
/// let ys: Vec<f64> = xs.iter().map(|t| (-0.05 * t).exp()).collect();
/// let bundle = interp.data_bundle(&xs, &ys).unwrap();
/// assert!((interp.interpolate(&bundle, 3.0).unwrap() - (-0.15f64).exp()).abs() < 1e-14);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ExponentialInterpolator1D;

/// Local evaluation of the rate interpolant.
struct RatePoint {
    /// Nodes and their linear weights.
    nodes: [(usize, f64); 2],
    value: f64,
    rate: f64,
    rate_slope: f64,
}

impl ExponentialInterpolator1D {
    fn evaluate(bundle: &Interpolator1DDataBundle, x: f64) -> RatePoint {
        let (xs, ys) = (bundle.xs(), bundle.ys());
        let rate_at = |i: usize| ys[i].ln() / xs[i];
        if bundle.size() == 1 {
            let rate = rate_at(0);
            return RatePoint {
                nodes: [(0, 1.0), (0, 0.0)],
                value: (x * rate).exp(),
                rate,
                rate_slope: 0.0,
            };
        }
        let i = bundle.interval_index(x);
        let h = xs[i + 1] - xs[i];
        let t = (x - xs[i]) / h;
        let (r0, r1) = (rate_at(i), rate_at(i + 1));
        let rate = r0 + (r1 - r0) * t;
        RatePoint {
            nodes: [(i, 1.0 - t), (i + 1, t)],
            value: (x * rate).exp(),
            rate,
            rate_slope: (r1 - r0) / h,
        }
    }
}

impl Interpolator1D for ExponentialInterpolator1D {
    fn name(&self) -> &'static str {
        "Exponential"
    }

    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        bundle.require_positive_ys("exponential")?;
        if bundle.node_index(0.0).is_some() {
            return Err(InterpolationError::invalid(
                "exponential interpolation cannot use a node at x = 0",
            ));
        }
        Ok(bundle)
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        Ok(Self::evaluate(bundle, x).value)
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        let p = Self::evaluate(bundle, x);
        Ok(p.value * (p.rate + x * p.rate_slope))
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        let p = Self::evaluate(bundle, x);
        let (xs, ys) = (bundle.xs(), bundle.ys());
        let mut result = vec![0.0; bundle.size()];
        for (j, w) in p.nodes {
            // ∂r/∂yⱼ = w / (xⱼ·yⱼ)
            result[j] += p.value * x * w / (xs[j] * ys[j]);
        }
        Ok(result)
    }
}
