//! Shepard inverse-distance weighting.

use super::{InterpolatorND, InterpolatorNDDataBundle};
use crate::math::linalg::euclidean_distance;
use crate::types::{InterpolationError, InterpolationResult};

/// Inverse-distance weighted average of the sample values.
///
/// ```text
/// f(x) = Σ wᵢ vᵢ / Σ wᵢ,   wᵢ = (d_min / ‖x - xᵢ‖)^power
/// ```
///
/// Scaling by the nearest distance `d_min` keeps the weights in `[0, 1]`
/// however close the query is to a sample. A query exactly on a sample
/// returns that sample's value.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators_nd::{InterpolatorND, ShepardInterpolatorND};
///
/// let shepard = ShepardInterpolatorND::new(2.0).unwrap();
/// let bundle = shepard
///     .data_bundle(&[(vec![0.0, 0.0], 1.0), (vec![2.0, 0.0], 3.0)])
///     .unwrap();
/// assert!((shepard.interpolate(&bundle, &[1.0, 0.0]).unwrap() - 2.0).abs() < 1e-12);
/// assert_eq!(shepard.interpolate(&bundle, &[2.0, 0.0]).unwrap(), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShepardInterpolatorND {
    power: f64,
}

impl ShepardInterpolatorND {
    /// Weighting with distances raised to `-power`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `power` is finite and positive.
    pub fn new(power: f64) -> InterpolationResult<Self> {
        if !(power.is_finite() && power > 0.0) {
            return Err(InterpolationError::invalid(format!(
                "Shepard power must be positive, got {}",
                power
            )));
        }
        Ok(Self { power })
    }

    /// Distance exponent.
    pub fn power(&self) -> f64 {
        self.power
    }

    /// Normalized weights at `point`.
    fn weights(&self, bundle: &InterpolatorNDDataBundle, point: &[f64]) -> InterpolationResult<Vec<f64>> {
        bundle.check_point(point)?;
        let mut weights = vec![0.0; bundle.size()];
        if let Some(i) = bundle.node_index(point) {
            weights[i] = 1.0;
            return Ok(weights);
        }
        let distances: Vec<f64> = bundle
            .points()
            .iter()
            .map(|p| euclidean_distance(point, p))
            .collect();
        let nearest = distances.iter().copied().fold(f64::INFINITY, f64::min);
        if let Some(i) = distances.iter().position(|&d| d == 0.0) {
            weights[i] = 1.0;
            return Ok(weights);
        }
        for (w, d) in weights.iter_mut().zip(&distances) {
            *w = (nearest / d).powf(self.power);
        }
        let total: f64 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(InterpolationError::Numerical(format!(
                "inverse-distance weights do not normalize at {:?}",
                point
            )));
        }
        weights.iter_mut().for_each(|w| *w /= total);
        Ok(weights)
    }
}

impl InterpolatorND for ShepardInterpolatorND {
    fn name(&self) -> &'static str {
        "Shepard"
    }

    fn interpolate(&self, bundle: &InterpolatorNDDataBundle, point: &[f64]) -> InterpolationResult<f64> {
        let weights = self.weights(bundle, point)?;
        Ok(weights.iter().zip(bundle.values()).map(|(w, v)| w * v).sum())
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &InterpolatorNDDataBundle,
        point: &[f64],
    ) -> InterpolationResult<Vec<f64>> {
        self.weights(bundle, point)
    }
}
