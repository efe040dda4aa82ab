//! Ordinary kriging with a power-law variogram.

use super::data_bundle::LinearFit;
use super::{build_matrix, InterpolatorND, InterpolatorNDDataBundle};
use crate::math::linalg::{euclidean_distance, invert_dense};
use crate::types::{InterpolationError, InterpolationResult};
use nalgebra::DVector;

/// Ordinary kriging interpolator.
///
/// The variogram is `γ(r) = α·r^β` with `γ(0) = 0`. The exponent `β` is a
/// parameter in `(-2, 2)`; `α` is fitted by least squares to the empirical
/// semi-variogram `½(vᵢ - vⱼ)²` over all sample pairs.
///
/// The kriging weights do not depend on `α`, so the system is assembled
/// from `r^β` alone and `α` only screens out degenerate data. The
/// query-independent system
///
/// ```text
/// [ Γ  1 ] [ w ]   [ v ]
/// [ 1ᵀ 0 ] [ μ ] = [ 0 ]
/// ```
///
/// is solved once, so `f(x) = Σ wᵢ γ(‖x - xᵢ‖) + μ`. The node sensitivities
/// are the ordinary-kriging weights at `x`, which form the unit vector of a
/// sample when `x` is that sample.
///
/// Perfectly flat data has a zero variogram and no kriging solution; it is
/// reported as a numerical error when the bundle is built.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators_nd::{InterpolatorND, KrigingInterpolatorND};
///
/// let kriging = KrigingInterpolatorND::new(1.5).unwrap();
/// let samples = [(vec![0.0], 1.0), (vec![1.0], 3.0), (vec![2.0], 2.0)];
/// let bundle = kriging.data_bundle(&samples).unwrap();
/// assert!((kriging.interpolate(&bundle, &[1.0]).unwrap() - 3.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KrigingInterpolatorND {
    beta: f64,
}

impl KrigingInterpolatorND {
    /// Kriging with variogram exponent `beta`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `-2 < beta < 2`.
    pub fn new(beta: f64) -> InterpolationResult<Self> {
        if !(beta > -2.0 && beta < 2.0) {
            return Err(InterpolationError::invalid(format!(
                "variogram exponent must lie in (-2, 2), got {}",
                beta
            )));
        }
        Ok(Self { beta })
    }

    /// Variogram exponent.
    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Unscaled variogram `r^β`, zero at the origin.
    fn variogram(&self, r: f64) -> f64 {
        if r == 0.0 {
            0.0
        } else {
            r.powf(self.beta)
        }
    }

    /// Least-squares `α` of `α·r^β` against the empirical semi-variogram.
    fn fit_scale(&self, bundle: &InterpolatorNDDataBundle) -> InterpolationResult<f64> {
        if bundle.size() < 2 {
            return Ok(1.0);
        }
        let (points, values) = (bundle.points(), bundle.values());
        let mut numerator = 0.0;
        let mut denominator = 0.0;
        for i in 0..points.len() {
            for j in i + 1..points.len() {
                let g = self.variogram(euclidean_distance(&points[i], &points[j]));
                let empirical = 0.5 * (values[i] - values[j]).powi(2);
                numerator += g * empirical;
                denominator += g * g;
            }
        }
        let alpha = numerator / denominator;
        if alpha == 0.0 || !alpha.is_finite() {
            return Err(InterpolationError::Numerical(format!(
                "variogram scale {} cannot be fitted; the data may be flat",
                alpha
            )));
        }
        Ok(alpha)
    }

    /// `[γ(‖x - xᵢ‖)..., 1]`, the kriging right-hand side at `point`.
    fn augmented_row(&self, points: &[Vec<f64>], point: &[f64]) -> DVector<f64> {
        let n = points.len();
        DVector::from_fn(n + 1, |i, _| {
            if i < n {
                self.variogram(euclidean_distance(point, &points[i]))
            } else {
                1.0
            }
        })
    }
}

impl InterpolatorND for KrigingInterpolatorND {
    fn name(&self) -> &'static str {
        "Kriging"
    }

    fn prepare(&self, bundle: InterpolatorNDDataBundle) -> InterpolationResult<InterpolatorNDDataBundle> {
        let alpha = self.fit_scale(&bundle)?;
        let n = bundle.size();
        let points = bundle.points();
        let system = build_matrix(n + 1, |i| {
            Ok(if i < n {
                self.augmented_row(points, &points[i]).as_slice().to_vec()
            } else {
                let mut last = vec![1.0; n + 1];
                last[n] = 0.0;
                last
            })
        })?;
        let inverse = invert_dense(&system)?;
        let rhs = DVector::from_fn(n + 1, |i, _| if i < n { bundle.values()[i] } else { 0.0 });
        let weights = &inverse * rhs;
        tracing::debug!(
            beta = self.beta,
            alpha,
            nodes = n,
            dimension = bundle.dimension(),
            "fitted kriging interpolator"
        );
        Ok(bundle.with_fit(LinearFit { weights, inverse }))
    }

    fn interpolate(&self, bundle: &InterpolatorNDDataBundle, point: &[f64]) -> InterpolationResult<f64> {
        bundle.check_point(point)?;
        let fit = bundle.fit()?;
        let row = self.augmented_row(bundle.points(), point);
        Ok(row.dot(&fit.weights))
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &InterpolatorNDDataBundle,
        point: &[f64],
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_point(point)?;
        let fit = bundle.fit()?;
        let row = self.augmented_row(bundle.points(), point);
        let lambda = fit.inverse.tr_mul(&row);
        Ok(lambda.as_slice()[..bundle.size()].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use approx::assert_relative_eq;

    fn samples() -> Vec<(Vec<f64>, f64)> {
        vec![
            (vec![0.0, 0.0], 0.02),
            (vec![1.0, 0.0], 0.025),
            (vec![0.0, 2.0], 0.031),
            (vec![1.5, 1.5], 0.028),
            (vec![3.0, 0.5], 0.035),
            (vec![2.2, 2.8], 0.04),
        ]
    }

    #[test]
    fn test_beta_range_is_open() {
        assert!(KrigingInterpolatorND::new(-2.0).is_err());
        assert!(KrigingInterpolatorND::new(2.0).is_err());
        assert!(KrigingInterpolatorND::new(f64::NAN).is_err());
        assert!(KrigingInterpolatorND::new(-1.99).is_ok());
        assert!(KrigingInterpolatorND::new(1.99).is_ok());
    }

    #[test]
    fn test_exact_at_training_points() {
        for beta in [0.5, 1.0, 1.5, 1.9] {
            let kriging = KrigingInterpolatorND::new(beta).unwrap();
            let bundle = kriging.data_bundle(&samples()).unwrap();
            for (i, (point, value)) in samples().iter().enumerate() {
                assert_relative_eq!(kriging.interpolate(&bundle, point).unwrap(), *value, epsilon = 1e-10);
                let s = kriging.node_sensitivities_for_value(&bundle, point).unwrap();
                for (j, sj) in s.iter().enumerate() {
                    let expected = if i == j { 1.0 } else { 0.0 };
                    assert_relative_eq!(*sj, expected, epsilon = 1e-8);
                }
            }
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let kriging = KrigingInterpolatorND::new(1.5).unwrap();
        let bundle = kriging.data_bundle(&samples()).unwrap();
        for point in [[0.5, 0.5], [2.0, 1.0], [4.0, 4.0]] {
            let s = kriging.node_sensitivities_for_value(&bundle, &point).unwrap();
            assert_relative_eq!(s.iter().sum::<f64>(), 1.0, epsilon = 1e-10);
            let recombined: f64 = s.iter().zip(bundle.values()).map(|(a, v)| a * v).sum();
            assert_relative_eq!(recombined, kriging.interpolate(&bundle, &point).unwrap(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_single_sample_is_constant() {
        let kriging = KrigingInterpolatorND::new(1.0).unwrap();
        let bundle = kriging.data_bundle(&[(vec![1.0, 1.0], 7.0)]).unwrap();
        assert_relative_eq!(kriging.interpolate(&bundle, &[3.0, -2.0]).unwrap(), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_data_is_reported() {
        let kriging = KrigingInterpolatorND::new(1.5).unwrap();
        let flat: Vec<(Vec<f64>, f64)> = samples().into_iter().map(|(p, _)| (p, 0.03)).collect();
        let err = kriging.data_bundle(&flat).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Numerical);
    }

    #[test]
    fn test_dimension_mismatch() {
        let kriging = KrigingInterpolatorND::new(1.5).unwrap();
        let bundle = kriging.data_bundle(&samples()).unwrap();
        assert_eq!(
            kriging.interpolate(&bundle, &[1.0, 1.0, 1.0]).unwrap_err().kind(),
            ErrorKind::InvalidArgument
        );
    }
}
