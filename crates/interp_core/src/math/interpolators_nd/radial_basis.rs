//! Radial basis function interpolation.

use super::data_bundle::LinearFit;
use super::{build_matrix, InterpolatorND, InterpolatorNDDataBundle};
use crate::math::linalg::{euclidean_distance, invert_dense};
use crate::types::{InterpolationError, InterpolationResult};
use nalgebra::DVector;

/// Radial kernel `φ(r)` with shape parameter `s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadialBasisFunction {
    /// `exp(-r² / 2s²)`
    Gaussian,
    /// `sqrt(r² + s²)`
    Multiquadric,
    /// `1 / sqrt(r² + s²)`
    InverseMultiquadric,
    /// `r²·ln(r / s)`, zero at the origin
    ThinPlateSpline,
}

impl RadialBasisFunction {
    /// Kernel value at distance `r`.
    pub fn evaluate(self, r: f64, scale: f64) -> f64 {
        match self {
            RadialBasisFunction::Gaussian => (-r * r / (2.0 * scale * scale)).exp(),
            RadialBasisFunction::Multiquadric => (r * r + scale * scale).sqrt(),
            RadialBasisFunction::InverseMultiquadric => 1.0 / (r * r + scale * scale).sqrt(),
            RadialBasisFunction::ThinPlateSpline => {
                if r == 0.0 {
                    0.0
                } else {
                    r * r * (r / scale).ln()
                }
            }
        }
    }
}

/// Exact interpolation by a weighted sum of radial kernels centred on the
/// samples.
///
/// Weights solve `Φ w = v` with `Φᵢⱼ = φ(‖xᵢ - xⱼ‖)`. When `normalized`,
/// every basis row (fitting and evaluation alike) is divided by its sum,
/// which turns the interpolant into a partition-of-unity blend.
///
/// Node sensitivities are `b(x)ᵀ Φ⁻¹` with `b(x)` the basis row at the
/// query, so at a sample they are the unit vector of that sample.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators_nd::{
///     InterpolatorND, RadialBasisFunction, RadialBasisFunctionInterpolatorND,
/// };
///
/// let rbf = RadialBasisFunctionInterpolatorND::new(RadialBasisFunction::Multiquadric, 1.0, false).unwrap();
/// let samples = [(vec![0.0], 1.0), (vec![1.0], 2.0), (vec![3.0], 0.0)];
/// let bundle = rbf.data_bundle(&samples).unwrap();
/// assert!((rbf.interpolate(&bundle, &[1.0]).unwrap() - 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialBasisFunctionInterpolatorND {
    basis: RadialBasisFunction,
    scale: f64,
    normalized: bool,
}

impl RadialBasisFunctionInterpolatorND {
    /// Interpolator with kernel `basis` of shape `scale`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `scale` is finite and positive.
    pub fn new(basis: RadialBasisFunction, scale: f64, normalized: bool) -> InterpolationResult<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(InterpolationError::invalid(format!(
                "basis scale must be positive, got {}",
                scale
            )));
        }
        Ok(Self {
            basis,
            scale,
            normalized,
        })
    }

    /// Kernel shape.
    pub fn basis(&self) -> RadialBasisFunction {
        self.basis
    }

    /// Kernel scale.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Whether basis rows are normalized to sum to one.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Basis row at `point`, normalized if configured.
    fn basis_row(&self, points: &[Vec<f64>], point: &[f64]) -> InterpolationResult<Vec<f64>> {
        let mut row: Vec<f64> = points
            .iter()
            .map(|p| self.basis.evaluate(euclidean_distance(point, p), self.scale))
            .collect();
        if self.normalized {
            let sum: f64 = row.iter().sum();
            if sum == 0.0 || !sum.is_finite() {
                return Err(InterpolationError::Numerical(format!(
                    "basis row at {:?} cannot be normalized",
                    point
                )));
            }
            row.iter_mut().for_each(|b| *b /= sum);
        }
        Ok(row)
    }
}

impl InterpolatorND for RadialBasisFunctionInterpolatorND {
    fn name(&self) -> &'static str {
        "RadialBasisFunction"
    }

    fn prepare(&self, bundle: InterpolatorNDDataBundle) -> InterpolationResult<InterpolatorNDDataBundle> {
        let n = bundle.size();
        let points = bundle.points();
        let phi = build_matrix(n, |i| self.basis_row(points, &points[i]))?;
        let inverse = invert_dense(&phi)?;
        let weights = &inverse * DVector::from_column_slice(bundle.values());
        tracing::debug!(
            basis = ?self.basis,
            nodes = n,
            dimension = bundle.dimension(),
            normalized = self.normalized,
            "fitted radial basis interpolator"
        );
        Ok(bundle.with_fit(LinearFit { weights, inverse }))
    }

    fn interpolate(&self, bundle: &InterpolatorNDDataBundle, point: &[f64]) -> InterpolationResult<f64> {
        bundle.check_point(point)?;
        let fit = bundle.fit()?;
        let row = self.basis_row(bundle.points(), point)?;
        Ok(row.iter().zip(fit.weights.iter()).map(|(b, w)| b * w).sum())
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &InterpolatorNDDataBundle,
        point: &[f64],
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_point(point)?;
        let fit = bundle.fit()?;
        let row = DVector::from_vec(self.basis_row(bundle.points(), point)?);
        Ok(fit.inverse.tr_mul(&row).as_slice().to_vec())
    }
}
