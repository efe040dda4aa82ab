//! Scattered-data interpolation in any dimension.
//!
//! - [`KrigingInterpolatorND`]: ordinary kriging with a power-law variogram
//! - [`RadialBasisFunctionInterpolatorND`]: exact RBF interpolation,
//!   optionally row-normalized
//! - [`ShepardInterpolatorND`]: inverse-distance weighting
//!
//! Kriging and RBF solve their fitting system once when the bundle is
//! built and keep its inverse, so node sensitivities are a single
//! matrix-vector product per query.

mod data_bundle;
mod kriging;
mod radial_basis;
mod shepard;

pub use data_bundle::{InterpolatorNDDataBundle, SampleND};
pub use kriging::KrigingInterpolatorND;
pub use radial_basis::{RadialBasisFunction, RadialBasisFunctionInterpolatorND};
pub use shepard::ShepardInterpolatorND;

use crate::math::interpolators::DynEq;
use crate::types::InterpolationResult;
use nalgebra::DMatrix;
use std::fmt;

/// A scattered-data interpolation strategy.
///
/// As in one dimension, the strategy carries only parameters and the data
/// lives in an [`InterpolatorNDDataBundle`] it builds.
pub trait InterpolatorND: fmt::Debug + Send + Sync + DynEq {
    /// Canonical name.
    fn name(&self) -> &'static str;

    /// Fit family-specific state onto a validated bundle.
    fn prepare(&self, bundle: InterpolatorNDDataBundle) -> InterpolationResult<InterpolatorNDDataBundle> {
        Ok(bundle)
    }

    /// Validate `samples` and build a bundle.
    fn data_bundle(&self, samples: &[SampleND]) -> InterpolationResult<InterpolatorNDDataBundle> {
        self.prepare(InterpolatorNDDataBundle::new(samples)?)
    }

    /// Interpolated value at `point`.
    fn interpolate(&self, bundle: &InterpolatorNDDataBundle, point: &[f64]) -> InterpolationResult<f64>;

    /// `∂value(point)/∂vᵢ` for every sample, in input order.
    fn node_sensitivities_for_value(
        &self,
        bundle: &InterpolatorNDDataBundle,
        point: &[f64],
    ) -> InterpolationResult<Vec<f64>>;
}

impl PartialEq for dyn InterpolatorND {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other.as_any())
    }
}

/// Square matrix whose row `i` is `row(i)`.
///
/// Rows are computed in parallel when the `parallel` feature is enabled.
pub(crate) fn build_matrix<F>(size: usize, row: F) -> InterpolationResult<DMatrix<f64>>
where
    F: Fn(usize) -> InterpolationResult<Vec<f64>> + Send + Sync,
{
    #[cfg(feature = "parallel")]
    let rows: Vec<Vec<f64>> = {
        use rayon::prelude::*;
        (0..size).into_par_iter().map(&row).collect::<InterpolationResult<_>>()?
    };
    #[cfg(not(feature = "parallel"))]
    let rows: Vec<Vec<f64>> = (0..size).map(&row).collect::<InterpolationResult<_>>()?;

    Ok(DMatrix::from_row_iterator(size, size, rows.into_iter().flatten()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_matrix_row_major() {
        let m = build_matrix(3, |i| Ok((0..3).map(|j| (10 * i + j) as f64).collect())).unwrap();
        assert_eq!(m[(0, 2)], 2.0);
        assert_eq!(m[(2, 0)], 20.0);
        assert_eq!(m[(1, 1)], 11.0);
    }

    #[test]
    fn test_dyn_equality() {
        let a: Box<dyn InterpolatorND> = Box::new(ShepardInterpolatorND::new(2.0).unwrap());
        let b: Box<dyn InterpolatorND> = Box::new(ShepardInterpolatorND::new(2.0).unwrap());
        let c: Box<dyn InterpolatorND> = Box::new(ShepardInterpolatorND::new(3.0).unwrap());
        let d: Box<dyn InterpolatorND> = Box::new(KrigingInterpolatorND::new(1.5).unwrap());
        assert!(*a == *b);
        assert!(*a != *c);
        assert!(*a != *d);
    }
}
