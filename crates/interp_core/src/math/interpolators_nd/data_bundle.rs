//! Scattered N-D samples and their fitted weights.

use crate::types::{InterpolationError, InterpolationResult};
use nalgebra::{DMatrix, DVector};

/// One scattered sample: a point and its value.
pub type SampleND = (Vec<f64>, f64);

/// Scattered samples of a common dimension, optionally with a fitted
/// linear system.
///
/// Duplicate points are not rejected. Two equal points with different
/// values make the Kriging and RBF systems singular, which surfaces as a
/// numerical error when the bundle is fitted.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolatorNDDataBundle {
    points: Vec<Vec<f64>>,
    values: Vec<f64>,
    dimension: usize,
    fit: Option<LinearFit>,
}

/// Weights solving the fitting system, and the inverse system matrix the
/// node sensitivities are read from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LinearFit {
    pub weights: DVector<f64>,
    pub inverse: DMatrix<f64>,
}

impl InterpolatorNDDataBundle {
    /// Bundle over `samples`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on empty input, a zero-dimensional point, points of
    /// differing dimension or non-finite coordinates and values.
    pub fn new(samples: &[SampleND]) -> InterpolationResult<Self> {
        let (first, _) = samples
            .first()
            .ok_or_else(|| InterpolationError::invalid("no data points"))?;
        let dimension = first.len();
        if dimension == 0 {
            return Err(InterpolationError::invalid("points must have at least one dimension"));
        }
        for (i, (point, value)) in samples.iter().enumerate() {
            if point.len() != dimension {
                return Err(InterpolationError::invalid(format!(
                    "point {} has dimension {}, expected {}",
                    i,
                    point.len(),
                    dimension
                )));
            }
            if !value.is_finite() || point.iter().any(|c| !c.is_finite()) {
                return Err(InterpolationError::invalid(format!(
                    "sample {} is not finite",
                    i
                )));
            }
        }
        let (points, values) = samples.iter().cloned().unzip();
        Ok(Self {
            points,
            values,
            dimension,
            fit: None,
        })
    }

    pub(crate) fn with_fit(mut self, fit: LinearFit) -> Self {
        self.fit = Some(fit);
        self
    }

    pub(crate) fn fit(&self) -> InterpolationResult<&LinearFit> {
        self.fit.as_ref().ok_or_else(|| {
            InterpolationError::invalid("data bundle was not fitted by this interpolator")
        })
    }

    /// Sample points in input order.
    pub fn points(&self) -> &[Vec<f64>] {
        &self.points
    }

    /// Sample values in input order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Common dimension of the points.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of samples.
    pub fn size(&self) -> usize {
        self.points.len()
    }

    /// Fitted weights, if the owning interpolator solves a system.
    pub fn weights(&self) -> Option<&[f64]> {
        self.fit.as_ref().map(|fit| fit.weights.as_slice())
    }

    /// Reject a query point of the wrong dimension.
    pub fn check_point(&self, point: &[f64]) -> InterpolationResult<()> {
        if point.len() != self.dimension {
            return Err(InterpolationError::invalid(format!(
                "query point has dimension {}, bundle has dimension {}",
                point.len(),
                self.dimension
            )));
        }
        if point.iter().any(|c| !c.is_finite()) {
            return Err(InterpolationError::invalid("query point is not finite"));
        }
        Ok(())
    }

    /// Index of the sample exactly at `point`, if any.
    pub fn node_index(&self, point: &[f64]) -> Option<usize> {
        self.points.iter().position(|p| p.as_slice() == point)
    }
}
