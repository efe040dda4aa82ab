//! B-spline bases for penalised spline fitting.
//!
//! [`BasisFunctionGenerator`] builds B-splines over knot sequences, singly
//! or as complete sets, in one dimension or as tensor products.
//! [`BasisFunctionAggregation`] combines a set with fitted weights into a
//! single curve or surface.

mod aggregation;
mod bspline;
mod generator;

pub use aggregation::BasisFunctionAggregation;
pub use bspline::{BSplineFunction, TensorBSplineFunction};
pub use generator::BasisFunctionGenerator;

use crate::types::InterpolationResult;
use std::fmt;

/// A real-valued function on `Rⁿ` that can be weighted into a fit.
pub trait BasisFunction: fmt::Debug + Send + Sync {
    /// Number of coordinates the function takes.
    fn dimension(&self) -> usize;

    /// Value at `point`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `point.len()` differs from [`dimension`](Self::dimension).
    fn evaluate(&self, point: &[f64]) -> InterpolationResult<f64>;

    /// Partial derivatives at `point`, one per coordinate.
    fn gradient(&self, point: &[f64]) -> InterpolationResult<Vec<f64>>;
}
