//! Two-dimensional interpolation on a rectangular grid.

use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::{InterpolationError, InterpolationResult};
use std::sync::Arc;

/// A grid node `(x, y)` together with its value.
pub type GridSample = ((f64, f64), f64);

/// Samples grouped into one column bundle per distinct x.
///
/// Every column is built by the y-axis interpolator. Columns may hold
/// different y-coordinates, so the grid need not be rectangular in y.
#[derive(Debug, Clone, PartialEq)]
pub struct GridDataBundle2D {
    xs: Vec<f64>,
    columns: Vec<Interpolator1DDataBundle>,
}

impl GridDataBundle2D {
    /// Distinct x-coordinates, increasing.
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Column bundles, aligned with [`xs`](Self::xs).
    pub fn columns(&self) -> &[Interpolator1DDataBundle] {
        &self.columns
    }

    /// Total number of grid nodes.
    pub fn size(&self) -> usize {
        self.columns.iter().map(Interpolator1DDataBundle::size).sum()
    }
}

/// Interpolates along y within each x-column, then along x across the
/// column values.
///
/// Either axis may be a [`CombinedInterpolatorExtrapolator`](super::CombinedInterpolatorExtrapolator)
/// to extend the surface beyond the grid.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use interp_core::math::interpolators::{GridInterpolator2D, LinearInterpolator1D};
///
/// let grid = GridInterpolator2D::new(Arc::new(LinearInterpolator1D), Arc::new(LinearInterpolator1D));
/// let samples = [
///     ((0.0, 0.0), 0.0),
///     ((0.0, 1.0), 1.0),
///     ((1.0, 0.0), 2.0),
///     ((1.0, 1.0), 3.0),
/// ];
/// let bundle = grid.data_bundle(&samples).unwrap();
/// assert!((grid.interpolate(&bundle, (0.5, 0.5)).unwrap() - 1.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct GridInterpolator2D {
    x_interpolator: Arc<dyn Interpolator1D>,
    y_interpolator: Arc<dyn Interpolator1D>,
}

impl PartialEq for GridInterpolator2D {
    fn eq(&self, other: &Self) -> bool {
        *self.x_interpolator == *other.x_interpolator && *self.y_interpolator == *other.y_interpolator
    }
}

impl GridInterpolator2D {
    /// Grid interpolator with separate axis strategies.
    pub fn new(x_interpolator: Arc<dyn Interpolator1D>, y_interpolator: Arc<dyn Interpolator1D>) -> Self {
        Self {
            x_interpolator,
            y_interpolator,
        }
    }

    /// Strategy across columns.
    pub fn x_interpolator(&self) -> &Arc<dyn Interpolator1D> {
        &self.x_interpolator
    }

    /// Strategy within a column.
    pub fn y_interpolator(&self) -> &Arc<dyn Interpolator1D> {
        &self.y_interpolator
    }

    /// Group `samples` by x and build one column bundle per group.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on empty input, non-finite coordinates or values, or
    /// a repeated `(x, y)` node. Column bundle validation of the y-axis
    /// interpolator also applies.
    pub fn data_bundle(&self, samples: &[GridSample]) -> InterpolationResult<GridDataBundle2D> {
        if samples.is_empty() {
            return Err(InterpolationError::invalid("no grid samples"));
        }
        if let Some(((x, y), v)) = samples
            .iter()
            .find(|((x, y), v)| !(x.is_finite() && y.is_finite() && v.is_finite()))
        {
            return Err(InterpolationError::invalid(format!(
                "grid sample ({}, {}) -> {} is not finite",
                x, y, v
            )));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|((x1, y1), _), ((x2, y2), _)| x1.total_cmp(x2).then(y1.total_cmp(y2)));

        let mut xs = Vec::new();
        let mut columns = Vec::new();
        for column in sorted.chunk_by(|((x1, _), _), ((x2, _), _)| x1 == x2) {
            let (ys, values): (Vec<f64>, Vec<f64>) =
                column.iter().map(|((_, y), v)| (*y, *v)).unzip();
            xs.push(column[0].0 .0);
            columns.push(self.y_interpolator.data_bundle_from_sorted(&ys, &values)?);
        }
        tracing::debug!(
            columns = xs.len(),
            nodes = samples.len(),
            "built 2-D grid data bundle"
        );
        Ok(GridDataBundle2D { xs, columns })
    }

    /// Bundle across columns of the column values at `y`.
    fn cross_section(&self, bundle: &GridDataBundle2D, y: f64) -> InterpolationResult<Interpolator1DDataBundle> {
        let values = bundle
            .columns
            .iter()
            .map(|column| self.y_interpolator.interpolate(column, y))
            .collect::<InterpolationResult<Vec<f64>>>()?;
        self.x_interpolator.data_bundle_from_sorted(&bundle.xs, &values)
    }

    /// Value at `(x, y)`.
    pub fn interpolate(&self, bundle: &GridDataBundle2D, (x, y): (f64, f64)) -> InterpolationResult<f64> {
        let section = self.cross_section(bundle, y)?;
        self.x_interpolator.interpolate(&section, x)
    }

    /// `∂value/∂v` for every grid node, keyed by node coordinates.
    ///
    /// Nodes are listed column by column in increasing `(x, y)` order.
    pub fn node_sensitivities_for_value(
        &self,
        bundle: &GridDataBundle2D,
        (x, y): (f64, f64),
    ) -> InterpolationResult<Vec<GridSample>> {
        let section = self.cross_section(bundle, y)?;
        let across = self.x_interpolator.node_sensitivities_for_value(&section, x)?;
        let mut result = Vec::with_capacity(bundle.size());
        for ((&column_x, column), weight) in bundle.xs.iter().zip(&bundle.columns).zip(across) {
            let within = self.y_interpolator.node_sensitivities_for_value(column, y)?;
            result.extend(
                column
                    .xs()
                    .iter()
                    .zip(within)
                    .map(|(&node_y, s)| ((column_x, node_y), weight * s)),
            );
        }
        Ok(result)
    }
}
