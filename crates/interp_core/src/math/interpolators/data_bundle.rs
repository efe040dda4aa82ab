//! Precomputed, immutable representation of a 1-D sample set.

use crate::types::{InterpolationError, InterpolationResult};

/// Sorted sample arrays plus family-specific precomputed state.
///
/// Built once through [`Interpolator1D::data_bundle`](super::Interpolator1D::data_bundle)
/// (or its `_from_sorted` fast path) and only read afterwards, so a bundle
/// can be shared across threads for concurrent queries.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::Interpolator1DDataBundle;
///
/// let bundle = Interpolator1DDataBundle::new(&[3.0, 1.0, 2.0], &[9.0, 1.0, 4.0]).unwrap();
/// assert_eq!(bundle.xs(), &[1.0, 2.0, 3.0]);
/// assert_eq!(bundle.ys(), &[1.0, 4.0, 9.0]);
/// assert_eq!(bundle.lower_bound_index(2.5), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Interpolator1DDataBundle {
    xs: Vec<f64>,
    ys: Vec<f64>,
    state: BundleState,
}

/// Family-specific cached data.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BundleState {
    Plain,
    CubicSpline(CubicSplineState),
    DoubleQuadratic(Vec<QuadraticWeights>),
    Monotonic(HermiteSlopes),
    MonotoneSpline(HermiteSlopes),
    Seasonal(Vec<SeasonalSegment>),
}

/// Second derivatives at the nodes and their sensitivities to node values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CubicSplineState {
    pub second_derivatives: Vec<f64>,
    /// `second_derivative_sensitivities[i][j] = ∂M_i / ∂y_j`
    pub second_derivative_sensitivities: Vec<Vec<f64>>,
}

/// Local quadratic `y_i + b·t + c·t²` around an interior node, with `b` and
/// `c` expressed as weights on `(y_{i-1}, y_i, y_{i+1})`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct QuadraticWeights {
    pub b: [f64; 3],
    pub c: [f64; 3],
}

/// Filtered Hermite slopes and their sensitivities to node values.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HermiteSlopes {
    pub slopes: Vec<f64>,
    pub slope_sensitivities: Vec<Vec<f64>>,
}

/// One node interval refined into monthly sub-nodes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SeasonalSegment {
    pub growth: f64,
    pub xs: Vec<f64>,
    pub values: Vec<f64>,
}

impl Interpolator1DDataBundle {
    /// Build a bundle from unsorted data; the pairs are sorted by x.
    ///
    /// # Errors
    ///
    /// `InvalidInput` on empty or mismatched arrays, non-finite values or
    /// duplicate x-coordinates.
    pub fn new(xs: &[f64], ys: &[f64]) -> InterpolationResult<Self> {
        Self::validate_shape(xs, ys)?;

        let mut order: Vec<usize> = (0..xs.len()).collect();
        order.sort_by(|&a, &b| xs[a].total_cmp(&xs[b]));
        let sorted_xs: Vec<f64> = order.iter().map(|&i| xs[i]).collect();
        let sorted_ys: Vec<f64> = order.iter().map(|&i| ys[i]).collect();

        if let Some(i) = sorted_xs.windows(2).position(|w| w[0] == w[1]) {
            return Err(InterpolationError::invalid(format!(
                "duplicate x-coordinate {}",
                sorted_xs[i]
            )));
        }

        Ok(Self {
            xs: sorted_xs,
            ys: sorted_ys,
            state: BundleState::Plain,
        })
    }

    /// Build a bundle from data already sorted by strictly increasing x.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new), plus `InvalidInput` if `xs` is not strictly
    /// increasing.
    pub fn from_sorted(xs: &[f64], ys: &[f64]) -> InterpolationResult<Self> {
        Self::validate_shape(xs, ys)?;
        if let Some(i) = xs.windows(2).position(|w| w[0] >= w[1]) {
            return Err(InterpolationError::invalid(format!(
                "xs must be strictly increasing: xs[{}] = {} >= xs[{}] = {}",
                i,
                xs[i],
                i + 1,
                xs[i + 1]
            )));
        }
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            state: BundleState::Plain,
        })
    }

    fn validate_shape(xs: &[f64], ys: &[f64]) -> InterpolationResult<()> {
        if xs.is_empty() {
            return Err(InterpolationError::invalid("no data points"));
        }
        if xs.len() != ys.len() {
            return Err(InterpolationError::invalid(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        if let Some(i) = xs.iter().position(|x| !x.is_finite()) {
            return Err(InterpolationError::invalid(format!(
                "xs[{}] is not finite",
                i
            )));
        }
        if let Some(i) = ys.iter().position(|y| !y.is_finite()) {
            return Err(InterpolationError::invalid(format!(
                "ys[{}] is not finite",
                i
            )));
        }
        Ok(())
    }

    pub(crate) fn with_state(mut self, state: BundleState) -> Self {
        self.state = state;
        self
    }

    pub(crate) fn state(&self) -> &BundleState {
        &self.state
    }

    /// Sorted x-coordinates.
    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Values in the same order as [`xs`](Self::xs).
    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Number of nodes (always at least one).
    #[inline]
    pub fn size(&self) -> usize {
        self.xs.len()
    }

    /// Smallest x-coordinate.
    #[inline]
    pub fn first_x(&self) -> f64 {
        self.xs[0]
    }

    /// Largest x-coordinate.
    #[inline]
    pub fn last_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }

    /// Value at the smallest x-coordinate.
    #[inline]
    pub fn first_y(&self) -> f64 {
        self.ys[0]
    }

    /// Value at the largest x-coordinate.
    #[inline]
    pub fn last_y(&self) -> f64 {
        self.ys[self.ys.len() - 1]
    }

    /// `(first_x, last_x)`.
    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.first_x(), self.last_x())
    }

    /// Index of the largest node with `xs[i] <= x`, clamped to `0`.
    #[inline]
    pub fn lower_bound_index(&self, x: f64) -> usize {
        self.xs.partition_point(|&xi| xi <= x).saturating_sub(1)
    }

    /// Index `i` of the interval `[xs[i], xs[i+1]]` containing `x`, clamped
    /// to `[0, n - 2]`. Requires at least two nodes.
    #[inline]
    pub fn interval_index(&self, x: f64) -> usize {
        self.lower_bound_index(x).min(self.xs.len().saturating_sub(2))
    }

    /// Index of the node exactly at `x`, if any.
    #[inline]
    pub fn node_index(&self, x: f64) -> Option<usize> {
        self.xs.binary_search_by(|xi| xi.total_cmp(&x)).ok()
    }

    /// Fail unless `x` is a finite point of `[first_x, last_x]`.
    pub fn check_domain(&self, x: f64) -> InterpolationResult<()> {
        if x.is_nan() {
            return Err(InterpolationError::invalid("query point is NaN"));
        }
        let (min, max) = self.domain();
        if x < min || x > max {
            return Err(InterpolationError::OutOfDomain { x, min, max });
        }
        Ok(())
    }

    /// Fail unless every node value is strictly positive.
    pub(crate) fn require_positive_ys(&self, family: &str) -> InterpolationResult<()> {
        match self.ys.iter().position(|&y| y <= 0.0) {
            Some(i) => Err(InterpolationError::invalid(format!(
                "{} interpolation needs positive values, got ys[{}] = {}",
                family, i, self.ys[i]
            ))),
            None => Ok(()),
        }
    }

    /// Sensitivity vector with a single unit entry at `index`.
    pub(crate) fn unit_sensitivity(&self, index: usize) -> Vec<f64> {
        let mut s = vec![0.0; self.size()];
        s[index] = 1.0;
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sorts_pairs() {
        let bundle = Interpolator1DDataBundle::new(&[3.0, 1.0, 2.0, 0.0], &[9.0, 1.0, 4.0, 0.0])
            .unwrap();
        assert_eq!(bundle.xs(), &[0.0, 1.0, 2.0, 3.0]);
        assert_eq!(bundle.ys(), &[0.0, 1.0, 4.0, 9.0]);
        assert_eq!(bundle.domain(), (0.0, 3.0));
        assert_eq!(bundle.first_y(), 0.0);
        assert_eq!(bundle.last_y(), 9.0);
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(Interpolator1DDataBundle::new(&[], &[]).is_err());
        assert!(Interpolator1DDataBundle::new(&[1.0, 2.0], &[1.0]).is_err());
        assert!(Interpolator1DDataBundle::new(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
        assert!(Interpolator1DDataBundle::new(&[1.0, 2.0], &[1.0, f64::INFINITY]).is_err());
    }

    #[test]
    fn test_rejects_duplicates() {
        let err = Interpolator1DDataBundle::new(&[1.0, 2.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err();
        match err {
            InterpolationError::InvalidInput(msg) => assert!(msg.contains("duplicate")),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_from_sorted_rejects_unsorted() {
        assert!(Interpolator1DDataBundle::from_sorted(&[1.0, 3.0, 2.0], &[0.0; 3]).is_err());
        assert!(Interpolator1DDataBundle::from_sorted(&[1.0, 1.0], &[0.0; 2]).is_err());
        assert!(Interpolator1DDataBundle::from_sorted(&[1.0, 2.0, 3.0], &[0.0; 3]).is_ok());
    }

    #[test]
    fn test_index_queries() {
        let bundle = Interpolator1DDataBundle::from_sorted(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0])
            .unwrap();
        assert_eq!(bundle.lower_bound_index(1.0), 0);
        assert_eq!(bundle.lower_bound_index(1.5), 0);
        assert_eq!(bundle.lower_bound_index(2.0), 1);
        assert_eq!(bundle.lower_bound_index(3.0), 2);
        assert_eq!(bundle.interval_index(3.0), 1);
        assert_eq!(bundle.node_index(2.0), Some(1));
        assert_eq!(bundle.node_index(2.5), None);
    }

    #[test]
    fn test_check_domain() {
        let bundle = Interpolator1DDataBundle::from_sorted(&[1.0, 2.0], &[4.0, 5.0]).unwrap();
        assert!(bundle.check_domain(1.0).is_ok());
        assert!(bundle.check_domain(2.0).is_ok());
        assert!(matches!(
            bundle.check_domain(2.5),
            Err(InterpolationError::OutOfDomain { .. })
        ));
        assert!(matches!(
            bundle.check_domain(f64::NAN),
            Err(InterpolationError::InvalidInput(_))
        ));
    }
}
