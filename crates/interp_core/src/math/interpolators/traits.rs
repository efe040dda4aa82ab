//! Strategy traits for 1-D interpolation and extrapolation.

use super::sensitivity::FiniteDifferenceInterpolator1DNodeSensitivityCalculator;
use super::Interpolator1DDataBundle;
use crate::math::finite_difference::DifferenceScheme;
use crate::types::{InterpolationError, InterpolationResult};
use std::any::Any;
use std::fmt;

/// Step used when differentiating node sensitivities with respect to x.
const DERIVATIVE_SENSITIVITY_STEP: f64 = 1e-6;

/// Parameter-based equality for trait objects.
///
/// Implemented for every `'static + PartialEq` type, which lets
/// `dyn Interpolator1D` and `dyn Extrapolator1D` compare equal when the
/// concrete types and their parameters match.
pub trait DynEq: Any {
    /// Upcast to `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Compare against another value of unknown concrete type.
    fn dyn_eq(&self, other: &dyn Any) -> bool;
}

impl<T: Any + PartialEq> DynEq for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn dyn_eq(&self, other: &dyn Any) -> bool {
        other.downcast_ref::<T>().is_some_and(|other| self == other)
    }
}

/// A 1-D interpolation strategy.
///
/// Implementations are stateless apart from their parameters. All data
/// lives in the [`Interpolator1DDataBundle`] the strategy builds, and every
/// query takes that bundle by shared reference.
///
/// # Contract
///
/// - `interpolate`, `first_derivative` and `node_sensitivities_for_value`
///   fail with [`InterpolationError::OutOfDomain`] outside
///   `[first_x, last_x]` unless the family documents otherwise.
/// - `first_derivative` agrees with a central difference of `interpolate`.
/// - `node_sensitivities_for_value` returns `∂value/∂yᵢ` for every node and
///   agrees with [`node_sensitivities`](Self::node_sensitivities) called with
///   `use_finite_difference = true`.
pub trait Interpolator1D: fmt::Debug + Send + Sync + DynEq {
    /// Canonical registry name.
    fn name(&self) -> &'static str;

    /// Attach family-specific state to a sorted, validated bundle.
    ///
    /// The default keeps the bundle as is.
    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        Ok(bundle)
    }

    /// Build a bundle from unsorted samples.
    fn data_bundle(&self, xs: &[f64], ys: &[f64]) -> InterpolationResult<Interpolator1DDataBundle> {
        self.prepare(Interpolator1DDataBundle::new(xs, ys)?)
    }

    /// Build a bundle from samples already sorted by strictly increasing x.
    fn data_bundle_from_sorted(
        &self,
        xs: &[f64],
        ys: &[f64],
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        self.prepare(Interpolator1DDataBundle::from_sorted(xs, ys)?)
    }

    /// Interpolated value at `x`.
    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64>;

    /// First derivative of the interpolant at `x`.
    fn first_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<f64>;

    /// `∂value(x)/∂yᵢ` for every node, node x-coordinates held fixed.
    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>>;

    /// Node sensitivities, forcing the finite-difference oracle when
    /// `use_finite_difference` is set.
    fn node_sensitivities(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
        use_finite_difference: bool,
    ) -> InterpolationResult<Vec<f64>> {
        if use_finite_difference {
            FiniteDifferenceInterpolator1DNodeSensitivityCalculator::default()
                .calculate(self, bundle, x)
        } else {
            self.node_sensitivities_for_value(bundle, x)
        }
    }

    /// `∂(first derivative at x)/∂yᵢ` for every node.
    ///
    /// The default differentiates [`node_sensitivities_for_value`](Self::node_sensitivities_for_value)
    /// in x, one-sided at the domain edges. Families linear in the node
    /// values override it with a closed form.
    fn node_sensitivities_for_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        let h = DERIVATIVE_SENSITIVITY_STEP;
        let (lower, upper) = bundle.domain();
        if upper - lower < h {
            return Ok(vec![0.0; bundle.size()]);
        }
        let (a, b) = match DifferenceScheme::for_domain(x, h, lower, upper) {
            DifferenceScheme::Central => (x - h, x + h),
            DifferenceScheme::Forward => (x, x + h),
            DifferenceScheme::Backward => (x - h, x),
        };
        let down = self.node_sensitivities_for_value(bundle, a)?;
        let up = self.node_sensitivities_for_value(bundle, b)?;
        Ok(up
            .iter()
            .zip(&down)
            .map(|(u, d)| (u - d) / (b - a))
            .collect())
    }
}

impl PartialEq for dyn Interpolator1D {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other.as_any())
    }
}

/// Which side of the sample domain a query falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// Below the first node.
    Left,
    /// Above the last node.
    Right,
}

impl Side {
    /// Locate `x` relative to the bundle domain.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for NaN and for points inside the domain: an
    /// extrapolator never evaluates there.
    pub fn locate(bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<Self> {
        if x.is_nan() {
            return Err(InterpolationError::invalid("query point is NaN"));
        }
        if x < bundle.first_x() {
            Ok(Side::Left)
        } else if x > bundle.last_x() {
            Ok(Side::Right)
        } else {
            Err(InterpolationError::invalid(format!(
                "{} lies inside [{}, {}]; extrapolators only evaluate outside the data domain",
                x,
                bundle.first_x(),
                bundle.last_x()
            )))
        }
    }

    /// Index of the boundary node on this side.
    pub fn boundary_index(self, bundle: &Interpolator1DDataBundle) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => bundle.size() - 1,
        }
    }

    /// x-coordinate of the boundary node on this side.
    pub fn boundary_x(self, bundle: &Interpolator1DDataBundle) -> f64 {
        bundle.xs()[self.boundary_index(bundle)]
    }

    /// Value of the boundary node on this side.
    pub fn boundary_y(self, bundle: &Interpolator1DDataBundle) -> f64 {
        bundle.ys()[self.boundary_index(bundle)]
    }
}

/// A strategy for evaluating outside the sample domain.
///
/// Shares the evaluate/derivative/sensitivity contract of
/// [`Interpolator1D`], but only for points strictly outside
/// `[first_x, last_x]`; inside points are an `InvalidInput` error.
/// Extrapolators cannot build bundles of their own.
pub trait Extrapolator1D: fmt::Debug + Send + Sync + DynEq {
    /// Canonical registry name.
    fn name(&self) -> &'static str;

    /// Extrapolated value at `x`.
    fn extrapolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64>;

    /// First derivative of the extrapolant at `x`.
    fn first_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<f64>;

    /// `∂value(x)/∂yᵢ` for every node.
    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>>;

    /// Always `UnsupportedOperation`.
    fn data_bundle(&self, _xs: &[f64], _ys: &[f64]) -> InterpolationResult<Interpolator1DDataBundle> {
        Err(InterpolationError::UnsupportedOperation(format!(
            "{} cannot build a data bundle",
            self.name()
        )))
    }

    /// Always `UnsupportedOperation`.
    fn data_bundle_from_sorted(
        &self,
        xs: &[f64],
        ys: &[f64],
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        self.data_bundle(xs, ys)
    }
}

impl PartialEq for dyn Extrapolator1D {
    fn eq(&self, other: &Self) -> bool {
        self.dyn_eq(other.as_any())
    }
}
