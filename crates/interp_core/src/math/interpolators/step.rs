//! Piecewise-constant interpolators.

use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::InterpolationResult;

/// Piecewise-constant interpolator holding the value of the node at or
/// below the query.
///
/// On `[xᵢ, xᵢ₊₁)` the value is `yᵢ`; at the last node it is the last value.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{Interpolator1D, StepInterpolator1D};
///
/// let bundle = StepInterpolator1D.data_bundle(&[1.0, 2.0, 3.0], &[4.5, 4.3, 6.7]).unwrap();
/// assert_eq!(StepInterpolator1D.interpolate(&bundle, 1.999999).unwrap(), 4.5);
/// assert_eq!(StepInterpolator1D.interpolate(&bundle, 2.0).unwrap(), 4.3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StepInterpolator1D;

/// Piecewise-constant interpolator holding the value of the node above the
/// query.
///
/// On `(xᵢ, xᵢ₊₁]` the value is `yᵢ₊₁`; exactly at a node it is that
/// node's value, so the interpolant is exact at every node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StepUpperInterpolator1D;

impl StepInterpolator1D {
    fn node(bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<usize> {
        bundle.check_domain(x)?;
        Ok(bundle.lower_bound_index(x))
    }
}

impl StepUpperInterpolator1D {
    fn node(bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<usize> {
        bundle.check_domain(x)?;
        Ok(match bundle.node_index(x) {
            Some(i) => i,
            None => bundle.lower_bound_index(x) + 1,
        })
    }
}

macro_rules! impl_step_interpolator {
    ($ty:ty, $name:literal) => {
        impl Interpolator1D for $ty {
            fn name(&self) -> &'static str {
                $name
            }

            fn interpolate(
                &self,
                bundle: &Interpolator1DDataBundle,
                x: f64,
            ) -> InterpolationResult<f64> {
                Ok(bundle.ys()[Self::node(bundle, x)?])
            }

            fn first_derivative(
                &self,
                bundle: &Interpolator1DDataBundle,
                x: f64,
            ) -> InterpolationResult<f64> {
                bundle.check_domain(x)?;
                Ok(0.0)
            }

            fn node_sensitivities_for_value(
                &self,
                bundle: &Interpolator1DDataBundle,
                x: f64,
            ) -> InterpolationResult<Vec<f64>> {
                Ok(bundle.unit_sensitivity(Self::node(bundle, x)?))
            }

            fn node_sensitivities_for_derivative(
                &self,
                bundle: &Interpolator1DDataBundle,
                x: f64,
            ) -> InterpolationResult<Vec<f64>> {
                bundle.check_domain(x)?;
                Ok(vec![0.0; bundle.size()])
            }
        }
    };
}

impl_step_interpolator!(StepInterpolator1D, "Step");
impl_step_interpolator!(StepUpperInterpolator1D, "StepUpper");
