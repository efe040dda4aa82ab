use crate::math::interpolators::{Extrapolator1D, Interpolator1DDataBundle, Side};
use crate::types::InterpolationResult;

/// Holds the boundary value constant outside the data domain.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{
///     Extrapolator1D, FlatExtrapolator1D, Interpolator1D, LinearInterpolator1D,
/// };
///
/// let bundle = LinearInterpolator1D.data_bundle(&[1.0, 2.0], &[3.0, 5.0]).unwrap();
/// assert_eq!(FlatExtrapolator1D.extrapolate(&bundle, -10.0).unwrap(), 3.0);
/// assert_eq!(FlatExtrapolator1D.extrapolate(&bundle, 10.0).unwrap(), 5.0);
/// assert!(FlatExtrapolator1D.extrapolate(&bundle, 1.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FlatExtrapolator1D;

impl Extrapolator1D for FlatExtrapolator1D {
    fn name(&self) -> &'static str {
        "FlatExtrapolator"
    }

    fn extrapolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        Ok(Side::locate(bundle, x)?.boundary_y(bundle))
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        Side::locate(bundle, x)?;
        Ok(0.0)
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        let side = Side::locate(bundle, x)?;
        Ok(bundle.unit_sensitivity(side.boundary_index(bundle)))
    }
}
