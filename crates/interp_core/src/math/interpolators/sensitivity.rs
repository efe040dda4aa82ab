//! Finite-difference node-sensitivity calculators.
//!
//! Both calculators rebuild the data bundle with one node value bumped up
//! and down, re-evaluate, and divide by twice the bump. They are the oracle
//! for the analytic sensitivities every interpolator and extrapolator
//! provides.

use super::{Extrapolator1D, Interpolator1D, Interpolator1DDataBundle};
use crate::math::finite_difference::{central_difference_node_sensitivities, DEFAULT_NODE_BUMP};
use crate::types::{InterpolationError, InterpolationResult};

/// Finite-difference node sensitivities of an [`Interpolator1D`].
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{
///     FiniteDifferenceInterpolator1DNodeSensitivityCalculator, Interpolator1D,
///     LinearInterpolator1D,
/// };
///
/// let interp = LinearInterpolator1D;
/// let bundle = interp.data_bundle(&[0.0, 1.0, 2.0], &[1.0, 3.0, 2.0]).unwrap();
/// let fd = FiniteDifferenceInterpolator1DNodeSensitivityCalculator::default()
///     .calculate(&interp, &bundle, 0.25)
///     .unwrap();
/// assert!((fd[0] - 0.75).abs() < 1e-8);
/// assert!((fd[1] - 0.25).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifferenceInterpolator1DNodeSensitivityCalculator {
    eps: f64,
}

impl Default for FiniteDifferenceInterpolator1DNodeSensitivityCalculator {
    fn default() -> Self {
        Self {
            eps: DEFAULT_NODE_BUMP,
        }
    }
}

impl FiniteDifferenceInterpolator1DNodeSensitivityCalculator {
    /// Calculator with a custom bump size.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `eps` is finite and strictly positive.
    pub fn new(eps: f64) -> InterpolationResult<Self> {
        validate_bump(eps)?;
        Ok(Self { eps })
    }

    /// Bump size applied to each node value.
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Sensitivities of `interpolator.interpolate(bundle, x)` to each node value.
    pub fn calculate<I>(
        &self,
        interpolator: &I,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>>
    where
        I: Interpolator1D + ?Sized,
    {
        central_difference_node_sensitivities(bundle.ys(), self.eps, |ys| {
            let bumped = interpolator.data_bundle_from_sorted(bundle.xs(), ys)?;
            interpolator.interpolate(&bumped, x)
        })
    }
}

/// Finite-difference node sensitivities of an [`Extrapolator1D`].
///
/// The extrapolator cannot build bundles, so the interpolator that produced
/// the bundle rebuilds each bumped copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrapolator1DNodeSensitivityCalculator {
    eps: f64,
}

impl Default for Extrapolator1DNodeSensitivityCalculator {
    fn default() -> Self {
        Self {
            eps: DEFAULT_NODE_BUMP,
        }
    }
}

impl Extrapolator1DNodeSensitivityCalculator {
    /// Calculator with a custom bump size.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `eps` is finite and strictly positive.
    pub fn new(eps: f64) -> InterpolationResult<Self> {
        validate_bump(eps)?;
        Ok(Self { eps })
    }

    /// Sensitivities of `extrapolator.extrapolate(bundle, x)` to each node value.
    pub fn calculate<E, I>(
        &self,
        extrapolator: &E,
        interpolator: &I,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>>
    where
        E: Extrapolator1D + ?Sized,
        I: Interpolator1D + ?Sized,
    {
        central_difference_node_sensitivities(bundle.ys(), self.eps, |ys| {
            let bumped = interpolator.data_bundle_from_sorted(bundle.xs(), ys)?;
            extrapolator.extrapolate(&bumped, x)
        })
    }
}

fn validate_bump(eps: f64) -> InterpolationResult<()> {
    if eps.is_finite() && eps > 0.0 {
        Ok(())
    } else {
        Err(InterpolationError::invalid(format!(
            "bump size must be positive and finite, got {}",
            eps
        )))
    }
}
