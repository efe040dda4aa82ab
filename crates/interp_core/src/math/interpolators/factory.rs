//! Name-keyed lookup of interpolators and extrapolators.
//!
//! Every interpolator family is registered under its canonical name with
//! default parameters. Extrapolators that wrap an interpolator are built on
//! demand around the interpolator they extrapolate.

use super::{
    BarycentricRationalFunctionInterpolator1D, CombinedInterpolatorExtrapolator,
    DoubleQuadraticInterpolator1D, ExponentialExtrapolator1D, ExponentialInterpolator1D,
    Extrapolator1D, FlatExtrapolator1D, Interpolator1D, LinearExtrapolator1D,
    LinearInterpolator1D, LogLinearExtrapolator1D, LogLinearInterpolator1D,
    LogLinearWithSeasonalityInterpolator1D, MonotonicIncreasingInterpolator1D,
    MonotonicityPreservingCubicSplineInterpolator1D, NaturalCubicSplineInterpolator1D,
    PolynomialInterpolator1D, RationalFunctionInterpolator1D, StepInterpolator1D, StepUpperInterpolator1D, TimeSquareInterpolator1D,
};
use crate::types::{InterpolationError, InterpolationResult};
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};

/// Canonical extrapolator names.
pub const EXTRAPOLATOR_NAMES: [&str; 4] = [
    "FlatExtrapolator",
    "LinearExtrapolator",
    "ExponentialExtrapolator",
    "LogLinearExtrapolator",
];

type Registry = BTreeMap<&'static str, Arc<dyn Interpolator1D>>;

fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let instances: Vec<Arc<dyn Interpolator1D>> = vec![
            Arc::new(LinearInterpolator1D),
            Arc::new(NaturalCubicSplineInterpolator1D::default()),
            Arc::new(DoubleQuadraticInterpolator1D),
            Arc::new(StepInterpolator1D),
            Arc::new(StepUpperInterpolator1D),
            Arc::new(ExponentialInterpolator1D),
            Arc::new(LogLinearInterpolator1D),
            Arc::new(TimeSquareInterpolator1D),
            Arc::new(PolynomialInterpolator1D::default()),
            Arc::new(RationalFunctionInterpolator1D::default()),
            Arc::new(BarycentricRationalFunctionInterpolator1D::default()),
            Arc::new(MonotonicIncreasingInterpolator1D),
            Arc::new(MonotonicityPreservingCubicSplineInterpolator1D::default()),
            Arc::new(LogLinearWithSeasonalityInterpolator1D::default()),
        ];
        instances.into_iter().map(|i| (i.name(), i)).collect()
    })
}

/// Lookup of 1-D interpolators by canonical name.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::Interpolator1DFactory;
///
/// let spline = Interpolator1DFactory::get_interpolator("NaturalCubicSpline").unwrap();
/// assert_eq!(
///     Interpolator1DFactory::get_interpolator_name(Some(spline.as_ref())),
///     Some("NaturalCubicSpline")
/// );
/// assert!(Interpolator1DFactory::get_interpolator("Akima").is_err());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Interpolator1DFactory;

impl Interpolator1DFactory {
    /// Shared default instance registered under `name`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an unknown name.
    pub fn get_interpolator(name: &str) -> InterpolationResult<Arc<dyn Interpolator1D>> {
        registry().get(name).cloned().ok_or_else(|| {
            InterpolationError::invalid(format!("unknown interpolator name '{}'", name))
        })
    }

    /// Canonical name of `interpolator`, `None` when there is none.
    pub fn get_interpolator_name(interpolator: Option<&dyn Interpolator1D>) -> Option<&'static str> {
        interpolator.map(|i| i.name())
    }

    /// Every registered name, sorted.
    pub fn names() -> impl Iterator<Item = &'static str> {
        registry().keys().copied()
    }
}

/// Lookup of extrapolators by canonical name.
#[derive(Debug, Clone, Copy, Default)]
pub struct Extrapolator1DFactory;

impl Extrapolator1DFactory {
    /// Extrapolator registered under `name`. Tangent-based extrapolators
    /// take their boundary slope from `interpolator`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an unknown name.
    pub fn get_extrapolator(
        name: &str,
        interpolator: &Arc<dyn Interpolator1D>,
    ) -> InterpolationResult<Arc<dyn Extrapolator1D>> {
        match name {
            "FlatExtrapolator" => Ok(Arc::new(FlatExtrapolator1D)),
            "LinearExtrapolator" => Ok(Arc::new(LinearExtrapolator1D::new(Arc::clone(interpolator)))),
            "ExponentialExtrapolator" => Ok(Arc::new(ExponentialExtrapolator1D)),
            "LogLinearExtrapolator" => Ok(Arc::new(LogLinearExtrapolator1D::new(Arc::clone(
                interpolator,
            )))),
            _ => Err(InterpolationError::invalid(format!(
                "unknown extrapolator name '{}'",
                name
            ))),
        }
    }

    /// Canonical name of `extrapolator`, `None` when there is none.
    pub fn get_extrapolator_name(extrapolator: Option<&dyn Extrapolator1D>) -> Option<&'static str> {
        extrapolator.map(|e| e.name())
    }
}

/// Builds [`CombinedInterpolatorExtrapolator`]s from names.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinedInterpolatorExtrapolatorFactory;

impl CombinedInterpolatorExtrapolatorFactory {
    /// Interpolator named `interpolator` with optional named extrapolators
    /// on each side. A side left as `None` has no extrapolation.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for any unknown name.
    pub fn get_interpolator(
        interpolator: &str,
        left_extrapolator: Option<&str>,
        right_extrapolator: Option<&str>,
    ) -> InterpolationResult<CombinedInterpolatorExtrapolator> {
        let base = Interpolator1DFactory::get_interpolator(interpolator)?;
        Self::from_interpolator(base, left_extrapolator, right_extrapolator)
    }

    /// An already configured interpolator with optional named extrapolators
    /// built around it.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for an unknown extrapolator name.
    pub fn from_interpolator(
        base: Arc<dyn Interpolator1D>,
        left_extrapolator: Option<&str>,
        right_extrapolator: Option<&str>,
    ) -> InterpolationResult<CombinedInterpolatorExtrapolator> {
        let resolve = |name: Option<&str>| {
            name.map(|n| Extrapolator1DFactory::get_extrapolator(n, &base))
                .transpose()
        };
        let left = resolve(left_extrapolator)?;
        let right = resolve(right_extrapolator)?;
        tracing::debug!(
            interpolator = base.name(),
            left = ?left_extrapolator,
            right = ?right_extrapolator,
            "built combined interpolator"
        );
        Ok(CombinedInterpolatorExtrapolator::from_parts(base, left, right))
    }

    /// Interpolator named `interpolator` with the same named extrapolator on
    /// both sides.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for any unknown name.
    pub fn get_interpolator_with_extrapolator(
        interpolator: &str,
        extrapolator: &str,
    ) -> InterpolationResult<CombinedInterpolatorExtrapolator> {
        Self::get_interpolator(interpolator, Some(extrapolator), Some(extrapolator))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::interpolators::SplineBoundary;
    use crate::types::ErrorKind;

    #[test]
    fn test_round_trip_every_name() {
        for name in Interpolator1DFactory::names() {
            let interpolator = Interpolator1DFactory::get_interpolator(name).unwrap();
            assert_eq!(
                Interpolator1DFactory::get_interpolator_name(Some(interpolator.as_ref())),
                Some(name)
            );
        }
        assert_eq!(Interpolator1DFactory::names().count(), 14);
    }

    #[test]
    fn test_extrapolator_round_trip() {
        let base = Interpolator1DFactory::get_interpolator("Linear").unwrap();
        for name in EXTRAPOLATOR_NAMES {
            let extrapolator = Extrapolator1DFactory::get_extrapolator(name, &base).unwrap();
            assert_eq!(
                Extrapolator1DFactory::get_extrapolator_name(Some(extrapolator.as_ref())),
                Some(name)
            );
        }
    }

    #[test]
    fn test_unknown_and_absent() {
        let err = Interpolator1DFactory::get_interpolator("Quintic").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let base = Interpolator1DFactory::get_interpolator("Linear").unwrap();
        assert!(Extrapolator1DFactory::get_extrapolator("Quadratic", &base).is_err());
        assert_eq!(Interpolator1DFactory::get_interpolator_name(None), None);
        assert_eq!(Extrapolator1DFactory::get_extrapolator_name(None), None);
    }

    #[test]
    fn test_lookup_returns_equal_instances() {
        let a = Interpolator1DFactory::get_interpolator("DoubleQuadratic").unwrap();
        let b = Interpolator1DFactory::get_interpolator("DoubleQuadratic").unwrap();
        assert!(a.as_ref() == b.as_ref());
        assert!(a.as_ref() == &DoubleQuadraticInterpolator1D as &dyn Interpolator1D);
        let linear = Interpolator1DFactory::get_interpolator("Linear").unwrap();
        assert!(a.as_ref() != linear.as_ref());
    }

    #[test]
    fn test_combined_factory() {
        let combined = CombinedInterpolatorExtrapolatorFactory::get_interpolator(
            "Linear",
            Some("FlatExtrapolator"),
            Some("LinearExtrapolator"),
        )
        .unwrap();
        assert_eq!(
            combined.left_extrapolator().map(|e| e.name()),
            Some("FlatExtrapolator")
        );
        assert_eq!(
            combined.right_extrapolator().map(|e| e.name()),
            Some("LinearExtrapolator")
        );
        assert!(
            CombinedInterpolatorExtrapolatorFactory::get_interpolator("Linear", Some("Nope"), None)
                .is_err()
        );

        let right_only =
            CombinedInterpolatorExtrapolatorFactory::get_interpolator("Step", None, Some("FlatExtrapolator"))
                .unwrap();
        assert!(right_only.left_extrapolator().is_none());
        assert!(right_only.right_extrapolator().is_some());

        let both = CombinedInterpolatorExtrapolatorFactory::get_interpolator_with_extrapolator(
            "LogLinear",
            "LogLinearExtrapolator",
        )
        .unwrap();
        assert_eq!(both.left_extrapolator(), both.right_extrapolator());
    }

    #[test]
    fn test_from_interpolator_keeps_parameters() {
        let clamped: Arc<dyn Interpolator1D> = Arc::new(
            NaturalCubicSplineInterpolator1D::new(SplineBoundary::Clamped(0.5), SplineBoundary::Natural)
                .unwrap(),
        );
        let combined = CombinedInterpolatorExtrapolatorFactory::from_interpolator(
            Arc::clone(&clamped),
            Some("LinearExtrapolator"),
            None,
        )
        .unwrap();
        assert!(combined.interpolator().as_ref() == clamped.as_ref());
        let natural = Interpolator1DFactory::get_interpolator("NaturalCubicSpline").unwrap();
        assert!(combined.interpolator().as_ref() != natural.as_ref());
        assert!(combined.right_extrapolator().is_none());
        assert!(
            CombinedInterpolatorExtrapolatorFactory::from_interpolator(clamped, None, Some("Nope")).is_err()
        );
    }
}
