//! One- and two-dimensional interpolation with node sensitivities.
//!
//! Every 1-D family implements the [`Interpolator1D`] strategy trait. A
//! strategy is a parameter-only value; the samples live in an
//! [`Interpolator1DDataBundle`] built by the strategy, which also caches
//! whatever the family precomputes (spline curvatures, filtered slopes,
//! seasonal sub-nodes).
//!
//! ## Available Interpolators
//!
//! | Name | Type |
//! |------|------|
//! | `Linear` | [`LinearInterpolator1D`] |
//! | `NaturalCubicSpline` | [`NaturalCubicSplineInterpolator1D`] |
//! | `DoubleQuadratic` | [`DoubleQuadraticInterpolator1D`] |
//! | `Step` | [`StepInterpolator1D`] |
//! | `StepUpper` | [`StepUpperInterpolator1D`] |
//! | `Exponential` | [`ExponentialInterpolator1D`] |
//! | `LogLinear` | [`LogLinearInterpolator1D`] |
//! | `TimeSquare` | [`TimeSquareInterpolator1D`] |
//! | `Polynomial` | [`PolynomialInterpolator1D`] |
//! | `RationalFunction` | [`RationalFunctionInterpolator1D`] |
//! | `BarycentricRationalFunction` | [`BarycentricRationalFunctionInterpolator1D`] |
//! | `MonotonicIncreasing` | [`MonotonicIncreasingInterpolator1D`] |
//! | `MonotonicityPreservingCubicSpline` | [`MonotonicityPreservingCubicSplineInterpolator1D`] |
//! | `LogLinearWithSeasonality` | [`LogLinearWithSeasonalityInterpolator1D`] |
//!
//! Out-of-domain evaluation goes through the [`extrapolators`] wrapped in a
//! [`CombinedInterpolatorExtrapolator`]. Named lookup lives in
//! [`Interpolator1DFactory`] and [`Extrapolator1DFactory`], with
//! [`InterpolatorConfig`] as the TOML front end.
//!
//! ## Example
//!
//! ```
//! use interp_core::math::interpolators::{Interpolator1D, NaturalCubicSplineInterpolator1D};
//!
//! let xs = [0.0, 1.0, 2.0, 3.0];
//! let ys = [0.0, 1.0, 4.0, 9.0];
//!
//! let spline = NaturalCubicSplineInterpolator1D::default();
//! let bundle = spline.data_bundle(&xs, &ys).unwrap();
//! assert_eq!(bundle.domain(), (0.0, 3.0));
//!
//! let sensitivities = spline.node_sensitivities_for_value(&bundle, 1.5).unwrap();
//! assert_eq!(sensitivities.len(), 4);
//! assert!((sensitivities.iter().sum::<f64>() - 1.0).abs() < 1e-12);
//! ```

mod barycentric;
mod combined;
mod config;
mod cubic_spline;
mod data_bundle;
mod double_quadratic;
mod exponential;
pub mod extrapolators;
mod factory;
mod grid_2d;
mod hermite;
mod linear;
mod log_linear;
mod monotone_spline;
mod monotonic;
mod polynomial;
mod rational;
mod seasonal;
mod sensitivity;
mod step;
mod time_square;
mod traits;

// Re-export public types at module level
pub use barycentric::BarycentricRationalFunctionInterpolator1D;
pub use combined::CombinedInterpolatorExtrapolator;
pub use config::InterpolatorConfig;
pub use cubic_spline::{NaturalCubicSplineInterpolator1D, SplineBoundary};
pub use data_bundle::Interpolator1DDataBundle;
pub use double_quadratic::DoubleQuadraticInterpolator1D;
pub use exponential::ExponentialInterpolator1D;
pub use extrapolators::{
    ExponentialExtrapolator1D, FlatExtrapolator1D, LinearExtrapolator1D, LogLinearExtrapolator1D,
};
pub use factory::{
    CombinedInterpolatorExtrapolatorFactory, Extrapolator1DFactory, Interpolator1DFactory,
    EXTRAPOLATOR_NAMES,
};
pub use grid_2d::{GridDataBundle2D, GridInterpolator2D, GridSample};
pub use linear::LinearInterpolator1D;
pub use log_linear::LogLinearInterpolator1D;
pub use monotone_spline::MonotonicityPreservingCubicSplineInterpolator1D;
pub use monotonic::MonotonicIncreasingInterpolator1D;
pub use polynomial::PolynomialInterpolator1D;
pub use rational::RationalFunctionInterpolator1D;
pub use seasonal::{LogLinearWithSeasonalityInterpolator1D, MONTHS};
pub use sensitivity::{
    Extrapolator1DNodeSensitivityCalculator, FiniteDifferenceInterpolator1DNodeSensitivityCalculator,
};
pub use step::{StepInterpolator1D, StepUpperInterpolator1D};
pub use time_square::TimeSquareInterpolator1D;
pub use traits::{DynEq, Extrapolator1D, Interpolator1D, Side};
