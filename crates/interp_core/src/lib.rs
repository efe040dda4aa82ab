//! # interp_core: Interpolation and Node-Sensitivity Kernel
//!
//! Building blocks for curve and surface construction:
//! - One-dimensional interpolators and extrapolators with analytic first
//!   derivatives and node sensitivities (`math::interpolators`)
//! - Interpolator/extrapolator composition, name-keyed factories and TOML
//!   configuration (`math::interpolators`)
//! - Tensor-grid interpolation in two dimensions (`math::interpolators::GridInterpolator2D`)
//! - Kriging, radial-basis and Shepard interpolation in any dimension
//!   (`math::interpolators_nd`)
//! - B-spline bases and difference penalties for regularised fitting
//!   (`math::basis`, `math::penalty`)
//! - Error types: `InterpolationError`, `SolverError` (`types::error`)
//!
//! ## Data Bundles
//!
//! Interpolators hold parameters only. Sample data is validated, sorted
//! and pre-processed once into an immutable data bundle, which is then
//! shared freely across threads for any number of queries.
//!
//! ## Usage Examples
//!
//! ```rust
//! use interp_core::math::interpolators::{
//!     CombinedInterpolatorExtrapolatorFactory, Interpolator1D,
//! };
//!
//! let curve = CombinedInterpolatorExtrapolatorFactory::get_interpolator(
//!     "NaturalCubicSpline",
//!     Some("FlatExtrapolator"),
//!     Some("LinearExtrapolator"),
//! )
//! .unwrap();
//! let bundle = curve.data_bundle(&[1.0, 2.0, 3.0, 5.0], &[0.02, 0.025, 0.027, 0.03]).unwrap();
//!
//! // Exact at the nodes, flat on the left
//! assert!((curve.interpolate(&bundle, 2.0).unwrap() - 0.025).abs() < 1e-12);
//! assert!((curve.interpolate(&bundle, 0.5).unwrap() - 0.02).abs() < 1e-15);
//!
//! // One sensitivity per node
//! let sensitivities = curve.node_sensitivities_for_value(&bundle, 2.5).unwrap();
//! assert_eq!(sensitivities.len(), 4);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): build N-D fitting matrices row-parallel with rayon

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
