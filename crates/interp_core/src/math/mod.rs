//! Numerical building blocks.
//!
//! - [`interpolators`]: one-dimensional interpolators, extrapolators, their
//!   composition, factories and the 2-D grid interpolator
//! - [`interpolators_nd`]: scattered-data interpolation in any dimension
//! - [`basis`]: B-spline basis functions and weighted aggregations
//! - [`penalty`]: difference penalty matrices on flattened grids
//! - [`finite_difference`]: bump-and-revalue derivatives and sensitivities
//! - [`linalg`]: dense and tridiagonal linear solves
//! - [`solvers`]: bracketed scalar root finding

pub mod basis;
pub mod finite_difference;
pub mod interpolators;
pub mod interpolators_nd;
pub mod linalg;
pub mod penalty;
pub mod solvers;
