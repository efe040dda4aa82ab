//! Root-finding collaborators.
//!
//! The only nested root solve in the crate is the monthly growth rate of
//! [`LogLinearWithSeasonalityInterpolator1D`](crate::math::interpolators::LogLinearWithSeasonalityInterpolator1D):
//! the interval is first widened by [`BracketRoot`] and then refined by
//! [`BrentSolver`]. Both run under a [`SolverConfig`] or explicit expansion
//! budget, and report failure instead of looping.
//!
//! ```
//! use interp_core::math::solvers::{BracketRoot, BrentSolver, SolverConfig};
//!
//! let f = |g: f64| (1.0 + g).powi(12) - 1.05;
//! let (a, b) = BracketRoot::default().bracket(f, -0.01, 0.01).unwrap();
//! let g = BrentSolver::new(SolverConfig::default()).find_root(f, a, b).unwrap();
//! assert!(f(g).abs() < 1e-10);
//! ```

mod bracket;
mod brent;
mod config;

pub use bracket::BracketRoot;
pub use brent::BrentSolver;
pub use config::SolverConfig;
