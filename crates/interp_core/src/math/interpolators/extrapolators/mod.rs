//! Boundary extrapolators.
//!
//! An extrapolator continues a fitted curve past `first_x` or `last_x`.
//! Queries inside the data domain are rejected with
//! [`InterpolationError::InvalidInput`](crate::types::InterpolationError::InvalidInput)
//! instead of being clamped; extrapolators are normally reached through
//! [`CombinedInterpolatorExtrapolator`](super::CombinedInterpolatorExtrapolator),
//! which only hands them outside points.
//!
//! | Extrapolator | Beyond the boundary node `(x_b, y_b)` |
//! |--------------|----------------------------------------|
//! | [`FlatExtrapolator1D`] | `y_b` |
//! | [`LinearExtrapolator1D`] | tangent line of the wrapped interpolator |
//! | [`ExponentialExtrapolator1D`] | `exp(x·ln(y_b)/x_b)` |
//! | [`LogLinearExtrapolator1D`] | tangent line of `ln y` |

mod exponential;
mod flat;
mod linear;
mod log_linear;

pub use exponential::ExponentialExtrapolator1D;
pub use flat::FlatExtrapolator1D;
pub use linear::LinearExtrapolator1D;
pub use log_linear::LogLinearExtrapolator1D;
