//! Finite-difference oracles.
//!
//! These are the reference implementations every analytic derivative and
//! node sensitivity in the crate is checked against. They are generic over
//! the evaluated function so the same code serves 1-D interpolators,
//! extrapolators and the combined interpolator.

use crate::types::InterpolationResult;

/// Default bump applied to node values.
pub const DEFAULT_NODE_BUMP: f64 = 1e-6;

/// Which stencil to use for a first derivative near a domain edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceScheme {
    /// `(f(x + h) - f(x - h)) / 2h`
    Central,
    /// `(f(x + h) - f(x)) / h`
    Forward,
    /// `(f(x) - f(x - h)) / h`
    Backward,
}

impl DifferenceScheme {
    /// Pick the widest stencil that stays inside `[lower, upper]`.
    pub fn for_domain(x: f64, h: f64, lower: f64, upper: f64) -> Self {
        if x - h < lower {
            DifferenceScheme::Forward
        } else if x + h > upper {
            DifferenceScheme::Backward
        } else {
            DifferenceScheme::Central
        }
    }
}

/// First derivative of `f` at `x` by finite difference.
///
/// # Example
///
/// ```
/// use interp_core::math::finite_difference::{first_derivative, DifferenceScheme};
///
/// let d = first_derivative(|x: f64| Ok(x * x), 3.0, 1e-6, DifferenceScheme::Central).unwrap();
/// assert!((d - 6.0).abs() < 1e-6);
/// ```
pub fn first_derivative<F>(f: F, x: f64, h: f64, scheme: DifferenceScheme) -> InterpolationResult<f64>
where
    F: Fn(f64) -> InterpolationResult<f64>,
{
    match scheme {
        DifferenceScheme::Central => Ok((f(x + h)? - f(x - h)?) / (2.0 * h)),
        DifferenceScheme::Forward => Ok((f(x + h)? - f(x)?) / h),
        DifferenceScheme::Backward => Ok((f(x)? - f(x - h)?) / h),
    }
}

/// Central-difference sensitivities of a scalar with respect to each value.
///
/// `f` receives a full copy of `values` with exactly one entry bumped by
/// `±eps`; the result holds `(f(v + eps·eᵢ) - f(v - eps·eᵢ)) / 2eps` for
/// every `i`.
///
/// # Example
///
/// ```
/// use interp_core::math::finite_difference::central_difference_node_sensitivities;
///
/// let s = central_difference_node_sensitivities(&[1.0, 2.0], 1e-6, |v| Ok(3.0 * v[0] + v[1] * v[1])).unwrap();
/// assert!((s[0] - 3.0).abs() < 1e-8);
/// assert!((s[1] - 4.0).abs() < 1e-6);
/// ```
pub fn central_difference_node_sensitivities<F>(
    values: &[f64],
    eps: f64,
    mut f: F,
) -> InterpolationResult<Vec<f64>>
where
    F: FnMut(&[f64]) -> InterpolationResult<f64>,
{
    let mut bumped = values.to_vec();
    let mut result = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        bumped[i] = values[i] + eps;
        let up = f(&bumped)?;
        bumped[i] = values[i] - eps;
        let down = f(&bumped)?;
        bumped[i] = values[i];
        result.push((up - down) / (2.0 * eps));
    }
    Ok(result)
}
