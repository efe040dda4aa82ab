//! Cubic spline interpolation with natural or clamped end conditions.

use super::data_bundle::{BundleState, CubicSplineState};
use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::math::linalg::solve_tridiagonal;
use crate::types::{InterpolationError, InterpolationResult};
use serde::Deserialize;

/// End condition of a cubic spline.
///
/// Written in [`InterpolatorConfig`](super::InterpolatorConfig) TOML as
/// `{ type = "natural" }` or `{ type = "clamped", gradient = 0.5 }`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(tag = "type", content = "gradient", rename_all = "snake_case")]
pub enum SplineBoundary {
    /// Zero second derivative at the end node.
    #[default]
    Natural,
    /// Prescribed first derivative at the end node.
    Clamped(f64),
}

/// Cubic spline interpolator with C² continuity.
///
/// The bundle caches the second derivatives `Mᵢ` at the nodes, obtained
/// from the tridiagonal system
///
/// ```text
/// h[i-1]*M[i-1] + 2*(h[i-1]+h[i])*M[i] + h[i]*M[i+1] = 6*(δ[i] - δ[i-1])
/// ```
///
/// closed by the end conditions. The system is linear in the node values,
/// so the bundle also caches `∂M/∂y` and sensitivities are exact.
///
/// A single-node bundle is constant and a two-node natural spline is the
/// straight line through both nodes.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{Interpolator1D, NaturalCubicSplineInterpolator1D};
///
/// let interp = NaturalCubicSplineInterpolator1D::default();
/// let bundle = interp.data_bundle(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 8.0, 27.0]).unwrap();
/// assert!((interp.interpolate(&bundle, 2.0).unwrap() - 8.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NaturalCubicSplineInterpolator1D {
    left: SplineBoundary,
    right: SplineBoundary,
}

impl NaturalCubicSplineInterpolator1D {
    /// Spline with the given end conditions.
    pub fn new(left: SplineBoundary, right: SplineBoundary) -> InterpolationResult<Self> {
        for boundary in [left, right] {
            if let SplineBoundary::Clamped(g) = boundary {
                if !g.is_finite() {
                    return Err(InterpolationError::invalid(format!(
                        "clamped end gradient must be finite, got {}",
                        g
                    )));
                }
            }
        }
        Ok(Self { left, right })
    }

    /// Spline with prescribed end gradients.
    pub fn clamped(left_gradient: f64, right_gradient: f64) -> InterpolationResult<Self> {
        Self::new(
            SplineBoundary::Clamped(left_gradient),
            SplineBoundary::Clamped(right_gradient),
        )
    }

    /// Left end condition.
    pub fn left(&self) -> SplineBoundary {
        self.left
    }

    /// Right end condition.
    pub fn right(&self) -> SplineBoundary {
        self.right
    }

    /// Solve for the second derivatives. `with_constants` switches the
    /// clamped gradients on, which is off when solving for `∂M/∂y`.
    fn second_derivatives(
        &self,
        xs: &[f64],
        ys: &[f64],
        with_constants: bool,
    ) -> InterpolationResult<Vec<f64>> {
        let n = xs.len();
        let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
        let delta: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

        let mut sub = vec![0.0; n];
        let mut diag = vec![0.0; n];
        let mut sup = vec![0.0; n];
        let mut rhs = vec![0.0; n];

        match self.left {
            SplineBoundary::Natural => diag[0] = 1.0,
            SplineBoundary::Clamped(g) => {
                let g = if with_constants { g } else { 0.0 };
                diag[0] = 2.0 * h[0];
                sup[0] = h[0];
                rhs[0] = 6.0 * (delta[0] - g);
            }
        }
        for i in 1..n - 1 {
            sub[i] = h[i - 1];
            diag[i] = 2.0 * (h[i - 1] + h[i]);
            sup[i] = h[i];
            rhs[i] = 6.0 * (delta[i] - delta[i - 1]);
        }
        match self.right {
            SplineBoundary::Natural => diag[n - 1] = 1.0,
            SplineBoundary::Clamped(g) => {
                let g = if with_constants { g } else { 0.0 };
                sub[n - 1] = h[n - 2];
                diag[n - 1] = 2.0 * h[n - 2];
                rhs[n - 1] = 6.0 * (g - delta[n - 2]);
            }
        }

        Ok(solve_tridiagonal(&sub, &diag, &sup, &rhs)?)
    }

    fn state<'a>(
        &self,
        bundle: &'a Interpolator1DDataBundle,
    ) -> InterpolationResult<Option<&'a CubicSplineState>> {
        match bundle.state() {
            BundleState::CubicSpline(state) => Ok(Some(state)),
            BundleState::Plain if bundle.size() == 1 => Ok(None),
            _ => Err(InterpolationError::invalid(
                "data bundle was not built by a cubic spline interpolator",
            )),
        }
    }

    /// Interval index, width and the basis coefficients `(A, B)` at `x`.
    #[inline]
    fn locate(bundle: &Interpolator1DDataBundle, x: f64) -> (usize, f64, f64, f64) {
        let i = bundle.interval_index(x);
        let xs = bundle.xs();
        let h = xs[i + 1] - xs[i];
        let a = (xs[i + 1] - x) / h;
        (i, h, a, 1.0 - a)
    }
}

impl Interpolator1D for NaturalCubicSplineInterpolator1D {
    fn name(&self) -> &'static str {
        "NaturalCubicSpline"
    }

    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        let n = bundle.size();
        if n == 1 {
            return Ok(bundle);
        }
        let second_derivatives = self.second_derivatives(bundle.xs(), bundle.ys(), true)?;
        let mut unit = vec![0.0; n];
        let mut columns = Vec::with_capacity(n);
        for j in 0..n {
            unit[j] = 1.0;
            columns.push(self.second_derivatives(bundle.xs(), &unit, false)?);
            unit[j] = 0.0;
        }
        // columns[j][i] = ∂M_i/∂y_j; store row-wise
        let second_derivative_sensitivities = (0..n)
            .map(|i| columns.iter().map(|col| col[i]).collect())
            .collect();

        tracing::debug!(nodes = n, "built cubic spline data bundle");
        Ok(bundle.with_state(BundleState::CubicSpline(CubicSplineState {
            second_derivatives,
            second_derivative_sensitivities,
        })))
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        let Some(state) = self.state(bundle)? else {
            return Ok(bundle.first_y());
        };
        let (i, h, a, b) = Self::locate(bundle, x);
        let ys = bundle.ys();
        let m = &state.second_derivatives;
        Ok(a * ys[i]
            + b * ys[i + 1]
            + ((a * a * a - a) * m[i] + (b * b * b - b) * m[i + 1]) * h * h / 6.0)
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        let Some(state) = self.state(bundle)? else {
            return Ok(0.0);
        };
        let (i, h, a, b) = Self::locate(bundle, x);
        let ys = bundle.ys();
        let m = &state.second_derivatives;
        Ok((ys[i + 1] - ys[i]) / h - (3.0 * a * a - 1.0) * h * m[i] / 6.0
            + (3.0 * b * b - 1.0) * h * m[i + 1] / 6.0)
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        let Some(state) = self.state(bundle)? else {
            return Ok(vec![1.0]);
        };
        let (i, h, a, b) = Self::locate(bundle, x);
        let ca = (a * a * a - a) * h * h / 6.0;
        let cb = (b * b * b - b) * h * h / 6.0;
        let dm = &state.second_derivative_sensitivities;
        let mut result: Vec<f64> = dm[i]
            .iter()
            .zip(&dm[i + 1])
            .map(|(lo, hi)| ca * lo + cb * hi)
            .collect();
        result[i] += a;
        result[i + 1] += b;
        Ok(result)
    }

    fn node_sensitivities_for_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        let Some(state) = self.state(bundle)? else {
            return Ok(vec![0.0]);
        };
        let (i, h, a, b) = Self::locate(bundle, x);
        let ca = -(3.0 * a * a - 1.0) * h / 6.0;
        let cb = (3.0 * b * b - 1.0) * h / 6.0;
        let dm = &state.second_derivative_sensitivities;
        let mut result: Vec<f64> = dm[i]
            .iter()
            .zip(&dm[i + 1])
            .map(|(lo, hi)| ca * lo + cb * hi)
            .collect();
        result[i] -= 1.0 / h;
        result[i + 1] += 1.0 / h;
        Ok(result)
    }
}
