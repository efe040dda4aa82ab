//! Log-linear interpolation with monthly seasonality.

use super::data_bundle::{BundleState, SeasonalSegment};
use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::math::solvers::{BracketRoot, BrentSolver, SolverConfig};
use crate::types::{InterpolationError, InterpolationResult};

/// Number of seasonal periods per node interval.
pub const MONTHS: usize = 12;

/// Initial guess bracket for the monthly growth rate.
const GROWTH_GUESS: (f64, f64) = (-0.01, 0.01);

/// Tolerance on the sum of the seasonal values.
const SEASONAL_SUM_TOLERANCE: f64 = 1e-10;

/// Log-linear interpolation over monthly sub-nodes carrying a fixed
/// seasonal pattern.
///
/// Each node interval `[x₁, x₂]` is cut into twelve equal periods. A common
/// growth rate `g` is solved so that compounding `y₁` by `(1 + g + sⱼ)` over
/// the twelve periods reaches `y₂`, where `s` are the seasonal values
/// (summing to one). The resulting thirteen sub-nodes are then interpolated
/// log-linearly.
///
/// The growth solve runs once per interval when the bundle is built,
/// bracketed from `[-0.01, 0.01]` and refined with Brent's method. A solve
/// that fails fails the bundle construction.
///
/// Node sensitivities are analytic: differentiating the growth equation
/// implicitly gives `∂Vₖ/∂y₁ = Vₖ(1 - rₖ)/y₁` and `∂Vₖ/∂y₂ = Vₖ·rₖ/y₂` for
/// the sub-node values `Vₖ`, with `rₖ = Sₖ/S₁₂` and
/// `Sₖ = Σ_{j<k} 1/(1 + g + sⱼ)`.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{Interpolator1D, LogLinearWithSeasonalityInterpolator1D};
///
/// let interp = LogLinearWithSeasonalityInterpolator1D::new(&[1.0 / 12.0; 11]).unwrap();
/// let bundle = interp.data_bundle(&[0.0, 1.0], &[100.0, 103.0]).unwrap();
/// assert!((interp.interpolate(&bundle, 1.0).unwrap() - 103.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogLinearWithSeasonalityInterpolator1D {
    seasonal_values: [f64; MONTHS],
}

impl Default for LogLinearWithSeasonalityInterpolator1D {
    /// Uniform seasonality, `1/12` every month.
    fn default() -> Self {
        Self {
            seasonal_values: [1.0 / MONTHS as f64; MONTHS],
        }
    }
}

impl LogLinearWithSeasonalityInterpolator1D {
    /// Build from the first eleven monthly factors; the twelfth is
    /// `1 - Σ factors`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless exactly eleven finite factors are given.
    pub fn new(monthly_factors: &[f64]) -> InterpolationResult<Self> {
        if monthly_factors.len() != MONTHS - 1 {
            return Err(InterpolationError::invalid(format!(
                "expected {} monthly factors, got {}",
                MONTHS - 1,
                monthly_factors.len()
            )));
        }
        let mut seasonal_values = [0.0; MONTHS];
        seasonal_values[..MONTHS - 1].copy_from_slice(monthly_factors);
        seasonal_values[MONTHS - 1] = 1.0 - monthly_factors.iter().sum::<f64>();
        Self::from_seasonal_values(seasonal_values)
    }

    /// Build from all twelve seasonal values.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if a value is not finite or the values do not sum to one.
    pub fn from_seasonal_values(seasonal_values: [f64; MONTHS]) -> InterpolationResult<Self> {
        if seasonal_values.iter().any(|s| !s.is_finite()) {
            return Err(InterpolationError::invalid("seasonal values must be finite"));
        }
        let sum: f64 = seasonal_values.iter().sum();
        if (sum - 1.0).abs() > SEASONAL_SUM_TOLERANCE {
            return Err(InterpolationError::invalid(format!(
                "seasonal values must sum to 1, got {}",
                sum
            )));
        }
        Ok(Self { seasonal_values })
    }

    /// The twelve seasonal values.
    pub fn seasonal_values(&self) -> &[f64; MONTHS] {
        &self.seasonal_values
    }

    /// `y₁·Π_{j<12}(1 + g + sⱼ)`.
    fn compound(&self, start: f64, growth: f64) -> f64 {
        self.seasonal_values
            .iter()
            .fold(start, |acc, s| acc * (1.0 + growth + s))
    }

    /// Solve the monthly growth carrying `y1` to `y2`.
    fn solve_growth(&self, y1: f64, y2: f64) -> InterpolationResult<f64> {
        let f = |g: f64| self.compound(y1, g) - y2;
        let solved = BracketRoot::default()
            .bracket(f, GROWTH_GUESS.0, GROWTH_GUESS.1)
            .and_then(|(a, b)| BrentSolver::new(SolverConfig::high_precision()).find_root(f, a, b));
        match solved {
            Ok(g) => Ok(g),
            Err(err) => {
                tracing::warn!(y1, y2, error = %err, "seasonal growth solve failed");
                Err(err.into())
            }
        }
    }

    fn segment(&self, x1: f64, x2: f64, y1: f64, y2: f64) -> InterpolationResult<SeasonalSegment> {
        let growth = self.solve_growth(y1, y2)?;
        let step = (x2 - x1) / MONTHS as f64;
        let mut xs = Vec::with_capacity(MONTHS + 1);
        let mut values = Vec::with_capacity(MONTHS + 1);
        xs.push(x1);
        values.push(y1);
        for (k, s) in self.seasonal_values.iter().enumerate() {
            xs.push(x1 + (k + 1) as f64 * step);
            values.push(values[k] * (1.0 + growth + s));
        }
        // Land exactly on the node
        xs[MONTHS] = x2;
        if values.iter().any(|&v| v <= 0.0 || !v.is_finite()) {
            return Err(InterpolationError::Numerical(format!(
                "seasonal growth {} drives sub-node values non-positive on [{}, {}]",
                growth, x1, x2
            )));
        }
        values[MONTHS] = y2;
        Ok(SeasonalSegment { growth, xs, values })
    }

    /// `rₖ = Sₖ / S₁₂` for every sub-node.
    fn growth_shares(&self, growth: f64) -> [f64; MONTHS + 1] {
        let mut partial = [0.0; MONTHS + 1];
        for (k, s) in self.seasonal_values.iter().enumerate() {
            partial[k + 1] = partial[k] + 1.0 / (1.0 + growth + s);
        }
        let total = partial[MONTHS];
        partial.map(|p| p / total)
    }

    fn segments<'a>(
        &self,
        bundle: &'a Interpolator1DDataBundle,
    ) -> InterpolationResult<&'a [SeasonalSegment]> {
        match bundle.state() {
            BundleState::Seasonal(segments) => Ok(segments.as_slice()),
            BundleState::Plain if bundle.size() == 1 => Ok(&[]),
            _ => Err(InterpolationError::invalid(
                "data bundle was not built by a seasonal interpolator",
            )),
        }
    }

    /// Node interval, sub-node index, blend weight and value at `x`.
    fn locate<'a>(
        &self,
        bundle: &'a Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Option<(usize, &'a SeasonalSegment, usize, f64, f64)>> {
        bundle.check_domain(x)?;
        let segments = self.segments(bundle)?;
        if segments.is_empty() {
            return Ok(None);
        }
        let i = bundle.interval_index(x);
        let segment = &segments[i];
        let k = segment
            .xs
            .partition_point(|&xk| xk <= x)
            .saturating_sub(1)
            .min(MONTHS - 1);
        let (x0, x1) = (segment.xs[k], segment.xs[k + 1]);
        let t = (x - x0) / (x1 - x0);
        let (l0, l1) = (segment.values[k].ln(), segment.values[k + 1].ln());
        Ok(Some((i, segment, k, t, (l0 + (l1 - l0) * t).exp())))
    }
}

impl Interpolator1D for LogLinearWithSeasonalityInterpolator1D {
    fn name(&self) -> &'static str {
        "LogLinearWithSeasonality"
    }

    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        bundle.require_positive_ys("seasonal log-linear")?;
        if bundle.size() == 1 {
            return Ok(bundle);
        }
        let (xs, ys) = (bundle.xs(), bundle.ys());
        let segments = (0..xs.len() - 1)
            .map(|i| self.segment(xs[i], xs[i + 1], ys[i], ys[i + 1]))
            .collect::<InterpolationResult<Vec<_>>>()?;
        tracing::debug!(
            nodes = xs.len(),
            growth = ?segments.iter().map(|s| s.growth).collect::<Vec<_>>(),
            "built seasonal data bundle"
        );
        Ok(bundle.with_state(BundleState::Seasonal(segments)))
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        Ok(match self.locate(bundle, x)? {
            Some((_, _, _, _, value)) => value,
            None => bundle.first_y(),
        })
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        Ok(match self.locate(bundle, x)? {
            Some((_, segment, k, _, value)) => {
                let h = segment.xs[k + 1] - segment.xs[k];
                value * (segment.values[k + 1].ln() - segment.values[k].ln()) / h
            }
            None => 0.0,
        })
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        let mut result = vec![0.0; bundle.size()];
        match self.locate(bundle, x)? {
            Some((i, segment, k, t, value)) => {
                let r = self.growth_shares(segment.growth);
                let ys = bundle.ys();
                let share = (1.0 - t) * r[k] + t * r[k + 1];
                result[i] = value * (1.0 - share) / ys[i];
                result[i + 1] = value * share / ys[i + 1];
            }
            None => result[0] = 1.0,
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seasonal() -> LogLinearWithSeasonalityInterpolator1D {
        LogLinearWithSeasonalityInterpolator1D::new(&[
            0.10, 0.05, 0.12, 0.08, 0.07, 0.09, 0.06, 0.08, 0.10, 0.07, 0.09,
        ])
        .unwrap()
    }

    const XS: [f64; 4] = [0.0, 1.0, 2.0, 3.5];
    const YS: [f64; 4] = [100.0, 101.5, 104.0, 107.2];

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_twelfth_value_completes_sum() {
        let interp = seasonal();
        let sum: f64 = interp.seasonal_values().iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-14);
        assert_relative_eq!(interp.seasonal_values()[11], 0.09, epsilon = 1e-14);
    }

    #[test]
    fn test_rejects_bad_factors() {
        assert!(LogLinearWithSeasonalityInterpolator1D::new(&[0.1; 12]).is_err());
        assert!(LogLinearWithSeasonalityInterpolator1D::from_seasonal_values([0.1; 12]).is_err());
        assert!(seasonal().data_bundle(&[0.0, 1.0], &[1.0, -1.0]).is_err());
    }

    #[test]
    fn test_growth_reaches_next_node() {
        let interp = seasonal();
        let growth = interp.solve_growth(100.0, 101.5).unwrap();
        assert_relative_eq!(interp.compound(100.0, growth), 101.5, epsilon = 1e-10);
    }

    // ========================================
    // Evaluation Tests
    // ========================================

    #[test]
    fn test_exact_at_nodes() {
        let interp = seasonal();
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        for (x, y) in XS.iter().zip(YS) {
            assert_relative_eq!(interp.interpolate(&bundle, *x).unwrap(), y, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_seasonal_pattern_shows_within_interval() {
        let interp = seasonal();
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        let month = 1.0 / 12.0;
        let growth = |k: f64| {
            interp.interpolate(&bundle, (k + 1.0) * month).unwrap()
                / interp.interpolate(&bundle, k * month).unwrap()
        };
        // Months 1 and 2 carry factors 0.10 and 0.05
        assert_relative_eq!(growth(0.0) - growth(1.0), 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let interp = seasonal();
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        let h = 1e-7;
        for x in [0.33, 1.71, 3.02] {
            let fd = (interp.interpolate(&bundle, x + h).unwrap()
                - interp.interpolate(&bundle, x - h).unwrap())
                / (2.0 * h);
            assert_relative_eq!(
                interp.first_derivative(&bundle, x).unwrap(),
                fd,
                max_relative = 1e-6
            );
        }
    }

    #[test]
    fn test_sensitivities_match_finite_difference() {
        let interp = seasonal();
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        for x in [0.0, 0.33, 1.71, 3.02, 3.5] {
            let analytic = interp.node_sensitivities_for_value(&bundle, x).unwrap();
            let fd = interp.node_sensitivities(&bundle, x, true).unwrap();
            for (a, b) in analytic.iter().zip(&fd) {
                assert_relative_eq!(a, b, epsilon = 1e-6);
            }
        }
    }
}
