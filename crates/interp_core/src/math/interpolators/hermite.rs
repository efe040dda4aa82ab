//! Piecewise cubic Hermite evaluation over cached node slopes.

use super::data_bundle::HermiteSlopes;
use super::Interpolator1DDataBundle;

/// Coefficients of the value and of the first derivative on `(yᵢ, yᵢ₊₁, mᵢ, mᵢ₊₁)`.
pub(crate) struct HermiteBasis {
    pub value: [f64; 4],
    pub slope: [f64; 4],
}

impl HermiteBasis {
    pub fn at(t: f64, h: f64) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        Self {
            value: [
                2.0 * t3 - 3.0 * t2 + 1.0,
                -2.0 * t3 + 3.0 * t2,
                (t3 - 2.0 * t2 + t) * h,
                (t3 - t2) * h,
            ],
            slope: [
                (6.0 * t2 - 6.0 * t) / h,
                (-6.0 * t2 + 6.0 * t) / h,
                3.0 * t2 - 4.0 * t + 1.0,
                3.0 * t2 - 2.0 * t,
            ],
        }
    }
}

/// Interval index and Hermite basis at `x`. Needs at least two nodes.
fn locate(bundle: &Interpolator1DDataBundle, x: f64) -> (usize, HermiteBasis) {
    let xs = bundle.xs();
    let i = bundle.interval_index(x);
    let h = xs[i + 1] - xs[i];
    (i, HermiteBasis::at((x - xs[i]) / h, h))
}

/// Hermite cubic value at `x` inside the data.
pub(crate) fn value(bundle: &Interpolator1DDataBundle, state: &HermiteSlopes, x: f64) -> f64 {
    let (i, basis) = locate(bundle, x);
    let (ys, m) = (bundle.ys(), &state.slopes);
    basis.value[0] * ys[i] + basis.value[1] * ys[i + 1] + basis.value[2] * m[i] + basis.value[3] * m[i + 1]
}

/// Hermite cubic first derivative at `x` inside the data.
pub(crate) fn derivative(bundle: &Interpolator1DDataBundle, state: &HermiteSlopes, x: f64) -> f64 {
    let (i, basis) = locate(bundle, x);
    let (ys, m) = (bundle.ys(), &state.slopes);
    basis.slope[0] * ys[i] + basis.slope[1] * ys[i + 1] + basis.slope[2] * m[i] + basis.slope[3] * m[i + 1]
}

/// Weights on the full node vector for the value and for the derivative at
/// `x`, chaining the slope sensitivities.
pub(crate) fn coefficients(
    bundle: &Interpolator1DDataBundle,
    state: &HermiteSlopes,
    x: f64,
) -> (Vec<f64>, Vec<f64>) {
    let n = bundle.size();
    let mut value = vec![0.0; n];
    let mut slope = vec![0.0; n];
    let (i, basis) = locate(bundle, x);
    value[i] += basis.value[0];
    value[i + 1] += basis.value[1];
    slope[i] += basis.slope[0];
    slope[i + 1] += basis.slope[1];
    for (k, node) in [(2, i), (3, i + 1)] {
        let ds = &state.slope_sensitivities[node];
        for j in 0..n {
            value[j] += basis.value[k] * ds[j];
            slope[j] += basis.slope[k] * ds[j];
        }
    }
    (value, slope)
}

/// Sensitivity of the secant slope `δₖ` to the node values.
pub(crate) fn secant_sensitivity(n: usize, h: &[f64], k: usize) -> Vec<f64> {
    let mut s = vec![0.0; n];
    s[k] = -1.0 / h[k];
    s[k + 1] = 1.0 / h[k];
    s
}
