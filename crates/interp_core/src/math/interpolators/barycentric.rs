//! Floater–Hormann barycentric rational interpolation.

use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::{InterpolationError, InterpolationResult};

/// Barycentric rational interpolant of Floater and Hormann.
///
/// Blends every local polynomial of `degree` over consecutive node windows.
/// The result has no real poles for any node set and reproduces
/// polynomials of `degree`. Node weights are
///
/// ```text
/// wₖ = (-1)^(k-d) Σ_{i ∈ Jₖ} Π_{j=i..i+d, j≠k} 1 / (xₖ - xⱼ)
/// ```
///
/// with `Jₖ = { i : max(0, k-d) ≤ i ≤ min(k, n-1-d) }`.
///
/// Value, derivative and both sensitivity vectors are analytic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarycentricRationalFunctionInterpolator1D {
    degree: usize,
}

impl Default for BarycentricRationalFunctionInterpolator1D {
    /// Blends local cubics.
    fn default() -> Self {
        Self { degree: 3 }
    }
}

impl BarycentricRationalFunctionInterpolator1D {
    /// Interpolator blending local polynomials of `degree`.
    pub fn new(degree: usize) -> Self {
        Self { degree }
    }

    /// Degree of the blended local polynomials.
    pub fn degree(&self) -> usize {
        self.degree
    }

    fn weights(&self, xs: &[f64]) -> InterpolationResult<Vec<f64>> {
        let n = xs.len();
        let d = self.degree;
        if n < d + 1 {
            return Err(InterpolationError::InsufficientData { got: n, need: d + 1 });
        }
        Ok((0..n)
            .map(|k| {
                let sign = if (k + d) % 2 == 0 { 1.0 } else { -1.0 };
                let lo = k.saturating_sub(d);
                let hi = k.min(n - 1 - d);
                let sum: f64 = (lo..=hi)
                    .map(|i| {
                        (i..=i + d)
                            .filter(|&j| j != k)
                            .map(|j| 1.0 / (xs[k] - xs[j]))
                            .product::<f64>()
                    })
                    .sum();
                sign * sum
            })
            .collect())
    }

    /// Value and derivative coefficients on the node values at `x`.
    fn coefficients(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<(Vec<f64>, Vec<f64>)> {
        bundle.check_domain(x)?;
        let xs = bundle.xs();
        let n = xs.len();
        let w = self.weights(xs)?;
        let mut value = vec![0.0; n];
        let mut slope = vec![0.0; n];

        if let Some(i) = bundle.node_index(x) {
            // r'(xᵢ) = -(1/wᵢ) Σ_{k≠i} wₖ (yᵢ - yₖ) / (xᵢ - xₖ)
            value[i] = 1.0;
            for k in (0..n).filter(|&k| k != i) {
                let c = w[k] / (w[i] * (xs[i] - xs[k]));
                slope[i] -= c;
                slope[k] += c;
            }
            return Ok((value, slope));
        }

        let a: Vec<f64> = (0..n).map(|k| w[k] / (x - xs[k])).collect();
        let denominator: f64 = a.iter().sum();
        if denominator == 0.0 || !denominator.is_finite() {
            return Err(InterpolationError::Numerical(format!(
                "barycentric denominator vanished at {}",
                x
            )));
        }
        for k in 0..n {
            value[k] = a[k] / denominator;
        }
        // r'(x) = Σₖ aₖ (r - yₖ) / ((x - xₖ) D), with r = Σ value·y
        let s: f64 = (0..n).map(|k| a[k] / (x - xs[k])).sum::<f64>() / denominator;
        for k in 0..n {
            slope[k] = value[k] * s - a[k] / ((x - xs[k]) * denominator);
        }
        Ok((value, slope))
    }

    fn dot(coefficients: &[f64], ys: &[f64]) -> f64 {
        coefficients.iter().zip(ys).map(|(c, y)| c * y).sum()
    }
}

impl Interpolator1D for BarycentricRationalFunctionInterpolator1D {
    fn name(&self) -> &'static str {
        "BarycentricRationalFunction"
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (value, _) = self.coefficients(bundle, x)?;
        Ok(Self::dot(&value, bundle.ys()))
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (_, slope) = self.coefficients(bundle, x)?;
        Ok(Self::dot(&slope, bundle.ys()))
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        Ok(self.coefficients(bundle, x)?.0)
    }

    fn node_sensitivities_for_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        Ok(self.coefficients(bundle, x)?.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const XS: [f64; 7] = [0.0, 0.3, 0.9, 1.4, 2.0, 2.2, 3.0];

    #[test]
    fn test_reproduces_polynomial_of_degree() {
        let f = |x: f64| 2.0 * x * x - x + 1.0;
        let ys: Vec<f64> = XS.iter().map(|&x| f(x)).collect();
        let interp = BarycentricRationalFunctionInterpolator1D::new(2);
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        for x in [0.1, 0.9, 1.7, 2.9] {
            assert_relative_eq!(interp.interpolate(&bundle, x).unwrap(), f(x), epsilon = 1e-11);
            assert_relative_eq!(
                interp.first_derivative(&bundle, x).unwrap(),
                4.0 * x - 1.0,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let ys = [1.0, 0.4, 0.9, 2.0, 1.1, 1.3, 0.2];
        let interp = BarycentricRationalFunctionInterpolator1D::new(3);
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        let h = 1e-6;
        for x in [0.5, 1.4, 2.1] {
            let fd = (interp.interpolate(&bundle, x + h).unwrap()
                - interp.interpolate(&bundle, x - h).unwrap())
                / (2.0 * h);
            assert_relative_eq!(interp.first_derivative(&bundle, x).unwrap(), fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_sensitivities_match_finite_difference() {
        let ys = [1.0, 0.4, 0.9, 2.0, 1.1, 1.3, 0.2];
        let interp = BarycentricRationalFunctionInterpolator1D::new(1);
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        for x in [0.0, 0.5, 1.4, 2.1, 3.0] {
            let analytic = interp.node_sensitivities_for_value(&bundle, x).unwrap();
            let fd = interp.node_sensitivities(&bundle, x, true).unwrap();
            for (a, b) in analytic.iter().zip(&fd) {
                assert_relative_eq!(a, b, epsilon = 1e-7);
            }
        }
    }

    #[test]
    fn test_insufficient_nodes() {
        let interp = BarycentricRationalFunctionInterpolator1D::new(3);
        let bundle = interp.data_bundle(&[0.0, 1.0, 2.0], &[1.0, 2.0, 0.0]).unwrap();
        assert!(matches!(
            interp.interpolate(&bundle, 0.5),
            Err(InterpolationError::InsufficientData { got: 3, need: 4 })
        ));
    }
}
