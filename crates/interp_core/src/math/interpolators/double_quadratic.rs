//! Double-quadratic interpolation.

use super::data_bundle::{BundleState, QuadraticWeights};
use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::{InterpolationError, InterpolationResult};

/// Blend of the two quadratics through the neighbouring node triples.
///
/// Around every interior node `i` a quadratic `qᵢ(t) = yᵢ + b·t + c·t²`
/// passes through nodes `i-1, i, i+1`. An interior interval blends the
/// quadratics of its two end nodes with the linear weight
/// `w = (xᵢ₊₁ - x)/h`; the first and last intervals use the single
/// quadratic available to them.
///
/// With one node the interpolant is constant and with two it is linear.
///
/// Every quantity is linear in the node values. The bundle stores `b` and
/// `c` as weights on `(yᵢ₋₁, yᵢ, yᵢ₊₁)`, which makes value, derivative and
/// both sensitivity vectors a dot product with the same sparse weights.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct DoubleQuadraticInterpolator1D;

/// Sparse coefficients on node values: `(node index, weight)`.
type NodeWeights = Vec<(usize, f64)>;

impl DoubleQuadraticInterpolator1D {
    fn weights<'a>(
        &self,
        bundle: &'a Interpolator1DDataBundle,
    ) -> InterpolationResult<&'a [QuadraticWeights]> {
        match bundle.state() {
            BundleState::DoubleQuadratic(weights) => Ok(weights.as_slice()),
            BundleState::Plain if bundle.size() <= 2 => Ok(&[]),
            _ => Err(InterpolationError::invalid(
                "data bundle was not built by a double-quadratic interpolator",
            )),
        }
    }

    /// Value and derivative coefficients of the quadratic centred on
    /// interior `node`, evaluated at offset `t`.
    fn quadratic(quadratics: &[QuadraticWeights], node: usize, t: f64) -> ([f64; 3], [f64; 3]) {
        let q = &quadratics[node - 1];
        let mut value = [0.0; 3];
        let mut slope = [0.0; 3];
        for k in 0..3 {
            value[k] = q.b[k] * t + q.c[k] * t * t;
            slope[k] = q.b[k] + 2.0 * q.c[k] * t;
        }
        value[1] += 1.0;
        (value, slope)
    }

    /// Coefficients of the value and of the first derivative at `x`.
    fn coefficients(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<(NodeWeights, NodeWeights)> {
        bundle.check_domain(x)?;
        let quadratics = self.weights(bundle)?;
        let n = bundle.size();
        let xs = bundle.xs();

        if n == 1 {
            return Ok((vec![(0, 1.0)], vec![(0, 0.0)]));
        }
        let i = bundle.interval_index(x);
        let h = xs[i + 1] - xs[i];
        if n == 2 {
            let t = (x - xs[0]) / h;
            return Ok((vec![(0, 1.0 - t), (1, t)], vec![(0, -1.0 / h), (1, 1.0 / h)]));
        }

        let single = |node: usize| -> (NodeWeights, NodeWeights) {
            let (value, slope) = Self::quadratic(quadratics, node, x - xs[node]);
            let nodes = [node - 1, node, node + 1];
            (
                nodes.iter().copied().zip(value).collect(),
                nodes.iter().copied().zip(slope).collect(),
            )
        };

        if i == 0 {
            return Ok(single(1));
        }
        if i == n - 2 {
            return Ok(single(n - 2));
        }

        let w = (xs[i + 1] - x) / h;
        let (lv, ls) = Self::quadratic(quadratics, i, x - xs[i]);
        let (rv, rs) = Self::quadratic(quadratics, i + 1, x - xs[i + 1]);
        let mut value = Vec::with_capacity(6);
        let mut slope = Vec::with_capacity(6);
        for k in 0..3 {
            value.push((i - 1 + k, w * lv[k]));
            value.push((i + k, (1.0 - w) * rv[k]));
            // d/dx [w·qₗ + (1 - w)·qᵣ] with dw/dx = -1/h
            slope.push((i - 1 + k, w * ls[k] - lv[k] / h));
            slope.push((i + k, (1.0 - w) * rs[k] + rv[k] / h));
        }
        Ok((value, slope))
    }

    fn apply(weights: &[(usize, f64)], ys: &[f64]) -> f64 {
        weights.iter().map(|&(j, w)| w * ys[j]).sum()
    }

    fn scatter(weights: &[(usize, f64)], n: usize) -> Vec<f64> {
        let mut result = vec![0.0; n];
        for &(j, w) in weights {
            result[j] += w;
        }
        result
    }
}

impl Interpolator1D for DoubleQuadraticInterpolator1D {
    fn name(&self) -> &'static str {
        "DoubleQuadratic"
    }

    fn prepare(
        &self,
        bundle: Interpolator1DDataBundle,
    ) -> InterpolationResult<Interpolator1DDataBundle> {
        if bundle.size() <= 2 {
            return Ok(bundle);
        }
        let xs = bundle.xs();
        let quadratics = (1..xs.len() - 1)
            .map(|i| {
                let dx1 = xs[i] - xs[i - 1];
                let dx2 = xs[i + 1] - xs[i];
                let s = dx1 + dx2;
                QuadraticWeights {
                    b: [
                        -dx2 / (dx1 * s),
                        (dx2 / dx1 - dx1 / dx2) / s,
                        dx1 / (dx2 * s),
                    ],
                    c: [
                        1.0 / (dx1 * s),
                        -(1.0 / dx1 + 1.0 / dx2) / s,
                        1.0 / (dx2 * s),
                    ],
                }
            })
            .collect();
        Ok(bundle.with_state(BundleState::DoubleQuadratic(quadratics)))
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (value, _) = self.coefficients(bundle, x)?;
        Ok(Self::apply(&value, bundle.ys()))
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (_, slope) = self.coefficients(bundle, x)?;
        Ok(Self::apply(&slope, bundle.ys()))
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        let (value, _) = self.coefficients(bundle, x)?;
        Ok(Self::scatter(&value, bundle.size()))
    }

    fn node_sensitivities_for_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        let (_, slope) = self.coefficients(bundle, x)?;
        Ok(Self::scatter(&slope, bundle.size()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const XS: [f64; 6] = [0.0, 0.5, 1.1, 2.0, 2.4, 3.5];
    const YS: [f64; 6] = [2.0, 1.4, 1.9, 3.3, 2.8, 4.0];

    #[test]
    fn test_exact_at_nodes() {
        let interp = DoubleQuadraticInterpolator1D;
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        for (x, y) in XS.iter().zip(YS) {
            assert_relative_eq!(interp.interpolate(&bundle, *x).unwrap(), y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reproduces_quadratic() {
        let f = |x: f64| 0.5 * x * x - x + 3.0;
        let ys: Vec<f64> = XS.iter().map(|&x| f(x)).collect();
        let interp = DoubleQuadraticInterpolator1D;
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        for x in [0.2, 0.8, 1.6, 2.2, 3.0] {
            assert_relative_eq!(interp.interpolate(&bundle, x).unwrap(), f(x), epsilon = 1e-12);
            assert_relative_eq!(interp.first_derivative(&bundle, x).unwrap(), x - 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_small_bundles() {
        let interp = DoubleQuadraticInterpolator1D;
        let one = interp.data_bundle(&[1.0], &[2.0]).unwrap();
        assert_eq!(interp.interpolate(&one, 1.0).unwrap(), 2.0);
        let two = interp.data_bundle(&[1.0, 2.0], &[2.0, 4.0]).unwrap();
        assert_relative_eq!(interp.interpolate(&two, 1.25).unwrap(), 2.5);
        assert_relative_eq!(interp.first_derivative(&two, 1.25).unwrap(), 2.0);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let interp = DoubleQuadraticInterpolator1D;
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        let h = 1e-6;
        for x in [0.3, 0.9, 1.5, 2.2, 3.1] {
            let fd = (interp.interpolate(&bundle, x + h).unwrap()
                - interp.interpolate(&bundle, x - h).unwrap())
                / (2.0 * h);
            assert_relative_eq!(interp.first_derivative(&bundle, x).unwrap(), fd, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_sensitivities_match_finite_difference() {
        let interp = DoubleQuadraticInterpolator1D;
        let bundle = interp.data_bundle(&XS, &YS).unwrap();
        for x in [0.0, 0.3, 1.5, 2.2, 3.5] {
            let analytic = interp.node_sensitivities_for_value(&bundle, x).unwrap();
            let fd = interp.node_sensitivities(&bundle, x, true).unwrap();
            for (a, b) in analytic.iter().zip(&fd) {
                assert_relative_eq!(a, b, epsilon = 1e-7);
            }
            assert_relative_eq!(analytic.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
        }
    }
}
