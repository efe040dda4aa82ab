//! Local polynomial interpolation.

use super::{Interpolator1D, Interpolator1DDataBundle};
use crate::types::{InterpolationError, InterpolationResult};

/// Lagrange polynomial through a sliding window of `degree + 1` nodes.
///
/// For a query in interval `i` the window starts at node `i - offset`. A
/// window reaching outside the data is a data-sufficiency problem and
/// reported as [`InterpolationError::InsufficientData`]. Queries on a node
/// return the node value; their derivative comes from the nearest window
/// that fits inside the data.
///
/// Value, derivative and both sensitivity vectors are linear in the node
/// values and computed from the Lagrange basis directly.
///
/// # Example
///
/// ```
/// use interp_core::math::interpolators::{Interpolator1D, PolynomialInterpolator1D};
///
/// let interp = PolynomialInterpolator1D::new(2, 0).unwrap();
/// let bundle = interp.data_bundle(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0]).unwrap();
/// assert!((interp.interpolate(&bundle, 1.5).unwrap() - 2.25).abs() < 1e-12);
/// // The window starting at the last interval runs off the data
/// assert!(interp.interpolate(&bundle, 2.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolynomialInterpolator1D {
    degree: usize,
    offset: usize,
}

impl Default for PolynomialInterpolator1D {
    /// Cubic through the two nodes on either side of the query.
    fn default() -> Self {
        Self {
            degree: 3,
            offset: 1,
        }
    }
}

impl PolynomialInterpolator1D {
    /// Polynomial of `degree` whose window starts `offset` nodes below the
    /// query interval.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `degree` is zero or `offset` exceeds `degree`.
    pub fn new(degree: usize, offset: usize) -> InterpolationResult<Self> {
        if degree == 0 {
            return Err(InterpolationError::invalid("polynomial degree must be at least 1"));
        }
        if offset > degree {
            return Err(InterpolationError::invalid(format!(
                "offset {} exceeds polynomial degree {}",
                offset, degree
            )));
        }
        Ok(Self { degree, offset })
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Window offset below the query interval.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// First node of the window for `x`, shifted inside the data when `x`
    /// is a node the sliding window cannot reach.
    fn window(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<usize> {
        let n = bundle.size();
        let need = self.degree + 1;
        match self.sliding_window(bundle, x) {
            Err(err @ InterpolationError::InsufficientData { .. }) => match bundle.node_index(x) {
                Some(i) if need <= n => Ok(i.saturating_sub(self.offset).min(n - need)),
                _ => Err(err),
            },
            other => other,
        }
    }

    fn sliding_window(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<usize> {
        bundle.check_domain(x)?;
        let n = bundle.size();
        let need = self.degree + 1;
        let interval = if n >= 2 { bundle.interval_index(x) } else { 0 };
        match interval.checked_sub(self.offset) {
            Some(start) if start + need <= n => Ok(start),
            start => {
                let lo = start.unwrap_or(0);
                let hi = (interval + need).saturating_sub(self.offset).min(n);
                Err(InterpolationError::InsufficientData {
                    got: hi.saturating_sub(lo),
                    need,
                })
            }
        }
    }

    /// Lagrange basis values and first derivatives at `x` over `xs`.
    fn basis(xs: &[f64], x: f64) -> (Vec<f64>, Vec<f64>) {
        let m = xs.len();
        let mut values = vec![0.0; m];
        let mut slopes = vec![0.0; m];
        for j in 0..m {
            let denom: f64 = (0..m)
                .filter(|&k| k != j)
                .map(|k| xs[j] - xs[k])
                .product();
            values[j] = (0..m)
                .filter(|&k| k != j)
                .map(|k| x - xs[k])
                .product::<f64>()
                / denom;
            slopes[j] = (0..m)
                .filter(|&l| l != j)
                .map(|l| {
                    (0..m)
                        .filter(|&k| k != j && k != l)
                        .map(|k| x - xs[k])
                        .product::<f64>()
                })
                .sum::<f64>()
                / denom;
        }
        (values, slopes)
    }

    fn local(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<(usize, Vec<f64>, Vec<f64>)> {
        let start = self.window(bundle, x)?;
        let (values, slopes) = Self::basis(&bundle.xs()[start..=start + self.degree], x);
        Ok((start, values, slopes))
    }
}

impl Interpolator1D for PolynomialInterpolator1D {
    fn name(&self) -> &'static str {
        "Polynomial"
    }

    fn interpolate(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        bundle.check_domain(x)?;
        if let Some(i) = bundle.node_index(x) {
            return Ok(bundle.ys()[i]);
        }
        let (start, values, _) = self.local(bundle, x)?;
        Ok(values
            .iter()
            .zip(&bundle.ys()[start..])
            .map(|(l, y)| l * y)
            .sum())
    }

    fn first_derivative(&self, bundle: &Interpolator1DDataBundle, x: f64) -> InterpolationResult<f64> {
        let (start, _, slopes) = self.local(bundle, x)?;
        Ok(slopes
            .iter()
            .zip(&bundle.ys()[start..])
            .map(|(l, y)| l * y)
            .sum())
    }

    fn node_sensitivities_for_value(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        bundle.check_domain(x)?;
        let mut result = vec![0.0; bundle.size()];
        if let Some(i) = bundle.node_index(x) {
            result[i] = 1.0;
            return Ok(result);
        }
        let (start, values, _) = self.local(bundle, x)?;
        result[start..start + values.len()].copy_from_slice(&values);
        Ok(result)
    }

    fn node_sensitivities_for_derivative(
        &self,
        bundle: &Interpolator1DDataBundle,
        x: f64,
    ) -> InterpolationResult<Vec<f64>> {
        let (start, _, slopes) = self.local(bundle, x)?;
        let mut result = vec![0.0; bundle.size()];
        result[start..start + slopes.len()].copy_from_slice(&slopes);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;
    use approx::assert_relative_eq;

    const XS: [f64; 6] = [0.0, 0.4, 1.0, 1.7, 2.5, 3.0];

    fn cubic(x: f64) -> f64 {
        x * x * x - 2.0 * x * x + 0.5
    }

    #[test]
    fn test_rejects_bad_parameters() {
        assert!(PolynomialInterpolator1D::new(0, 0).is_err());
        assert!(PolynomialInterpolator1D::new(2, 3).is_err());
    }

    #[test]
    fn test_reproduces_polynomial_of_same_degree() {
        let ys: Vec<f64> = XS.iter().map(|&x| cubic(x)).collect();
        let interp = PolynomialInterpolator1D::new(3, 1).unwrap();
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        for x in [0.5, 1.2, 2.0] {
            assert_relative_eq!(interp.interpolate(&bundle, x).unwrap(), cubic(x), epsilon = 1e-12);
            assert_relative_eq!(
                interp.first_derivative(&bundle, x).unwrap(),
                3.0 * x * x - 4.0 * x,
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn test_short_window_is_numerical_error() {
        let ys: Vec<f64> = XS.iter().map(|&x| cubic(x)).collect();
        let interp = PolynomialInterpolator1D::new(3, 1).unwrap();
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        // Interval 0 has no node below it
        let err = interp.interpolate(&bundle, 0.2).unwrap_err();
        assert!(matches!(err, InterpolationError::InsufficientData { need: 4, .. }));
        assert_eq!(err.kind(), ErrorKind::Numerical);
        // Interval 4 needs nodes 3..=6
        assert!(interp.interpolate(&bundle, 2.8).is_err());
    }

    #[test]
    fn test_exact_at_every_node() {
        let ys: Vec<f64> = XS.iter().map(|&x| cubic(x)).collect();
        let interp = PolynomialInterpolator1D::default();
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        for (i, (&x, &y)) in XS.iter().zip(&ys).enumerate() {
            assert_eq!(interp.interpolate(&bundle, x).unwrap(), y);
            let sens = interp.node_sensitivities_for_value(&bundle, x).unwrap();
            for (j, s) in sens.iter().enumerate() {
                assert_eq!(*s, if i == j { 1.0 } else { 0.0 });
            }
            // Shifted windows still reproduce the cubic
            assert_relative_eq!(
                interp.first_derivative(&bundle, x).unwrap(),
                3.0 * x * x - 4.0 * x,
                epsilon = 1e-9
            );
        }
        // Too few nodes for any window: node values only
        let short = interp.data_bundle(&[0.0, 1.0, 2.0], &[1.0, 2.0, 0.5]).unwrap();
        assert_eq!(interp.interpolate(&short, 2.0).unwrap(), 0.5);
        assert!(interp.first_derivative(&short, 2.0).is_err());
        assert!(interp.interpolate(&short, 1.5).is_err());
    }

    #[test]
    fn test_end_node_derivative_sensitivities_match_finite_difference() {
        let ys = [1.0, 1.3, 0.8, 1.1, 1.9, 2.2];
        let interp = PolynomialInterpolator1D::default();
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        let h = 1e-6;
        for x in [0.0, 3.0] {
            let analytic = interp.node_sensitivities_for_derivative(&bundle, x).unwrap();
            for (i, a) in analytic.iter().enumerate() {
                let mut up = ys;
                let mut down = ys;
                up[i] += h;
                down[i] -= h;
                let d_up = interp.first_derivative(&interp.data_bundle(&XS, &up).unwrap(), x).unwrap();
                let d_down = interp.first_derivative(&interp.data_bundle(&XS, &down).unwrap(), x).unwrap();
                assert_relative_eq!(*a, (d_up - d_down) / (2.0 * h), epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn test_sensitivities_match_finite_difference() {
        let ys = [1.0, 1.3, 0.8, 1.1, 1.9, 2.2];
        let interp = PolynomialInterpolator1D::new(2, 1).unwrap();
        let bundle = interp.data_bundle(&XS, &ys).unwrap();
        for x in [0.5, 1.2, 2.0, 2.9] {
            let analytic = interp.node_sensitivities_for_value(&bundle, x).unwrap();
            let fd = interp.node_sensitivities(&bundle, x, true).unwrap();
            for (a, b) in analytic.iter().zip(&fd) {
                assert_relative_eq!(a, b, epsilon = 1e-7);
            }
        }
    }
}
