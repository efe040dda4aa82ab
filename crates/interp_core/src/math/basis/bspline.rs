//! B-spline basis functions.

use super::BasisFunction;
use crate::types::{InterpolationError, InterpolationResult};

/// One B-spline of `degree` over `degree + 2` consecutive knots.
///
/// Evaluated with the Cox–de Boor recursion. The degree-0 building blocks
/// are half-open indicators of `[tⱼ, tⱼ₊₁)`, so every function vanishes at
/// its last knot. Terms with a zero knot span are dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct BSplineFunction {
    knots: Vec<f64>,
    degree: usize,
}

impl BSplineFunction {
    /// Function supported on `knots`, which must hold exactly
    /// `degree + 2` non-decreasing values.
    pub(crate) fn from_local_knots(knots: Vec<f64>, degree: usize) -> Self {
        debug_assert_eq!(knots.len(), degree + 2);
        Self { knots, degree }
    }

    /// Polynomial degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// The `degree + 2` knots spanning the support.
    pub fn knots(&self) -> &[f64] {
        &self.knots
    }

    /// `[first knot, last knot]`.
    pub fn support(&self) -> (f64, f64) {
        (self.knots[0], self.knots[self.degree + 1])
    }

    /// Values at `x` of the local B-splines of degree `target`, built up
    /// from the degree-0 indicators.
    fn local_table(&self, x: f64, target: usize) -> Vec<f64> {
        let t = &self.knots;
        let mut n: Vec<f64> = (0..=self.degree)
            .map(|j| if t[j] <= x && x < t[j + 1] { 1.0 } else { 0.0 })
            .collect();
        for p in 1..=target {
            for j in 0..=self.degree - p {
                let left = ratio(x - t[j], t[j + p] - t[j]) * n[j];
                let right = ratio(t[j + p + 1] - x, t[j + p + 1] - t[j + 1]) * n[j + 1];
                n[j] = left + right;
            }
        }
        n.truncate(self.degree - target + 1);
        n
    }

    /// Value at `x`.
    pub fn value(&self, x: f64) -> f64 {
        self.local_table(x, self.degree)[0]
    }

    /// First derivative at `x`.
    ///
    /// ```text
    /// N'ⱼ,ₚ = p/(tⱼ₊ₚ - tⱼ)·Nⱼ,ₚ₋₁ - p/(tⱼ₊ₚ₊₁ - tⱼ₊₁)·Nⱼ₊₁,ₚ₋₁
    /// ```
    pub fn derivative(&self, x: f64) -> f64 {
        let p = self.degree;
        if p == 0 {
            return 0.0;
        }
        let t = &self.knots;
        let lower = self.local_table(x, p - 1);
        let pf = p as f64;
        ratio(pf, t[p] - t[0]) * lower[0] - ratio(pf, t[p + 1] - t[1]) * lower[1]
    }
}

/// `a / b`, taken as zero when the knot span `b` is zero.
#[inline]
fn ratio(a: f64, b: f64) -> f64 {
    if b == 0.0 {
        0.0
    } else {
        a / b
    }
}

fn require_dimension(point: &[f64], dimension: usize) -> InterpolationResult<()> {
    if point.len() != dimension {
        return Err(InterpolationError::invalid(format!(
            "point has dimension {}, basis function has dimension {}",
            point.len(),
            dimension
        )));
    }
    Ok(())
}

impl BasisFunction for BSplineFunction {
    fn dimension(&self) -> usize {
        1
    }

    fn evaluate(&self, point: &[f64]) -> InterpolationResult<f64> {
        require_dimension(point, 1)?;
        Ok(self.value(point[0]))
    }

    fn gradient(&self, point: &[f64]) -> InterpolationResult<Vec<f64>> {
        require_dimension(point, 1)?;
        Ok(vec![self.derivative(point[0])])
    }
}

/// Product of independent one-dimensional B-splines, one per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct TensorBSplineFunction {
    factors: Vec<BSplineFunction>,
}

impl TensorBSplineFunction {
    pub(crate) fn new(factors: Vec<BSplineFunction>) -> Self {
        Self { factors }
    }

    /// Per-axis factors.
    pub fn factors(&self) -> &[BSplineFunction] {
        &self.factors
    }
}

impl BasisFunction for TensorBSplineFunction {
    fn dimension(&self) -> usize {
        self.factors.len()
    }

    fn evaluate(&self, point: &[f64]) -> InterpolationResult<f64> {
        require_dimension(point, self.dimension())?;
        Ok(self
            .factors
            .iter()
            .zip(point)
            .map(|(f, &x)| f.value(x))
            .product())
    }

    fn gradient(&self, point: &[f64]) -> InterpolationResult<Vec<f64>> {
        require_dimension(point, self.dimension())?;
        let values: Vec<f64> = self.factors.iter().zip(point).map(|(f, &x)| f.value(x)).collect();
        Ok((0..self.factors.len())
            .map(|axis| {
                self.factors[axis].derivative(point[axis])
                    * values
                        .iter()
                        .enumerate()
                        .filter(|&(k, _)| k != axis)
                        .map(|(_, v)| v)
                        .product::<f64>()
            })
            .collect())
    }
}
