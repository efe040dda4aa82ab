//! Weighted sums of basis functions.

use super::BasisFunction;
use crate::types::{InterpolationError, InterpolationResult};

/// `f(x) = Σ wᵢ·bᵢ(x)` over a fixed set of basis functions.
///
/// The weights are checked against the set when the aggregation is
/// built, so evaluation never sees a length mismatch.
#[derive(Debug, Clone, PartialEq)]
pub struct BasisFunctionAggregation<F: BasisFunction> {
    functions: Vec<F>,
    weights: Vec<f64>,
}

impl<F: BasisFunction> BasisFunctionAggregation<F> {
    /// Pair `functions` with `weights`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the lengths differ, the set is empty, a weight is
    /// non-finite, or the functions disagree on dimension.
    pub fn new(functions: Vec<F>, weights: Vec<f64>) -> InterpolationResult<Self> {
        if functions.len() != weights.len() {
            return Err(InterpolationError::invalid(format!(
                "{} basis functions but {} weights",
                functions.len(),
                weights.len()
            )));
        }
        let Some(first) = functions.first() else {
            return Err(InterpolationError::invalid("no basis functions given"));
        };
        let dimension = first.dimension();
        if functions.iter().any(|f| f.dimension() != dimension) {
            return Err(InterpolationError::invalid(
                "basis functions disagree on dimension",
            ));
        }
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(InterpolationError::invalid("weights must be finite"));
        }
        Ok(Self { functions, weights })
    }

    /// The basis set.
    pub fn functions(&self) -> &[F] {
        &self.functions
    }

    /// One weight per function.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Dimension shared by every function.
    pub fn dimension(&self) -> usize {
        self.functions[0].dimension()
    }

    /// Weighted sum at `point`.
    pub fn evaluate(&self, point: &[f64]) -> InterpolationResult<f64> {
        let mut total = 0.0;
        for (f, w) in self.functions.iter().zip(&self.weights) {
            total += w * f.evaluate(point)?;
        }
        Ok(total)
    }

    /// `∂f(point)/∂wᵢ`, which is just each basis value.
    pub fn weight_sensitivities(&self, point: &[f64]) -> InterpolationResult<Vec<f64>> {
        self.functions.iter().map(|f| f.evaluate(point)).collect()
    }

    /// Gradient of the weighted sum at `point`.
    pub fn gradient(&self, point: &[f64]) -> InterpolationResult<Vec<f64>> {
        let mut total = vec![0.0; self.dimension()];
        for (f, w) in self.functions.iter().zip(&self.weights) {
            for (t, g) in total.iter_mut().zip(f.gradient(point)?) {
                *t += w * g;
            }
        }
        Ok(total)
    }
}
