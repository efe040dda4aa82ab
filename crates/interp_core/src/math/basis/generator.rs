//! B-spline basis generation over knot grids.

use super::{BSplineFunction, TensorBSplineFunction};
use crate::types::{InterpolationError, InterpolationResult};

/// Builds single B-splines, tensor products and complete basis sets.
///
/// A knot sequence of length `m` supports `m - degree - 1` functions of
/// `degree`; function `i` lives on knots `i..=i + degree + 1`. Sets over
/// several axes are ordered row-major, the last axis varying fastest.
///
/// # Example
///
/// ```
/// use interp_core::math::basis::BasisFunctionGenerator;
///
/// // Cubic basis on [0, 1] with 5 interior knots, 3 padding knots per side
/// let set = BasisFunctionGenerator::generate_set_from_range(0.0, 1.0, 5, 3).unwrap();
/// assert_eq!(set.len(), 7);
/// let total: f64 = set.iter().map(|f| f.value(0.3)).sum();
/// assert!((total - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BasisFunctionGenerator;

impl BasisFunctionGenerator {
    /// B-spline `index` of `degree` over `knots`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the knots are non-finite or decreasing, or fewer
    /// than `index + degree + 2` knots are given.
    pub fn generate(knots: &[f64], degree: usize, index: usize) -> InterpolationResult<BSplineFunction> {
        validate_knots(knots)?;
        let needed = index + degree + 2;
        if knots.len() < needed {
            return Err(InterpolationError::invalid(format!(
                "function {} of degree {} needs {} knots, got {}",
                index,
                degree,
                needed,
                knots.len()
            )));
        }
        Ok(BSplineFunction::from_local_knots(
            knots[index..needed].to_vec(),
            degree,
        ))
    }

    /// Tensor product of one B-spline per axis.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the per-axis slices differ in length or any axis
    /// fails [`generate`](Self::generate).
    pub fn generate_nd(
        knots: &[Vec<f64>],
        degrees: &[usize],
        indices: &[usize],
    ) -> InterpolationResult<TensorBSplineFunction> {
        check_axes(knots.len(), degrees.len())?;
        check_axes(knots.len(), indices.len())?;
        let factors = knots
            .iter()
            .zip(degrees)
            .zip(indices)
            .map(|((k, &degree), &index)| Self::generate(k, degree, index))
            .collect::<InterpolationResult<Vec<_>>>()?;
        Ok(TensorBSplineFunction::new(factors))
    }

    /// Every B-spline of `degree` the knots support.
    pub fn generate_set(knots: &[f64], degree: usize) -> InterpolationResult<Vec<BSplineFunction>> {
        let count = set_size(knots, degree)?;
        (0..count).map(|i| Self::generate(knots, degree, i)).collect()
    }

    /// Basis over `[low, high]` with `num_knots` equally spaced knots,
    /// padded by `degree` further knots at each end.
    ///
    /// # Errors
    ///
    /// `InvalidInput` unless `low < high` and `num_knots >= 2`.
    pub fn generate_set_from_range(
        low: f64,
        high: f64,
        num_knots: usize,
        degree: usize,
    ) -> InterpolationResult<Vec<BSplineFunction>> {
        Self::generate_set(&padded_knots(low, high, num_knots, degree)?, degree)
    }

    /// Tensor-product set over per-axis knot sequences.
    pub fn generate_set_nd(
        knots: &[Vec<f64>],
        degrees: &[usize],
    ) -> InterpolationResult<Vec<TensorBSplineFunction>> {
        check_axes(knots.len(), degrees.len())?;
        if knots.is_empty() {
            return Err(InterpolationError::invalid("no axes given"));
        }
        let axis_sets = knots
            .iter()
            .zip(degrees)
            .map(|(k, &degree)| Self::generate_set(k, degree))
            .collect::<InterpolationResult<Vec<_>>>()?;

        let mut products: Vec<Vec<BSplineFunction>> = vec![Vec::new()];
        for set in &axis_sets {
            products = products
                .into_iter()
                .flat_map(|prefix| {
                    set.iter().map(move |f| {
                        let mut next = prefix.clone();
                        next.push(f.clone());
                        next
                    })
                })
                .collect();
        }
        Ok(products.into_iter().map(TensorBSplineFunction::new).collect())
    }

    /// Tensor-product set with equally spaced, padded knots on every axis.
    pub fn generate_set_from_ranges_nd(
        lows: &[f64],
        highs: &[f64],
        num_knots: &[usize],
        degrees: &[usize],
    ) -> InterpolationResult<Vec<TensorBSplineFunction>> {
        check_axes(lows.len(), highs.len())?;
        check_axes(lows.len(), num_knots.len())?;
        check_axes(lows.len(), degrees.len())?;
        let knots = (0..lows.len())
            .map(|axis| padded_knots(lows[axis], highs[axis], num_knots[axis], degrees[axis]))
            .collect::<InterpolationResult<Vec<_>>>()?;
        Self::generate_set_nd(&knots, degrees)
    }
}

fn validate_knots(knots: &[f64]) -> InterpolationResult<()> {
    if knots.iter().any(|k| !k.is_finite()) {
        return Err(InterpolationError::invalid("knots must be finite"));
    }
    if let Some(i) = knots.windows(2).position(|w| w[0] > w[1]) {
        return Err(InterpolationError::invalid(format!(
            "knots must be non-decreasing: knot {} is {} and knot {} is {}",
            i,
            knots[i],
            i + 1,
            knots[i + 1]
        )));
    }
    Ok(())
}

fn set_size(knots: &[f64], degree: usize) -> InterpolationResult<usize> {
    if knots.len() < degree + 2 {
        return Err(InterpolationError::invalid(format!(
            "degree {} needs at least {} knots, got {}",
            degree,
            degree + 2,
            knots.len()
        )));
    }
    Ok(knots.len() - degree - 1)
}

/// `low + (i - degree)·dx` for `i in 0..num_knots + 2·degree`.
fn padded_knots(low: f64, high: f64, num_knots: usize, degree: usize) -> InterpolationResult<Vec<f64>> {
    if !(low.is_finite() && high.is_finite() && low < high) {
        return Err(InterpolationError::invalid(format!(
            "knot range [{}, {}] is empty",
            low, high
        )));
    }
    if num_knots < 2 {
        return Err(InterpolationError::invalid(format!(
            "need at least 2 knots, got {}",
            num_knots
        )));
    }
    let dx = (high - low) / (num_knots - 1) as f64;
    Ok((0..num_knots + 2 * degree)
        .map(|i| low + (i as f64 - degree as f64) * dx)
        .collect())
}

fn check_axes(expected: usize, got: usize) -> InterpolationResult<()> {
    if expected != got {
        return Err(InterpolationError::invalid(format!(
            "per-axis inputs disagree: {} axes against {}",
            expected, got
        )));
    }
    Ok(())
}
