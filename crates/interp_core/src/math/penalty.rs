//! Difference penalties for regularised fitting on flattened grids.
//!
//! A grid of values with shape `[n₀, n₁, ...]` is flattened row-major (the
//! last axis varies fastest). Operators acting along one axis are embedded
//! into the flattened space as `I_before ⊗ M ⊗ I_after`.

use crate::types::{InterpolationError, InterpolationResult};
use nalgebra::DMatrix;

/// Builds roughness penalty matrices `DᵏᵀDᵏ` and the flattening helpers
/// they are expressed in.
///
/// # Example
///
/// ```
/// use interp_core::math::penalty::PenaltyMatrixGenerator;
/// use nalgebra::DVector;
///
/// let p = PenaltyMatrixGenerator::penalty_matrix(10, 2).unwrap();
/// let v = DVector::from_fn(10, |i, _| 0.4 + 0.4 * i as f64 + (i * i) as f64);
/// assert!(((v.transpose() * &p * &v)[(0, 0)] - 32.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PenaltyMatrixGenerator;

impl PenaltyMatrixGenerator {
    /// `k`-th order difference operator on `m` values, an `(m - k) × m`
    /// matrix. Order zero is the identity.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `order >= size`.
    pub fn difference_matrix(size: usize, order: usize) -> InterpolationResult<DMatrix<f64>> {
        if order >= size {
            return Err(InterpolationError::invalid(format!(
                "difference order {} needs more than {} values",
                order, size
            )));
        }
        let mut d = DMatrix::<f64>::identity(size, size);
        for _ in 0..order {
            let rows = d.nrows() - 1;
            d = DMatrix::from_fn(rows, size, |i, j| d[(i + 1, j)] - d[(i, j)]);
        }
        Ok(d)
    }

    /// Penalty `DᵏᵀDᵏ` on `size` values; `vᵀPv` is the sum of squared
    /// `k`-th differences of `v`.
    pub fn penalty_matrix(size: usize, order: usize) -> InterpolationResult<DMatrix<f64>> {
        let d = Self::difference_matrix(size, order)?;
        Ok(d.tr_mul(&d))
    }

    /// Embeds `matrix`, an operator along `axis`, into the flattened grid
    /// of shape `sizes`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the shape is empty or has a zero extent, `axis` is
    /// out of range, or `matrix` has not `sizes[axis]` columns.
    pub fn matrix_for_flattened(
        sizes: &[usize],
        matrix: &DMatrix<f64>,
        axis: usize,
    ) -> InterpolationResult<DMatrix<f64>> {
        validate_shape(sizes)?;
        if axis >= sizes.len() {
            return Err(InterpolationError::invalid(format!(
                "axis {} out of range for a {}-dimensional grid",
                axis,
                sizes.len()
            )));
        }
        if matrix.ncols() != sizes[axis] {
            return Err(InterpolationError::invalid(format!(
                "operator has {} columns, axis {} has {} points",
                matrix.ncols(),
                axis,
                sizes[axis]
            )));
        }
        let before: usize = sizes[..axis].iter().product();
        let after: usize = sizes[axis + 1..].iter().product();
        let inner = matrix.kronecker(&DMatrix::<f64>::identity(after, after));
        Ok(DMatrix::<f64>::identity(before, before).kronecker(&inner))
    }

    /// Order-`order` penalty along `axis` of the flattened grid `sizes`.
    pub fn penalty_matrix_nd(sizes: &[usize], order: usize, axis: usize) -> InterpolationResult<DMatrix<f64>> {
        validate_shape(sizes)?;
        let size = sizes.get(axis).copied().ok_or_else(|| {
            InterpolationError::invalid(format!(
                "axis {} out of range for a {}-dimensional grid",
                axis,
                sizes.len()
            ))
        })?;
        Self::matrix_for_flattened(sizes, &Self::penalty_matrix(size, order)?, axis)
    }

    /// `Σ wₐ·Pₐ` with `Pₐ` the order-`orders[a]` penalty along axis `a`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `orders` or `weights` differ in length from
    /// `sizes`, or a weight is negative or non-finite.
    pub fn penalty_matrix_nd_weighted(
        sizes: &[usize],
        orders: &[usize],
        weights: &[f64],
    ) -> InterpolationResult<DMatrix<f64>> {
        validate_shape(sizes)?;
        if orders.len() != sizes.len() || weights.len() != sizes.len() {
            return Err(InterpolationError::invalid(format!(
                "{} axes but {} orders and {} weights",
                sizes.len(),
                orders.len(),
                weights.len()
            )));
        }
        if weights.iter().any(|w| !(w.is_finite() && *w >= 0.0)) {
            return Err(InterpolationError::invalid(
                "axis weights must be finite and non-negative",
            ));
        }
        let total: usize = sizes.iter().product();
        let mut penalty = DMatrix::<f64>::zeros(total, total);
        for (axis, (&order, &weight)) in orders.iter().zip(weights).enumerate() {
            if weight == 0.0 {
                continue;
            }
            penalty += Self::penalty_matrix_nd(sizes, order, axis)? * weight;
        }
        Ok(penalty)
    }

    /// Row-major flattening of a rectangular 2-D array.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the rows are ragged.
    pub fn flatten(rows: &[Vec<f64>]) -> InterpolationResult<Vec<f64>> {
        let ncols = rows.first().map_or(0, Vec::len);
        if let Some(i) = rows.iter().position(|r| r.len() != ncols) {
            return Err(InterpolationError::invalid(format!(
                "row {} has {} entries, expected {}",
                i,
                rows[i].len(),
                ncols
            )));
        }
        Ok(rows.concat())
    }

    /// Inverse of [`flatten`](Self::flatten) for `ncols` columns.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `ncols` is zero or does not divide the length.
    pub fn unflatten(flat: &[f64], ncols: usize) -> InterpolationResult<Vec<Vec<f64>>> {
        if ncols == 0 || flat.len() % ncols != 0 {
            return Err(InterpolationError::invalid(format!(
                "cannot split {} values into rows of {}",
                flat.len(),
                ncols
            )));
        }
        Ok(flat.chunks(ncols).map(<[f64]>::to_vec).collect())
    }

    /// Row-major position of `indices` in a grid of shape `sizes`.
    pub fn flat_index(indices: &[usize], sizes: &[usize]) -> InterpolationResult<usize> {
        if indices.len() != sizes.len() {
            return Err(InterpolationError::invalid(format!(
                "{} indices for a {}-dimensional grid",
                indices.len(),
                sizes.len()
            )));
        }
        indices.iter().zip(sizes).try_fold(0, |flat, (&i, &n)| {
            if i >= n {
                Err(InterpolationError::invalid(format!(
                    "index {} out of range for extent {}",
                    i, n
                )))
            } else {
                Ok(flat * n + i)
            }
        })
    }

    /// Grid indices of the row-major position `flat`.
    pub fn unflat_index(flat: usize, sizes: &[usize]) -> InterpolationResult<Vec<usize>> {
        validate_shape(sizes)?;
        let total: usize = sizes.iter().product();
        if flat >= total {
            return Err(InterpolationError::invalid(format!(
                "flat index {} out of range for {} points",
                flat, total
            )));
        }
        let mut rest = flat;
        let mut indices = vec![0; sizes.len()];
        for (slot, &n) in indices.iter_mut().zip(sizes).rev() {
            *slot = rest % n;
            rest /= n;
        }
        Ok(indices)
    }
}

fn validate_shape(sizes: &[usize]) -> InterpolationResult<()> {
    if sizes.is_empty() || sizes.contains(&0) {
        return Err(InterpolationError::invalid(format!(
            "grid shape {:?} is empty",
            sizes
        )));
    }
    Ok(())
}
