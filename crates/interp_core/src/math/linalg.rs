//! Linear-algebra collaborator.
//!
//! Dense work goes through `nalgebra` (`DMatrix` with LU
//! decomposition); tridiagonal systems from spline construction use the
//! Thomas algorithm directly.

use crate::types::SolverError;
use nalgebra::DMatrix;

/// Smallest pivot magnitude accepted before a system is declared singular.
const PIVOT_FLOOR: f64 = 1e-300;

/// Solve a tridiagonal system with the Thomas algorithm.
///
/// `sub[i]` multiplies `x[i - 1]` in row `i` (so `sub[0]` is ignored) and
/// `sup[i]` multiplies `x[i + 1]` (so `sup[n - 1]` is ignored).
///
/// # Errors
///
/// `SolverError::NumericalInstability` on mismatched band lengths and
/// `SolverError::SingularMatrix` on a vanishing pivot.
///
/// # Example
///
/// ```
/// use interp_core::math::linalg::solve_tridiagonal;
///
/// // [2 1 0; 1 2 1; 0 1 2] x = [3, 4, 3]
/// let x = solve_tridiagonal(&[0.0, 1.0, 1.0], &[2.0, 2.0, 2.0], &[1.0, 1.0, 0.0], &[3.0, 4.0, 3.0]).unwrap();
/// for xi in x {
///     assert!((xi - 1.0).abs() < 1e-12);
/// }
/// ```
pub fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, SolverError> {
    let n = diag.len();
    if sub.len() != n || sup.len() != n || rhs.len() != n {
        return Err(SolverError::NumericalInstability(format!(
            "tridiagonal bands must all have length {}",
            n
        )));
    }
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut c_prime = vec![0.0; n];
    let mut d_prime = vec![0.0; n];

    if diag[0].abs() < PIVOT_FLOOR {
        return Err(SolverError::SingularMatrix { size: n });
    }
    c_prime[0] = sup[0] / diag[0];
    d_prime[0] = rhs[0] / diag[0];

    // Forward elimination
    for i in 1..n {
        let denom = diag[i] - sub[i] * c_prime[i - 1];
        if denom.abs() < PIVOT_FLOOR {
            return Err(SolverError::SingularMatrix { size: n });
        }
        c_prime[i] = if i + 1 < n { sup[i] / denom } else { 0.0 };
        d_prime[i] = (rhs[i] - sub[i] * d_prime[i - 1]) / denom;
    }

    // Back substitution
    let mut x = d_prime;
    for i in (0..n - 1).rev() {
        x[i] -= c_prime[i] * x[i + 1];
    }
    Ok(x)
}

/// Invert a dense square matrix by LU decomposition.
///
/// # Errors
///
/// `SolverError::SingularMatrix` if the matrix is singular to working
/// precision.
pub fn invert_dense(a: &DMatrix<f64>) -> Result<DMatrix<f64>, SolverError> {
    let size = a.nrows();
    if a.ncols() != size {
        return Err(SolverError::NumericalInstability(format!(
            "cannot invert a non-square {}x{} matrix",
            a.nrows(),
            a.ncols()
        )));
    }
    let inverse = a
        .clone()
        .lu()
        .try_inverse()
        .ok_or(SolverError::SingularMatrix { size })?;
    if inverse.iter().all(|v| v.is_finite()) {
        Ok(inverse)
    } else {
        Err(SolverError::SingularMatrix { size })
    }
}

/// Inner product of two equal-length slices.
#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean distance between two points of the same dimension.
///
/// Accumulated with `hypot`, so tiny and huge separations neither
/// underflow nor overflow.
#[inline]
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).fold(0.0, |acc: f64, (x, y)| acc.hypot(x - y))
}
