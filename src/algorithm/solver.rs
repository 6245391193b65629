//! Minimum-norm least-squares solving via singular value decomposition
//!
//! The solve never forms normal equations: `x = V Σ⁺ Uᵀ b`, where singular
//! values at or below `rcond · σ_max` are treated as exact zeros. This yields the
//! minimum-norm minimizer of `‖Mx − b‖₂` for tall, wide and rank-deficient `M`.

use nalgebra::{DMatrix, DVector, SVD};
use ndarray::{Array1, Array2};
use tracing::{debug, trace};

use crate::io::error::{Result, computation_error, invalid_parameter, shape_mismatch};

/// Tuning for the least-squares solve
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SolverConfig {
    /// Relative cutoff for small singular values
    ///
    /// `None` selects `f64::EPSILON * max(rows, cols)`.
    pub rcond: Option<f64>,
}

impl SolverConfig {
    /// Cutoff ratio used for a `rows` x `cols` matrix
    pub fn effective_rcond(&self, rows: usize, cols: usize) -> f64 {
        self.rcond
            .unwrap_or_else(|| f64::EPSILON * rows.max(cols) as f64)
    }

    /// Check that the configured cutoff is usable
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `rcond` is negative or not finite
    pub fn validate(&self) -> Result<()> {
        match self.rcond {
            Some(rcond) if !rcond.is_finite() || rcond < 0.0 => Err(invalid_parameter(
                "rcond",
                &rcond,
                &"must be a finite, non-negative number",
            )),
            _ => Ok(()),
        }
    }
}

/// Result of a least-squares solve with its numerical diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresSolution {
    /// Minimum-norm minimizer, one entry per matrix column
    pub solution: Array1<f64>,
    /// Number of singular values above the cutoff
    pub rank: usize,
    /// Singular values in the order produced by the decomposition
    pub singular_values: Vec<f64>,
    /// Absolute threshold below which singular values were discarded
    pub cutoff: f64,
    /// Squared residual norm `‖Mx − b‖²`
    pub residual: f64,
}

impl LeastSquaresSolution {
    /// Whether the matrix had fewer independent columns than unknowns
    pub fn is_rank_deficient(&self) -> bool {
        self.rank < self.solution.len()
    }
}

/// Solve `matrix · x ≈ rhs` in the least-squares sense
///
/// All-zero and empty matrices are valid inputs and produce the zero vector.
///
/// # Errors
///
/// Returns an error if:
/// - `rhs` length differs from the number of matrix rows (`ShapeMismatch`)
/// - `config.rcond` is negative or not finite (`InvalidParameter`)
/// - The singular value decomposition fails to converge (`Computation`)
pub fn solve_least_squares(
    matrix: &Array2<f64>,
    rhs: &Array1<f64>,
    config: &SolverConfig,
) -> Result<LeastSquaresSolution> {
    let (rows, cols) = matrix.dim();
    if rhs.len() != rows {
        return Err(shape_mismatch("right-hand side", &rows, &rhs.len()));
    }
    config.validate()?;

    if rows == 0 || cols == 0 {
        return Ok(LeastSquaresSolution {
            solution: Array1::zeros(cols),
            rank: 0,
            singular_values: Vec::new(),
            cutoff: 0.0,
            residual: rhs.dot(rhs),
        });
    }

    let m = DMatrix::from_row_iterator(rows, cols, matrix.iter().copied());
    let b = DVector::from_iterator(rows, rhs.iter().copied());

    let svd = SVD::try_new(m, true, true, f64::EPSILON, 0)
        .ok_or_else(|| computation_error("singular value decomposition", &"did not converge"))?;

    let sigma_max = svd.singular_values.iter().copied().fold(0.0_f64, f64::max);
    let cutoff = config.effective_rcond(rows, cols) * sigma_max;
    let rank = svd.singular_values.iter().filter(|&&s| s > cutoff).count();
    trace!(singular_values = ?svd.singular_values, cutoff, "singular values");

    let x = svd
        .solve(&b, cutoff)
        .map_err(|reason| computation_error("least-squares back substitution", &reason))?;

    let solution: Array1<f64> = x.iter().copied().collect();
    let residual_vector = matrix.dot(&solution) - rhs;
    let residual = residual_vector.dot(&residual_vector);

    if rank < cols {
        debug!(rank, unknowns = cols, "rank-deficient system, returning minimum-norm solution");
    }
    debug!(rank, residual, "least-squares solve complete");

    Ok(LeastSquaresSolution {
        solution,
        rank,
        singular_values: svd.singular_values.iter().copied().collect(),
        cutoff,
        residual,
    })
}
