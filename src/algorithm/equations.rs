//! Linear system construction for kernel recovery
//!
//! Every output pixel `(i, j)` contributes one equation: row `i * n + j` of the
//! coefficient matrix holds, at column `k * w + t`, the input sample that kernel
//! tap `(k, t)` multiplies when producing that pixel, or zero if the sample lies
//! in the padding. The right-hand side is the observed output flattened in the
//! same row-major order.

use ndarray::{Array1, Array2};
use rayon::prelude::{IndexedParallelIterator, ParallelIterator, ParallelSliceMut};
use tracing::debug;

use crate::algorithm::problem::Problem;
use crate::io::error::{Result, computation_error};
use crate::math::correlation::source_index;

/// Coefficient matrix and right-hand side whose unknowns are the kernel taps
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSystem {
    matrix: Array2<f64>,
    rhs: Array1<f64>,
}

impl LinearSystem {
    /// Coefficient matrix of shape `(m * n, h * w)`
    pub const fn matrix(&self) -> &Array2<f64> {
        &self.matrix
    }

    /// Right-hand side of length `m * n`
    pub const fn rhs(&self) -> &Array1<f64> {
        &self.rhs
    }

    /// Number of equations (`m * n`)
    pub fn equations(&self) -> usize {
        self.matrix.nrows()
    }

    /// Number of unknowns (`h * w`)
    pub fn unknowns(&self) -> usize {
        self.matrix.ncols()
    }
}

/// Build the linear system for `problem`
///
/// Image rows are filled in parallel; each worker owns a disjoint block of
/// `n` equation rows, so the result does not depend on scheduling.
///
/// # Errors
///
/// Returns a `Computation` error if the assembled buffer cannot be shaped into
/// the coefficient matrix (not reachable for a validated `Problem`)
pub fn build_system(problem: &Problem) -> Result<LinearSystem> {
    let input = problem.input();
    let (m, n) = problem.image_dim();
    let shape = problem.kernel_shape();
    let padding = shape.padding();
    let taps = shape.taps();
    let w = shape.cols();

    debug!(
        equations = m * n,
        unknowns = taps,
        pad_h = padding.0,
        pad_w = padding.1,
        "building equation matrix"
    );

    let mut coefficients = vec![0.0_f64; m * n * taps];
    coefficients
        .par_chunks_mut(n * taps)
        .enumerate()
        .for_each(|(i, image_row)| {
            for (j, equation) in image_row.chunks_mut(taps).enumerate() {
                for (k, tap_row) in equation.chunks_mut(w).enumerate() {
                    for (t, coefficient) in tap_row.iter_mut().enumerate() {
                        if let Some(&sample) = source_index((i, j), (k, t), padding, (m, n))
                            .and_then(|index| input.get(index))
                        {
                            *coefficient = sample as f64;
                        }
                    }
                }
            }
        });

    let matrix = Array2::from_shape_vec((m * n, taps), coefficients)
        .map_err(|e| computation_error("equation matrix assembly", &e))?;
    let rhs: Array1<f64> = problem.observed().iter().map(|&v| v as f64).collect();

    Ok(LinearSystem { matrix, rhs })
}
