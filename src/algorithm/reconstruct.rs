//! Reshaping and rounding of solved kernel taps

use ndarray::{Array1, Array2};
use num_traits::ToPrimitive;

use crate::algorithm::problem::KernelShape;
use crate::io::error::{Result, computation_error, shape_mismatch};

/// Round a solved tap to the nearest integer, ties to even
///
/// Returns `None` for NaN, infinities and values outside the `i64` range.
pub fn round_tap(value: f64) -> Option<i64> {
    value.round_ties_even().to_i64()
}

/// Reshape `solution` row-major into `shape` and round every tap
///
/// # Errors
///
/// Returns an error if:
/// - `solution` length differs from `shape.taps()` (`ShapeMismatch`)
/// - A tap is not finite or does not fit in `i64` (`Computation`)
pub fn reconstruct_kernel(solution: &Array1<f64>, shape: KernelShape) -> Result<Array2<i64>> {
    if solution.len() != shape.taps() {
        return Err(shape_mismatch("kernel solution", &shape.taps(), &solution.len()));
    }

    let taps = solution
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            round_tap(value).ok_or_else(|| {
                computation_error(
                    "kernel reconstruction",
                    &format!("tap {index} has unrepresentable value {value}"),
                )
            })
        })
        .collect::<Result<Vec<i64>>>()?;

    Array2::from_shape_vec((shape.rows(), shape.cols()), taps)
        .map_err(|e| computation_error("kernel reconstruction", &e))
}
