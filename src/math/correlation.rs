//! Same-size zero-padded 2D correlation
//!
//! The forward model relating an input image `A`, a kernel `B` and the output `C`:
//!
//! ```text
//! C[i,j] = Σ_k Σ_t B[k,t] · A[i - k + pad_h, j - t + pad_w]
//! ```
//!
//! where `pad_h = (h - 1) / 2`, `pad_w = (w - 1) / 2` and any `A` index outside the
//! image reads as zero.

use ndarray::{Array2, indices};

/// Index into `A` read by kernel tap `(k, t)` for output pixel `(i, j)`
///
/// Returns `None` when the index falls outside `[0, m) x [0, n)`, which the
/// zero-padding rule treats as a zero sample.
pub const fn source_index(
    pixel: (usize, usize),
    tap: (usize, usize),
    padding: (usize, usize),
    image_dim: (usize, usize),
) -> Option<(usize, usize)> {
    let Some(a_i) = (pixel.0 + padding.0).checked_sub(tap.0) else {
        return None;
    };
    let Some(a_j) = (pixel.1 + padding.1).checked_sub(tap.1) else {
        return None;
    };
    if a_i < image_dim.0 && a_j < image_dim.1 {
        Some((a_i, a_j))
    } else {
        None
    }
}

/// Correlate `input` with `kernel`, producing an output of the same shape as `input`
///
/// An empty kernel yields an all-zero output. Returns `None` when an output
/// pixel does not fit in `i64`.
pub fn correlate_same(input: &Array2<i64>, kernel: &Array2<i64>) -> Option<Array2<i64>> {
    let image_dim = input.dim();
    let (h, w) = kernel.dim();
    let padding = (h.saturating_sub(1) / 2, w.saturating_sub(1) / 2);

    let pixels = indices(image_dim)
        .into_iter()
        .map(|pixel| correlate_pixel(input, kernel, pixel, padding))
        .collect::<Option<Vec<i64>>>()?;

    Array2::from_shape_vec(image_dim, pixels).ok()
}

/// One output pixel, summed in `i128` so only the final value must fit `i64`
fn correlate_pixel(
    input: &Array2<i64>,
    kernel: &Array2<i64>,
    pixel: (usize, usize),
    padding: (usize, usize),
) -> Option<i64> {
    let total = kernel.indexed_iter().try_fold(0_i128, |acc, (tap, &weight)| {
        source_index(pixel, tap, padding, input.dim())
            .and_then(|index| input.get(index))
            .map_or(Some(acc), |&sample| {
                acc.checked_add(i128::from(weight) * i128::from(sample))
            })
    })?;
    i64::try_from(total).ok()
}

/// Largest absolute element-wise difference between two equally shaped arrays
///
/// Returns `None` when the shapes differ.
pub fn max_abs_difference(lhs: &Array2<i64>, rhs: &Array2<i64>) -> Option<u64> {
    if lhs.dim() != rhs.dim() {
        return None;
    }
    Some(
        lhs.iter()
            .zip(rhs.iter())
            .map(|(&a, &b)| a.abs_diff(b))
            .max()
            .unwrap_or(0),
    )
}
