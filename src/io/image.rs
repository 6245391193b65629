//! Grayscale image loading for image-pair recovery

use std::path::Path;

use ndarray::Array2;

use crate::algorithm::problem::{KernelShape, Problem};
use crate::io::error::{KernelError, Result, shape_mismatch};

/// Load an image as an 8-bit luma matrix indexed `(row, col)`
///
/// Color images are converted to grayscale.
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_luma(path: &Path) -> Result<Array2<i64>> {
    let img = image::open(path).map_err(|e| KernelError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    let luma = img.to_luma8();

    let (width, height) = (luma.width() as usize, luma.height() as usize);
    let mut data = Array2::zeros((height, width));
    for (x, y, pixel) in luma.enumerate_pixels() {
        if let Some(value) = data.get_mut((y as usize, x as usize)) {
            *value = i64::from(pixel.0[0]);
        }
    }
    Ok(data)
}

/// Build a problem from an input image and its filtered counterpart
///
/// # Errors
///
/// Returns an error if:
/// - Either image cannot be loaded (`ImageLoad`)
/// - The two images differ in size (`ShapeMismatch`)
/// - The resulting problem fails validation
pub fn load_image_pair(
    input_path: &Path,
    output_path: &Path,
    kernel_shape: KernelShape,
) -> Result<Problem> {
    let input = load_luma(input_path)?;
    let observed = load_luma(output_path)?;

    if input.dim() != observed.dim() {
        let (m, n) = input.dim();
        let (cm, cn) = observed.dim();
        return Err(shape_mismatch(
            "output image",
            &format!("{n}x{m} pixels"),
            &format!("{cn}x{cm} pixels in '{}'", output_path.display()),
        ));
    }

    Problem::new(input, observed, kernel_shape)
}
