//! Validated recovery problems: an input image, its observed output, and a kernel shape

use ndarray::Array2;

use crate::io::configuration::MAX_SYSTEM_ENTRIES;
use crate::io::error::{Result, invalid_parameter, shape_mismatch};

/// Dimensions of the unknown kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KernelShape {
    rows: usize,
    cols: usize,
}

impl KernelShape {
    /// Create a kernel shape with `rows` x `cols` taps
    ///
    /// Odd dimensions center the kernel; even ones are accepted and anchor the
    /// center tap toward the top-left.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if either dimension is zero
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 {
            return Err(invalid_parameter("h", &rows, &"kernel height must be positive"));
        }
        if cols == 0 {
            return Err(invalid_parameter("w", &cols, &"kernel width must be positive"));
        }
        Ok(Self { rows, cols })
    }

    /// Kernel height `h`
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Kernel width `w`
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Number of taps `h * w`
    pub const fn taps(&self) -> usize {
        self.rows * self.cols
    }

    /// Offsets `((h - 1) / 2, (w - 1) / 2)` aligning the center tap with an output pixel
    pub const fn padding(&self) -> (usize, usize) {
        ((self.rows - 1) / 2, (self.cols - 1) / 2)
    }
}

impl std::fmt::Display for KernelShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl std::str::FromStr for KernelShape {
    type Err = crate::KernelError;

    /// Parse `HxW` (also accepts `H,W` or `H W`)
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s
            .split(|c: char| c == 'x' || c == 'X' || c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty());

        let parse_dim = |part: Option<&str>, name: &'static str| -> Result<usize> {
            part.and_then(|p| p.parse::<usize>().ok())
                .ok_or_else(|| invalid_parameter(name, &s, &"expected kernel shape as HxW"))
        };

        let rows = parse_dim(parts.next(), "h")?;
        let cols = parse_dim(parts.next(), "w")?;
        if parts.next().is_some() {
            return Err(invalid_parameter("kernel", &s, &"expected exactly two dimensions"));
        }
        Self::new(rows, cols)
    }
}

/// A recovery problem whose shapes have been checked
///
/// Construction is the only validation point: once a `Problem` exists, the
/// equation builder can index it without further checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    input: Array2<i64>,
    observed: Array2<i64>,
    kernel_shape: KernelShape,
}

impl Problem {
    /// Validate and bundle an input image, its observed output, and the kernel shape
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input image has a zero dimension (`InvalidParameter`)
    /// - The observed output shape differs from the input shape (`ShapeMismatch`)
    /// - The resulting equation matrix exceeds `MAX_SYSTEM_ENTRIES` (`InvalidParameter`)
    pub fn new(
        input: Array2<i64>,
        observed: Array2<i64>,
        kernel_shape: KernelShape,
    ) -> Result<Self> {
        let (m, n) = input.dim();
        if m == 0 {
            return Err(invalid_parameter("m", &m, &"image height must be positive"));
        }
        if n == 0 {
            return Err(invalid_parameter("n", &n, &"image width must be positive"));
        }

        let (cm, cn) = observed.dim();
        if (cm, cn) != (m, n) {
            return Err(shape_mismatch(
                "observed output",
                &format!("{m}x{n}"),
                &format!("{cm}x{cn}"),
            ));
        }

        let entries = (m * n).checked_mul(kernel_shape.taps());
        if entries.is_none_or(|e| e > MAX_SYSTEM_ENTRIES) {
            return Err(invalid_parameter(
                "kernel",
                &kernel_shape,
                &format!(
                    "equation matrix for a {m}x{n} image would exceed {MAX_SYSTEM_ENTRIES} entries"
                ),
            ));
        }

        Ok(Self {
            input,
            observed,
            kernel_shape,
        })
    }

    /// The known image `A`
    pub const fn input(&self) -> &Array2<i64> {
        &self.input
    }

    /// The observed output `C`
    pub const fn observed(&self) -> &Array2<i64> {
        &self.observed
    }

    /// Shape of the kernel to recover
    pub const fn kernel_shape(&self) -> KernelShape {
        self.kernel_shape
    }

    /// Image dimensions `(m, n)`
    pub fn image_dim(&self) -> (usize, usize) {
        self.input.dim()
    }
}
