//! Error types for kernel recovery and its I/O boundary

use std::fmt;
use std::path::PathBuf;

/// Main error type for all kernel recovery operations
#[derive(Debug)]
pub enum KernelError {
    /// Two quantities that must agree in shape or length do not
    ///
    /// Raised at the input boundary (mismatched A and C, short rows) and by the
    /// solver and reconstructor when handed inconsistent buffers.
    ShapeMismatch {
        /// What was being compared
        what: &'static str,
        /// Shape or length that was required
        expected: String,
        /// Shape or length that was supplied
        found: String,
    },

    /// A parameter is outside its valid domain
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Problem text could not be parsed
    Parse {
        /// 1-based line number of the offending line (0 when input ended early)
        line: usize,
        /// Description of what was expected
        reason: String,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced an invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                what,
                expected,
                found,
            } => {
                write!(f, "Shape mismatch in {what}: expected {expected}, found {found}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Parse { line, reason } => {
                if *line == 0 {
                    write!(f, "Parse error at end of input: {reason}")
                } else {
                    write!(f, "Parse error on line {line}: {reason}")
                }
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for KernelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for kernel recovery results
pub type Result<T> = std::result::Result<T, KernelError>;

impl From<image::ImageError> for KernelError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for KernelError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> KernelError {
    KernelError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a shape mismatch error
pub fn shape_mismatch(
    what: &'static str,
    expected: &impl ToString,
    found: &impl ToString,
) -> KernelError {
    KernelError::ShapeMismatch {
        what,
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> KernelError {
    KernelError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create an error for an unusable command-line target
pub fn invalid_target(target: &std::path::Path, reason: &impl ToString) -> KernelError {
    KernelError::InvalidParameter {
        parameter: "target",
        value: target.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Create a parse error for a 1-based line number
pub fn parse_error(line: usize, reason: &impl ToString) -> KernelError {
    KernelError::Parse {
        line,
        reason: reason.to_string(),
    }
}

/// Attach a path and operation to an I/O error
pub trait WithPath<T> {
    /// Convert an I/O failure into [`KernelError::FileSystem`] for `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path and operation attached
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T>;
}

impl<T> WithPath<T> for std::result::Result<T, std::io::Error> {
    fn with_path(self, path: impl Into<PathBuf>, operation: &'static str) -> Result<T> {
        self.map_err(|source| KernelError::FileSystem {
            path: path.into(),
            operation,
            source,
        })
    }
}
