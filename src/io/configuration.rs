//! Recovery constants and runtime configuration defaults

// Safety limit on the dense equation matrix (rows * columns f64 entries)
/// Maximum number of entries allowed in the equation matrix
pub const MAX_SYSTEM_ENTRIES: usize = 64 * 1024 * 1024;

/// Extension of problem files picked up in batch mode
pub const PROBLEM_EXTENSION: &str = "txt";

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_kernel";

// Progress bar display settings
/// Width of the batch progress bar in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Log filter used when neither `-v` nor `RUST_LOG` is given
pub const DEFAULT_LOG_FILTER: &str = "warn";

// Default values for problem synthesis
/// Fixed seed for reproducible synthesis
pub const DEFAULT_SEED: u64 = 42;
/// Default synthesized image height
pub const DEFAULT_SYNTH_ROWS: usize = 8;
/// Default synthesized image width
pub const DEFAULT_SYNTH_COLS: usize = 8;
/// Largest pixel value drawn for a synthesized input image
pub const DEFAULT_INPUT_MAX: i64 = 9;
/// Largest absolute tap value drawn for a synthesized kernel
pub const DEFAULT_KERNEL_MAX: i64 = 3;
