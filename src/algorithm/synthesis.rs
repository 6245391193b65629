//! Random problem generation with a known integer kernel

use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::problem::{KernelShape, Problem};
use crate::io::configuration::{
    DEFAULT_INPUT_MAX, DEFAULT_KERNEL_MAX, DEFAULT_SYNTH_COLS, DEFAULT_SYNTH_ROWS,
};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::math::correlation::correlate_same;

/// Parameters for a synthesized problem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SynthesisConfig {
    /// Image height `m`
    pub rows: usize,
    /// Image width `n`
    pub cols: usize,
    /// Shape of the hidden kernel
    pub kernel_shape: KernelShape,
    /// Input pixels are drawn from `0..=input_max`
    pub input_max: i64,
    /// Kernel taps are drawn from `-kernel_max..=kernel_max`
    pub kernel_max: i64,
}

impl SynthesisConfig {
    /// Default image size and value ranges for the given kernel shape
    pub const fn with_kernel(kernel_shape: KernelShape) -> Self {
        Self {
            rows: DEFAULT_SYNTH_ROWS,
            cols: DEFAULT_SYNTH_COLS,
            kernel_shape,
            input_max: DEFAULT_INPUT_MAX,
            kernel_max: DEFAULT_KERNEL_MAX,
        }
    }
}

/// A synthesized problem and the kernel that generated it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntheticProblem {
    /// Problem whose observed output is `input ⋆ kernel`
    pub problem: Problem,
    /// Ground-truth kernel
    pub kernel: Array2<i64>,
}

/// Draw a random problem from `config` using a seeded generator
///
/// The same `(config, seed)` always yields the same problem.
///
/// # Errors
///
/// Returns `InvalidParameter` if a value range is negative, `Computation` if
/// the observed output overflows `i64`, or any error raised while validating
/// the resulting [`Problem`]
pub fn synthesize(config: &SynthesisConfig, seed: u64) -> Result<SyntheticProblem> {
    if config.input_max < 0 {
        return Err(invalid_parameter(
            "input_max",
            &config.input_max,
            &"must be non-negative",
        ));
    }
    if config.kernel_max < 0 {
        return Err(invalid_parameter(
            "kernel_max",
            &config.kernel_max,
            &"must be non-negative",
        ));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let (kernel_max, input_max) = (config.kernel_max, config.input_max);
    let shape = config.kernel_shape;

    let kernel = Array2::from_shape_simple_fn((shape.rows(), shape.cols()), || {
        rng.random_range(-kernel_max..=kernel_max)
    });
    let input = Array2::from_shape_simple_fn((config.rows, config.cols), || {
        rng.random_range(0..=input_max)
    });
    let observed = correlate_same(&input, &kernel).ok_or_else(|| {
        computation_error("problem synthesis", &"observed output overflows i64")
    })?;

    Ok(SyntheticProblem {
        problem: Problem::new(input, observed, shape)?,
        kernel,
    })
}
