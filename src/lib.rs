//! Recovery of unknown 2D convolution kernels by minimum-norm least squares
//!
//! Given an integer image `A`, its observed same-size zero-padded correlation
//! `C`, and a kernel shape `(h, w)`, the crate builds one linear equation per
//! output pixel, solves the system with an SVD, and rounds the taps back into
//! an integer kernel `B`.

#![forbid(unsafe_code)]

/// Equation construction, least-squares solving, and kernel reconstruction
pub mod algorithm;
/// Input/output operations, configuration, and error handling
pub mod io;
/// Forward correlation model
pub mod math;

pub use algorithm::pipeline::{Recovery, recover_kernel};
pub use algorithm::problem::{KernelShape, Problem};
pub use algorithm::solver::SolverConfig;
pub use io::error::{KernelError, Result};
