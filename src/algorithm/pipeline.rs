//! End-to-end kernel recovery: equations, solve, reconstruct

use ndarray::Array2;
use tracing::{debug, info_span};

use crate::algorithm::equations::build_system;
use crate::algorithm::problem::Problem;
use crate::algorithm::reconstruct::reconstruct_kernel;
use crate::algorithm::solver::{SolverConfig, solve_least_squares};
use crate::io::error::{Result, computation_error};
use crate::math::correlation::{correlate_same, max_abs_difference};

/// A recovered kernel together with solve diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct Recovery {
    /// Rounded kernel `B`
    pub kernel: Array2<i64>,
    /// Effective rank of the equation matrix
    pub rank: usize,
    /// Squared least-squares residual of the unrounded solution
    pub residual: f64,
    /// Largest absolute difference between `A ⋆ B` and `C` for the rounded kernel
    pub max_abs_residual: u64,
}

impl Recovery {
    /// Whether the rounded kernel reproduces the observed output exactly
    pub const fn is_exact(&self) -> bool {
        self.max_abs_residual == 0
    }
}

/// Recover the kernel for `problem`
///
/// # Errors
///
/// Propagates solver and reconstruction failures. Returns a `Computation`
/// error when the rounded kernel reproduces an output outside the `i64`
/// range; shape validation has already happened when `problem` was constructed
pub fn recover_kernel(problem: &Problem, config: &SolverConfig) -> Result<Recovery> {
    let span = info_span!("recover_kernel", kernel = %problem.kernel_shape());
    let _guard = span.enter();

    let system = build_system(problem)?;
    let solved = solve_least_squares(system.matrix(), system.rhs(), config)?;
    let kernel = reconstruct_kernel(&solved.solution, problem.kernel_shape())?;

    let reproduced = correlate_same(problem.input(), &kernel).ok_or_else(|| {
        computation_error("residual check", &"reproduced output overflows i64")
    })?;
    let max_abs_residual = max_abs_difference(&reproduced, problem.observed())
        .ok_or_else(|| computation_error("residual check", &"reproduced output has wrong shape"))?;

    debug!(
        rank = solved.rank,
        residual = solved.residual,
        max_abs_residual,
        "kernel recovered"
    );

    Ok(Recovery {
        kernel,
        rank: solved.rank,
        residual: solved.residual,
        max_abs_residual,
    })
}
