//! Tests for end-to-end kernel recovery and its diagnostics

#[cfg(test)]
mod tests {
    use kernelfit::algorithm::synthesis::{SynthesisConfig, synthesize};
    use kernelfit::{KernelError, KernelShape, Problem, SolverConfig, recover_kernel};
    use ndarray::{Array2, array};

    fn recover(input: Array2<i64>, observed: Array2<i64>, h: usize, w: usize) -> kernelfit::Recovery {
        let problem = Problem::new(input, observed, KernelShape::new(h, w).unwrap()).unwrap();
        recover_kernel(&problem, &SolverConfig::default()).unwrap()
    }

    // Tests a scaled image recovers the scale factor with full diagnostics
    // Verified by dropping rank from the recovery
    #[test]
    fn test_scale_recovery() {
        let recovery = recover(array![[1, 2], [3, 4]], array![[3, 6], [9, 12]], 1, 1);

        assert_eq!(recovery.kernel, array![[3]]);
        assert_eq!(recovery.rank, 1);
        assert!(recovery.residual < 1e-12);
        assert!(recovery.is_exact());
    }

    // Tests a system with no exact integer kernel reports its integer residual
    // Verified by always reporting exact recovery
    #[test]
    fn test_inexact_recovery() {
        let recovery = recover(array![[1], [1], [1]], array![[1], [2], [2]], 1, 1);

        // Least squares gives 5/3
        assert_eq!(recovery.kernel, array![[2]]);
        assert!((recovery.residual - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(recovery.max_abs_residual, 1);
        assert!(!recovery.is_exact());
    }

    // Tests an underdetermined problem rounds the minimum-norm taps
    // Verified by selecting a basic solution
    #[test]
    fn test_underdetermined_recovery() {
        // Taps satisfy b0 + b1 = 2 and b1 + b2 = 2; minimum norm is (2/3, 4/3, 2/3)
        let recovery = recover(array![[1, 1]], array![[2, 2]], 1, 3);

        assert_eq!(recovery.kernel, array![[1, 1, 1]]);
        assert_eq!(recovery.rank, 2);
    }

    // Tests synthesized problems are recovered exactly
    // Verified by perturbing the rounding step
    #[test]
    fn test_synthesized_recovery() {
        for (seed, (h, w)) in [(1, (3, 3)), (7, (1, 5)), (42, (3, 2))] {
            let config = SynthesisConfig::with_kernel(KernelShape::new(h, w).unwrap());
            let synthetic = synthesize(&config, seed).unwrap();
            let recovery = recover_kernel(&synthetic.problem, &SolverConfig::default()).unwrap();

            assert_eq!(recovery.kernel, synthetic.kernel, "seed {seed} kernel {h}x{w}");
            assert!(recovery.is_exact());
        }
    }

    // Tests a kernel whose reproduced output leaves the i64 range is an error
    // Verified by correlating with wrapping i64 arithmetic
    #[test]
    fn test_residual_overflow_is_reported() {
        let observed = array![[9_000_000_000_000_000_000], [9_000_000_000_000_000_000]];
        let problem =
            Problem::new(array![[1], [9]], observed, KernelShape::new(1, 1).unwrap()).unwrap();

        // Tap is about 1.1e18, so 9 * tap exceeds i64::MAX
        let err = recover_kernel(&problem, &SolverConfig::default()).unwrap_err();

        assert!(matches!(
            err,
            KernelError::Computation {
                operation: "residual check",
                ..
            }
        ));
    }

    // Tests solver configuration errors propagate through the pipeline
    // Verified by validating rcond only in the CLI
    #[test]
    fn test_invalid_config_propagates() {
        let problem =
            Problem::new(array![[1]], array![[1]], KernelShape::new(1, 1).unwrap()).unwrap();
        let err = recover_kernel(&problem, &SolverConfig { rcond: Some(-0.1) }).unwrap_err();

        assert!(matches!(err, KernelError::InvalidParameter { .. }));
    }
}
