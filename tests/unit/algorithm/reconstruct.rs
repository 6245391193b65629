//! Tests for kernel reshaping and rounding

#[cfg(test)]
mod tests {
    use kernelfit::algorithm::reconstruct::{reconstruct_kernel, round_tap};
    use kernelfit::{KernelError, KernelShape};
    use ndarray::{Array1, array};

    // Tests halfway values round to the even neighbour
    // Verified by switching to round-half-away-from-zero
    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(round_tap(2.5), Some(2));
        assert_eq!(round_tap(3.5), Some(4));
        assert_eq!(round_tap(-2.5), Some(-2));
        assert_eq!(round_tap(0.5), Some(0));
    }

    // Tests non-halfway values round to the nearest integer
    // Verified by truncating instead of rounding
    #[test]
    fn test_round_nearest() {
        assert_eq!(round_tap(1.499_999), Some(1));
        assert_eq!(round_tap(1.500_001), Some(2));
        assert_eq!(round_tap(-0.6), Some(-1));
        assert_eq!(round_tap(2.000_000_001), Some(2));
    }

    // Tests unrepresentable values are rejected
    // Verified by saturating casts
    #[test]
    fn test_round_unrepresentable() {
        assert_eq!(round_tap(f64::NAN), None);
        assert_eq!(round_tap(f64::INFINITY), None);
        assert_eq!(round_tap(1e300), None);
    }

    // Tests the solution vector is reshaped row-major
    // Verified by reshaping column-major
    #[test]
    fn test_reshape_row_major() {
        let solution = Array1::from(vec![1.1, 2.0, 2.9, 4.2, -5.0, 6.4]);
        let kernel = reconstruct_kernel(&solution, KernelShape::new(2, 3).unwrap()).unwrap();

        assert_eq!(kernel, array![[1, 2, 3], [4, -5, 6]]);
    }

    // Tests a solution of the wrong length is a shape error
    // Verified by truncating extra taps silently
    #[test]
    fn test_length_mismatch() {
        let solution = Array1::from(vec![1.0, 2.0, 3.0]);
        let err = reconstruct_kernel(&solution, KernelShape::new(2, 2).unwrap()).unwrap_err();

        assert!(matches!(err, KernelError::ShapeMismatch { .. }));
    }

    // Tests a NaN tap fails reconstruction with its index in the message
    // Verified by mapping NaN to zero
    #[test]
    fn test_nan_tap() {
        let solution = Array1::from(vec![1.0, f64::NAN]);
        let err = reconstruct_kernel(&solution, KernelShape::new(1, 2).unwrap()).unwrap_err();

        assert!(matches!(err, KernelError::Computation { .. }));
        assert!(err.to_string().contains("tap 1"));
    }
}
