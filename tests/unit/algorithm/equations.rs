//! Tests for equation matrix and right-hand side construction

#[cfg(test)]
mod tests {
    use kernelfit::algorithm::equations::build_system;
    use kernelfit::math::correlation::correlate_same;
    use kernelfit::{KernelShape, Problem};
    use ndarray::{Array1, Array2, array};

    fn problem(input: Array2<i64>, observed: Array2<i64>, h: usize, w: usize) -> Problem {
        Problem::new(input, observed, KernelShape::new(h, w).unwrap()).unwrap()
    }

    // Tests matrix is (m*n) x (h*w) and rhs has m*n entries
    // Verified by swapping row and column counts
    #[test]
    fn test_system_shape() {
        let input = Array2::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as i64);
        let observed = Array2::zeros((3, 4));
        let system = build_system(&problem(input, observed, 3, 2)).unwrap();

        assert_eq!(system.matrix().dim(), (12, 6));
        assert_eq!(system.rhs().len(), 12);
        assert_eq!(system.equations(), 12);
        assert_eq!(system.unknowns(), 6);
    }

    // Tests corner pixel row reads padding as zero for out-of-bounds taps
    // Verified by clamping indices instead of zero padding
    #[test]
    fn test_corner_row_zero_padding() {
        let input = array![[1, 2], [3, 4]];
        let system = build_system(&problem(input, Array2::zeros((2, 2)), 3, 3)).unwrap();

        let row = system.matrix().row(0).to_vec();
        assert_eq!(row, vec![4.0, 3.0, 0.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0]);
    }

    // Tests last pixel row reads the opposite corner samples
    // Verified by dropping pad offset from the source index
    #[test]
    fn test_last_row_zero_padding() {
        let input = array![[1, 2], [3, 4]];
        let system = build_system(&problem(input, Array2::zeros((2, 2)), 3, 3)).unwrap();

        // Pixel (1, 1): taps read A[2 - k, 2 - t]
        let row = system.matrix().row(3).to_vec();
        assert_eq!(row, vec![0.0, 0.0, 0.0, 0.0, 4.0, 3.0, 0.0, 2.0, 1.0]);
    }

    // Tests rhs is the observed output flattened row-major
    // Verified by flattening column-major
    #[test]
    fn test_rhs_row_major() {
        let input = array![[1, 0], [0, 1]];
        let observed = array![[5, 6], [7, 8]];
        let system = build_system(&problem(input, observed, 1, 1)).unwrap();

        assert_eq!(system.rhs(), &Array1::from(vec![5.0, 6.0, 7.0, 8.0]));
    }

    // Tests an all-zero input produces an all-zero matrix without error
    // Verified by rejecting degenerate systems
    #[test]
    fn test_zero_input_gives_zero_matrix() {
        let system =
            build_system(&problem(Array2::zeros((3, 3)), Array2::zeros((3, 3)), 5, 5)).unwrap();

        assert!(system.matrix().iter().all(|&v| v == 0.0));
        assert_eq!(system.matrix().dim(), (9, 25));
    }

    // Tests every row dotted with the flattened kernel reproduces the forward correlation
    // Verified by transposing tap column order
    #[test]
    fn test_rows_match_forward_model() {
        let input = Array2::from_shape_fn((5, 7), |(i, j)| ((i * 7 + j) * 13 % 11) as i64 - 4);
        let kernel = array![[1, -2], [3, 0], [2, 5]];
        let observed = correlate_same(&input, &kernel).unwrap();
        let system = build_system(&problem(input, observed.clone(), 3, 2)).unwrap();

        let flat_kernel: Array1<f64> = kernel.iter().map(|&v| v as f64).collect();
        let reproduced = system.matrix().dot(&flat_kernel);

        for (r, (&lhs, &rhs)) in reproduced.iter().zip(system.rhs().iter()).enumerate() {
            assert!((lhs - rhs).abs() < 1e-12, "row {r}: {lhs} != {rhs}");
        }
        assert_eq!(
            system.rhs().iter().copied().collect::<Vec<_>>(),
            observed.iter().map(|&v| v as f64).collect::<Vec<_>>()
        );
    }

    // Tests construction is identical across repeated builds
    // Verified by writing rows into shared offsets
    #[test]
    fn test_build_is_deterministic() {
        let input = Array2::from_shape_fn((16, 9), |(i, j)| (i as i64 - j as i64) * 3);
        let p = problem(input, Array2::zeros((16, 9)), 3, 3);

        assert_eq!(build_system(&p).unwrap(), build_system(&p).unwrap());
    }
}
