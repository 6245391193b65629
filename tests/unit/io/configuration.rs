//! Tests for recovery constants and defaults

#[cfg(test)]
mod tests {
    use kernelfit::KernelShape;
    use kernelfit::algorithm::synthesis::SynthesisConfig;
    use kernelfit::io::configuration::{
        DEFAULT_INPUT_MAX, DEFAULT_KERNEL_MAX, DEFAULT_LOG_FILTER, DEFAULT_SEED,
        DEFAULT_SYNTH_COLS, DEFAULT_SYNTH_ROWS, MAX_SYSTEM_ENTRIES, OUTPUT_SUFFIX,
        PROBLEM_EXTENSION,
    };

    // Tests seed default value
    // Verified by changing seed value
    #[test]
    fn test_default_seed() {
        assert_eq!(DEFAULT_SEED, 42);
    }

    // Tests the system size limit allows a 512x512 image with a 16x16 kernel
    // Verified by reducing the limit
    #[test]
    fn test_max_system_entries() {
        assert_eq!(MAX_SYSTEM_ENTRIES, 512 * 512 * 16 * 16);
    }

    // Tests output naming constants
    // Verified by changing suffix string
    #[test]
    fn test_output_naming() {
        assert_eq!(OUTPUT_SUFFIX, "_kernel");
        assert_eq!(PROBLEM_EXTENSION, "txt");
    }

    // Tests synthesized problems default to overdetermined systems for 3x3 kernels
    // Verified by shrinking the default image below the tap count
    #[test]
    fn test_synthesis_defaults() {
        let config = SynthesisConfig::with_kernel(KernelShape::new(3, 3).unwrap());

        assert_eq!((config.rows, config.cols), (DEFAULT_SYNTH_ROWS, DEFAULT_SYNTH_COLS));
        assert!(config.rows * config.cols > config.kernel_shape.taps());
        assert_eq!((config.input_max, config.kernel_max), (DEFAULT_INPUT_MAX, DEFAULT_KERNEL_MAX));
        assert!(config.input_max > 0 && config.kernel_max > 0);
    }

    // Tests quiet-by-default logging
    // Verified by defaulting to info
    #[test]
    fn test_default_log_filter() {
        assert_eq!(DEFAULT_LOG_FILTER, "warn");
    }
}
