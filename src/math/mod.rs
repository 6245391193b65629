//! Mathematical utilities for the forward model

/// Same-size zero-padded correlation
pub mod correlation;
