//! Boundary code: CLI, text protocol, images, logging, and errors

/// Command-line parsing and dispatch
pub mod cli;
/// Compile-time constants and defaults
pub mod configuration;
/// Error type and helpers
pub mod error;
/// Grayscale image loading
pub mod image;
/// Tracing subscriber setup
pub mod logging;
/// Batch progress display
pub mod progress;
/// Plain-text problem and kernel format
pub mod protocol;
