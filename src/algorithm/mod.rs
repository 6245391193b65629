/// Coefficient matrix and right-hand side construction
pub mod equations;
/// End-to-end recovery pipeline
pub mod pipeline;
/// Validated problem and kernel shape types
pub mod problem;
/// Rounding of solved taps back into an integer kernel
pub mod reconstruct;
/// Minimum-norm least-squares solver
pub mod solver;
/// Seeded random problem generation
pub mod synthesis;
