//! Application-level configuration.
//!
//! - [`ExecutionParams`]: turn loop control (round limit, refinement, hints)

pub mod execution_params;

pub use execution_params::ExecutionParams;
