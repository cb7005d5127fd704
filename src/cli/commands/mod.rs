//! Command execution functions for build operations.

mod build;

pub use build::execute_build;
