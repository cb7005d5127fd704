//! Command line interface for the build automator.
//!
//! Parses arguments, resolves the build configuration, runs the requested
//! flow and maps its outcome to the process exit code.

mod args;
pub mod commands;
mod config;
mod output;

pub use args::{Args, BuildArgs, Command, RuntimeConfig};
pub use config::load_document;
pub use output::OutputManager;

use crate::error::{CliError, Result};

/// Main CLI entry point. Returns 0 iff the artifact was delivered.
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()
        .map_err(|reason| CliError::InvalidArguments { reason })?;

    let runtime = RuntimeConfig::from(&args);
    let outcome = commands::execute_build(&args.command, &runtime).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else if let Some(path) = outcome.path.as_deref().filter(|_| outcome.success) {
        runtime.success(&format!("Artifact: {}", path.display()))?;
    }

    Ok(if outcome.success { 0 } else { 1 })
}
