//! Runs one bundle or package build for the CLI.

use crate::bundler::{BuildAutomator, BuildOutcome};
use crate::cli::{Command, RuntimeConfig, config};
use crate::error::Result;
use std::sync::Arc;

/// Resolves the configuration, runs the requested flow and returns its outcome.
///
/// The first Ctrl-C cancels the build: the running tool is terminated and the
/// flow finishes with a failed outcome instead of the process dying mid-copy.
pub async fn execute_build(command: &Command, runtime: &RuntimeConfig) -> Result<BuildOutcome> {
    let args = command.build_args();
    let config = config::resolve(args).await?;
    let automator = BuildAutomator::with_toolchain(config::toolchain(args)?);
    automator.set_progress_sink(Arc::new(runtime.output().clone()));

    let build = async {
        if command.requires_signing() {
            automator.build_package(&config).await
        } else {
            automator.build_bundle(&config).await
        }
    };
    tokio::pin!(build);

    let finished = tokio::select! {
        outcome = &mut build => Some(outcome),
        _ = tokio::signal::ctrl_c() => None,
    };

    let outcome = match finished {
        Some(outcome) => outcome,
        None => {
            runtime.warn("Interrupted, stopping the build...")?;
            automator.cancel();
            build.await
        }
    };

    Ok(outcome)
}
