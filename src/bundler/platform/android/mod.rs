//! Android packaging steps.
//!
//! - [`bundle`] - optional Gradle clean, `react-native build-android`, bundle pickup
//! - [`package`] - bundle to universal package conversion with `bundletool`
//! - [`extract`] - unpacking the converter's package set
//! - [`layout`] - project layout and command-line conventions

pub mod bundle;
pub mod extract;
pub mod layout;
pub mod package;

use crate::bundler::{
    BuildConfiguration, BuiltArtifact, Error, ProcessRunner, ProgressChannel, Result, Toolchain,
    builder::checksum::calculate_sha256, error::ErrorExt, naming, utils::fs,
};
use std::path::Path;

/// What every step needs: a runner bound to the current run and the toolchain.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub runner: &'a ProcessRunner,
    pub toolchain: &'a Toolchain,
}

impl<'a> StepContext<'a> {
    pub fn new(runner: &'a ProcessRunner, toolchain: &'a Toolchain) -> Self {
        Self { runner, toolchain }
    }

    pub fn progress(&self) -> &'a ProgressChannel {
        self.runner.progress()
    }

    /// Error for a step whose command did not succeed: [`Error::Cancelled`]
    /// once the run was cancelled, [`Error::StepFailed`] otherwise.
    pub fn step_failed(&self, step: &str) -> Error {
        if self.runner.is_cancelled() {
            Error::Cancelled
        } else {
            Error::StepFailed {
                step: step.to_string(),
            }
        }
    }
}

/// Copies `source` into the output directory under a fresh unique name.
async fn deliver(
    progress: &ProgressChannel,
    source: &Path,
    config: &BuildConfiguration,
    extension: &str,
    label: &str,
) -> Result<BuiltArtifact> {
    let output = config.output_path();
    let file_name = naming::ensure_unique(output, &naming::derive_name(config, extension));
    let destination = output.join(file_name);

    fs::copy_file(source, &destination).await?;
    progress.success(format!("{label} copied to: {}", destination.display()));

    let size = tokio::fs::metadata(&destination)
        .await
        .fs_context("reading artifact metadata", &destination)?
        .len();
    let checksum = calculate_sha256(&destination).await?;
    progress.info(format!("SHA256: {checksum}"));

    Ok(BuiltArtifact {
        path: destination,
        size,
        checksum,
    })
}
