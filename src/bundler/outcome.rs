//! Step and pipeline results.

use crate::bundler::{Error, ProgressChannel, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Result of a single pipeline step.
///
/// Best-effort steps (clean, temp cleanup) only produce [`StepOutcome::Fatal`]
/// when the run was cancelled; other failures are surfaced as a warning or
/// dropped.
#[derive(Debug)]
pub enum StepOutcome {
    Completed,
    /// Aborts the pipeline.
    Fatal(Error),
    /// Reported to the user, pipeline continues.
    Warning(String),
    /// Logged at debug level only, pipeline continues.
    Ignored(String),
}

impl StepOutcome {
    /// Reports non-fatal outcomes and turns a fatal one into `Err`.
    pub fn resolve(self, progress: &ProgressChannel) -> Result<()> {
        match self {
            StepOutcome::Completed => Ok(()),
            StepOutcome::Fatal(e) => Err(e),
            StepOutcome::Warning(msg) => {
                progress.warn(msg);
                Ok(())
            }
            StepOutcome::Ignored(msg) => {
                log::debug!("ignored: {msg}");
                Ok(())
            }
        }
    }
}

/// A delivered artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltArtifact {
    pub path: PathBuf,
    pub size: u64,
    /// Hex-encoded SHA-256.
    pub checksum: String,
}

/// Structured result handed back to callers of the public build operations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checksum: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl BuildOutcome {
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

impl From<BuiltArtifact> for BuildOutcome {
    fn from(artifact: BuiltArtifact) -> Self {
        Self {
            success: true,
            path: Some(artifact.path),
            error: None,
            checksum: Some(artifact.checksum),
            size: Some(artifact.size),
        }
    }
}
