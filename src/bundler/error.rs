//! Pipeline error types.
//!
//! Every fatal condition of the build pipeline maps to one [`Error`] variant.
//! Variants are grouped by [`ErrorKind`] so callers can tell a bad input
//! from a broken toolchain without matching on message text.

use std::{fmt::Display, io, path::{Path, PathBuf}};
use thiserror::Error as ThisError;

use crate::bundler::validate::ValidationError;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of pipeline failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid configuration, reported before any process starts.
    Validation,
    /// An external process exited non-zero or could not be spawned.
    ToolInvocation,
    /// A tool reported success but its output is not where it should be.
    ConventionMismatch,
    /// An auxiliary tool is not installed in any known location.
    Environment,
    /// Filesystem failure while moving artifacts around.
    Io,
}

/// Errors raised by the build pipeline.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Configuration rejected by the validator.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// An external command did not complete successfully.
    #[error("{step} failed")]
    StepFailed {
        /// Human readable name of the pipeline step.
        step: String,
    },

    /// The run was cancelled; the step's process was stopped or never started.
    #[error("Build cancelled")]
    Cancelled,

    /// Build tool exited 0 but the artifact is not at its conventional path.
    #[error("{artifact} not found at expected path: {}", .path.display())]
    ArtifactNotFound {
        /// Artifact description (e.g. "AAB file").
        artifact: &'static str,
        /// Expected location.
        path: PathBuf,
    },

    /// No file with the package extension inside the extracted archive.
    #[error("no {extension} file found in extracted archive {}", .dir.display())]
    NoPackageInArchive {
        /// Extension searched for.
        extension: &'static str,
        /// Extraction directory.
        dir: PathBuf,
    },

    /// Auxiliary tool missing from every searched location.
    #[error("{tool} not found. Expected locations:\n{}", format_locations(.searched))]
    ToolNotFound {
        /// Tool name.
        tool: &'static str,
        /// Locations probed, in order.
        searched: Vec<PathBuf>,
    },

    /// Filesystem error with the operation and path that caused it.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// What was being done.
        context: &'static str,
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        error: io::Error,
    },

    /// Background task panicked or was aborted.
    #[error("task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn format_locations(searched: &[PathBuf]) -> String {
    searched
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n")
}

impl Error {
    /// Returns the taxonomy bucket for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::StepFailed { .. } | Error::Cancelled => {
                ErrorKind::ToolInvocation
            }
            Error::ArtifactNotFound { .. } | Error::NoPackageInArchive { .. } => {
                ErrorKind::ConventionMismatch
            }
            Error::ToolNotFound { .. } => ErrorKind::Environment,
            Error::Fs { .. } | Error::Join(_) | Error::GenericError(_) => {
                ErrorKind::Io
            }
        }
    }
}

/// Attach filesystem context to I/O results.
pub trait ErrorExt<T> {
    /// Wraps the error with the operation description and path.
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// Convert options and foreign errors into [`Error::GenericError`] with a message.
pub trait Context<T> {
    /// Adds a message to the failure case.
    fn context<C: Display>(self, context: C) -> Result<T>;
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }
}

impl<T> Context<T> for Result<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }
}
