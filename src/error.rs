//! Top-level error type for the command line front end.
//!
//! Build failures are not errors at this level: they come back as a
//! [`BuildOutcome`](crate::bundler::BuildOutcome) with `success == false`.
//! This type covers what happens before a build can start.

use crate::bundler::ErrorKind;
use thiserror::Error;

/// Result type alias for front end operations
pub type Result<T> = std::result::Result<T, AutomatorError>;

#[derive(Error, Debug)]
pub enum AutomatorError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON project document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed TOML project document
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Build error: {0}")]
    Bundler(#[from] crate::bundler::Error),

    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid arguments: {reason}")]
    InvalidArguments { reason: String },
}

impl AutomatorError {
    /// Hints printed under the error message.
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            AutomatorError::Cli(_) => vec!["Run with --help to see the accepted arguments".to_string()],
            AutomatorError::Json(_) | AutomatorError::Toml(_) => vec![
                "Project documents use camelCase keys: projectPath, outputPath, outputFileName, \
                 keystorePath, keystorePassword, keyAlias, keyPassword, buildMode, cleanBuild"
                    .to_string(),
            ],
            AutomatorError::Bundler(e) if e.kind() == ErrorKind::Environment => vec![
                "Pass --bundletool <JAR> or set RN_BUNDLETOOL".to_string(),
            ],
            AutomatorError::Io(_) | AutomatorError::Anyhow(_) => {
                vec!["Check that the given paths exist and are readable".to_string()]
            }
            AutomatorError::Bundler(_) => Vec::new(),
        }
    }
}
