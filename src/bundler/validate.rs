//! Pre-flight checks on a [`BuildConfiguration`].
//!
//! Runs before any external process is launched. Checks run in a fixed order
//! and stop at the first failure so the user sees one actionable message.

use crate::bundler::{
    BuildConfiguration, ProgressChannel, platform::android::layout::MANIFEST_FILE,
};
use std::{io, path::PathBuf};
use thiserror::Error;

/// A failed configuration check.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Project path does not exist")]
    ProjectNotFound,

    #[error("Project path must contain {}", MANIFEST_FILE)]
    MissingManifest,

    #[error("Output path is required")]
    MissingOutputPath,

    #[error("Output path is not a directory: {}", .0.display())]
    OutputNotDirectory(PathBuf),

    #[error("Cannot create output directory {}: {source}", .path.display())]
    OutputNotCreatable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Keystore file does not exist")]
    KeystoreNotFound,

    #[error("Keystore password is required")]
    MissingKeystorePassword,

    #[error("Key alias is required")]
    MissingKeyAlias,

    #[error("Key password is required")]
    MissingKeyPassword,
}

/// Runs every applicable check, emitting one `error` line on the first failure.
///
/// Returns `true` only when all checks pass. `require_signing` adds the
/// keystore checks needed by the package flow.
pub async fn validate(
    config: &BuildConfiguration,
    require_signing: bool,
    progress: &ProgressChannel,
) -> bool {
    match check(config, require_signing).await {
        Ok(()) => true,
        Err(e) => {
            progress.error(format!("Error: {e}"));
            false
        }
    }
}

/// Same checks as [`validate`] without reporting; the caller decides how to
/// surface the error.
///
/// Side effect: creates the output directory when it is missing.
pub async fn check(
    config: &BuildConfiguration,
    require_signing: bool,
) -> Result<(), ValidationError> {
    let project = config.project_path();
    if project.as_os_str().is_empty() || !exists(project).await {
        return Err(ValidationError::ProjectNotFound);
    }

    if !exists(&project.join(MANIFEST_FILE)).await {
        return Err(ValidationError::MissingManifest);
    }

    let output = config.output_path();
    if output.as_os_str().is_empty() {
        return Err(ValidationError::MissingOutputPath);
    }

    match tokio::fs::metadata(output).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(ValidationError::OutputNotDirectory(output.to_path_buf())),
        Err(_) => {
            tokio::fs::create_dir_all(output).await.map_err(|source| {
                ValidationError::OutputNotCreatable {
                    path: output.to_path_buf(),
                    source,
                }
            })?;
            log::debug!("Created output directory {}", output.display());
        }
    }

    if require_signing {
        let signing = config.signing();
        if signing.keystore_path.as_os_str().is_empty() || !exists(&signing.keystore_path).await
        {
            return Err(ValidationError::KeystoreNotFound);
        }
        if signing.keystore_password.is_empty() {
            return Err(ValidationError::MissingKeystorePassword);
        }
        if signing.key_alias.is_empty() {
            return Err(ValidationError::MissingKeyAlias);
        }
        if signing.key_password.is_empty() {
            return Err(ValidationError::MissingKeyPassword);
        }
    }

    Ok(())
}

async fn exists(path: &std::path::Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
