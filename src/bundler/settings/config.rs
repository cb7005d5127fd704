//! Per-invocation build configuration.

use super::{BuildVariant, SigningCredentials};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Everything one pipeline run needs to know about the project and where to
/// put the result.
///
/// Constructed with [`super::BuildConfigurationBuilder`] or deserialized from
/// a project document using the keys the desktop front end writes:
///
/// ```json
/// {
///   "projectPath": "/home/u/MyApp",
///   "outputPath": "/home/u/dist",
///   "outputFileName": "",
///   "keystorePath": "/home/u/keys/upload.jks",
///   "keystorePassword": "...",
///   "keyAlias": "upload",
///   "keyPassword": "...",
///   "buildMode": "release",
///   "cleanBuild": true
/// }
/// ```
///
/// Empty values are accepted here; the validator decides what is required
/// for the requested flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildConfiguration {
    /// Root of the mobile project (contains `package.json`).
    pub project_path: PathBuf,

    /// Directory receiving the final artifacts. Created if missing.
    pub output_path: PathBuf,

    /// Desired artifact base name. Blank means `<project><DD><MM><YYYY>`.
    pub output_file_name: Option<String>,

    #[serde(flatten)]
    pub signing: SigningCredentials,

    #[serde(rename = "buildMode")]
    pub variant: BuildVariant,

    /// Run the Gradle `clean` task before building.
    pub clean_build: bool,
}

impl BuildConfiguration {
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Desired output name if one was given and it is not blank.
    pub fn desired_name(&self) -> Option<&str> {
        self.output_file_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    pub fn signing(&self) -> &SigningCredentials {
        &self.signing
    }

    pub fn variant(&self) -> BuildVariant {
        self.variant
    }

    pub fn clean_build(&self) -> bool {
        self.clean_build
    }
}
