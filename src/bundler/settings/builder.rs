//! Builder for constructing [`BuildConfiguration`].

use super::{BuildConfiguration, BuildVariant, SigningCredentials};
use std::path::{Path, PathBuf};

/// Fluent builder for [`BuildConfiguration`].
///
/// # Examples
///
/// ```no_run
/// use rn_build_automator::bundler::{BuildConfigurationBuilder, BuildVariant, SigningCredentials};
///
/// # fn example() -> rn_build_automator::bundler::Result<()> {
/// let config = BuildConfigurationBuilder::new()
///     .project_path("/home/u/MyApp")
///     .output_path("/home/u/dist")
///     .variant(BuildVariant::Release)
///     .signing(SigningCredentials::new("/keys/upload.jks", "pw", "upload", "pw"))
///     .clean_build(true)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct BuildConfigurationBuilder {
    project_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    output_file_name: Option<String>,
    signing: SigningCredentials,
    variant: BuildVariant,
    clean_build: bool,
}

impl BuildConfigurationBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Starts from an existing configuration, e.g. one loaded from a project document.
    pub fn from_config(config: BuildConfiguration) -> Self {
        Self {
            project_path: Some(config.project_path),
            output_path: Some(config.output_path),
            output_file_name: config.output_file_name,
            signing: config.signing,
            variant: config.variant,
            clean_build: config.clean_build,
        }
    }

    /// Sets the project root.
    ///
    /// # Required
    pub fn project_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.project_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the output directory.
    ///
    /// # Required
    pub fn output_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.output_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn output_file_name(mut self, name: impl Into<String>) -> Self {
        self.output_file_name = Some(name.into());
        self
    }

    pub fn signing(mut self, signing: SigningCredentials) -> Self {
        self.signing = signing;
        self
    }

    /// Default: [`BuildVariant::Release`]
    pub fn variant(mut self, variant: BuildVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Default: `false`
    pub fn clean_build(mut self, clean: bool) -> Self {
        self.clean_build = clean;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `project_path` or `output_path` was never set.
    /// Whether the paths exist is checked later by the validator.
    pub fn build(self) -> crate::bundler::Result<BuildConfiguration> {
        use crate::bundler::error::Context;

        Ok(BuildConfiguration {
            project_path: self.project_path.context("project_path is required")?,
            output_path: self.output_path.context("output_path is required")?,
            output_file_name: self.output_file_name,
            signing: self.signing,
            variant: self.variant,
            clean_build: self.clean_build,
        })
    }
}
