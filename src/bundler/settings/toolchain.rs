//! External tool settings.

use std::path::{Path, PathBuf};

/// Programs the pipeline shells out to.
///
/// The defaults match a stock React Native setup: `npx` drives the build and
/// `java -jar bundletool.jar` converts the bundle. Bare program names are
/// resolved against `PATH` at spawn time.
#[derive(Debug, Clone)]
pub struct Toolchain {
    /// Node package runner used for `react-native build-android`.
    package_runner: PathBuf,

    /// Java launcher used to run the converter jar.
    java: PathBuf,

    /// Converter jar given explicitly. Probed before the search list.
    bundletool: Option<PathBuf>,

    /// Replaces the default converter search list when set.
    bundletool_search_paths: Option<Vec<PathBuf>>,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self {
            package_runner: PathBuf::from("npx"),
            java: PathBuf::from("java"),
            bundletool: None,
            bundletool_search_paths: None,
        }
    }
}

impl Toolchain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package_runner(mut self, program: impl Into<PathBuf>) -> Self {
        self.package_runner = program.into();
        self
    }

    pub fn with_java(mut self, program: impl Into<PathBuf>) -> Self {
        self.java = program.into();
        self
    }

    pub fn with_bundletool(mut self, jar: impl Into<PathBuf>) -> Self {
        self.bundletool = Some(jar.into());
        self
    }

    /// Replaces the built-in converter search list.
    pub fn with_bundletool_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.bundletool_search_paths = Some(paths);
        self
    }

    pub fn package_runner(&self) -> &Path {
        &self.package_runner
    }

    pub fn java(&self) -> &Path {
        &self.java
    }

    pub fn bundletool(&self) -> Option<&Path> {
        self.bundletool.as_deref()
    }

    pub fn bundletool_search_paths(&self) -> Option<&[PathBuf]> {
        self.bundletool_search_paths.as_deref()
    }
}
