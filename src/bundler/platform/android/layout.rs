//! Filesystem and command-line conventions of a React Native Android project.
//!
//! The build tool does not report where it wrote the bundle; the location is
//! fixed by Gradle's output layout. Everything that depends on that layout
//! lives here as pure functions of `(project root, variant)`.

use crate::bundler::BuildVariant;
use std::path::{Path, PathBuf};

/// Manifest that marks a directory as a project root.
pub const MANIFEST_FILE: &str = "package.json";

/// Native Android subproject, relative to the project root.
pub const ANDROID_DIR: &str = "android";

pub const BUNDLE_EXTENSION: &str = "aab";
pub const PACKAGE_EXTENSION: &str = "apk";
/// Converter output: a zip holding one or more packages.
pub const PACKAGE_SET_EXTENSION: &str = "apks";

/// Scratch directory (inside the output directory) the package set is unpacked into.
pub const EXTRACT_DIR_NAME: &str = "extracted_apk";

#[cfg(windows)]
const GRADLE_WRAPPER: &str = "gradlew.bat";
#[cfg(not(windows))]
const GRADLE_WRAPPER: &str = "gradlew";

pub fn android_dir(project: &Path) -> PathBuf {
    project.join(ANDROID_DIR)
}

pub fn gradle_wrapper(project: &Path) -> PathBuf {
    android_dir(project).join(GRADLE_WRAPPER)
}

/// `<project>/android/app/build/outputs/bundle/<variant>/app-<variant>.aab`
pub fn bundle_artifact_path(project: &Path, variant: BuildVariant) -> PathBuf {
    let variant = variant.as_str();
    android_dir(project)
        .join("app")
        .join("build")
        .join("outputs")
        .join("bundle")
        .join(variant)
        .join(format!("app-{variant}.{BUNDLE_EXTENSION}"))
}

/// Arguments for the package runner: `react-native build-android --mode <variant>`.
pub fn build_args(variant: BuildVariant) -> Vec<String> {
    vec![
        "react-native".to_string(),
        "build-android".to_string(),
        "--mode".to_string(),
        variant.as_str().to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_path_follows_gradle_layout() {
        let path = bundle_artifact_path(Path::new("/home/u/MyApp"), BuildVariant::Release);
        assert_eq!(
            path,
            Path::new("/home/u/MyApp/android/app/build/outputs/bundle/release/app-release.aab")
        );

        let debug = bundle_artifact_path(Path::new("/p"), BuildVariant::Debug);
        assert!(debug.ends_with("bundle/debug/app-debug.aab"));
    }

    #[test]
    fn build_args_pass_variant_as_mode() {
        assert_eq!(
            build_args(BuildVariant::Debug),
            vec!["react-native", "build-android", "--mode", "debug"]
        );
    }
}
