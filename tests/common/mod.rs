//! Fake React Native project shared by the flow tests.
//!
//! The package runner is `sh`, so the `react-native build-android --mode <v>`
//! invocation reads a `react-native` script from the project root.

#![allow(dead_code)]

use rn_build_automator::bundler::{
    BuildAutomator, BuildConfiguration, BuildConfigurationBuilder, RecordingSink,
    SigningCredentials, Toolchain,
};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tempfile::TempDir;

pub const BUILDS_BUNDLE: &str = r#"mode="$3"
out="android/app/build/outputs/bundle/$mode"
mkdir -p "$out"
printf 'aab-bytes' > "$out/app-$mode.aab"
echo "BUILD SUCCESSFUL"
"#;

pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new(react_native: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("MyApp");
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("package.json"), r#"{"name":"MyApp"}"#).unwrap();
        std::fs::write(root.join("react-native"), react_native).unwrap();
        std::fs::write(dir.path().join("upload.jks"), b"keystore").unwrap();
        Self { dir }
    }

    pub fn root(&self) -> PathBuf {
        self.dir.path().join("MyApp")
    }

    pub fn output(&self) -> PathBuf {
        self.dir.path().join("dist")
    }

    pub fn config(&self) -> BuildConfigurationBuilder {
        BuildConfigurationBuilder::new()
            .project_path(self.root())
            .output_path(self.output())
            .output_file_name("Shop")
    }

    pub fn signed_config(&self) -> BuildConfiguration {
        self.config()
            .signing(SigningCredentials::new(
                self.dir.path().join("upload.jks"),
                "storepw",
                "upload",
                "keypw",
            ))
            .build()
            .unwrap()
    }
}

pub fn automator(toolchain: Toolchain) -> (BuildAutomator, Arc<RecordingSink>) {
    let automator = BuildAutomator::with_toolchain(toolchain.with_package_runner("sh"));
    let sink = Arc::new(RecordingSink::new());
    automator.set_progress_sink(sink.clone());
    (automator, sink)
}

pub fn output_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}
