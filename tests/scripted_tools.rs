//! Flows that execute fake tool scripts directly (`java`, `gradlew`).
//!
//! Tests here share one lock: exec'ing a script that another thread is still
//! writing (and a concurrent fork inherited) fails with ETXTBSY.

#![cfg(unix)]

mod common;

use common::{BUILDS_BUNDLE, Project, automator, output_files};
use rn_build_automator::bundler::{BuildOutcome, Severity, Toolchain};
use std::{
    os::unix::fs::PermissionsExt,
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

static SERIAL: Mutex<()> = Mutex::const_new(());

fn write_tool(path: &Path, body: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, format!("#!/bin/sh\n{body}")).unwrap();
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_path_buf()
}

/// Fake `java -jar bundletool.jar build-apks`: zips `entries` (shell
/// commands run in an empty directory) into the `--output=` path.
fn fake_bundletool_java(dir: &Path, entries: &str) -> PathBuf {
    write_tool(
        &dir.join("java"),
        &format!(
            r#"for arg in "$@"; do
  case "$arg" in
    --output=*) out="${{arg#--output=}}" ;;
  esac
done
work=$(mktemp -d)
cd "$work" || exit 1
{entries}
zip -qr "$out" . || exit 1
cd / && rm -rf "$work"
"#
        ),
    )
}

/// `zip`/`unzip` are needed to fake the converter's archive.
fn archive_tools_available() -> bool {
    let available = which::which("zip").is_ok() && which::which("unzip").is_ok();
    if !available {
        eprintln!("zip/unzip not installed, skipping");
    }
    available
}

fn toolchain_with_java(tools: &Path, java: PathBuf) -> Toolchain {
    let jar = tools.join("bundletool.jar");
    std::fs::write(&jar, b"jar").unwrap();
    Toolchain::default().with_bundletool(jar).with_java(java)
}

#[tokio::test]
async fn universal_package_is_extracted_and_delivered() {
    let _serial = SERIAL.lock().await;
    if !archive_tools_available() {
        return;
    }

    let project = Project::new(BUILDS_BUNDLE);
    let tools = tempfile::tempdir().unwrap();
    let java = fake_bundletool_java(
        tools.path(),
        "mkdir -p splits && printf 'apk' > splits/universal.apk && printf 'toc' > toc.pb",
    );
    let (automator, sink) = automator(toolchain_with_java(tools.path(), java));

    let outcome = automator.build_package(&project.signed_config()).await;
    assert!(outcome.success, "{:?}", outcome.error);
    assert_eq!(outcome.path, Some(project.output().join("Shop.apk")));
    assert_eq!(outcome.size, Some(3));

    // The package set, its zip and the extraction directory are all gone.
    assert_eq!(output_files(&project.output()), vec!["Shop.aab", "Shop.apk"]);
    assert!(sink.messages(Severity::Error).is_empty());
    assert!(
        sink.messages(Severity::Success)
            .contains(&"APK build completed successfully!".to_string())
    );
}

#[tokio::test]
async fn archive_without_package_fails_once_and_cleans_up() {
    let _serial = SERIAL.lock().await;
    if !archive_tools_available() {
        return;
    }

    let project = Project::new(BUILDS_BUNDLE);
    let tools = tempfile::tempdir().unwrap();
    let java = fake_bundletool_java(tools.path(), "printf 'toc' > toc.pb");
    let (automator, sink) = automator(toolchain_with_java(tools.path(), java));

    let outcome = automator.build_package(&project.signed_config()).await;
    assert!(!outcome.success);
    assert_eq!(outcome.path, None);
    let error = outcome.error.unwrap();
    assert!(
        error.starts_with("Error during APK build: no apk file found in extracted archive"),
        "{error}"
    );

    assert_eq!(sink.messages(Severity::Error), vec![error]);
    assert_eq!(output_files(&project.output()), vec!["Shop.aab"]);
}

#[tokio::test]
async fn cancel_during_clean_stops_the_build() {
    let _serial = SERIAL.lock().await;

    let project = Project::new(BUILDS_BUNDLE);
    write_tool(
        &project.root().join("android").join("gradlew"),
        "echo cleaning\nexec sleep 30\n",
    );
    let (automator, sink) = automator(Toolchain::default());
    let automator = Arc::new(automator);
    let config = project.config().clean_build(true).build().unwrap();

    let running = {
        let automator = Arc::clone(&automator);
        tokio::spawn(async move { automator.build_bundle(&config).await })
    };

    let deadline = Instant::now() + Duration::from_secs(10);
    while !sink.messages(Severity::Info).iter().any(|l| l == "cleaning") {
        assert!(Instant::now() < deadline, "clean never started");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    automator.cancel();

    let outcome = tokio::time::timeout(Duration::from_secs(10), running)
        .await
        .expect("cancelled build should finish")
        .unwrap();
    assert_eq!(outcome, BuildOutcome::failure("Build cancelled"));
    assert!(
        !sink.messages(Severity::Info)
            .iter()
            .any(|l| l.starts_with("Executing: sh react-native"))
    );
    assert!(
        !sink.messages(Severity::Info)
            .iter()
            .any(|l| l.starts_with("Warning: Clean build failed"))
    );
}
