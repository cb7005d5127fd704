//! End-to-end runs of the build flows against a fake toolchain.

#![cfg(unix)]

mod common;

use common::{BUILDS_BUNDLE, Project, automator, output_files};
use rn_build_automator::bundler::{BuildOutcome, Severity, Toolchain};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

#[tokio::test]
async fn bundle_is_delivered_under_unique_names() {
    let project = Project::new(BUILDS_BUNDLE);
    let (automator, sink) = automator(Toolchain::default());
    let config = project.config().build().unwrap();

    let first = automator.build_bundle(&config).await;
    assert!(first.success, "{:?}", first.error);
    assert_eq!(first.path, Some(project.output().join("Shop.aab")));
    assert_eq!(first.size, Some(9));
    assert_eq!(first.checksum.as_ref().map(String::len), Some(64));

    let second = automator.build_bundle(&config).await;
    assert_eq!(second.path, Some(project.output().join("Shop-1.aab")));
    assert_eq!(output_files(&project.output()), vec!["Shop-1.aab", "Shop.aab"]);

    let info = sink.messages(Severity::Info);
    assert!(info.iter().any(|l| l == "BUILD SUCCESSFUL"));
    assert!(info.iter().any(|l| l.starts_with("Executing: sh react-native build-android")));
    assert!(
        sink.messages(Severity::Success)
            .contains(&"AAB build completed successfully!".to_string())
    );
    assert!(sink.messages(Severity::Error).is_empty());
    assert!(!automator.is_busy());
}

#[tokio::test]
async fn debug_variant_reads_debug_output() {
    let project = Project::new(BUILDS_BUNDLE);
    let (automator, _) = automator(Toolchain::default());
    let config = project
        .config()
        .variant("debug".parse().unwrap())
        .build()
        .unwrap();

    let outcome = automator.build_bundle(&config).await;
    assert!(outcome.success, "{:?}", outcome.error);
    assert!(
        project
            .root()
            .join("android/app/build/outputs/bundle/debug/app-debug.aab")
            .exists()
    );
}

#[tokio::test]
async fn zero_exit_without_bundle_is_a_failure() {
    let project = Project::new("echo 'pretending to build'\n");
    let (automator, sink) = automator(Toolchain::default());
    let config = project.config().build().unwrap();

    let outcome = automator.build_bundle(&config).await;
    assert!(!outcome.success);
    assert_eq!(outcome.path, None);
    let error = outcome.error.unwrap();
    assert!(error.contains("AAB file not found at expected path"), "{error}");
    assert!(output_files(&project.output()).is_empty());
    assert_eq!(sink.messages(Severity::Error), vec![error]);
}

#[tokio::test]
async fn failing_build_reports_exit_code_and_stderr() {
    let project = Project::new("echo 'Task :app:bundleRelease FAILED' >&2\nexit 1\n");
    let (automator, sink) = automator(Toolchain::default());
    let config = project.config().build().unwrap();

    let outcome = automator.build_bundle(&config).await;
    assert_eq!(outcome, BuildOutcome::failure("AAB build failed"));

    let errors = sink.messages(Severity::Error);
    assert_eq!(errors[0], "Command failed with exit code 1");
    assert!(errors[1].starts_with("Error output: Task :app:bundleRelease FAILED"));
    assert_eq!(errors.last().unwrap(), "AAB build failed");
}

#[tokio::test]
async fn invalid_configuration_spawns_nothing() {
    let project = Project::new(BUILDS_BUNDLE);
    std::fs::remove_file(project.root().join("package.json")).unwrap();
    let (automator, sink) = automator(Toolchain::default());

    let outcome = automator.build_bundle(&project.config().build().unwrap()).await;
    assert_eq!(
        outcome.error.as_deref(),
        Some("Error: Project path must contain package.json")
    );
    assert!(!sink.messages(Severity::Info).iter().any(|l| l.starts_with("Executing:")));
}

#[tokio::test]
async fn missing_gradle_wrapper_skips_clean_with_warning() {
    let project = Project::new(BUILDS_BUNDLE);
    let (automator, sink) = automator(Toolchain::default());
    let config = project.config().clean_build(true).build().unwrap();

    let outcome = automator.build_bundle(&config).await;
    assert!(outcome.success, "{:?}", outcome.error);
    assert!(
        sink.messages(Severity::Info)
            .iter()
            .any(|l| l.starts_with("Warning: Gradle wrapper not found"))
    );
}

#[tokio::test]
async fn second_build_is_rejected_and_cancel_frees_the_automator() {
    let project = Project::new("echo started\nexec sleep 30\n");
    let (automator, sink) = automator(Toolchain::default());
    let automator = Arc::new(automator);
    let config = project.config().build().unwrap();

    let running = {
        let automator = Arc::clone(&automator);
        let config = config.clone();
        tokio::spawn(async move { automator.build_bundle(&config).await })
    };

    let deadline = Instant::now() + Duration::from_secs(10);
    while !sink.messages(Severity::Info).iter().any(|l| l == "started") {
        assert!(Instant::now() < deadline, "fake build never started");
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    assert!(automator.is_busy());

    let rejected = automator.build_bundle(&config).await;
    assert_eq!(rejected, BuildOutcome::failure("Build already in progress"));

    let cancelled_at = Instant::now();
    automator.cancel();
    assert!(!automator.is_busy());

    let outcome = tokio::time::timeout(Duration::from_secs(10), running)
        .await
        .expect("cancelled build should finish")
        .unwrap();
    assert_eq!(outcome, BuildOutcome::failure("Build cancelled"));
    assert!(cancelled_at.elapsed() < Duration::from_secs(10));
    assert!(sink.messages(Severity::Info).contains(&"Build cancelled by user".to_string()));
    assert!(output_files(&project.output()).is_empty());
}

#[tokio::test]
async fn cancel_when_idle_is_a_no_op() {
    let (automator, sink) = automator(Toolchain::default());
    automator.cancel();
    assert!(!automator.is_busy());
    assert!(sink.events().is_empty());
}

#[tokio::test]
async fn package_requires_signing_before_building() {
    let project = Project::new(BUILDS_BUNDLE);
    let (automator, _) = automator(Toolchain::default());
    let config = project.config().build().unwrap();

    let outcome = automator.build_package(&config).await;
    assert_eq!(outcome.error.as_deref(), Some("Error: Keystore file does not exist"));
    assert!(!project.root().join("android").exists());
}

#[tokio::test]
async fn package_without_bundletool_lists_searched_locations() {
    let project = Project::new(BUILDS_BUNDLE);
    let tools = tempfile::tempdir().unwrap();
    let (automator, _) = automator(
        Toolchain::default().with_bundletool_search_paths(vec![tools.path().join("bundletool.jar")]),
    );

    let outcome = automator.build_package(&project.signed_config()).await;
    let error = outcome.error.unwrap();
    assert!(error.starts_with("Error during APK build: bundletool.jar not found"), "{error}");
    assert!(error.contains(&tools.path().join("bundletool.jar").display().to_string()));
    // The bundle step already delivered its artifact.
    assert_eq!(output_files(&project.output()), vec!["Shop.aab"]);
}

#[tokio::test]
async fn failed_conversion_leaves_no_package() {
    let project = Project::new(BUILDS_BUNDLE);
    let tools = tempfile::tempdir().unwrap();
    let jar = tools.path().join("bundletool.jar");
    std::fs::write(&jar, b"jar").unwrap();
    let (automator, sink) = automator(Toolchain::default().with_bundletool(&jar).with_java("false"));

    let outcome = automator.build_package(&project.signed_config()).await;
    assert_eq!(outcome, BuildOutcome::failure("AAB to APK conversion failed"));
    assert!(
        sink.messages(Severity::Info)
            .iter()
            .any(|l| l.contains("--ks-pass=pass:**** --key-pass=pass:****"))
    );
    assert!(
        !sink.events().iter().any(|e| e.message.contains("storepw") || e.message.contains("keypw"))
    );
    assert!(!output_files(&project.output()).iter().any(|f| f.ends_with(".apk")));
}
