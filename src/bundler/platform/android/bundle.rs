//! App bundle build.

use super::{StepContext, deliver, layout};
use crate::bundler::{
    BuildConfiguration, BuiltArtifact, Error, Result, StepOutcome, validate,
};

/// Builds the bundle and copies it to the output directory.
///
/// # Process
///
/// 1. Validate the configuration (no signing needed)
/// 2. Optionally run `gradlew clean` (best effort)
/// 3. Run `react-native build-android --mode <variant>`
/// 4. Pick up the bundle from its conventional Gradle output path
/// 5. Copy it to the output directory under a unique name
pub async fn build_bundle(ctx: StepContext<'_>, config: &BuildConfiguration) -> Result<BuiltArtifact> {
    let progress = ctx.progress();
    validate::check(config, false).await?;

    progress.info("Starting AAB build process...");

    if config.clean_build() {
        clean(ctx, config).await.resolve(progress)?;
    }

    progress.info("Building Android App Bundle...");
    let project = config.project_path();
    let args = layout::build_args(config.variant());
    let built = ctx
        .runner
        .run(ctx.toolchain.package_runner(), args.as_slice(), project)
        .await;
    if !built {
        return Err(ctx.step_failed("AAB build"));
    }

    // A zero exit code is not proof of output; the file must be where Gradle puts it.
    let bundle = layout::bundle_artifact_path(project, config.variant());
    if !tokio::fs::try_exists(&bundle).await.unwrap_or(false) {
        return Err(Error::ArtifactNotFound {
            artifact: "AAB file",
            path: bundle,
        });
    }
    progress.success(format!("AAB generated successfully at: {}", bundle.display()));

    let artifact = deliver(progress, &bundle, config, layout::BUNDLE_EXTENSION, "AAB").await?;
    progress.success("AAB build completed successfully!");
    Ok(artifact)
}

/// Runs the Gradle `clean` task. Never fatal.
async fn clean(ctx: StepContext<'_>, config: &BuildConfiguration) -> StepOutcome {
    ctx.progress().info("Cleaning previous build...");

    let gradlew = layout::gradle_wrapper(config.project_path());
    if !tokio::fs::try_exists(&gradlew).await.unwrap_or(false) {
        return StepOutcome::Warning(format!(
            "Gradle wrapper not found at {}, skipping clean",
            gradlew.display()
        ));
    }

    let android = layout::android_dir(config.project_path());
    if ctx.runner.run(&gradlew, &["clean"], &android).await {
        StepOutcome::Completed
    } else if ctx.runner.is_cancelled() {
        StepOutcome::Fatal(Error::Cancelled)
    } else {
        StepOutcome::Warning("Clean build failed, continuing anyway...".to_string())
    }
}
