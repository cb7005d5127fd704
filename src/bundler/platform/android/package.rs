//! Installable package build.
//!
//! Builds the bundle first, then hands it to `bundletool build-apks` in
//! universal mode with the configured signing key, and delivers the single
//! universal package from the resulting package set.

use super::{StepContext, bundle, deliver, extract, layout};
use crate::bundler::{
    BuildConfiguration, BuiltArtifact, Result, StepOutcome,
    builder::tool_detection::find_bundletool, utils::fs, validate,
};
use std::path::{Path, PathBuf};

/// Builds a signed universal package and copies it to the output directory.
///
/// # Process
///
/// 1. Validate the configuration including signing credentials
/// 2. Build the bundle (same steps as the bundle flow)
/// 3. Locate `bundletool.jar`
/// 4. Convert bundle -> `.apks` package set
/// 5. Extract the package from the set
/// 6. Copy it to the output directory under a unique name
/// 7. Remove the scratch extraction directory (best effort)
pub async fn build_package(ctx: StepContext<'_>, config: &BuildConfiguration) -> Result<BuiltArtifact> {
    let progress = ctx.progress();
    validate::check(config, true).await?;

    progress.info("Starting APK build process...");

    let bundle = bundle::build_bundle(ctx, config).await?;

    progress.info("Locating bundletool...");
    let bundletool = find_bundletool(ctx.toolchain).await?;
    progress.success(format!("Found bundletool at: {}", bundletool.display()));

    progress.info("Converting AAB to APK...");
    let package_set = package_set_path(config.output_path(), &bundle.path);
    let args = conversion_args(&bundletool, &bundle.path, &package_set, config);
    let cwd = std::env::current_dir().unwrap_or_else(|_| config.output_path().to_path_buf());
    if !ctx.runner.run(ctx.toolchain.java(), args.as_slice(), &cwd).await {
        return Err(ctx.step_failed("AAB to APK conversion"));
    }

    progress.info("Extracting APK from archive...");
    let extract_dir = config.output_path().join(layout::EXTRACT_DIR_NAME);
    let delivered = async {
        let package = extract::extract_package(ctx, &package_set, &extract_dir).await?;
        deliver(progress, &package, config, layout::PACKAGE_EXTENSION, "APK").await
    }
    .await;

    let cleanup = match fs::remove_dir_all(&extract_dir).await {
        Ok(()) => StepOutcome::Completed,
        Err(e) => StepOutcome::Ignored(e.to_string()),
    };
    cleanup.resolve(progress)?;

    let artifact = delivered?;
    progress.success("APK build completed successfully!");
    Ok(artifact)
}

/// `<output>/<bundle stem>.apks`
fn package_set_path(output: &Path, bundle: &Path) -> PathBuf {
    let stem = bundle
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string());
    output.join(format!("{stem}.{}", layout::PACKAGE_SET_EXTENSION))
}

fn conversion_args(
    bundletool: &Path,
    bundle: &Path,
    package_set: &Path,
    config: &BuildConfiguration,
) -> Vec<String> {
    let signing = config.signing();
    vec![
        "-jar".to_string(),
        bundletool.display().to_string(),
        "build-apks".to_string(),
        format!("--bundle={}", bundle.display()),
        format!("--output={}", package_set.display()),
        format!("--ks={}", signing.keystore_path.display()),
        format!("--ks-key-alias={}", signing.key_alias),
        format!("--ks-pass=pass:{}", signing.keystore_password),
        format!("--key-pass=pass:{}", signing.key_password),
        "--mode=universal".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::{BuildConfigurationBuilder, SigningCredentials};

    #[test]
    fn package_set_sits_next_to_delivered_bundle() {
        assert_eq!(
            package_set_path(Path::new("/out"), Path::new("/out/MyApp07032024-1.aab")),
            Path::new("/out/MyApp07032024-1.apks")
        );
    }

    #[test]
    fn conversion_requests_universal_signed_output() {
        let config = BuildConfigurationBuilder::new()
            .project_path("/p")
            .output_path("/out")
            .signing(SigningCredentials::new("/k/upload.jks", "kspw", "upload", "keypw"))
            .build()
            .unwrap();

        let args = conversion_args(
            Path::new("/tools/bundletool.jar"),
            Path::new("/out/a.aab"),
            Path::new("/out/a.apks"),
            &config,
        );
        assert_eq!(
            args,
            vec![
                "-jar",
                "/tools/bundletool.jar",
                "build-apks",
                "--bundle=/out/a.aab",
                "--output=/out/a.apks",
                "--ks=/k/upload.jks",
                "--ks-key-alias=upload",
                "--ks-pass=pass:kspw",
                "--key-pass=pass:keypw",
                "--mode=universal",
            ]
        );
    }
}
