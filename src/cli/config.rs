//! Resolves the [`BuildConfiguration`] and [`Toolchain`] for one invocation.
//!
//! A project document (`--config`) is read first; every flag that was given
//! then overrides the matching key. Relative paths are made absolute against
//! the current directory so later steps can change directories freely.

use super::args::BuildArgs;
use crate::bundler::{BuildConfiguration, BuildConfigurationBuilder, Toolchain};
use crate::error::Result;
use anyhow::Context as _;
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Loads a project document. `.toml` files are parsed as TOML, anything else as JSON.
///
/// The document is only read; unknown keys are ignored.
pub async fn load_document(path: &Path) -> Result<BuildConfiguration> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read project document {}", path.display()))?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    let config = if is_toml {
        toml::from_str(&text)?
    } else {
        serde_json::from_str(&text)?
    };
    Ok(config)
}

/// Builds the configuration from the optional document plus flag overrides.
pub async fn resolve(args: &BuildArgs) -> Result<BuildConfiguration> {
    let base = match &args.config {
        Some(path) => load_document(&absolute(path)?).await?,
        None => BuildConfiguration::default(),
    };
    absolutize_paths(apply_overrides(base, args)?)
}

fn apply_overrides(base: BuildConfiguration, args: &BuildArgs) -> Result<BuildConfiguration> {
    let mut signing = base.signing.clone();
    if let Some(path) = &args.keystore {
        signing.keystore_path = path.clone();
    }
    if let Some(pw) = &args.keystore_password {
        signing.keystore_password = pw.clone();
    }
    if let Some(alias) = &args.key_alias {
        signing.key_alias = alias.clone();
    }
    if let Some(pw) = &args.key_password {
        signing.key_password = pw.clone();
    }

    let clean = base.clean_build || args.clean;
    let mut builder = BuildConfigurationBuilder::from_config(base)
        .signing(signing)
        .clean_build(clean);

    if let Some(project) = &args.project {
        builder = builder.project_path(project);
    }
    if let Some(output) = &args.output {
        builder = builder.output_path(output);
    }
    if let Some(name) = &args.name {
        builder = builder.output_file_name(name.as_str());
    }
    if let Some(variant) = args.variant {
        builder = builder.variant(variant);
    }

    Ok(builder.build()?)
}

fn absolutize_paths(mut config: BuildConfiguration) -> Result<BuildConfiguration> {
    config.project_path = absolute(&config.project_path)?;
    config.output_path = absolute(&config.output_path)?;
    config.signing.keystore_path = absolute(&config.signing.keystore_path)?;
    Ok(config)
}

/// Absolute form of `path`. Empty paths stay empty so the validator still
/// reports them as missing.
fn absolute(path: &Path) -> Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(PathBuf::new());
    }
    Ok(path.absolutize()?.into_owned())
}

/// Toolchain with the `--npx`, `--java` and `--bundletool` overrides applied.
pub fn toolchain(args: &BuildArgs) -> Result<Toolchain> {
    let mut toolchain = Toolchain::default();
    if let Some(npx) = &args.npx {
        toolchain = toolchain.with_package_runner(npx);
    }
    if let Some(java) = &args.java {
        toolchain = toolchain.with_java(java);
    }
    if let Some(jar) = &args.bundletool {
        toolchain = toolchain.with_bundletool(absolute(jar)?);
    }
    Ok(toolchain)
}
