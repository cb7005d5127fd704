//! Package set extraction.
//!
//! The converter writes a zip with a `.apks` extension. It is renamed to
//! `.zip`, unpacked with the platform's own tool (`unzip` on Unix-likes,
//! `Expand-Archive` on Windows) and searched for the first package.

use super::{StepContext, layout::PACKAGE_EXTENSION};
use crate::bundler::{Error, Result, StepOutcome, error::ErrorExt, utils::fs};
use std::path::{Path, PathBuf};
#[cfg(not(windows))]
use std::ffi::OsStr;

/// Unpacks `package_set` into a fresh `extract_dir` and returns the first
/// `.apk` found inside.
///
/// The renamed archive is deleted afterwards whether or not a package was found.
pub async fn extract_package(
    ctx: StepContext<'_>,
    package_set: &Path,
    extract_dir: &Path,
) -> Result<PathBuf> {
    let zip = package_set.with_extension("zip");
    tokio::fs::rename(package_set, &zip)
        .await
        .fs_context("renaming package set", package_set)?;

    let found = unpack_and_find(ctx, &zip, extract_dir).await;

    let cleanup = match fs::remove_file(&zip).await {
        Ok(()) => StepOutcome::Completed,
        Err(e) => StepOutcome::Ignored(e.to_string()),
    };
    cleanup.resolve(ctx.progress())?;

    found
}

async fn unpack_and_find(ctx: StepContext<'_>, zip: &Path, extract_dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(extract_dir, true).await?;

    if !unzip(ctx, zip, extract_dir).await {
        return Err(ctx.step_failed("Extracting APK from .apks file"));
    }

    find_file_with_extension(extract_dir, PACKAGE_EXTENSION)
        .await?
        .ok_or_else(|| Error::NoPackageInArchive {
            extension: PACKAGE_EXTENSION,
            dir: extract_dir.to_path_buf(),
        })
}

#[cfg(not(windows))]
async fn unzip(ctx: StepContext<'_>, zip: &Path, extract_dir: &Path) -> bool {
    let cwd = std::env::current_dir().unwrap_or_else(|_| extract_dir.to_path_buf());
    ctx.runner
        .run(
            "unzip",
            &[
                OsStr::new("-o"),
                zip.as_os_str(),
                OsStr::new("-d"),
                extract_dir.as_os_str(),
            ],
            &cwd,
        )
        .await
}

#[cfg(windows)]
async fn unzip(ctx: StepContext<'_>, zip: &Path, extract_dir: &Path) -> bool {
    let cwd = std::env::current_dir().unwrap_or_else(|_| extract_dir.to_path_buf());
    let script = format!(
        "Expand-Archive -Path \"{}\" -DestinationPath \"{}\" -Force",
        powershell_escape(&zip.to_string_lossy()),
        powershell_escape(&extract_dir.to_string_lossy()),
    );
    ctx.runner
        .run("powershell", &["-NoProfile", "-Command", script.as_str()], &cwd)
        .await
}

/// Escapes a value for a double-quoted PowerShell string.
#[cfg_attr(not(windows), allow(dead_code))]
fn powershell_escape(value: &str) -> String {
    value.replace('`', "``").replace('"', "`\"").replace('$', "`$")
}

/// Depth-first search for the first regular file with `extension`.
pub async fn find_file_with_extension(dir: &Path, extension: &'static str) -> Result<Option<PathBuf>> {
    let dir = dir.to_path_buf();
    let found = tokio::task::spawn_blocking(move || {
        walkdir::WalkDir::new(&dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .find(|entry| {
                entry.file_type().is_file()
                    && entry.path().extension().is_some_and(|ext| ext == extension)
            })
            .map(|entry| entry.into_path())
    })
    .await?;
    Ok(found)
}
