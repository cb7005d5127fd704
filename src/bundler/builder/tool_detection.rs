//! Converter tool discovery.
//!
//! `bundletool.jar` is not on `PATH`; it ships next to the application or is
//! dropped somewhere by the user. Candidates are probed in a fixed order and
//! the first existing file wins.

use crate::bundler::{Error, Result, Toolchain};
use std::path::PathBuf;

pub const BUNDLETOOL_JAR: &str = "bundletool.jar";

/// Directory an installer puts the converter in.
#[cfg(windows)]
fn install_dir() -> Option<PathBuf> {
    Some(PathBuf::from(r"C:\Program Files\React Native Build Automator"))
}

#[cfg(not(windows))]
fn install_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join("rn-build-automator"))
}

/// Ordered converter locations: explicit override, install directory,
/// resource directory, application root, current working directory.
///
/// A toolchain with its own search list uses that instead of the four
/// defaults (the explicit override still comes first).
pub fn bundletool_candidates(toolchain: &Toolchain) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> = toolchain.bundletool().map(PathBuf::from).into_iter().collect();

    if let Some(paths) = toolchain.bundletool_search_paths() {
        candidates.extend(paths.iter().cloned());
        return candidates;
    }

    let app_root = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from));

    let locations = [
        install_dir(),
        app_root.as_ref().map(|root| root.join("resources")),
        app_root,
        std::env::current_dir().ok(),
    ];
    for dir in locations.into_iter().flatten() {
        let candidate = dir.join(BUNDLETOOL_JAR);
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

/// Returns the first existing candidate, or [`Error::ToolNotFound`] listing
/// every location probed.
pub async fn find_bundletool(toolchain: &Toolchain) -> Result<PathBuf> {
    let candidates = bundletool_candidates(toolchain);
    for candidate in &candidates {
        if tokio::fs::try_exists(candidate).await.unwrap_or(false) {
            log::debug!("Found {BUNDLETOOL_JAR} at {}", candidate.display());
            return Ok(candidate.clone());
        }
        log::debug!("No {BUNDLETOOL_JAR} at {}", candidate.display());
    }

    Err(Error::ToolNotFound {
        tool: BUNDLETOOL_JAR,
        searched: candidates,
    })
}
