//! Output artifact naming.
//!
//! Names come from the configuration when given, otherwise from the project
//! directory plus today's date. Collisions in the output directory get a
//! numeric suffix.
//!
//! Uniqueness is checked against the filesystem one candidate at a time with
//! no exclusive create, so two automators writing to the same directory at
//! the same moment can still pick the same name.

use crate::bundler::BuildConfiguration;
use chrono::{Datelike, Local, NaiveDate};
use std::path::Path;

/// Extensions stripped from a user supplied name before the requested one is appended.
const KNOWN_EXTENSIONS: [&str; 2] = [".aab", ".apk"];

/// Derives `<base>.<extension>` using today's local date for generated names.
pub fn derive_name(config: &BuildConfiguration, extension: &str) -> String {
    derive_name_on(config, extension, Local::now().date_naive())
}

/// Same as [`derive_name`] with an explicit date.
pub fn derive_name_on(config: &BuildConfiguration, extension: &str, today: NaiveDate) -> String {
    let base = match config.desired_name() {
        Some(name) => KNOWN_EXTENSIONS
            .iter()
            .find_map(|ext| name.strip_suffix(ext))
            .unwrap_or(name)
            .to_string(),
        None => {
            let project = config
                .project_path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!(
                "{project}{:02}{:02}{:04}",
                today.day(),
                today.month(),
                today.year()
            )
        }
    };

    format!("{base}.{extension}")
}

/// Returns `file_name` if it is free in `output_dir`, otherwise the first free
/// `<stem>-N<.ext>` for N = 1, 2, ...
pub fn ensure_unique(output_dir: &Path, file_name: &str) -> String {
    if !output_dir.join(file_name).exists() {
        return file_name.to_string();
    }

    let (stem, ext) = split_extension(file_name);
    let mut counter = 1u32;
    loop {
        let candidate = format!("{stem}-{counter}{ext}");
        if !output_dir.join(&candidate).exists() {
            log::debug!("{file_name} exists in {}, using {candidate}", output_dir.display());
            return candidate;
        }
        counter += 1;
    }
}

/// Splits `name.ext` into `("name", ".ext")`. Dotfiles and extensionless
/// names keep an empty extension.
fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name.split_at(idx),
        _ => (file_name, ""),
    }
}
