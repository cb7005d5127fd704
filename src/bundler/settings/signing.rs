//! Signing credentials for the package flow.

use serde::Deserialize;
use std::{fmt, path::PathBuf};

/// Keystore and key used by the converter to sign the installable package.
///
/// All four fields are required for the package flow and ignored by the
/// bundle-only flow. Passwords never appear in `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SigningCredentials {
    /// Path to the keystore archive.
    pub keystore_path: PathBuf,
    pub keystore_password: String,
    pub key_alias: String,
    pub key_password: String,
}

impl SigningCredentials {
    pub fn new(
        keystore_path: impl Into<PathBuf>,
        keystore_password: impl Into<String>,
        key_alias: impl Into<String>,
        key_password: impl Into<String>,
    ) -> Self {
        Self {
            keystore_path: keystore_path.into(),
            keystore_password: keystore_password.into(),
            key_alias: key_alias.into(),
            key_password: key_password.into(),
        }
    }
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn mask(secret: &str) -> &'static str {
            if secret.is_empty() { "<empty>" } else { "****" }
        }

        f.debug_struct("SigningCredentials")
            .field("keystore_path", &self.keystore_path)
            .field("keystore_password", &mask(&self.keystore_password))
            .field("key_alias", &self.key_alias)
            .field("key_password", &mask(&self.key_password))
            .finish()
    }
}
