//! Build variants.

use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Named build configuration passed to the build tool as `--mode`.
///
/// The variant also fixes where the build tool drops its bundle, see
/// [`crate::bundler::platform::android::layout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildVariant {
    #[default]
    Release,
    Debug,
}

impl BuildVariant {
    /// All known variants.
    pub const ALL: [BuildVariant; 2] = [BuildVariant::Release, BuildVariant::Debug];

    /// Name as understood by the build tool and used in output paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildVariant::Release => "release",
            BuildVariant::Debug => "debug",
        }
    }
}

impl fmt::Display for BuildVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            // Blank form fields fall back to the default.
            "" | "release" => Ok(BuildVariant::Release),
            "debug" => Ok(BuildVariant::Debug),
            other => Err(format!(
                "Invalid build variant: {other}. Valid variants: {}",
                BuildVariant::ALL.map(|v| v.as_str()).join(", ")
            )),
        }
    }
}

impl<'de> Deserialize<'de> for BuildVariant {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
