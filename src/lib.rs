//! React Native Android build automation library
//!
//! This library drives the Android packaging of a React Native project:
//! - builds the Android App Bundle (.aab) with the project's own toolchain
//! - converts the bundle into a signed universal APK with bundletool
//! - delivers the artifact to an output directory under a unique name
//!
//! It can be used both as a CLI tool and as a library dependency. Library
//! users start from [`bundler::BuildAutomator`].

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use bundler::{BuildAutomator, BuildConfiguration, BuildOutcome};
pub use error::{AutomatorError, CliError, Result};
