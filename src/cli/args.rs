//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap, with validation of
//! argument combinations that clap cannot express on its own.

use crate::bundler::BuildVariant;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// React Native Android build automation
#[derive(Parser, Debug)]
#[command(
    name = "rn-build-automator",
    version,
    about = "Builds React Native Android bundles (.aab) and universal APKs",
    long_about = "Builds a React Native project's Android App Bundle with the project's own toolchain, \
optionally converts it to a signed universal APK with bundletool, and copies the result into an output \
directory under a unique name.

Usage:
  rn-build-automator bundle --project ~/MyApp --output ~/dist
  rn-build-automator package --config ~/projects/myapp.json
  rn-build-automator apk -p ~/MyApp -o ~/dist --keystore upload.jks --key-alias upload

Exit code 0 = artifact guaranteed to exist at the reported path."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Print the build result as JSON on stdout (progress goes to stderr)
    #[arg(long, global = true)]
    pub json: bool,

    /// Only print errors and the final result
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// What to build.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the Android App Bundle (.aab)
    #[command(visible_alias = "aab")]
    Bundle(BuildArgs),

    /// Build a signed universal APK (builds the .aab first)
    #[command(visible_alias = "apk")]
    Package(BuildArgs),
}

impl Command {
    pub fn build_args(&self) -> &BuildArgs {
        match self {
            Command::Bundle(args) | Command::Package(args) => args,
        }
    }

    pub fn requires_signing(&self) -> bool {
        matches!(self, Command::Package(_))
    }
}

/// Build configuration flags. Each one overrides the matching key of `--config`.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Project document (JSON, or TOML by .toml extension) to start from
    #[arg(short = 'c', long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// React Native project root (contains package.json)
    #[arg(short = 'p', long, value_name = "DIR")]
    pub project: Option<PathBuf>,

    /// Directory receiving the artifact (created if missing)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Artifact base name (default: <project><DD><MM><YYYY>)
    #[arg(short = 'n', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Build variant: release, debug
    #[arg(short = 'm', long = "mode", visible_alias = "variant", value_name = "VARIANT")]
    pub variant: Option<BuildVariant>,

    /// Run `gradlew clean` before building
    #[arg(long)]
    pub clean: bool,

    /// Keystore used to sign the APK
    #[arg(long, value_name = "FILE")]
    pub keystore: Option<PathBuf>,

    /// Keystore password
    #[arg(long, env = "RN_KEYSTORE_PASSWORD", hide_env_values = true)]
    pub keystore_password: Option<String>,

    /// Alias of the signing key inside the keystore
    #[arg(long, value_name = "ALIAS")]
    pub key_alias: Option<String>,

    /// Signing key password
    #[arg(long, env = "RN_KEY_PASSWORD", hide_env_values = true)]
    pub key_password: Option<String>,

    /// Node package runner used to invoke react-native
    #[arg(long, env = "RN_NPX", value_name = "PROGRAM")]
    pub npx: Option<PathBuf>,

    /// Java launcher used to run bundletool
    #[arg(long, env = "RN_JAVA", value_name = "PROGRAM")]
    pub java: Option<PathBuf>,

    /// bundletool.jar to use instead of searching the default locations
    #[arg(long, env = "RN_BUNDLETOOL", value_name = "JAR")]
    pub bundletool: Option<PathBuf>,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        let args = self.command.build_args();

        if args.config.is_none() {
            if args.project.is_none() {
                return Err("--project is required unless --config is given".to_string());
            }
            if args.output.is_none() {
                return Err("--output is required unless --config is given".to_string());
            }
        }

        if args.name.as_deref().is_some_and(|n| n.contains(['/', '\\'])) {
            return Err("--name must be a file name, not a path".to_string());
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for colored terminal output
    output: super::OutputManager,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.quiet, args.json);
        Self { output }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Print warning message if not in quiet mode
    pub fn warn(&self, message: &str) -> std::io::Result<()> {
        self.output.warn(message)
    }

    /// Print success message if not in quiet mode
    pub fn success(&self, message: &str) -> std::io::Result<()> {
        self.output.success(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn aliases_select_flow() {
        let args = parse(&["rn-build-automator", "apk", "-p", "/p", "-o", "/o"]);
        assert!(args.command.requires_signing());
        let args = parse(&["rn-build-automator", "aab", "-p", "/p", "-o", "/o", "--mode", "debug"]);
        assert!(!args.command.requires_signing());
        assert_eq!(args.command.build_args().variant, Some(BuildVariant::Debug));
    }

    #[test]
    fn project_and_output_required_without_config() {
        let args = parse(&["rn-build-automator", "bundle", "-p", "/p"]);
        assert!(args.validate().unwrap_err().contains("--output"));

        let args = parse(&["rn-build-automator", "bundle", "-c", "proj.json"]);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn unknown_variant_is_rejected() {
        assert!(
            Args::try_parse_from(["rn-build-automator", "bundle", "-p", "/p", "-o", "/o", "-m", "qa"])
                .is_err()
        );
    }

    #[test]
    fn name_must_not_be_a_path() {
        let args = parse(&["rn-build-automator", "bundle", "-p", "/p", "-o", "/o", "-n", "../x"]);
        assert!(args.validate().is_err());
    }
}
