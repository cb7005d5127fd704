//! React Native Android packaging pipeline.
//!
//! Drives the project's own toolchain end to end:
//!
//! 1. Validate the [`BuildConfiguration`]
//! 2. Optionally clean the Gradle build
//! 3. Build the app bundle (`.aab`) and pick it up from Gradle's output tree
//! 4. For the package flow: convert the bundle with `bundletool` into a
//!    signed universal package set and extract the `.apk`
//! 5. Copy the result into the output directory under a unique name
//!
//! Progress is streamed line by line to a single [`ProgressSink`].
//! [`BuildAutomator`] is the entry point.

pub mod builder;
pub mod error;
pub mod naming;
pub mod outcome;
pub mod platform;
pub mod process;
pub mod progress;
pub mod settings;
pub mod utils;
pub mod validate;

pub use builder::BuildAutomator;
pub use error::{Error, ErrorKind, Result};
pub use outcome::{BuildOutcome, BuiltArtifact, StepOutcome};
pub use process::ProcessRunner;
pub use progress::{ProgressChannel, ProgressEvent, ProgressSink, RecordingSink, Severity};
pub use settings::{
    BuildConfiguration, BuildConfigurationBuilder, BuildVariant, SigningCredentials, Toolchain,
};
pub use validate::{ValidationError, validate};
