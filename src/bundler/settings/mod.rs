//! Configuration types for build runs.
//!
//! [`BuildConfiguration`] describes one invocation (project, output, signing,
//! variant). [`Toolchain`] describes the external programs used to carry it
//! out and usually lives as long as the automator.

mod builder;
mod config;
mod signing;
mod toolchain;
mod variant;

pub use builder::BuildConfigurationBuilder;
pub use config::BuildConfiguration;
pub use signing::SigningCredentials;
pub use toolchain::Toolchain;
pub use variant::BuildVariant;
