//! Build orchestration and coordination.
//!
//! This module provides the [`BuildAutomator`] that runs one packaging
//! pipeline at a time and lets a caller cancel it.
//!
//! # Example
//!
//! ```no_run
//! use rn_build_automator::bundler::{BuildAutomator, BuildConfigurationBuilder, Severity};
//!
//! # async fn example() -> rn_build_automator::bundler::Result<()> {
//! let automator = BuildAutomator::new();
//! automator.on_progress(|message: &str, severity: Severity| println!("[{severity}] {message}"));
//!
//! let config = BuildConfigurationBuilder::new()
//!     .project_path("/home/u/MyApp")
//!     .output_path("/home/u/dist")
//!     .build()?;
//!
//! let outcome = automator.build_bundle(&config).await;
//! if let Some(path) = outcome.path {
//!     println!("Created: {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - `orchestrator` - Main [`BuildAutomator`] struct and public operations
//! - `run_state` - busy ticket and current-process slot
//! - [`tool_detection`] - converter jar discovery

pub mod checksum;
mod orchestrator;
mod run_state;
pub mod tool_detection;

pub use orchestrator::BuildAutomator;
pub(crate) use run_state::RunState;
