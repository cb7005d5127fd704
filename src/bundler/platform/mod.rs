//! Platform-specific packaging steps.

pub mod android;
