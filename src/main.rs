//! rn-build-automator - builds React Native Android bundles and APKs.
//!
//! This binary runs the bundle or package flow for one project and exits
//! with 0 only when the artifact was delivered.

use rn_build_automator::cli;
use std::process;

#[tokio::main]
async fn main() {
    // Progress lines are already printed by the CLI; the log mirror stays
    // silent unless RUST_LOG asks for it.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            for hint in e.recovery_suggestions() {
                eprintln!("  hint: {hint}");
            }
            1
        }
    };

    process::exit(exit_code);
}
