//! Main build orchestration.
//!
//! This module provides the [`BuildAutomator`], the single-flight coordinator
//! behind the public "build bundle" and "build package" operations.

use super::run_state::RunState;
use crate::bundler::{
    BuildConfiguration, BuildOutcome, BuiltArtifact, Error, ProcessRunner, ProgressChannel,
    ProgressSink, Result, Severity, Toolchain,
    platform::android::{StepContext, bundle, package},
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Bundle,
    Package,
}

impl Flow {
    fn label(self) -> &'static str {
        match self {
            Flow::Bundle => "AAB",
            Flow::Package => "APK",
        }
    }
}

/// Main build orchestrator.
///
/// Owns the progress slot, the toolchain settings and the run state. At most
/// one build runs per instance: a second call while one is in flight fails
/// immediately without spawning anything.
///
/// # State
///
/// - **Idle** -> **Running** on entry to [`build_bundle`](Self::build_bundle)
///   or [`build_package`](Self::build_package)
/// - **Running** -> **Idle** when the operation returns, however it ends, or
///   as soon as [`cancel`](Self::cancel) is called
///
/// # Examples
///
/// ```no_run
/// use rn_build_automator::bundler::{BuildAutomator, BuildConfiguration, Toolchain};
///
/// # async fn example(config: BuildConfiguration) {
/// let automator = BuildAutomator::with_toolchain(
///     Toolchain::default().with_bundletool("/opt/android/bundletool.jar"),
/// );
/// let outcome = automator.build_package(&config).await;
/// assert_eq!(outcome.success, outcome.path.is_some());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct BuildAutomator {
    progress: ProgressChannel,
    state: Arc<RunState>,
    toolchain: Toolchain,
}

impl BuildAutomator {
    /// Creates an automator using the default toolchain (`npx`, `java`,
    /// `bundletool.jar` from the standard locations).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toolchain(toolchain: Toolchain) -> Self {
        Self {
            toolchain,
            ..Self::default()
        }
    }

    pub fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Registers the progress observer, replacing any previous one.
    pub fn set_progress_sink(&self, sink: Arc<dyn ProgressSink>) {
        self.progress.set_sink(sink);
    }

    /// Registers a closure as the progress observer.
    pub fn on_progress<F>(&self, callback: F)
    where
        F: Fn(&str, Severity) + Send + Sync + 'static,
    {
        self.progress.set_sink(Arc::new(callback));
    }

    /// Whether a build is currently running.
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Builds the app bundle and copies it to the configured output directory.
    pub async fn build_bundle(&self, config: &BuildConfiguration) -> BuildOutcome {
        self.run(config, Flow::Bundle).await
    }

    /// Builds the bundle, converts it to a signed universal package and
    /// copies the package to the configured output directory.
    pub async fn build_package(&self, config: &BuildConfiguration) -> BuildOutcome {
        self.run(config, Flow::Package).await
    }

    /// Stops the running build.
    ///
    /// The live external process (if any) receives a termination signal and
    /// the automator returns to Idle immediately. The interrupted operation
    /// still completes on its own and reports the killed process as a failed
    /// step.
    pub fn cancel(&self) {
        if let Some(program) = self.state.cancel() {
            log::debug!("Sent termination signal to {program}");
            self.progress.info("Build cancelled by user");
        }
    }

    async fn run(&self, config: &BuildConfiguration, flow: Flow) -> BuildOutcome {
        let Some(guard) = self.state.try_begin() else {
            self.progress.error("Error: Build already in progress");
            return BuildOutcome::failure("Build already in progress");
        };

        let runner = ProcessRunner::for_run(
            self.progress.clone(),
            Arc::clone(&self.state),
            guard.token().clone(),
        );
        let result = self.execute(StepContext::new(&runner, &self.toolchain), config, flow).await;
        drop(guard);

        match result {
            Ok(artifact) => artifact.into(),
            Err(e) => BuildOutcome::failure(self.report(flow, &e)),
        }
    }

    async fn execute(
        &self,
        ctx: StepContext<'_>,
        config: &BuildConfiguration,
        flow: Flow,
    ) -> Result<BuiltArtifact> {
        log::debug!("Starting {} flow for {}", flow.label(), config.project_path().display());
        match flow {
            Flow::Bundle => bundle::build_bundle(ctx, config).await,
            Flow::Package => package::build_package(ctx, config).await,
        }
    }

    /// Emits the single `error` line for a fatal error and returns its text.
    fn report(&self, flow: Flow, error: &Error) -> String {
        let message = match error {
            Error::Validation(_) => format!("Error: {error}"),
            Error::StepFailed { .. } | Error::Cancelled => error.to_string(),
            _ => format!("Error during {} build: {error}", flow.label()),
        };
        self.progress.error(message.clone());
        message
    }
}
