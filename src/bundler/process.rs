//! External command execution.
//!
//! Commands are spawned directly (never through a shell) so project and
//! keystore paths with spaces reach the tool intact. Bare program names are
//! resolved with `which`, which also finds `npx.cmd`/`gradlew.bat` style
//! launchers on Windows.
//!
//! stdout and stderr are read concurrently and every non-blank line is
//! forwarded to the progress channel as soon as it arrives.
//!
//! On Unix each command leads its own process group and cancellation signals
//! the whole group, so helpers the tool forked (Gradle daemons, JVMs) stop
//! with it instead of holding the output pipes open.

use crate::bundler::{ProgressChannel, builder::RunState};
use std::{
    ffi::OsStr,
    io,
    path::{Path, PathBuf},
    process::{ExitStatus, Stdio},
    sync::Arc,
};
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    process::{Child, Command},
};
use tokio_util::sync::CancellationToken;

/// Characters of stderr kept for the failure message.
pub const STDERR_TAIL_CHARS: usize = 500;

/// Runs external commands on behalf of one pipeline run.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    progress: ProgressChannel,
    state: Arc<RunState>,
    run_token: CancellationToken,
}

impl ProcessRunner {
    /// Standalone runner not attached to any automator.
    pub fn new(progress: ProgressChannel) -> Self {
        Self {
            progress,
            state: Arc::default(),
            run_token: CancellationToken::new(),
        }
    }

    pub(crate) fn for_run(
        progress: ProgressChannel,
        state: Arc<RunState>,
        run_token: CancellationToken,
    ) -> Self {
        Self {
            progress,
            state,
            run_token,
        }
    }

    pub fn progress(&self) -> &ProgressChannel {
        &self.progress
    }

    /// Whether the run this runner belongs to has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.run_token.is_cancelled()
    }

    /// Runs `command` with `args` in `cwd`. `true` iff it exits with code 0.
    ///
    /// Never returns an error: spawn failures and non-zero exits are reported
    /// on the progress channel and yield `false`.
    pub async fn run<S: AsRef<OsStr>>(&self, command: impl AsRef<Path>, args: &[S], cwd: &Path) -> bool {
        self.run_with_env(command, args, cwd, &[]).await
    }

    /// [`run`](Self::run) with extra environment variables layered over the
    /// inherited environment.
    pub async fn run_with_env<S: AsRef<OsStr>>(
        &self,
        command: impl AsRef<Path>,
        args: &[S],
        cwd: &Path,
        env: &[(String, String)],
    ) -> bool {
        let command = command.as_ref();
        self.progress
            .info(format!("Executing: {}", display_command(command, args)));

        if self.run_token.is_cancelled() {
            self.progress
                .error("Command not started: build was cancelled");
            return false;
        }

        let program = match resolve_program(command) {
            Ok(p) => p,
            Err(e) => {
                self.progress.error(format!("Command execution error: {e}"));
                return false;
            }
        };

        let mut cmd = Command::new(&program);
        cmd.args(args)
            .current_dir(cwd)
            .envs(env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                self.progress.error(format!("Command execution error: {e}"));
                return false;
            }
        };

        let name = command.to_string_lossy();
        let token = self.run_token.child_token();
        let exec_id = self.state.register(&name, token.clone());
        let result = drive(&mut child, &token, &self.progress).await;
        self.state.release(exec_id);

        match result {
            Ok((status, _)) if status.success() => true,
            Ok((status, stderr_tail)) => {
                let code = status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none (terminated by signal)".to_string());
                self.progress
                    .error(format!("Command failed with exit code {code}"));
                if !stderr_tail.trim().is_empty() {
                    self.progress.error(format!("Error output: {stderr_tail}"));
                }
                false
            }
            Err(e) => {
                self.progress.error(format!("Command execution error: {e}"));
                false
            }
        }
    }
}

/// Streams output until the child exits, terminating it if `token` fires.
///
/// Returns the exit status and the stderr tail.
async fn drive(
    child: &mut Child,
    token: &CancellationToken,
    progress: &ProgressChannel,
) -> io::Result<(ExitStatus, String)> {
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let wait = async {
        let finished = tokio::select! {
            status = child.wait() => Some(status),
            _ = token.cancelled() => None,
        };
        match finished {
            Some(status) => status,
            None => {
                terminate(child);
                child.wait().await
            }
        }
    };

    let (status, _, tail) = tokio::join!(
        wait,
        forward_lines(stdout, progress, false),
        forward_lines(stderr, progress, true),
    );

    Ok((status?, tail))
}

/// Sends the termination signal to `child` and its process group.
fn terminate(child: &mut Child) {
    #[cfg(unix)]
    if let Some(pid) = child.id() {
        use nix::{
            sys::signal::{Signal, killpg},
            unistd::Pid,
        };
        match killpg(Pid::from_raw(pid as i32), Signal::SIGTERM) {
            Ok(()) => return,
            Err(e) => log::debug!("SIGTERM to process group {pid} failed: {e}, killing instead"),
        }
    }

    if let Err(e) = child.start_kill() {
        log::warn!("Failed to kill process: {e}");
    }
}

/// Forwards each non-blank line to `progress`. Optionally keeps the tail.
async fn forward_lines<R: AsyncRead + Unpin>(
    stream: Option<R>,
    progress: &ProgressChannel,
    keep_tail: bool,
) -> String {
    let mut tail = String::new();
    let Some(stream) = stream else {
        return tail;
    };

    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let text = String::from_utf8_lossy(&buf);
                if keep_tail {
                    push_tail(&mut tail, &text);
                }
                for line in text.split(['\r', '\n']) {
                    if !line.trim().is_empty() {
                        progress.info(line);
                    }
                }
            }
            Err(e) => {
                log::debug!("Stopped reading process output: {e}");
                break;
            }
        }
    }
    tail
}

fn push_tail(tail: &mut String, text: &str) {
    tail.push_str(text);
    let excess = tail.chars().count().saturating_sub(STDERR_TAIL_CHARS);
    if excess > 0 {
        let cut = tail
            .char_indices()
            .nth(excess)
            .map(|(i, _)| i)
            .unwrap_or(tail.len());
        tail.drain(..cut);
    }
}

/// Resolves bare program names against `PATH`. Paths are used as given.
fn resolve_program(command: &Path) -> io::Result<PathBuf> {
    if command.is_absolute() || command.components().count() > 1 {
        return Ok(command.to_path_buf());
    }
    which::which(command).map_err(|e| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("{}: {e}", command.display()),
        )
    })
}

/// Command line for the `Executing:` echo, with `pass:` secrets masked.
fn display_command<S: AsRef<OsStr>>(command: &Path, args: &[S]) -> String {
    let mut line = command.display().to_string();
    for arg in args {
        let arg = arg.as_ref().to_string_lossy();
        line.push(' ');
        match arg.find("pass:") {
            Some(idx) => {
                line.push_str(&arg[..idx + "pass:".len()]);
                line.push_str("****");
            }
            None => line.push_str(&arg),
        }
    }
    line
}
