//! Terminal rendering of build progress.
//!
//! Success lines are green, errors red, `Warning:` lines yellow and plain
//! tool output is left uncoloured. Respects `NO_COLOR`.

use crate::bundler::{ProgressEvent, ProgressSink, Severity};
use std::io;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

const WARNING_PREFIX: &str = "Warning: ";

/// Coloured line printer shared by the CLI and the progress sink.
#[derive(Debug, Clone)]
pub struct OutputManager {
    quiet: bool,
    /// Keep stdout free for `--json`.
    progress_to_stderr: bool,
}

impl OutputManager {
    pub fn new(quiet: bool, progress_to_stderr: bool) -> Self {
        Self {
            quiet,
            progress_to_stderr,
        }
    }

    fn color_choice() -> ColorChoice {
        if std::env::var_os("NO_COLOR").is_some() {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        }
    }

    fn progress_stream(&self) -> StandardStream {
        if self.progress_to_stderr {
            StandardStream::stderr(Self::color_choice())
        } else {
            StandardStream::stdout(Self::color_choice())
        }
    }

    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        write_line(&mut self.progress_stream(), Some(Color::Yellow), message)
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        write_line(&mut self.progress_stream(), Some(Color::Green), message)
    }

    /// Always printed, always to stderr.
    pub fn error(&self, message: &str) -> io::Result<()> {
        write_line(
            &mut StandardStream::stderr(Self::color_choice()),
            Some(Color::Red),
            message,
        )
    }

    /// Renders one progress event by severity.
    pub fn render(&self, event: &ProgressEvent) -> io::Result<()> {
        if self.hides(event) {
            return Ok(());
        }
        match event.severity {
            Severity::Error => self.error(&event.message),
            _ => write_line(&mut self.progress_stream(), line_color(event), &event.message),
        }
    }

    /// Quiet mode keeps only error lines.
    fn hides(&self, event: &ProgressEvent) -> bool {
        self.quiet && event.severity != Severity::Error
    }
}

fn line_color(event: &ProgressEvent) -> Option<Color> {
    match event.severity {
        Severity::Info if event.message.starts_with(WARNING_PREFIX) => Some(Color::Yellow),
        Severity::Info => None,
        Severity::Success => Some(Color::Green),
        Severity::Error => Some(Color::Red),
    }
}

impl ProgressSink for OutputManager {
    fn emit(&self, event: &ProgressEvent) {
        if let Err(e) = self.render(event) {
            log::debug!("Failed to write progress line: {e}");
        }
    }
}

fn write_line(w: &mut impl WriteColor, color: Option<Color>, message: &str) -> io::Result<()> {
    if let Some(color) = color {
        w.set_color(ColorSpec::new().set_fg(Some(color)))?;
    }
    write!(w, "{message}")?;
    if color.is_some() {
        w.reset()?;
    }
    writeln!(w)
}
