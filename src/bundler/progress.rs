//! Progress reporting.
//!
//! A build streams human readable lines to exactly one observer. The
//! [`ProgressChannel`] is a slot holding zero or one [`ProgressSink`];
//! registering a new sink replaces the previous one.

use serde::Serialize;
use std::{
    fmt,
    sync::{Arc, RwLock},
};

/// Severity tag attached to every progress line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        })
    }
}

/// A single progress line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressEvent {
    pub message: String,
    pub severity: Severity,
}

impl ProgressEvent {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }
}

/// Receiver of progress events.
///
/// Implemented for any `Fn(&str, Severity)` closure so callers can register
/// a plain callback.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: &ProgressEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&str, Severity) + Send + Sync,
{
    fn emit(&self, event: &ProgressEvent) {
        self(&event.message, event.severity)
    }
}

/// Single-subscriber progress slot shared by every pipeline component.
#[derive(Clone, Default)]
pub struct ProgressChannel {
    sink: Arc<RwLock<Option<Arc<dyn ProgressSink>>>>,
}

impl fmt::Debug for ProgressChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registered = self.sink.read().map(|s| s.is_some()).unwrap_or(false);
        f.debug_struct("ProgressChannel")
            .field("registered", &registered)
            .finish()
    }
}

impl ProgressChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `sink`, replacing any previously registered one.
    pub fn set_sink(&self, sink: Arc<dyn ProgressSink>) {
        match self.sink.write() {
            Ok(mut slot) => *slot = Some(sink),
            Err(poisoned) => *poisoned.into_inner() = Some(sink),
        }
    }

    /// Delivers an event to the sink (if any) and mirrors it to the log.
    pub fn emit(&self, message: impl Into<String>, severity: Severity) {
        let event = ProgressEvent::new(message, severity);
        match severity {
            Severity::Error => log::error!("{}", event.message),
            Severity::Info | Severity::Success => log::info!("{}", event.message),
        }
        self.deliver(event);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(message, Severity::Info);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.emit(message, Severity::Success);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(message, Severity::Error);
    }

    /// Non-fatal problem. Delivered as an `info` line with a `Warning:` prefix.
    pub fn warn(&self, message: impl AsRef<str>) {
        let message = message.as_ref();
        log::warn!("{message}");
        self.deliver(ProgressEvent::new(format!("Warning: {message}"), Severity::Info));
    }

    fn deliver(&self, event: ProgressEvent) {
        // Clone the Arc out so the sink runs without holding the lock.
        let sink = match self.sink.read() {
            Ok(slot) => slot.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        };
        if let Some(sink) = sink {
            sink.emit(&event);
        }
    }
}

/// Sink that records every event. Handy for tests and for callers that want
/// the whole transcript after the fact.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: std::sync::Mutex<Vec<ProgressEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ProgressEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Messages of every event with the given severity, in emission order.
    pub fn messages(&self, severity: Severity) -> Vec<String> {
        self.events()
            .into_iter()
            .filter(|e| e.severity == severity)
            .map(|e| e.message)
            .collect()
    }
}

impl ProgressSink for RecordingSink {
    fn emit(&self, event: &ProgressEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
