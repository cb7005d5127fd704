//! Shared state of the pipeline run.
//!
//! Two slots, both owned by one automator:
//! - the busy ticket: at most one run at a time, released by [`RunGuard`] on drop
//! - the current execution: the one external process cancellation targets
//!
//! Each run carries a [`CancellationToken`]; every process spawned for the run
//! gets a child token, so cancelling the run also stops its live process and
//! keeps any later step from starting another one.

use std::sync::{
    Arc, Mutex, MutexGuard,
    atomic::{AtomicU64, Ordering},
};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct RunTicket {
    id: u64,
    token: CancellationToken,
}

/// The process currently owned by the run.
#[derive(Debug)]
pub(crate) struct Execution {
    id: u64,
    program: String,
    token: CancellationToken,
}

#[derive(Debug, Default)]
pub(crate) struct RunState {
    next_id: AtomicU64,
    busy: Mutex<Option<RunTicket>>,
    current: Mutex<Option<Execution>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl RunState {
    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Idle -> Running. Returns `None` when a run is already in flight.
    pub(crate) fn try_begin(self: &Arc<Self>) -> Option<RunGuard> {
        let mut busy = lock(&self.busy);
        if busy.is_some() {
            return None;
        }

        let ticket = RunTicket {
            id: self.next_id(),
            token: CancellationToken::new(),
        };
        let guard = RunGuard {
            state: Arc::clone(self),
            id: ticket.id,
            token: ticket.token.clone(),
        };
        *busy = Some(ticket);
        Some(guard)
    }

    pub(crate) fn is_busy(&self) -> bool {
        lock(&self.busy).is_some()
    }

    /// Records `token` as the live process. Returns the id to release it with.
    pub(crate) fn register(&self, program: &str, token: CancellationToken) -> u64 {
        let id = self.next_id();
        *lock(&self.current) = Some(Execution {
            id,
            program: program.to_string(),
            token,
        });
        id
    }

    /// Clears the current execution if it is still `id`.
    pub(crate) fn release(&self, id: u64) {
        let mut current = lock(&self.current);
        if current.as_ref().is_some_and(|e| e.id == id) {
            *current = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn has_current(&self) -> bool {
        lock(&self.current).is_some()
    }

    /// Hard stop: signals the live process (if any), cancels the run and
    /// forces the state back to Idle.
    ///
    /// Returns the program name of the signalled process.
    pub(crate) fn cancel(&self) -> Option<String> {
        let signalled = lock(&self.current).take().map(|exec| {
            exec.token.cancel();
            exec.program
        });

        if let Some(ticket) = lock(&self.busy).take() {
            ticket.token.cancel();
        }

        signalled
    }

    fn finish(&self, id: u64) {
        let mut busy = lock(&self.busy);
        // A cancelled run may already have been replaced by a new one.
        if busy.as_ref().is_some_and(|t| t.id == id) {
            *busy = None;
        }
    }
}

/// Holds the busy ticket for one run. Running -> Idle on drop.
#[derive(Debug)]
pub(crate) struct RunGuard {
    state: Arc<RunState>,
    id: u64,
    token: CancellationToken,
}

impl RunGuard {
    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        self.state.finish(self.id);
    }
}
