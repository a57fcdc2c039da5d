//! # Events emitted by the coordinator and task wrappers.
//!
//! [`EventKind`] classifies what happened; [`Event`] carries the metadata
//! (timestamp, worker name, failure message).
//!
//! ## Ordering
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Events from concurrently running wrappers may be observed
//! interleaved; use `seq` to restore publish order.

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of group events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A worker was appended to the registry.
    ///
    /// Sets: `worker`.
    WorkerRegistered,

    /// The first start request arrived; spawns are about to be issued.
    ///
    /// Sets: nothing beyond `at`/`seq`.
    RunStarting,

    /// A task wrapper was spawned for one worker invocation.
    ///
    /// Sets: `worker`.
    WorkerSpawned,

    /// A worker's `toil` returned gracefully.
    ///
    /// Sets: `worker`.
    WorkerReturned,

    /// A worker's `toil` terminated abnormally.
    ///
    /// Sets: `worker`, `error`.
    WorkerFailed,
}

/// Group event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Name of the worker, if applicable.
    pub worker: Option<Arc<str>>,
    /// Failure message, if applicable.
    pub error: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with the current timestamp and
    /// next sequence number.
    pub fn now(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            worker: None,
            error: None,
        }
    }

    /// Attaches a worker name.
    #[inline]
    pub fn with_worker(mut self, worker: impl Into<Arc<str>>) -> Self {
        self.worker = Some(worker.into());
        self
    }

    /// Attaches a failure message.
    #[inline]
    pub fn with_error(mut self, error: impl Into<Arc<str>>) -> Self {
        self.error = Some(error.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seq_is_monotonic() {
        let a = Event::now(EventKind::RunStarting);
        let b = Event::now(EventKind::RunStarting);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_builders_set_fields() {
        let ev = Event::now(EventKind::WorkerFailed)
            .with_worker("mailer")
            .with_error("boom");
        assert_eq!(ev.kind, EventKind::WorkerFailed);
        assert_eq!(ev.worker.as_deref(), Some("mailer"));
        assert_eq!(ev.error.as_deref(), Some("boom"));
    }
}
