//! # Run-wide signals: outstanding count and first-failure slot.
//!
//! Both signals are shared by every task wrapper of a run and read by the
//! facade's wait logic. They are built on [`tokio::sync::watch`], so writes
//! are atomic (`send_modify` / `send_if_modified`) and any number of waiters
//! can observe them without locks of their own.
//!
//! - [`Outstanding`]: number of spawned, unfinished wrapper tasks.
//! - [`FailureSignal`]: first-write-wins slot for the run's first failure.

use tokio::sync::watch;

use crate::error::ToilError;

/// Live count of spawned, unfinished worker tasks.
///
/// Incremented at spawn issuance, decremented once per task exit.
pub(crate) struct Outstanding {
    count: watch::Sender<usize>,
}

impl Outstanding {
    fn new() -> Self {
        let (count, _) = watch::channel(0);
        Self { count }
    }

    /// Records one more spawned, unfinished task.
    pub(crate) fn add(&self) {
        self.count.send_modify(|n| *n += 1);
    }

    /// Records one task exit. Every `done` is preceded by an `add`.
    pub(crate) fn done(&self) {
        self.count.send_modify(|n| *n -= 1);
    }

    /// Current number of unfinished tasks.
    pub(crate) fn current(&self) -> usize {
        *self.count.borrow()
    }

    /// Resolves once the count is zero. Resolves immediately if it already is.
    pub(crate) async fn wait_idle(&self) {
        let mut rx = self.count.subscribe();
        while *rx.borrow_and_update() != 0 {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

/// First-wins carrier of the run's first failure.
///
/// Later failures are ignored here; they still reach the failing worker's own
/// `on_failed` hook.
pub(crate) struct FailureSignal {
    slot: watch::Sender<Option<ToilError>>,
}

impl FailureSignal {
    fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot }
    }

    /// Records `failure` if no failure has been recorded yet.
    ///
    /// Returns `true` if this call won the slot.
    pub(crate) fn raise(&self, failure: ToilError) -> bool {
        self.slot.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(failure);
            true
        })
    }

    /// Resolves with the recorded failure; stays pending while there is none.
    pub(crate) async fn sensed(&self) -> ToilError {
        let mut rx = self.slot.subscribe();
        loop {
            if let Some(failure) = (*rx.borrow_and_update()).clone() {
                return failure;
            }
            if rx.changed().await.is_err() {
                // The sender lives in self, which outlives this borrow.
                std::future::pending::<()>().await;
            }
        }
    }
}

/// The signal pair shared by all task wrappers of one run.
pub(crate) struct RunSignals {
    pub(crate) outstanding: Outstanding,
    pub(crate) failure: FailureSignal,
}

impl RunSignals {
    pub(crate) fn new() -> Self {
        Self {
            outstanding: Outstanding::new(),
            failure: FailureSignal::new(),
        }
    }
}
