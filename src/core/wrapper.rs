//! # Task wrapper: one worker invocation, outcome reported.
//!
//! [`spawn`] runs a single (worker, spawn) pair on its own task and converts
//! whatever happens inside `toil` into the run's signals.
//!
//! ## Outcome flow
//! ```text
//! toil() → Ok(())        → outstanding.done() → WorkerReturned → detach on_returned()
//!        → Err(failure)  → WorkerFailed → failure.raise() → outstanding.done()
//!        → panic         → payload converted to ToilError::Panicked, then as Err
//!                          → detach on_failed(failure)
//! ```
//!
//! ## Rules
//! - The count is incremented **before** the task is spawned, inside the
//!   caller's (coordinator's) serial context.
//! - On failure, the failure slot is written **before** the decrement, so a
//!   waiter can never observe an idle count without the failure being
//!   visible.
//! - Notification hooks run detached: nothing awaits them, their number is
//!   unbounded, and a panic inside one is not caught.
//! - A failing worker never affects sibling wrappers.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::core::signals::RunSignals;
use crate::error::ToilError;
use crate::events::{Bus, Event, EventKind};
use crate::workers::WorkerRef;

/// Issues one wrapper task for `worker`.
///
/// Increments the outstanding count synchronously, then hands the invocation
/// to a fresh task. Returns as soon as the spawn is issued.
pub(crate) fn spawn(worker: WorkerRef, signals: Arc<RunSignals>, bus: Bus) {
    signals.outstanding.add();
    bus.publish(Event::now(EventKind::WorkerSpawned).with_worker(worker.name()));

    tokio::spawn(async move {
        let outcome = AssertUnwindSafe(worker.toil()).catch_unwind().await;
        match outcome {
            Ok(Ok(())) => {
                signals.outstanding.done();
                bus.publish(Event::now(EventKind::WorkerReturned).with_worker(worker.name()));
                tokio::spawn(async move { worker.on_returned().await });
            }
            Ok(Err(failure)) => finish_failed(worker, &signals, &bus, failure),
            Err(payload) => {
                let failure = ToilError::panicked(panic_message(payload.as_ref()));
                finish_failed(worker, &signals, &bus, failure);
            }
        }
    });
}

/// Failure path shared by the error and panic outcomes.
fn finish_failed(worker: WorkerRef, signals: &RunSignals, bus: &Bus, failure: ToilError) {
    bus.publish(
        Event::now(EventKind::WorkerFailed)
            .with_worker(worker.name())
            .with_error(failure.as_message()),
    );
    signals.failure.raise(failure.clone());
    signals.outstanding.done();
    tokio::spawn(async move { worker.on_failed(&failure).await });
}

/// Extracts a printable message from a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workers::{Worker, WorkerFn};
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::time::timeout;

    struct Panicker;

    #[async_trait]
    impl Worker for Panicker {
        async fn toil(&self) -> Result<(), ToilError> {
            panic!("bang");
        }
    }

    #[tokio::test]
    async fn test_graceful_return_goes_idle_without_failure() {
        let signals = Arc::new(RunSignals::new());
        let bus = Bus::new(8);

        let worker: WorkerRef = WorkerFn::arc("fine", || async { Ok::<_, ToilError>(()) });
        spawn(worker, Arc::clone(&signals), bus);

        timeout(Duration::from_secs(1), signals.outstanding.wait_idle())
            .await
            .expect("wrapper should finish");
        let still_failing = timeout(Duration::from_millis(50), signals.failure.sensed()).await;
        assert!(still_failing.is_err());
    }

    #[tokio::test]
    async fn test_error_is_raised_before_going_idle() {
        let signals = Arc::new(RunSignals::new());
        let bus = Bus::new(8);

        let worker: WorkerRef = WorkerFn::arc("broken", || async { Err(ToilError::fail("boom")) });
        spawn(worker, Arc::clone(&signals), bus);

        timeout(Duration::from_secs(1), signals.outstanding.wait_idle())
            .await
            .expect("wrapper should finish");
        let sensed = timeout(Duration::from_secs(1), signals.failure.sensed())
            .await
            .expect("failure must already be visible");
        assert_eq!(sensed, ToilError::fail("boom"));
    }

    #[tokio::test]
    async fn test_panic_payload_becomes_failure() {
        let signals = Arc::new(RunSignals::new());
        let bus = Bus::new(8);

        spawn(Arc::new(Panicker), Arc::clone(&signals), bus);

        let sensed = timeout(Duration::from_secs(1), signals.failure.sensed())
            .await
            .expect("panic must surface as a failure");
        assert_eq!(sensed, ToilError::panicked("bang"));
        timeout(Duration::from_secs(1), signals.outstanding.wait_idle())
            .await
            .expect("wrapper should finish");
    }
}
