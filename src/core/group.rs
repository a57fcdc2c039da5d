//! # Group facade: the public handle over the coordinator.
//!
//! [`Group`] translates plain async calls into request/reply exchanges with
//! the coordinator actor, and implements the blocking "run and wait, or fail
//! fast on the first failure" contract on top of the run signals.
//!
//! ## High-level flow
//! ```text
//! Group::register(w) ──► Register ──► coordinator appends (spawns if toiling)
//! Group::len()       ──► Len      ──► coordinator replies with registry size
//! Group::run()       ──► Start    ──► coordinator spawns all, acks
//!                         then race:
//!                           failure recorded ──► Err(first failure)
//!                           outstanding == 0 ──► Ok(())
//! ```

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};

use crate::core::builder::GroupBuilder;
use crate::core::coordinator::Request;
use crate::core::signals::RunSignals;
use crate::error::ToilError;
use crate::events::{Bus, Event};
use crate::workers::WorkerRef;

/// Public handle through which workers are registered and the run is started
/// and awaited.
///
/// Cheap to share: wrap in an [`Arc`] to call [`run`](Group::run) from
/// several tasks at once.
///
/// ### Panics
/// All methods panic if the coordinator task is gone, which only happens
/// while the Tokio runtime itself is shutting down.
pub struct Group {
    requests: mpsc::Sender<Request>,
    signals: Arc<RunSignals>,
    bus: Bus,
}

impl Group {
    /// Creates an empty, idle group with default configuration.
    ///
    /// ### Panics
    /// Must be called from within a Tokio runtime; the coordinator loop is
    /// spawned here.
    pub fn new() -> Self {
        GroupBuilder::new().build()
    }

    /// Returns a builder for a group with custom configuration or
    /// subscribers.
    pub fn builder() -> GroupBuilder {
        GroupBuilder::new()
    }

    pub(crate) fn from_parts(
        requests: mpsc::Sender<Request>,
        signals: Arc<RunSignals>,
        bus: Bus,
    ) -> Self {
        Self {
            requests,
            signals,
            bus,
        }
    }

    /// Returns the number of workers registered with this group.
    pub async fn len(&self) -> usize {
        let (reply, rx) = oneshot::channel();
        self.roundtrip(Request::Len { reply }, rx).await
    }

    /// Returns `true` if no worker has been registered yet.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Registers a worker with this group.
    ///
    /// Safe to call before, during, or after a run: once the run has
    /// started, the worker is spawned immediately. Returns only after the
    /// registration is recorded, so a subsequent [`len`](Group::len) is
    /// guaranteed to count it.
    pub async fn register(&self, worker: WorkerRef) {
        let (reply, rx) = oneshot::channel();
        self.roundtrip(Request::Register { worker, reply }, rx).await
    }

    /// Makes all registered workers toil, and waits.
    ///
    /// The first call starts the run; later calls do not spawn anything new
    /// but still wait on the run already in progress. With no workers
    /// registered, returns `Ok(())` without blocking.
    ///
    /// ### Outcome
    /// - `Ok(())` once every outstanding worker task has finished with no
    ///   failure observed.
    /// - `Err(failure)` as soon as any worker fails; the error is the first
    ///   failure of the run, verbatim. Sibling workers keep running, and a
    ///   later `run` call keeps returning that same first failure.
    pub async fn run(&self) -> Result<(), ToilError> {
        let (reply, rx) = oneshot::channel();
        self.roundtrip(Request::Start { reply }, rx).await;

        tokio::select! {
            biased;
            failure = self.signals.failure.sensed() => Err(failure),
            () = self.signals.outstanding.wait_idle() => Ok(()),
        }
    }

    /// Creates a receiver observing this group's subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    async fn roundtrip<T>(&self, request: Request, reply: oneshot::Receiver<T>) -> T {
        self.requests
            .send(request)
            .await
            .expect("group coordinator stopped accepting requests");
        reply
            .await
            .expect("group coordinator dropped a pending reply")
    }
}

impl Default for Group {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;
    use crate::workers::{Worker, WorkerFn};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::sync::Notify;
    use tokio::time::{sleep, timeout};

    #[derive(Clone, Copy)]
    enum Outcome {
        Return,
        Fail(&'static str),
        Panic(&'static str),
    }

    /// Test double recording every invocation it receives.
    struct Recorder {
        outcome: Outcome,
        gate: Option<Arc<Notify>>,
        toiled: AtomicUsize,
        returned: AtomicUsize,
        failed: AtomicUsize,
        last_failure: Mutex<Option<ToilError>>,
    }

    impl Recorder {
        fn arc(outcome: Outcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                gate: None,
                toiled: AtomicUsize::new(0),
                returned: AtomicUsize::new(0),
                failed: AtomicUsize::new(0),
                last_failure: Mutex::new(None),
            })
        }

        fn gated(outcome: Outcome, gate: Arc<Notify>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                gate: Some(gate),
                toiled: AtomicUsize::new(0),
                returned: AtomicUsize::new(0),
                failed: AtomicUsize::new(0),
                last_failure: Mutex::new(None),
            })
        }

        fn toiled(&self) -> usize {
            self.toiled.load(Ordering::SeqCst)
        }

        fn returned(&self) -> usize {
            self.returned.load(Ordering::SeqCst)
        }

        fn failed(&self) -> usize {
            self.failed.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Worker for Recorder {
        fn name(&self) -> &str {
            "recorder"
        }

        async fn toil(&self) -> Result<(), ToilError> {
            self.toiled.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            match self.outcome {
                Outcome::Return => Ok(()),
                Outcome::Fail(msg) => Err(ToilError::fail(msg)),
                Outcome::Panic(msg) => panic!("{}", msg),
            }
        }

        async fn on_returned(&self) {
            self.returned.fetch_add(1, Ordering::SeqCst);
        }

        async fn on_failed(&self, failure: &ToilError) {
            self.failed.fetch_add(1, Ordering::SeqCst);
            *self.last_failure.lock().unwrap() = Some(failure.clone());
        }
    }

    async fn eventually(check: impl Fn() -> bool) {
        timeout(Duration::from_secs(5), async {
            while !check() {
                sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("condition not reached in time");
    }

    #[tokio::test]
    async fn test_len_counts_registrations() {
        let group = Group::new();
        assert_eq!(group.len().await, 0);
        assert!(group.is_empty().await);

        for _ in 0..3 {
            let w: WorkerRef = WorkerFn::arc("quick", || async { Ok::<_, ToilError>(()) });
            group.register(w).await;
        }
        assert_eq!(group.len().await, 3);
        assert!(!group.is_empty().await);
    }

    #[tokio::test]
    async fn test_same_worker_registered_twice_counts_twice() {
        let group = Group::new();
        let recorder = Recorder::arc(Outcome::Return);
        group.register(recorder.clone()).await;
        group.register(recorder.clone()).await;

        assert_eq!(group.len().await, 2);
        assert!(group.run().await.is_ok());
        assert_eq!(recorder.toiled(), 2);
    }

    #[tokio::test]
    async fn test_empty_group_run_returns_immediately() {
        let group = Group::new();
        let outcome = timeout(Duration::from_secs(1), group.run())
            .await
            .expect("empty run must not block");
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_run_waits_for_every_worker() {
        let group = Arc::new(Group::new());
        let gates: Vec<Arc<Notify>> = (0..3).map(|_| Arc::new(Notify::new())).collect();
        let recorders: Vec<Arc<Recorder>> = gates
            .iter()
            .map(|gate| Recorder::gated(Outcome::Return, Arc::clone(gate)))
            .collect();
        for recorder in &recorders {
            group.register(recorder.clone()).await;
        }

        let running = {
            let group = Arc::clone(&group);
            tokio::spawn(async move { group.run().await })
        };

        for recorder in &recorders {
            eventually(|| recorder.toiled() == 1).await;
        }
        assert!(!running.is_finished());

        for gate in &gates {
            gate.notify_one();
        }
        let outcome = timeout(Duration::from_secs(5), running)
            .await
            .expect("run should finish once all gates open")
            .expect("run task should not panic");
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_failure_payload_reaches_caller() {
        let group = Group::new();
        group.register(Recorder::arc(Outcome::Fail("boom"))).await;

        let outcome = group.run().await;
        assert_eq!(outcome, Err(ToilError::fail("boom")));
    }

    #[tokio::test]
    async fn test_panic_payload_reaches_caller() {
        let group = Group::new();
        group.register(Recorder::arc(Outcome::Panic("kaboom"))).await;

        let outcome = group.run().await;
        assert_eq!(outcome, Err(ToilError::panicked("kaboom")));
    }

    #[tokio::test]
    async fn test_register_while_toiling_spawns_immediately() {
        let group = Arc::new(Group::new());
        let gate = Arc::new(Notify::new());
        let blocker = Recorder::gated(Outcome::Return, Arc::clone(&gate));
        group.register(blocker).await;

        let running = {
            let group = Arc::clone(&group);
            tokio::spawn(async move { group.run().await })
        };

        let late = Recorder::arc(Outcome::Return);
        group.register(late.clone()).await;
        assert_eq!(group.len().await, 2);
        eventually(|| late.toiled() == 1).await;

        gate.notify_one();
        let outcome = timeout(Duration::from_secs(5), running)
            .await
            .expect("run should finish")
            .expect("run task should not panic");
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn test_on_returned_fires_once_per_worker() {
        let group = Group::new();
        let recorders: Vec<Arc<Recorder>> =
            (0..3).map(|_| Recorder::arc(Outcome::Return)).collect();
        for recorder in &recorders {
            group.register(recorder.clone()).await;
        }

        assert!(group.run().await.is_ok());
        for recorder in &recorders {
            eventually(|| recorder.returned() == 1).await;
            assert_eq!(recorder.toiled(), 1);
            assert_eq!(recorder.failed(), 0);
        }
    }

    #[tokio::test]
    async fn test_on_failed_receives_the_failure() {
        let group = Group::new();
        let recorder = Recorder::arc(Outcome::Fail("boom"));
        group.register(recorder.clone()).await;

        assert!(group.run().await.is_err());
        eventually(|| recorder.failed() == 1).await;
        assert_eq!(recorder.returned(), 0);
        let last = recorder.last_failure.lock().unwrap().clone();
        assert_eq!(last, Some(ToilError::fail("boom")));
    }

    #[tokio::test]
    async fn test_second_run_waits_without_respawning() {
        let group = Arc::new(Group::new());
        let gate = Arc::new(Notify::new());
        let recorder = Recorder::gated(Outcome::Return, Arc::clone(&gate));
        group.register(recorder.clone()).await;

        let first = {
            let group = Arc::clone(&group);
            tokio::spawn(async move { group.run().await })
        };
        eventually(|| recorder.toiled() == 1).await;

        let second = {
            let group = Arc::clone(&group);
            tokio::spawn(async move { group.run().await })
        };

        sleep(Duration::from_millis(50)).await;
        assert!(!first.is_finished());
        assert!(!second.is_finished());
        assert_eq!(group.signals.outstanding.current(), 1);

        gate.notify_one();
        for handle in [first, second] {
            let outcome = timeout(Duration::from_secs(5), handle)
                .await
                .expect("run should finish")
                .expect("run task should not panic");
            assert!(outcome.is_ok());
        }
        assert_eq!(recorder.toiled(), 1);
    }

    #[tokio::test]
    async fn test_sibling_failure_fails_fast_but_does_not_stop_others() {
        let group = Arc::new(Group::new());
        let gate = Arc::new(Notify::new());
        let survivor = Recorder::gated(Outcome::Return, Arc::clone(&gate));
        group.register(survivor.clone()).await;
        group.register(Recorder::arc(Outcome::Fail("boom"))).await;

        let outcome = timeout(Duration::from_secs(5), group.run())
            .await
            .expect("run must fail fast while the survivor still toils");
        assert_eq!(outcome, Err(ToilError::fail("boom")));
        assert_eq!(survivor.returned(), 0);

        gate.notify_one();
        eventually(|| survivor.returned() == 1).await;

        // The first failure stays the run's outcome.
        assert_eq!(group.run().await, Err(ToilError::fail("boom")));
    }

    #[tokio::test]
    async fn test_events_trace_the_run() {
        let group = Group::new();
        let mut events = group.subscribe();
        group.register(Recorder::arc(Outcome::Return)).await;
        assert!(group.run().await.is_ok());

        let mut seen = Vec::new();
        timeout(Duration::from_secs(5), async {
            loop {
                match events.recv().await {
                    Ok(ev) => {
                        seen.push(ev.kind);
                        if ev.kind == EventKind::WorkerReturned {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
        })
        .await
        .expect("event stream should reach WorkerReturned");

        assert_eq!(
            seen,
            vec![
                EventKind::WorkerRegistered,
                EventKind::RunStarting,
                EventKind::WorkerSpawned,
                EventKind::WorkerReturned,
            ]
        );
    }
}
