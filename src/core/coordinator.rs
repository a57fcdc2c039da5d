//! # Coordinator actor: the single-threaded owner of the registry.
//!
//! One consumer loop drains a mailbox of [`Request`]s and handles them
//! strictly one at a time. That serialization is what keeps the registry and
//! run-state race-free without locks: no other component ever touches them.
//!
//! ## Architecture
//! ```text
//! Group::len() ──────┐
//! Group::register() ─┼──► mailbox (mpsc) ──► Coordinator::run() loop
//! Group::run() ──────┘                            │
//!                                                 ├─ Len      → reply(len)
//!                                                 ├─ Register → append
//!                                                 │             (spawn if toiling)
//!                                                 │             reply(())
//!                                                 └─ Start    → Idle: spawn all,
//!                                                               flip to Toiling
//!                                                               reply(())
//! ```
//!
//! ## Rules
//! - Requests are handled in mailbox acceptance order.
//! - The registry is append-only and preserves registration order.
//! - `Start` is idempotent on the spawn side: only the Idle → Toiling
//!   transition issues spawns, and it happens at most once.
//! - Once toiling, every registration spawns its wrapper before the
//!   registration is acknowledged.
//! - The loop exits when every facade handle is gone (mailbox closed).

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use crate::core::signals::RunSignals;
use crate::core::wrapper;
use crate::events::{Bus, Event, EventKind};
use crate::workers::WorkerRef;

/// Mailbox depth; senders briefly queue behind a busy loop once exceeded.
const MAILBOX_CAPACITY: usize = 32;

/// Requests accepted by the coordinator. Each carries its reply channel.
pub(crate) enum Request {
    /// Current registry length. No side effect.
    Len { reply: oneshot::Sender<usize> },
    /// Append a worker; acknowledged only after the append (and, when
    /// already toiling, the spawn issuance) is recorded.
    Register {
        worker: WorkerRef,
        reply: oneshot::Sender<()>,
    },
    /// Start the run; acknowledged once all spawns have been issued.
    Start { reply: oneshot::Sender<()> },
}

/// Lifecycle of the group's single run.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum RunState {
    Idle,
    Toiling,
}

/// Single-threaded request processor owning registry and run-state.
pub(crate) struct Coordinator {
    mailbox: mpsc::Receiver<Request>,
    workers: Vec<WorkerRef>,
    state: RunState,
    signals: Arc<RunSignals>,
    bus: Bus,
}

impl Coordinator {
    /// Spawns the coordinator loop and returns the request sender.
    pub(crate) fn spawn(signals: Arc<RunSignals>, bus: Bus) -> mpsc::Sender<Request> {
        let (tx, rx) = mpsc::channel(MAILBOX_CAPACITY);
        let coordinator = Self {
            mailbox: rx,
            workers: Vec::new(),
            state: RunState::Idle,
            signals,
            bus,
        };
        tokio::spawn(coordinator.run());
        tx
    }

    async fn run(mut self) {
        while let Some(request) = self.mailbox.recv().await {
            match request {
                Request::Len { reply } => {
                    let _ = reply.send(self.workers.len());
                }
                Request::Register { worker, reply } => {
                    self.register(worker);
                    let _ = reply.send(());
                }
                Request::Start { reply } => {
                    self.start();
                    let _ = reply.send(());
                }
            }
        }
    }

    /// Appends a worker; issues its spawn immediately when already toiling.
    fn register(&mut self, worker: WorkerRef) {
        self.bus
            .publish(Event::now(EventKind::WorkerRegistered).with_worker(worker.name()));
        self.workers.push(Arc::clone(&worker));
        if self.state == RunState::Toiling {
            wrapper::spawn(worker, Arc::clone(&self.signals), self.bus.clone());
        }
    }

    /// Idle → Toiling, spawning every registered worker in registry order.
    ///
    /// A repeated start issues no spawns; the transition is one-way.
    fn start(&mut self) {
        if self.state == RunState::Toiling {
            return;
        }
        self.state = RunState::Toiling;
        self.bus.publish(Event::now(EventKind::RunStarting));
        for worker in &self.workers {
            wrapper::spawn(
                Arc::clone(worker),
                Arc::clone(&self.signals),
                self.bus.clone(),
            );
        }
    }
}
