//! # Demo: custom_subscriber
//!
//! Demonstrates how to build and attach a custom event subscriber, and what a
//! failing worker looks like from the caller's side.
//!
//! Shows how to:
//! - Implement the [`Subscribe`] trait.
//! - Inspect [`Event`] / [`EventKind`] for worker lifecycle reporting.
//! - Wire the subscriber in via [`Group::builder`].
//!
//! ## Flow
//! ```text
//! Group::run()
//!     ├─► coordinator publishes RunStarting, WorkerSpawned ...
//!     ├─► [steady] toils ──► returns ──► WorkerReturned
//!     └─► [shaky] toils ──► fails ──► WorkerFailed
//!             │
//!             └─► run() ──► Err(first failure)
//! events ──► listener loop ──► ConsoleSubscriber::on_event()
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example custom_subscriber
//! ```

use std::sync::Arc;
use std::time::Duration;

use toilgroup::{Event, EventKind, Group, Subscribe, ToilError, WorkerFn, WorkerRef};

/// A simple console subscriber that prints every event it observes.
/// In real life, you could export metrics, ship logs, or trigger alerts.
struct ConsoleSubscriber;

#[async_trait::async_trait]
impl Subscribe for ConsoleSubscriber {
    async fn on_event(&self, ev: &Event) {
        let worker = ev.worker.as_deref().unwrap_or("<unknown>");
        match ev.kind {
            EventKind::WorkerRegistered => {
                println!("[sub] registered: worker={worker}");
            }
            EventKind::RunStarting => {
                println!("[sub] run starting");
            }
            EventKind::WorkerSpawned => {
                println!("[sub] spawned:    worker={worker}");
            }
            EventKind::WorkerReturned => {
                println!("[sub] returned:   worker={worker}");
            }
            EventKind::WorkerFailed => {
                println!(
                    "[sub] failed:     worker={worker} err={}",
                    ev.error.as_deref().unwrap_or("<none>")
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "console"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let group = Group::builder()
        .with_subscriber(Arc::new(ConsoleSubscriber))
        .build();

    let steady: WorkerRef = WorkerFn::arc("steady", || async {
        tokio::time::sleep(Duration::from_millis(300)).await;
        println!("[steady] success");
        Ok::<_, ToilError>(())
    });

    let shaky: WorkerRef = WorkerFn::arc("shaky", || async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        Err(ToilError::fail("boom (demo failure)"))
    });

    group.register(steady).await;
    group.register(shaky).await;

    // The first failure is the run's outcome; the steady worker keeps going.
    match group.run().await {
        Ok(()) => println!("run finished cleanly"),
        Err(failure) => println!("run failed: {failure}"),
    }

    // Give the detached listener a moment to drain the remaining events.
    tokio::time::sleep(Duration::from_millis(500)).await;
}
