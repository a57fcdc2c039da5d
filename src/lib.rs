//! # toilgroup
//!
//! **Toilgroup** is a lightweight group coordinator for concurrent workers.
//!
//! It provides a single primitive: a [`Group`] of workers that are started
//! together, run concurrently to completion, and whose aggregate outcome
//! (success, or the first failure) is handed back to the caller that started
//! the run. The crate is designed for embedding inside a larger program, not
//! as a standalone service.
//!
//! ## Architecture
//! ```text
//!     caller                    caller                    caller
//!       │ register(w)            │ len()                   │ run()
//!       ▼                        ▼                         ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Group (facade)                                                   │
//! │  - translates calls into request/reply exchanges                  │
//! │  - run(): race of first-failure vs all-finished                   │
//! └──────────────────────────────┬────────────────────────────────────┘
//!                                ▼ mailbox (mpsc, oneshot replies)
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Coordinator (actor, one serial loop)                             │
//! │  - owns the registry (append-only, insertion order)               │
//! │  - owns the run-state (Idle → Toiling, one-way)                   │
//! └──────┬──────────────────┬──────────────────┬──────────────────────┘
//!        ▼                  ▼                  ▼ one per spawn
//!  ┌────────────┐    ┌────────────┐    ┌────────────┐
//!  │  wrapper   │    │  wrapper   │    │  wrapper   │
//!  │  toil()    │    │  toil()    │    │  toil()    │
//!  └─────┬──────┘    └─────┬──────┘    └─────┬──────┘
//!        │ outcome         │ outcome         │ outcome
//!        ▼                 ▼                 ▼
//!   outstanding count (watch)     first-failure slot (watch)
//!        │                                   │
//!        └──────────── Group::run() race ────┘
//! ```
//!
//! Every wrapper also publishes lifecycle [`Event`]s to a broadcast bus;
//! attach a [`Subscribe`] implementation or a raw receiver via
//! [`Group::subscribe`] to observe a run.
//!
//! ## Semantics
//! - Workers may be registered before, during, or after the run; once the
//!   group is toiling, registration spawns the worker immediately.
//! - `run()` starts the run on the first call and is idempotent on the spawn
//!   side afterwards; every call waits on the run in progress.
//! - The first failure (an `Err` from [`Worker::toil`] or a panic inside it)
//!   is returned from `run()` as soon as it is observed. Sibling workers are
//!   not cancelled; there are no retries and no timeouts.
//! - Completion and failure hooks ([`Worker::on_returned`],
//!   [`Worker::on_failed`]) run as detached fire-and-forget tasks that the
//!   group never awaits or bounds. Embedders that cannot tolerate stray
//!   tasks must bound them on their side.
//!
//! ## Features
//! | Area           | Description                                          | Key types / traits          |
//! |----------------|------------------------------------------------------|-----------------------------|
//! | **Workers**    | Define units of work, plain or with lifecycle hooks. | [`Worker`], [`WorkerFn`]    |
//! | **Group**      | Register workers, start the run, await the outcome.  | [`Group`], [`GroupBuilder`] |
//! | **Errors**     | Typed failure carried from a worker to the caller.   | [`ToilError`]               |
//! | **Observability** | Subscribe to lifecycle events.                    | [`Subscribe`], [`Event`]    |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use toilgroup::{Group, ToilError, WorkerFn, WorkerRef};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ToilError> {
//!     let group = Group::new();
//!
//!     let hello: WorkerRef = WorkerFn::arc("hello", || async {
//!         println!("Hello from a worker!");
//!         Ok::<_, ToilError>(())
//!     });
//!     group.register(hello).await;
//!
//!     // Blocks until every worker finished, or returns the first failure.
//!     group.run().await
//! }
//! ```

mod config;
mod core;
mod error;
mod events;
mod subscribers;
mod workers;

// ---- Public re-exports ----

pub use config::GroupConfig;
pub use core::{Group, GroupBuilder};
pub use error::ToilError;
pub use events::{Event, EventKind};
pub use subscribers::Subscribe;
pub use workers::{Worker, WorkerFn, WorkerRef};

// Optional: expose a simple built-in stdout writer (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
