//! # LogWriter - simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [registered] worker="mailer"
//! [run-starting]
//! [spawned] worker="mailer"
//! [failed] worker="mailer" err="error: connection refused"
//! [returned] worker="janitor"
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Constructs a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let worker = e.worker.as_deref().unwrap_or("unknown");
        match e.kind {
            EventKind::WorkerRegistered => {
                println!("[registered] worker={worker:?}");
            }
            EventKind::RunStarting => {
                println!("[run-starting]");
            }
            EventKind::WorkerSpawned => {
                println!("[spawned] worker={worker:?}");
            }
            EventKind::WorkerReturned => {
                println!("[returned] worker={worker:?}");
            }
            EventKind::WorkerFailed => {
                let err = e.error.as_deref().unwrap_or("unknown");
                println!("[failed] worker={worker:?} err={err:?}");
            }
        }
    }

    fn name(&self) -> &'static str {
        "log_writer"
    }
}
