//! # Demo: late_registration
//!
//! Demonstrates registering a worker while the group is already toiling.
//!
//! Shows how to:
//! - Start a run from a spawned task so the caller stays free.
//! - Register a worker mid-run; it is spawned immediately.
//! - Observe `run()` waiting for the late worker too.
//!
//! ## Flow
//! ```text
//! Group::run() (spawned) ──► [early] toils...
//! Group::register(late)  ──► coordinator appends + spawns immediately
//!                                 └─► [late] toils ──► returns
//! [early] returns ──► outstanding count hits zero ──► run() ──► Ok(())
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example late_registration
//! ```

use std::sync::Arc;
use std::time::Duration;

use toilgroup::{Group, ToilError, WorkerFn, WorkerRef};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let group = Arc::new(Group::new());

    let early: WorkerRef = WorkerFn::arc("early", || async {
        println!("[early] toiling for a while...");
        tokio::time::sleep(Duration::from_secs(1)).await;
        println!("[early] done");
        Ok::<_, ToilError>(())
    });
    group.register(early).await;

    // Start the run in the background; the group handle stays usable.
    let running = {
        let group = Arc::clone(&group);
        tokio::spawn(async move { group.run().await })
    };

    tokio::time::sleep(Duration::from_millis(300)).await;

    // The run is in progress, so this worker starts toiling immediately.
    let late: WorkerRef = WorkerFn::arc("late", || async {
        println!("[late] joined mid-run");
        tokio::time::sleep(Duration::from_millis(200)).await;
        println!("[late] done");
        Ok::<_, ToilError>(())
    });
    group.register(late).await;
    println!("registered workers: {}", group.len().await);

    running.await??;
    println!("run finished; every worker (early and late) completed");
    Ok(())
}
