//! # Demo: basic_group
//!
//! Minimal example of a group of one-shot workers that all run to completion.
//!
//! Demonstrates how to:
//! - Define simple workers using [`WorkerFn`].
//! - Register them with a [`Group`].
//! - Start the run with [`Group::run`] and wait for the aggregate outcome.
//!
//! ## Flow
//! ```text
//! Group::register(w) ──► coordinator appends to the registry
//! Group::run()       ──► coordinator spawns one wrapper per worker
//!     ├─► [alpha] toils ──► returns
//!     ├─► [bravo] toils ──► returns
//!     └─► [charlie] toils ──► returns
//! run() ──► Ok(()) once the outstanding count reaches zero
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example basic_group
//! ```

use std::time::Duration;

use toilgroup::{Group, ToilError, WorkerFn, WorkerRef};

fn chatty(name: &'static str, ticks: u32) -> WorkerRef {
    WorkerFn::arc(name, move || async move {
        println!("[{name}] started");
        for i in 1..=ticks {
            println!("[{name}] tick {i}");
            tokio::time::sleep(Duration::from_millis(200)).await;
        }
        println!("[{name}] done");
        Ok::<_, ToilError>(())
    })
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create an empty, idle group
    let group = Group::new();

    // 2. Register a few workers; they do not start yet
    group.register(chatty("alpha", 3)).await;
    group.register(chatty("bravo", 2)).await;
    group.register(chatty("charlie", 1)).await;
    println!("registered {} workers", group.len().await);

    // 3. Make them all toil at the same time, and wait
    group.run().await?;

    println!("all workers finished");
    Ok(())
}
