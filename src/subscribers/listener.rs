//! Per-subscriber listener loops over the event bus.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use crate::events::Bus;
use crate::subscribers::Subscribe;

/// Spawns one detached listener task per subscriber.
///
/// Each listener owns an independent bus receiver, so subscribers observe
/// events at their own pace. Lagged listeners skip the overwritten items and
/// keep going; listeners exit once the bus has no publishers left.
pub(crate) fn spawn_listeners(bus: &Bus, subscribers: Vec<Arc<dyn Subscribe>>) {
    for subscriber in subscribers {
        let mut rx = bus.subscribe();
        tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(event) => subscriber.on_event(&event).await,
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => break,
                }
            }
        });
    }
}
