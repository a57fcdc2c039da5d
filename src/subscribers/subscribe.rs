//! # Core subscriber trait
//!
//! `Subscribe` is how embedders observe a group: register implementations
//! through [`GroupBuilder`](crate::GroupBuilder) and receive every
//! [`Event`] the coordinator and task wrappers publish.
//!
//! ## Contract
//! - Each subscriber runs on its own listener task; a slow subscriber does
//!   not block the publishers or other subscribers, but may lag behind the
//!   bus ring buffer and skip old events.
//! - A panic inside `on_event` terminates that subscriber's listener only.

use async_trait::async_trait;

use crate::events::Event;

/// Contract for event subscribers.
///
/// Called from a subscriber-dedicated listener task. Implementations should
/// avoid blocking the async runtime (prefer async I/O and cooperative
/// waits).
#[async_trait]
pub trait Subscribe: Send + Sync + 'static {
    /// Handles a single event for this subscriber.
    async fn on_event(&self, event: &Event);

    /// Human-readable name (for logs/metrics).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
