//! # Group configuration.
//!
//! Provides [`GroupConfig`], the ambient settings for a group instance.
//! The coordination semantics themselves have no tunables; configuration
//! only covers the observability surface.
//!
//! ## Sentinel values
//! - `bus_capacity = 0` → clamped to 1 by the bus.

/// Configuration for a [`Group`](crate::Group) instance.
///
/// ## Field semantics
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by the bus).
///   Subscribers that lag behind more than `bus_capacity` events skip the
///   oldest items.
#[derive(Clone, Debug)]
pub struct GroupConfig {
    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self { bus_capacity: 256 }
    }
}
