//! Builder for constructing a [`Group`] with optional observability.

use std::sync::Arc;

use crate::config::GroupConfig;
use crate::core::coordinator::Coordinator;
use crate::core::group::Group;
use crate::core::signals::RunSignals;
use crate::events::Bus;
use crate::subscribers::{self, Subscribe};

/// Builder for a [`Group`].
///
/// ## Example
/// ```rust,no_run
/// use toilgroup::{Group, GroupConfig};
///
/// # async fn build() {
/// let group = Group::builder()
///     .with_config(GroupConfig { bus_capacity: 64 })
///     .build();
/// # }
/// ```
pub struct GroupBuilder {
    config: GroupConfig,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl GroupBuilder {
    pub(crate) fn new() -> Self {
        Self {
            config: GroupConfig::default(),
            subscribers: Vec::new(),
        }
    }

    /// Sets the group configuration.
    pub fn with_config(mut self, config: GroupConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds one event subscriber.
    pub fn with_subscriber(mut self, subscriber: Arc<dyn Subscribe>) -> Self {
        self.subscribers.push(subscriber);
        self
    }

    /// Replaces the subscriber list.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Builds the group: event bus, subscriber listeners, run signals, and
    /// the coordinator loop.
    ///
    /// ### Panics
    /// Must be called from within a Tokio runtime; the coordinator and
    /// subscriber listeners are spawned here.
    pub fn build(self) -> Group {
        let bus = Bus::new(self.config.bus_capacity);
        subscribers::spawn_listeners(&bus, self.subscribers);

        let signals = Arc::new(RunSignals::new());
        let requests = Coordinator::spawn(Arc::clone(&signals), bus.clone());
        Group::from_parts(requests, signals, bus)
    }
}
