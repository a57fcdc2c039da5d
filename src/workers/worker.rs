//! # Worker trait and shared handle type.
//!
//! A [`Worker`] is a unit of work with a single blocking operation,
//! [`toil`](Worker::toil), plus two optional notification hooks. The common
//! handle type is [`WorkerRef`], an `Arc<dyn Worker>` suitable for sharing
//! across the runtime.
//!
//! A worker has no identity beyond its reference: registering the same
//! `Arc` with a group twice produces two independent registry entries, and
//! both are spawned when the group runs.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ToilError;

/// # A unit of work, with optional lifecycle hooks.
///
/// [`toil`](Worker::toil) performs the work and stays pending until the work
/// is done. It finishes in one of three ways: returning `Ok(())` (graceful),
/// returning `Err(ToilError)` (failure), or panicking (converted into
/// [`ToilError::Panicked`] by the group).
///
/// The hooks are the optional half of the contract. Both have no-op default
/// bodies, so a plain worker implements only `toil`:
/// - [`on_returned`](Worker::on_returned) fires after a graceful return;
/// - [`on_failed`](Worker::on_failed) fires after a failure, receiving the
///   same failure that terminated `toil`.
///
/// ### Rules
/// - The group imposes no timeout; `toil` may stay pending indefinitely.
/// - Hooks run on detached tasks, fire-and-forget: nothing awaits them and a
///   panic inside a hook is not caught by the group.
/// - `name` is used only for events and logs; it carries no identity.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use toilgroup::{ToilError, Worker};
///
/// struct Mailer;
///
/// #[async_trait]
/// impl Worker for Mailer {
///     fn name(&self) -> &str { "mailer" }
///
///     async fn toil(&self) -> Result<(), ToilError> {
///         // drain the outbox...
///         Ok(())
///     }
///
///     async fn on_returned(&self) {
///         // outbox drained, record it somewhere
///     }
/// }
/// ```
#[async_trait]
pub trait Worker: Send + Sync + 'static {
    /// Returns a human-readable worker name (for events/logs).
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Performs the work, staying pending until the work is done.
    async fn toil(&self) -> Result<(), ToilError>;

    /// Notification hook: `toil` returned gracefully. Default: no-op.
    async fn on_returned(&self) {}

    /// Notification hook: `toil` terminated abnormally, with the failure
    /// that terminated it. Default: no-op.
    async fn on_failed(&self, failure: &ToilError) {
        let _ = failure;
    }
}

/// Shared handle to a worker.
pub type WorkerRef = Arc<dyn Worker>;
