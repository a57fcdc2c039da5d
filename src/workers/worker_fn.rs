//! # Function-backed worker (`WorkerFn`)
//!
//! [`WorkerFn`] wraps a closure `F: Fn() -> Fut`, producing a fresh future
//! per invocation. Use it when a full [`Worker`] type is overkill; closures
//! that need the notification hooks should implement [`Worker`] directly.
//!
//! ## Example
//! ```rust
//! use toilgroup::{ToilError, Worker, WorkerFn, WorkerRef};
//!
//! let w: WorkerRef = WorkerFn::arc("payroll", || async {
//!     // do work...
//!     Ok::<_, ToilError>(())
//! });
//!
//! assert_eq!(w.name(), "payroll");
//! ```

use std::borrow::Cow;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ToilError;
use crate::workers::worker::Worker;

/// Function-backed worker implementation.
///
/// Wraps a closure that *creates* a new future per invocation.
#[derive(Debug)]
pub struct WorkerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> WorkerFn<F> {
    /// Creates a new function-backed worker.
    ///
    /// Prefer [`WorkerFn::arc`] when you immediately need a [`WorkerRef`].
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the worker and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Worker for WorkerFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), ToilError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn toil(&self) -> Result<(), ToilError> {
        (self.f)().await
    }
}
