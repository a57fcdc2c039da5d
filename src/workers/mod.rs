//! # Worker abstractions.
//!
//! This module provides the core worker-related types:
//! - [`Worker`] - trait for implementing a blocking unit of work with
//!   optional completion/failure hooks
//! - [`WorkerFn`] - function-backed worker implementation
//! - [`WorkerRef`] - shared reference to a worker (`Arc<dyn Worker>`)

mod worker;
mod worker_fn;

pub use worker::{Worker, WorkerRef};
pub use worker_fn::WorkerFn;
