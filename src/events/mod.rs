//! # Runtime events and the broadcast bus.
//!
//! - [`Event`] / [`EventKind`] - what happened, with optional metadata
//! - [`Bus`] - thin broadcast channel the coordinator and task wrappers
//!   publish to

mod bus;
mod event;

pub(crate) use bus::Bus;
pub use event::{Event, EventKind};
