//! Actor events: types and broadcast bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: toggling loops (`core::cycle`), `PhaseActor::shutdown`,
//!   `SubscriberSet` workers (overflow/panic).
//! - **Consumers**: the actor's subscriber listener (fans out to `SubscriberSet`)
//!   and any receiver obtained from `PhaseActor::events()`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
