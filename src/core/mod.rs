//! Actor core: state, toggling loop and lifecycle.
//!
//! Public API from this module is [`PhaseActor`], its [`PhaseActorBuilder`],
//! [`PhaseListener`] and [`Config`].
//!
//! Internal modules:
//! - [`state`]: current phase, shared queue, listener queues (lock discipline lives here);
//! - [`cycle`]: the toggling loop (randomized interval, tick polling, cancellation);
//! - [`wait`]: wait-for-target loops shared by the actor and listeners;
//! - [`actor`]: public handle, `simulate`/`shutdown`, subscriber feed;
//! - [`builder`]: validated construction.

mod actor;
mod builder;
mod config;
mod cycle;
mod listener;
mod state;
mod wait;

pub use actor::PhaseActor;
pub use builder::PhaseActorBuilder;
pub use config::Config;
pub use listener::PhaseListener;
