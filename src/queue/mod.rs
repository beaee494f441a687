//! Blocking handoff queue.
//!
//! ## Contents
//! - [`SignalQueue`] mutex + condvar queue with LIFO delivery, used by
//!   [`PhaseActor`](crate::PhaseActor) to announce phase changes to waiters.

mod signal_queue;

pub use signal_queue::SignalQueue;
