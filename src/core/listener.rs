//! # PhaseListener: a dedicated queue per waiter.
//!
//! The actor's shared queue delivers each phase to exactly one receiver, so
//! waiters compete. A [`PhaseListener`] is a private queue registered with the
//! actor: every phase announced after registration lands in it, independent of
//! other waiters.
//!
//! ```text
//!                ┌──► shared queue     ──► competing waiters
//! announce(p) ───┼──► listener A queue ──► waiter A
//!                └──► listener B queue ──► waiter B
//! ```
//!
//! Dropping the listener unregisters it on the next announce.

use std::sync::Arc;
use std::time::Duration;

use super::wait;
use crate::{error::WaitError, phase::Phase, queue::SignalQueue};

/// Per-waiter view of an actor's phase changes.
#[derive(Debug)]
pub struct PhaseListener {
    queue: Arc<SignalQueue<Phase>>,
}

impl PhaseListener {
    pub(crate) fn new(queue: Arc<SignalQueue<Phase>>) -> Self {
        Self { queue }
    }

    /// The underlying queue (LIFO, like the shared one).
    pub fn queue(&self) -> &SignalQueue<Phase> {
        &self.queue
    }

    /// Blocks until `target` is received on this listener.
    pub fn wait_for_phase(&self, target: Phase) {
        wait::wait_for(&self.queue, target);
    }

    /// Blocks until [`Phase::Green`] is received on this listener.
    pub fn wait_for_green(&self) {
        self.wait_for_phase(Phase::Green);
    }

    /// Bounded variant of [`wait_for_phase`](Self::wait_for_phase).
    pub fn wait_for_phase_timeout(&self, target: Phase, timeout: Duration) -> Result<(), WaitError> {
        wait::wait_for_timeout(&self.queue, target, timeout)
    }

    /// Async variant of [`wait_for_phase`](Self::wait_for_phase).
    pub async fn wait_for_phase_async(&self, target: Phase) {
        wait::wait_for_async(&self.queue, target).await;
    }
}
