//! # Shared phase state.
//!
//! [`PhaseState`] is what the toggling loops and the public [`PhaseActor`]
//! handle share: the current phase, the shared queue, the listener queues,
//! and a count of running loops.
//!
//! ## Lock discipline
//! ```text
//! toggle():   lock(phase) ─► flip ─► unlock
//! announce(): queue.send ─► lock(listeners) ─► upgrade/prune ─► unlock ─► listener.send ...
//! ```
//! The phase lock, the listener-list lock and any queue lock are never held
//! at the same time.
//!
//! [`PhaseActor`]: crate::PhaseActor

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use crate::{phase::Phase, queue::SignalQueue};

pub(crate) struct PhaseState {
    phase: Mutex<Phase>,
    queue: SignalQueue<Phase>,
    listeners: Mutex<Vec<Weak<SignalQueue<Phase>>>>,
    queue_limit: usize,
    active: AtomicUsize,
}

impl PhaseState {
    /// Starts in [`Phase::Red`] with empty queues.
    pub(crate) fn new(queue_limit: usize) -> Self {
        Self {
            phase: Mutex::new(Phase::Red),
            queue: SignalQueue::with_limit(queue_limit),
            listeners: Mutex::new(Vec::new()),
            queue_limit,
            active: AtomicUsize::new(0),
        }
    }

    pub(crate) fn current(&self) -> Phase {
        *self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Flips the phase under its lock and returns the new value.
    pub(crate) fn toggle(&self) -> Phase {
        let mut phase = self.phase.lock().unwrap_or_else(PoisonError::into_inner);
        *phase = phase.toggled();
        *phase
    }

    /// Hands `phase` to the shared queue and to every live listener queue.
    pub(crate) fn announce(&self, phase: Phase) {
        self.queue.send(phase);
        for listener in self.live_listeners() {
            listener.send(phase);
        }
    }

    pub(crate) fn queue(&self) -> &SignalQueue<Phase> {
        &self.queue
    }

    /// Registers a dedicated queue fed by every later `announce`.
    pub(crate) fn register(&self) -> Arc<SignalQueue<Phase>> {
        let queue = Arc::new(SignalQueue::with_limit(self.queue_limit));
        self.listeners().push(Arc::downgrade(&queue));
        queue
    }

    /// Number of registered listeners that are still alive.
    pub(crate) fn listener_count(&self) -> usize {
        self.live_listeners().len()
    }

    /// Snapshot of live listeners; dropped ones are pruned.
    fn live_listeners(&self) -> Vec<Arc<SignalQueue<Phase>>> {
        let mut listeners = self.listeners();
        let mut live = Vec::with_capacity(listeners.len());
        listeners.retain(|weak| match weak.upgrade() {
            Some(queue) => {
                live.push(queue);
                true
            }
            None => false,
        });
        live
    }

    fn listeners(&self) -> MutexGuard<'_, Vec<Weak<SignalQueue<Phase>>>> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks one toggling loop as running until the guard is dropped.
    pub(crate) fn enter(self: &Arc<Self>) -> ActiveGuard {
        self.active.fetch_add(1, Ordering::AcqRel);
        ActiveGuard(Arc::clone(self))
    }

    pub(crate) fn active(&self) -> usize {
        self.active.load(Ordering::Acquire)
    }
}

/// Decrements the running-loop count on drop (including abort).
pub(crate) struct ActiveGuard(Arc<PhaseState>);

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.active.fetch_sub(1, Ordering::AcqRel);
    }
}
