//! # PhaseActor: a two-phase timer with blocking waiters.
//!
//! Owns the current [`Phase`], a shared [`SignalQueue`], and the toggling loops
//! started by [`simulate`](PhaseActor::simulate). Callers observe the phase
//! with [`current_phase`](PhaseActor::current_phase) or block until a target
//! phase is announced with [`wait_for_phase`](PhaseActor::wait_for_phase).
//!
//! ## Architecture
//! ```text
//! PhaseActorBuilder::build()
//!     ├─► PhaseState { phase: Red, queue, listeners }
//!     ├─► Bus ──► feed task ──► SubscriberSet (if any subscribers)
//!     └─► PhaseActor
//!
//! simulate() ──► JoinSet::spawn_on(PhaseCycle::run(child_token))   (one per call)
//!
//! wait_for_phase(t):  loop { queue.receive() == t ? return : discard }
//!
//! shutdown():
//!     publish ShutdownRequested
//!     cancel token ──► every loop exits at its next tick
//!     join loops within `grace`:
//!        ├─ Ok       → publish AllStoppedWithin
//!        └─ Timeout  → abort rest, publish GraceExceeded, Err(GraceExceeded)
//!     close subscriber feed
//! ```
//!
//! ## Rules
//! - Construction fully initializes state; every method is valid before `simulate`.
//! - Call `simulate` once. Each extra call starts another loop whose toggles
//!   interleave with the first (a warning is logged).
//! - Blocking waits park the calling OS thread. Inside a tokio runtime use
//!   `spawn_blocking` or the `_async` variants.
//! - The shared queue has competing consumers: each phase reaches one waiter.
//!   Use [`listener`](PhaseActor::listener) for per-waiter delivery.
//! - `shutdown` is terminal; later `simulate` calls do nothing.
//! - Dropping the actor cancels its loops.

use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::{
    runtime::Handle,
    select,
    sync::broadcast::{self, error::RecvError},
    task::{JoinHandle, JoinSet},
    time,
};
use tokio_util::sync::CancellationToken;

use super::{
    builder::PhaseActorBuilder, config::Config, cycle::PhaseCycle, listener::PhaseListener,
    state::PhaseState, wait,
};
use crate::{
    error::{RuntimeError, WaitError},
    events::{Bus, Event, EventKind},
    phase::Phase,
    queue::SignalQueue,
    subscribers::{Subscribe, SubscriberSet},
};

/// Process-wide actor id counter.
static ACTOR_ID: AtomicU64 = AtomicU64::new(1);

/// Allocates the next process-unique actor id.
pub(crate) fn next_actor_id() -> u64 {
    ACTOR_ID.fetch_add(1, Ordering::Relaxed)
}

/// Two-phase actor toggling on a randomized timer.
pub struct PhaseActor {
    id: u64,
    cfg: Config,
    state: Arc<PhaseState>,
    bus: Bus,
    runtime: Handle,
    /// Cancels every toggling loop.
    token: CancellationToken,
    /// Stops the subscriber feed once loops are joined.
    feed_token: CancellationToken,
    loops: Mutex<JoinSet<()>>,
    feed: Mutex<Option<JoinHandle<()>>>,
    started: AtomicU32,
}

impl PhaseActor {
    /// Returns a builder for an actor with the given config.
    pub fn builder(cfg: Config) -> PhaseActorBuilder {
        PhaseActorBuilder::new(cfg)
    }

    /// Builds an actor on the current tokio runtime without subscribers.
    pub fn new(cfg: Config) -> Result<Self, RuntimeError> {
        Self::builder(cfg).build()
    }

    pub(crate) fn new_internal(
        id: u64,
        cfg: Config,
        runtime: Handle,
        subscribers: Vec<Arc<dyn Subscribe>>,
    ) -> Self {
        let bus = Bus::new(cfg.bus_capacity_clamped());
        let state = Arc::new(PhaseState::new(cfg.queue_limit));
        let feed_token = CancellationToken::new();

        let feed = (!subscribers.is_empty()).then(|| {
            let set = SubscriberSet::new(subscribers, bus.clone(), &runtime);
            runtime.spawn(subscriber_feed(bus.subscribe(), set, feed_token.clone()))
        });

        Self {
            id,
            cfg,
            state,
            bus,
            runtime,
            token: CancellationToken::new(),
            feed_token,
            loops: Mutex::new(JoinSet::new()),
            feed: Mutex::new(feed),
            started: AtomicU32::new(0),
        }
    }

    /// Actor identifier (process-unique unless set explicitly).
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Configuration the actor was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the current phase. Never blocks on the queue.
    pub fn current_phase(&self) -> Phase {
        self.state.current()
    }

    /// Starts a toggling loop and returns immediately.
    pub fn simulate(&self) {
        let mut loops = self.loops();
        if self.token.is_cancelled() {
            tracing::debug!(actor = self.id, "simulate after shutdown ignored");
            return;
        }

        let loop_no = self.started.fetch_add(1, Ordering::AcqRel) + 1;
        if loop_no > 1 {
            tracing::warn!(
                actor = self.id,
                loop_no,
                "simulate called more than once; toggles will interleave"
            );
        }

        let cycle = PhaseCycle {
            actor: self.id,
            loop_no,
            state: Arc::clone(&self.state),
            interval: self.cfg.interval_policy(),
            tick: self.cfg.tick,
            seed: self.cfg.seed,
            bus: self.bus.clone(),
        };
        loops.spawn_on(cycle.run(self.token.child_token()), &self.runtime);
    }

    /// Blocks until `target` is received from the shared queue.
    ///
    /// Values that are not `target` are discarded. No timeout.
    pub fn wait_for_phase(&self, target: Phase) {
        wait::wait_for(self.state.queue(), target);
    }

    /// Blocks until [`Phase::Green`] is received from the shared queue.
    pub fn wait_for_green(&self) {
        self.wait_for_phase(Phase::Green);
    }

    /// Bounded variant of [`wait_for_phase`](Self::wait_for_phase).
    pub fn wait_for_phase_timeout(&self, target: Phase, timeout: Duration) -> Result<(), WaitError> {
        wait::wait_for_timeout(self.state.queue(), target, timeout)
    }

    /// Async variant of [`wait_for_phase`](Self::wait_for_phase).
    pub async fn wait_for_phase_async(&self, target: Phase) {
        wait::wait_for_async(self.state.queue(), target).await;
    }

    /// Registers a dedicated queue that receives every later phase change.
    pub fn listener(&self) -> PhaseListener {
        PhaseListener::new(self.state.register())
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        self.state.listener_count()
    }

    /// The shared queue drained by [`wait_for_phase`](Self::wait_for_phase).
    pub fn queue(&self) -> &SignalQueue<Phase> {
        self.state.queue()
    }

    /// Creates a new receiver of this actor's events.
    pub fn events(&self) -> broadcast::Receiver<Event> {
        self.bus.subscribe()
    }

    /// Number of toggling loops currently running.
    pub fn running_loops(&self) -> usize {
        self.state.active()
    }

    /// True while at least one loop runs and shutdown was not requested.
    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled() && self.state.active() > 0
    }

    /// Stops every toggling loop and waits for them up to [`Config::grace`].
    pub async fn shutdown(&self) -> Result<(), RuntimeError> {
        let mut set = {
            let mut loops = self.loops();
            self.bus
                .publish(Event::new(EventKind::ShutdownRequested).with_actor(self.id));
            self.token.cancel();
            std::mem::take(&mut *loops)
        };

        let grace = self.cfg.grace;
        let done = async { while set.join_next().await.is_some() {} };
        let joined = time::timeout(grace, done).await;
        let res = match joined {
            Ok(()) => {
                self.bus
                    .publish(Event::new(EventKind::AllStoppedWithin).with_actor(self.id));
                Ok(())
            }
            Err(_elapsed) => {
                let stuck = set.len();
                set.abort_all();
                self.bus.publish(
                    Event::new(EventKind::GraceExceeded)
                        .with_actor(self.id)
                        .with_reason(format!("stuck loops={stuck}")),
                );
                Err(RuntimeError::GraceExceeded { grace, stuck })
            }
        };

        self.close_feed(grace).await;
        res
    }

    async fn close_feed(&self, grace: Duration) {
        self.feed_token.cancel();
        let feed = self.feed.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(handle) = feed {
            if time::timeout(grace, handle).await.is_err() {
                tracing::warn!(actor = self.id, "subscriber feed did not stop within grace");
            }
        }
    }

    fn loops(&self) -> MutexGuard<'_, JoinSet<()>> {
        self.loops.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for PhaseActor {
    fn drop(&mut self) {
        self.token.cancel();
        self.feed_token.cancel();
    }
}

impl std::fmt::Debug for PhaseActor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhaseActor")
            .field("id", &self.id)
            .field("phase", &self.current_phase())
            .field("running_loops", &self.running_loops())
            .finish_non_exhaustive()
    }
}

/// Forwards bus events to the subscriber set until `stop` fires, then drains
/// what is already buffered and shuts the set down.
async fn subscriber_feed(
    mut rx: broadcast::Receiver<Event>,
    set: SubscriberSet,
    stop: CancellationToken,
) {
    loop {
        select! {
            biased;
            res = rx.recv() => match res {
                Ok(ev) => set.emit(&ev),
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "subscriber feed lagged");
                }
                Err(RecvError::Closed) => break,
            },
            _ = stop.cancelled() => {
                while let Ok(ev) = rx.try_recv() {
                    set.emit(&ev);
                }
                break;
            }
        }
    }
    set.shutdown().await;
}
