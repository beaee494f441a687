//! # PhaseCycle: the toggling loop.
//!
//! Flips an actor's phase on a randomized schedule and announces every flip.
//!
//! ## Architecture
//! ```text
//! PhaseActor::simulate() ──► PhaseCycle::run(child_token)
//!
//! rng = policy.rng(seed, loop_no); cycle = draw(rng)
//! publish ActorStarted
//! loop {
//!   ├─► wait one tick (or cancellation ─► break)
//!   ├─► elapsed < cycle ─► continue
//!   ├─► state.toggle()          (phase lock held only here)
//!   ├─► state.announce(phase)   (shared queue + listener queues)
//!   ├─► reset baseline, cycle = draw(rng)
//!   └─► publish PhaseChanged
//! }
//! publish ActorStopped
//! ```
//!
//! ## Rules
//! - Toggles are unconditional and driven only by elapsed time.
//! - The phase lock is released before anything is sent.
//! - Cancellation is checked every tick; latency is bounded by one tick.

use std::sync::Arc;
use std::time::Duration;

use tokio::{
    select,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use super::state::PhaseState;
use crate::{
    events::{Bus, Event, EventKind},
    policies::IntervalPolicy,
};

/// One toggling loop of an actor.
pub(crate) struct PhaseCycle {
    pub actor: u64,
    pub loop_no: u32,
    pub state: Arc<PhaseState>,
    pub interval: IntervalPolicy,
    pub tick: Duration,
    pub seed: Option<u64>,
    pub bus: Bus,
}

impl PhaseCycle {
    /// Runs until `token` is cancelled.
    pub(crate) async fn run(self, token: CancellationToken) {
        let _alive = self.state.enter();
        let mut rng = self.interval.rng(self.seed, u64::from(self.loop_no));
        let mut cycle = self.interval.draw(&mut rng);

        self.bus.publish(
            self.event(EventKind::ActorStarted)
                .with_phase(self.state.current())
                .with_interval(cycle),
        );

        let mut ticker = time::interval(self.tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last = Instant::now();

        loop {
            select! {
                biased;
                _ = token.cancelled() => break,
                _ = ticker.tick() => {}
            }
            if last.elapsed() < cycle {
                continue;
            }

            let phase = self.state.toggle();
            self.state.announce(phase);

            last = Instant::now();
            cycle = self.interval.draw(&mut rng);

            self.bus.publish(
                self.event(EventKind::PhaseChanged)
                    .with_phase(phase)
                    .with_interval(cycle),
            );
        }

        self.bus
            .publish(self.event(EventKind::ActorStopped).with_phase(self.state.current()));
    }

    fn event(&self, kind: EventKind) -> Event {
        Event::new(kind)
            .with_actor(self.actor)
            .with_loop(self.loop_no)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phase::Phase;

    fn cycle(state: &Arc<PhaseState>, bus: &Bus, every: Duration) -> PhaseCycle {
        PhaseCycle {
            actor: 7,
            loop_no: 1,
            state: Arc::clone(state),
            interval: IntervalPolicy::fixed(every),
            tick: Duration::from_millis(1),
            seed: Some(1),
            bus: bus.clone(),
        }
    }

    #[tokio::test]
    async fn test_toggles_and_announces() {
        let state = Arc::new(PhaseState::new(0));
        let bus = Bus::new(64);
        let mut rx = bus.subscribe();
        let token = CancellationToken::new();

        let h = tokio::spawn(cycle(&state, &bus, Duration::from_millis(5)).run(token.clone()));

        let started = rx.recv().await.unwrap();
        assert_eq!(started.kind, EventKind::ActorStarted);
        assert_eq!(started.phase, Some(Phase::Red));
        assert_eq!(started.actor, Some(7));

        let first = rx.recv().await.unwrap();
        assert_eq!(first.kind, EventKind::PhaseChanged);
        assert_eq!(first.phase, Some(Phase::Green));
        assert_eq!(first.interval_ms, Some(5));

        let second = rx.recv().await.unwrap();
        assert_eq!(second.phase, Some(Phase::Red));

        token.cancel();
        h.await.unwrap();
        assert_eq!(state.active(), 0);

        let mut last = None;
        while let Ok(ev) = rx.try_recv() {
            last = Some(ev.kind);
        }
        assert_eq!(last, Some(EventKind::ActorStopped));
        assert!(!state.queue().is_empty());
    }

    #[tokio::test]
    async fn test_cancel_before_first_toggle() {
        let state = Arc::new(PhaseState::new(0));
        let bus = Bus::new(8);
        let token = CancellationToken::new();
        token.cancel();

        cycle(&state, &bus, Duration::from_secs(60)).run(token).await;

        assert_eq!(state.current(), Phase::Red);
        assert!(state.queue().is_empty());
    }
}
