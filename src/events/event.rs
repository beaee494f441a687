//! # Lifecycle events emitted by phase actors.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Loop events**: toggling loop start/stop and phase changes
//! - **Shutdown events**: cancellation requested, loops joined or not in time
//! - **Subscriber events**: overflow and panic reports from the fan-out
//!
//! The [`Event`] struct carries additional metadata such as timestamps, actor
//! id, the new phase, and the next cycle duration.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when events are delivered out of order.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use phasevisor::{Event, EventKind, Phase};
//!
//! let ev = Event::new(EventKind::PhaseChanged)
//!     .with_actor(3)
//!     .with_phase(Phase::Green)
//!     .with_interval(Duration::from_millis(4500));
//!
//! assert_eq!(ev.kind, EventKind::PhaseChanged);
//! assert_eq!(ev.actor, Some(3));
//! assert_eq!(ev.phase, Some(Phase::Green));
//! assert_eq!(ev.interval_ms, Some(4500));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::phase::Phase;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of runtime events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Loop events ===
    /// A toggling loop started.
    ///
    /// Sets:
    /// - `actor`: actor id
    /// - `loop_no`: loop number within the actor (1-based)
    /// - `phase`: phase at loop start
    /// - `interval_ms`: first cycle duration
    ActorStarted,

    /// The actor flipped its phase.
    ///
    /// Sets:
    /// - `actor`: actor id
    /// - `loop_no`: loop that performed the toggle
    /// - `phase`: the new phase
    /// - `interval_ms`: duration of the next cycle
    PhaseChanged,

    /// A toggling loop exited after cancellation.
    ///
    /// Sets:
    /// - `actor`: actor id
    /// - `loop_no`: loop number
    /// - `phase`: phase at exit
    ActorStopped,

    // === Shutdown events ===
    /// Shutdown requested for an actor.
    ///
    /// Sets:
    /// - `actor`: actor id
    ShutdownRequested,

    /// All toggling loops stopped within the grace period.
    ///
    /// Sets:
    /// - `actor`: actor id
    AllStoppedWithin,

    /// Grace period exceeded; remaining loops were aborted.
    ///
    /// Sets:
    /// - `actor`: actor id
    /// - `reason`: number of stuck loops
    GraceExceeded,

    // === Subscriber events ===
    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: panic info/message
    SubscriberPanicked,

    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `source`: subscriber name
    /// - `reason`: reason string (e.g., "full", "closed")
    SubscriberOverflow,
}

/// Runtime event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,

    /// Id of the actor that produced the event.
    pub actor: Option<u64>,
    /// Toggling loop number within the actor (1-based).
    pub loop_no: Option<u32>,
    /// Phase carried by the event.
    pub phase: Option<Phase>,
    /// Next cycle duration in milliseconds (compact).
    pub interval_ms: Option<u32>,
    /// Human-readable reason (overflow details, panic info, etc.).
    pub reason: Option<Arc<str>>,
    /// Name of the non-actor source (subscriber name), if applicable.
    pub source: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            actor: None,
            loop_no: None,
            phase: None,
            interval_ms: None,
            reason: None,
            source: None,
        }
    }

    /// Attaches the producing actor id.
    #[inline]
    pub fn with_actor(mut self, id: u64) -> Self {
        self.actor = Some(id);
        self
    }

    /// Attaches the toggling loop number.
    #[inline]
    pub fn with_loop(mut self, n: u32) -> Self {
        self.loop_no = Some(n);
        self
    }

    /// Attaches a phase.
    #[inline]
    pub fn with_phase(mut self, phase: Phase) -> Self {
        self.phase = Some(phase);
        self
    }

    /// Attaches a cycle duration (stored as milliseconds).
    #[inline]
    pub fn with_interval(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.interval_ms = Some(ms);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a source name.
    #[inline]
    pub fn with_source(mut self, source: impl Into<Arc<str>>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_source(subscriber)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_source(subscriber)
            .with_reason(info)
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }

    #[inline]
    pub fn is_phase_change(&self) -> bool {
        matches!(self.kind, EventKind::PhaseChanged)
    }
}
