//! # LogWriter — events as tracing records
//!
//! A minimal subscriber that turns incoming [`Event`]s into `tracing` records.
//! Install any `tracing` subscriber (e.g. `tracing_subscriber::fmt`) to see them.
//!
//! ## Example output (fmt subscriber)
//! ```text
//! INFO phasevisor: started actor=1 loop_no=1 phase=red interval_ms=4821
//! INFO phasevisor: phase actor=1 loop_no=1 phase=green interval_ms=5310
//! INFO phasevisor: stopped actor=1 loop_no=1 phase=green
//! INFO phasevisor: shutdown-requested actor=1
//! INFO phasevisor: all-stopped-within-grace actor=1
//! ```

use async_trait::async_trait;

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        let phase = e.phase.map(|p| p.as_str());
        match e.kind {
            EventKind::ActorStarted => {
                tracing::info!(
                    target: "phasevisor",
                    actor = e.actor,
                    loop_no = e.loop_no,
                    phase,
                    interval_ms = e.interval_ms,
                    "started"
                );
            }
            EventKind::PhaseChanged => {
                tracing::info!(
                    target: "phasevisor",
                    actor = e.actor,
                    loop_no = e.loop_no,
                    phase,
                    interval_ms = e.interval_ms,
                    "phase"
                );
            }
            EventKind::ActorStopped => {
                tracing::info!(
                    target: "phasevisor",
                    actor = e.actor,
                    loop_no = e.loop_no,
                    phase,
                    "stopped"
                );
            }
            EventKind::ShutdownRequested => {
                tracing::info!(target: "phasevisor", actor = e.actor, "shutdown-requested");
            }
            EventKind::AllStoppedWithin => {
                tracing::info!(target: "phasevisor", actor = e.actor, "all-stopped-within-grace");
            }
            EventKind::GraceExceeded => {
                tracing::warn!(
                    target: "phasevisor",
                    actor = e.actor,
                    reason = e.reason.as_deref(),
                    "grace-exceeded"
                );
            }
            EventKind::SubscriberOverflow => {
                tracing::warn!(
                    target: "phasevisor",
                    subscriber = e.source.as_deref(),
                    reason = e.reason.as_deref(),
                    "subscriber-overflow"
                );
            }
            EventKind::SubscriberPanicked => {
                tracing::warn!(
                    target: "phasevisor",
                    subscriber = e.source.as_deref().unwrap_or("unknown"),
                    info = e.reason.as_deref().unwrap_or("unknown"),
                    "subscriber-panicked"
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
