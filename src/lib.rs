//! # phasevisor
//!
//! **phasevisor** is a small concurrency primitive: an actor that cycles between
//! two phases on a randomized timer, announces every change through a blocking
//! LIFO queue, and lets callers block until a specific phase is reached.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────────────────────────────────────────────────────┐
//!     │  PhaseActor                                                  │
//!     │  - PhaseState { phase (Mutex), queue, listener queues }      │
//!     │  - Bus (broadcast events) ─► SubscriberSet (optional)        │
//!     │  - JoinSet of toggling loops + CancellationToken             │
//!     └──────┬───────────────────────────────────────────┬───────────┘
//!            │ simulate()                                │ wait_for_phase(t)
//!            ▼                                           ▼
//!     ┌──────────────┐  toggle()   ┌─────────┐   receive()  ┌──────────┐
//!     │ PhaseCycle   │ ──────────► │  phase  │              │  waiter  │
//!     │ (tick loop)  │  announce() ├─────────┤ ───────────► │ (thread) │
//!     └──────────────┘ ──────────► │ queues  │   LIFO pop   └──────────┘
//!            │                     └─────────┘
//!            │ publish(Event)
//!            ▼
//!      Bus ─► feed task ─► SubscriberSet ─► [queue] ─► worker ─► on_event()
//! ```
//!
//! ### Toggling loop
//! ```text
//! interval = uniform[min, max]        (per-loop seeded generator)
//! loop {
//!   ├─► wait one tick (cancellable)
//!   ├─► elapsed < interval ─► continue
//!   ├─► lock phase, flip, unlock
//!   ├─► send new phase to shared queue + listener queues
//!   └─► reset baseline, draw next interval, publish PhaseChanged
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                       |
//! |-------------------|--------------------------------------------------------------|------------------------------------------|
//! | **Queue**         | Blocking LIFO handoff with notifying send.                   | [`SignalQueue`]                          |
//! | **Actor**         | Randomized two-phase timer, blocking and async waits.        | [`PhaseActor`], [`Phase`]                |
//! | **Listeners**     | Per-waiter queues fed by the same actor.                     | [`PhaseListener`]                        |
//! | **Subscriber API**| Hook into actor events (logging, metrics, custom).           | [`Subscribe`], [`Event`], [`EventKind`]  |
//! | **Errors**        | Typed errors for config, runtime and bounded waits.          | [`ConfigError`], [`RuntimeError`], [`WaitError`] |
//! | **Configuration** | Interval bounds, tick, queue cap, grace, seed.               | [`Config`], [`IntervalPolicy`]           |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogWriter`] that turns events into `tracing` records.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use phasevisor::{Config, Phase, PhaseActor};
//!
//! #[tokio::main(flavor = "multi_thread", worker_threads = 2)]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let cfg = Config::with_fixed_interval(Duration::from_millis(20));
//!     let actor = Arc::new(PhaseActor::builder(cfg).build()?);
//!     assert_eq!(actor.current_phase(), Phase::Red);
//!
//!     actor.simulate();
//!
//!     let waiter = Arc::clone(&actor);
//!     tokio::task::spawn_blocking(move || waiter.wait_for_green()).await?;
//!
//!     actor.shutdown().await?;
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod phase;
mod policies;
mod queue;
mod subscribers;

// ---- Public re-exports ----

pub use self::core::{Config, PhaseActor, PhaseActorBuilder, PhaseListener};
pub use error::{ConfigError, RuntimeError, WaitError};
pub use events::{Event, EventKind};
pub use phase::Phase;
pub use policies::IntervalPolicy;
pub use queue::SignalQueue;
pub use subscribers::Subscribe;

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
