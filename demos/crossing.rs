//! # Crossing demo
//!
//! Four phase actors with short randomized cycles. Each actor gets a few
//! "vehicles" (blocking threads) that wait on their own listener for green,
//! then the demo shuts every actor down.
//!
//! ## Run
//! ```bash
//! RUST_LOG=info cargo run --example crossing --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use phasevisor::{Config, LogWriter, PhaseActor, Subscribe};
use tracing_subscriber::EnvFilter;

const ACTORS: usize = 4;
const VEHICLES_PER_ACTOR: usize = 3;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = Config {
        interval_min: Duration::from_millis(400),
        interval_max: Duration::from_millis(600),
        ..Config::default()
    };
    let log: Arc<dyn Subscribe> = Arc::new(LogWriter::new());

    let mut actors = Vec::with_capacity(ACTORS);
    for _ in 0..ACTORS {
        let actor = PhaseActor::builder(cfg.clone())
            .with_subscribers(vec![Arc::clone(&log)])
            .build()?;
        actor.simulate();
        actors.push(actor);
    }

    let mut vehicles = Vec::new();
    for actor in &actors {
        for n in 0..VEHICLES_PER_ACTOR {
            let listener = actor.listener();
            let id = actor.id();
            vehicles.push(tokio::task::spawn_blocking(move || {
                listener.wait_for_green();
                tracing::info!(actor = id, vehicle = n, "vehicle crossed");
            }));
        }
    }
    for v in vehicles {
        v.await?;
    }

    for actor in &actors {
        tracing::info!(actor = actor.id(), phase = %actor.current_phase(), "final phase");
        actor.shutdown().await?;
    }
    Ok(())
}
