use std::sync::Arc;

use tokio::runtime::Handle;

use super::{
    actor::{PhaseActor, next_actor_id},
    config::Config,
};
use crate::{error::RuntimeError, subscribers::Subscribe};

/// Builder for constructing a [`PhaseActor`] with optional features.
pub struct PhaseActorBuilder {
    cfg: Config,
    id: Option<u64>,
    subscribers: Vec<Arc<dyn Subscribe>>,
    runtime: Option<Handle>,
}

impl PhaseActorBuilder {
    /// Creates a new builder with the given configuration.
    pub fn new(cfg: Config) -> Self {
        Self {
            cfg,
            id: None,
            subscribers: Vec::new(),
            runtime: None,
        }
    }

    /// Overrides the allocated actor id.
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Sets event subscribers for observability.
    ///
    /// Subscribers receive actor events (start, phase changes, shutdown)
    /// through dedicated workers with bounded queues.
    pub fn with_subscribers(mut self, subscribers: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subscribers;
        self
    }

    /// Runtime that hosts the toggling loops and subscriber workers.
    ///
    /// Defaults to the runtime `build` is called from.
    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Validates the config and builds the actor.
    ///
    /// Fails with [`RuntimeError::Config`] for an invalid config and with
    /// [`RuntimeError::NoRuntime`] when no runtime handle is available.
    pub fn build(self) -> Result<PhaseActor, RuntimeError> {
        self.cfg.validate()?;
        let runtime = match self.runtime {
            Some(handle) => handle,
            None => Handle::try_current().map_err(|_| RuntimeError::NoRuntime)?,
        };
        let id = self.id.unwrap_or_else(next_actor_id);
        Ok(PhaseActor::new_internal(
            id,
            self.cfg,
            runtime,
            self.subscribers,
        ))
    }
}
