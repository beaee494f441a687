//! # Actor configuration.
//!
//! Provides [`Config`] centralized settings for a [`PhaseActor`](crate::PhaseActor).
//!
//! ## Sentinel values
//! - `queue_limit = 0` → unbounded queues
//! - `seed = None` → OS-seeded generator per toggling loop

use std::time::Duration;

use crate::{error::ConfigError, policies::IntervalPolicy};

/// Configuration for one phase actor.
///
/// ## Field semantics
/// - `interval_min`/`interval_max`: bounds of the randomized cycle (inclusive)
/// - `tick`: elapsed-time polling period of the toggling loop
/// - `queue_limit`: capacity of the shared and listener queues (`0` = unbounded)
/// - `bus_capacity`: event bus ring buffer size (min 1; clamped by Bus)
/// - `grace`: maximum wait for toggling loops to exit on shutdown
/// - `seed`: fixed generator seed (reproducible intervals)
///
/// ## Notes
/// All fields are public for flexibility. Prefer using helper accessors to avoid
/// sprinkling sentinel checks (`0`) across the codebase.
#[derive(Clone, Debug)]
pub struct Config {
    /// Shortest phase duration.
    pub interval_min: Duration,

    /// Longest phase duration (inclusive).
    pub interval_max: Duration,

    /// How often the toggling loop checks elapsed time.
    ///
    /// Bounds toggle latency to one tick past the drawn interval.
    pub tick: Duration,

    /// Capacity of every phase queue.
    ///
    /// - `0` = unbounded (history grows if nobody receives)
    /// - `n > 0` = keep the newest `n` phases, discarding the oldest
    pub queue_limit: usize,

    /// Capacity of the event bus broadcast channel ring buffer.
    pub bus_capacity: usize,

    /// Maximum time `shutdown` waits for toggling loops to exit.
    pub grace: Duration,

    /// Fixed seed for the interval generator.
    ///
    /// Each toggling loop derives its own stream from it.
    pub seed: Option<u64>,
}

impl Config {
    /// Default config with every cycle lasting exactly `d`.
    pub fn with_fixed_interval(d: Duration) -> Self {
        Self {
            interval_min: d,
            interval_max: d,
            ..Self::default()
        }
    }

    /// Returns the interval policy described by this config.
    #[inline]
    pub fn interval_policy(&self) -> IntervalPolicy {
        IntervalPolicy::new(self.interval_min, self.interval_max)
    }

    /// Returns the queue limit as an `Option`.
    ///
    /// - `None` → unbounded
    /// - `Some(n)` → at most `n` buffered phases
    #[inline]
    pub fn queue_limit(&self) -> Option<usize> {
        if self.queue_limit == 0 {
            None
        } else {
            Some(self.queue_limit)
        }
    }

    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Checks that the config can drive a toggling loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick.is_zero() {
            return Err(ConfigError::ZeroTick);
        }
        if self.interval_min > self.interval_max {
            return Err(ConfigError::InvalidInterval {
                min: self.interval_min,
                max: self.interval_max,
            });
        }
        if self.interval_max.as_millis() > u128::from(u32::MAX) {
            return Err(ConfigError::IntervalTooLarge {
                max: self.interval_max,
            });
        }
        Ok(())
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `interval = 4s..=6s`
    /// - `tick = 1ms`
    /// - `queue_limit = 0` (unbounded)
    /// - `bus_capacity = 1024`
    /// - `grace = 5s`
    /// - `seed = None`
    fn default() -> Self {
        let interval = IntervalPolicy::default();
        Self {
            interval_min: interval.min,
            interval_max: interval.max,
            tick: Duration::from_millis(1),
            queue_limit: 0,
            bus_capacity: 1024,
            grace: Duration::from_secs(5),
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = Config::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.interval_min, Duration::from_millis(4000));
        assert_eq!(cfg.interval_max, Duration::from_millis(6000));
        assert_eq!(cfg.queue_limit(), None);
    }

    #[test]
    fn test_rejects_inverted_interval() {
        let cfg = Config {
            interval_min: Duration::from_millis(10),
            interval_max: Duration::from_millis(5),
            ..Config::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidInterval {
                min: Duration::from_millis(10),
                max: Duration::from_millis(5),
            })
        );
    }

    #[test]
    fn test_rejects_zero_tick() {
        let cfg = Config {
            tick: Duration::ZERO,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroTick));
    }

    #[test]
    fn test_rejects_huge_interval() {
        let cfg = Config {
            interval_max: Duration::MAX,
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::IntervalTooLarge { .. })
        ));
    }

    #[test]
    fn test_interval_limit_is_u32_millis() {
        let at_limit = Config {
            interval_max: Duration::from_millis(u64::from(u32::MAX)),
            ..Config::default()
        };
        assert!(at_limit.validate().is_ok());

        let over = Duration::from_millis(u64::from(u32::MAX) + 1);
        let cfg = Config {
            interval_max: over,
            ..Config::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::IntervalTooLarge { max: over }));
    }

    #[test]
    fn test_fixed_interval_and_sentinels() {
        let mut cfg = Config::with_fixed_interval(Duration::from_millis(50));
        assert_eq!(cfg.interval_policy(), IntervalPolicy::fixed(Duration::from_millis(50)));
        cfg.queue_limit = 4;
        cfg.bus_capacity = 0;
        assert_eq!(cfg.queue_limit(), Some(4));
        assert_eq!(cfg.bus_capacity_clamped(), 1);
    }
}
