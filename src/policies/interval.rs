//! # Randomized cycle interval.
//!
//! [`IntervalPolicy`] picks how long a phase lasts before the toggling loop
//! flips it. Each draw is uniform over `[min, max]` (inclusive, millisecond
//! granularity).
//!
//! Every toggling loop owns its own generator (see [`IntervalPolicy::rng`]),
//! so intervals stay independent across actors and no generator is shared
//! between threads.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use phasevisor::IntervalPolicy;
//!
//! let policy = IntervalPolicy::new(Duration::from_millis(10), Duration::from_millis(20));
//! let mut rng = policy.rng(Some(7), 0);
//! let d = policy.draw(&mut rng);
//! assert!(d >= Duration::from_millis(10) && d <= Duration::from_millis(20));
//! ```

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Golden-ratio increment used to spread per-loop seeds.
const SEED_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

const NANOS_PER_MILLI: u128 = 1_000_000;

/// Uniform interval policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalPolicy {
    /// Shortest cycle.
    pub min: Duration,
    /// Longest cycle (inclusive).
    pub max: Duration,
}

impl Default for IntervalPolicy {
    /// 4–6 seconds.
    fn default() -> Self {
        Self {
            min: Duration::from_millis(4000),
            max: Duration::from_millis(6000),
        }
    }
}

impl IntervalPolicy {
    pub fn new(min: Duration, max: Duration) -> Self {
        Self { min, max }
    }

    /// Every cycle lasts exactly `d`.
    pub fn fixed(d: Duration) -> Self {
        Self { min: d, max: d }
    }

    /// Draws the next cycle duration.
    ///
    /// Draws are whole milliseconds inside `[min, max]`: the lower bound is
    /// rounded up, the upper bound down. If no two such values exist the
    /// lower bound is returned unchanged.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let min_ms = whole_millis(self.min.as_nanos().div_ceil(NANOS_PER_MILLI));
        let max_ms = whole_millis(self.max.as_millis());
        if min_ms >= max_ms {
            return self.min;
        }
        Duration::from_millis(rng.random_range(min_ms..=max_ms))
    }

    /// Builds the private generator for one toggling loop.
    ///
    /// - `seed = None` → seeded from the OS.
    /// - `seed = Some(s)` → deterministic, distinct per `loop_no`.
    pub fn rng(&self, seed: Option<u64>, loop_no: u64) -> StdRng {
        match seed {
            Some(s) => StdRng::seed_from_u64(s ^ loop_no.wrapping_mul(SEED_SPREAD)),
            None => StdRng::from_os_rng(),
        }
    }
}

fn whole_millis(ms: u128) -> u64 {
    u64::try_from(ms).unwrap_or(u64::MAX)
}
