//! Timing policies.
//!
//! ## Contents
//! - [`IntervalPolicy`] how long each phase lasts (uniform over `[min, max]`)
//!
//! ## Quick wiring
//! ```text
//! Config { interval_min, interval_max, seed }
//!      └─► core::cycle::PhaseCycle uses:
//!           - policy.rng(seed, loop_no) once per loop
//!           - policy.draw(&mut rng) after every toggle
//! ```

mod interval;

pub use interval::IntervalPolicy;
