//! # Two-state phase value.
//!
//! [`Phase`] is the state a [`PhaseActor`](crate::PhaseActor) cycles through.
//! It has no identity beyond its value and is compared by equality.
//!
//! ```rust
//! use phasevisor::Phase;
//!
//! assert_eq!(Phase::default(), Phase::Red);
//! assert_eq!(Phase::Red.toggled(), Phase::Green);
//! assert_eq!(Phase::Green.to_string(), "green");
//! ```

use std::fmt;

/// Current phase of an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Initial phase of every actor.
    #[default]
    Red,
    /// The phase waiters usually block for.
    Green,
}

impl Phase {
    /// Returns the other phase (`Red → Green`, `Green → Red`).
    #[inline]
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Phase::Red => Phase::Green,
            Phase::Green => Phase::Red,
        }
    }

    /// Short lowercase label used in logs and events.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Red => "red",
            Phase::Green => "green",
        }
    }

    /// True for [`Phase::Green`].
    #[inline]
    pub fn is_green(&self) -> bool {
        matches!(self, Phase::Green)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
