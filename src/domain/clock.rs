//! Source of the current timestamp.

use std::time::{SystemTime, UNIX_EPOCH};

/// Supplies "now" in unix seconds to quoting and committing.
///
/// The oracle decay and ramp logic depend on the current time; a
/// [`Clock::Fixed`] makes every computation reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Clock {
    /// Wall-clock time.
    #[default]
    System,
    /// A pinned timestamp.
    Fixed(u64),
}

impl Clock {
    /// Current unix time in seconds.
    #[must_use]
    pub fn now(&self) -> u64 {
        match self {
            Self::System => SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default(),
            Self::Fixed(ts) => *ts,
        }
    }
}
