//! Timestamp type used throughout the platform.
//!
//! Timestamps are Unix epoch seconds (UTC). Event dates and voting deadlines
//! are stored in this form; all deadline comparisons are plain integer
//! comparisons against a caller-supplied "now".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds in one day; voting deadlines default to one day before the event.
pub const DAY_SECS: u64 = 86_400;

/// Whole seconds since the Unix epoch, UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Time zero.
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// The system wall clock, rounded down to whole seconds.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock predates the Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// This timestamp moved `secs` seconds earlier, saturating at the epoch.
    pub fn saturating_sub_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_sub(secs))
    }

    /// This timestamp moved `secs` seconds later.
    pub fn saturating_add_secs(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Whether this timestamp lies strictly before `now`.
    ///
    /// A voting deadline is considered passed only once `now` is past it;
    /// an operation arriving exactly at the deadline is still accepted.
    pub fn is_before(&self, now: Timestamp) -> bool {
        self.0 < now.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
