//! Nullable clock for tests that step across deadlines.

use podium_types::Timestamp;
use std::cell::Cell;

/// A clock that stands still until a test moves it.
///
/// Sweeper and deadline tests construct one at a known instant, run the
/// code under test, then step past the boundary they care about.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    /// The instant the clock currently reads.
    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    /// Move the clock forward by `secs`.
    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get() + secs);
    }

    /// Jump the clock to an absolute instant.
    pub fn set(&self, secs: u64) {
        self.current.set(secs);
    }
}
