//! In-memory stand-ins for the node's external dependencies.
//!
//! The engines take time as an explicit argument and storage as a trait
//! object, so a test can hand them a [`NullStore`] and a [`NullClock`] and
//! drive any scenario deterministically, with nothing touching the
//! filesystem.

pub mod clock;
pub mod store;

pub use clock::NullClock;
pub use store::NullStore;
