//! Abstract storage traits for the podium events platform.
//!
//! Every storage backend (LMDB, in-memory for testing) implements these
//! traits. The rest of the codebase depends only on the traits.

pub mod attendance;
pub mod error;
pub mod event;
pub mod presentation;
pub mod user;
pub mod vote;

pub use attendance::{AttendanceRecord, AttendanceStore};
pub use error::StoreError;
pub use event::{default_voting_deadline, EventRecord, EventStore};
pub use presentation::{PresentationRecord, PresentationStore};
pub use user::{UserDirectory, UserRecord};
pub use vote::{VoteRecord, VoteStore};

/// Umbrella trait for complete backends: every entity store plus the user
/// directory. Engines hold an `Arc<dyn Store>` so any full backend (LMDB in
/// production, the in-memory null store in tests) can be injected.
pub trait Store:
    EventStore + AttendanceStore + PresentationStore + VoteStore + UserDirectory + Send + Sync
{
}

impl<T> Store for T where
    T: EventStore + AttendanceStore + PresentationStore + VoteStore + UserDirectory + Send + Sync
{
}
