//! Vote storage trait.

use crate::StoreError;
use podium_types::{PresentationId, Timestamp, UserId, VoteChoice};
use serde::{Deserialize, Serialize};

/// One attendee's vote on one presentation.
///
/// Keyed by `(presentation_id, user_id)`; re-voting overwrites in place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoteRecord {
    pub presentation_id: PresentationId,
    pub user_id: UserId,
    pub choice: VoteChoice,
    pub created_at: Timestamp,
}

/// Trait for storing votes.
pub trait VoteStore {
    /// Insert or overwrite a vote.
    fn put_vote(&self, record: &VoteRecord) -> Result<(), StoreError>;

    /// Look up a voter's vote on a presentation.
    fn get_vote(
        &self,
        presentation: &PresentationId,
        user: &UserId,
    ) -> Result<Option<VoteRecord>, StoreError>;

    /// Remove a vote. Fails with `NotFound` if it does not exist.
    fn delete_vote(&self, presentation: &PresentationId, user: &UserId)
        -> Result<(), StoreError>;

    /// All votes cast on a presentation.
    fn votes_for_presentation(
        &self,
        presentation: &PresentationId,
    ) -> Result<Vec<VoteRecord>, StoreError>;
}
