//! Presentation storage trait.

use crate::StoreError;
use podium_types::{EventId, PresentationId, PresentationStatus, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A talk proposal submitted to an event.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PresentationRecord {
    pub id: PresentationId,
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub speaker_name: String,
    #[serde(default)]
    pub speaker_bio: Option<String>,
    pub duration_minutes: u32,
    pub target_audience: String,
    pub submitted_by: UserId,
    pub status: PresentationStatus,
    /// Set once an admin signs off; a prerequisite for vote-based approval.
    pub admin_approved: bool,
    #[serde(default)]
    pub admin_approved_by: Option<UserId>,
    #[serde(default)]
    pub recording_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Trait for storing presentations.
pub trait PresentationStore {
    /// Draw the next presentation id from the store's sequence.
    fn next_presentation_id(&self) -> Result<PresentationId, StoreError>;

    /// Insert or overwrite a presentation.
    fn put_presentation(&self, record: &PresentationRecord) -> Result<(), StoreError>;

    /// Get a presentation by id.
    fn get_presentation(&self, id: &PresentationId) -> Result<PresentationRecord, StoreError>;

    /// All presentations submitted to an event, in id order.
    fn presentations_for_event(
        &self,
        event: &EventId,
    ) -> Result<Vec<PresentationRecord>, StoreError>;

    /// Pending presentations for an event (the deadline sweeper's working set).
    fn pending_presentations_for_event(
        &self,
        event: &EventId,
    ) -> Result<Vec<PresentationRecord>, StoreError>;

    /// All presentations a user has submitted, across events.
    fn presentations_for_submitter(
        &self,
        user: &UserId,
    ) -> Result<Vec<PresentationRecord>, StoreError>;
}
