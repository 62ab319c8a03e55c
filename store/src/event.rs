//! Event storage trait.

use crate::StoreError;
use podium_types::{EventId, EventStatus, Timestamp, UserId, DAY_SECS};
use serde::{Deserialize, Serialize};

/// A scheduled community event that presentations are submitted to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Start of the event.
    pub date: Timestamp,
    /// End of the event. `None` means the event is over once it starts.
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    pub status: EventStatus,
    /// Cutoff after which pending presentations are force-resolved.
    /// `None` means the event imposes no voting deadline.
    #[serde(default)]
    pub voting_deadline: Option<Timestamp>,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The voting deadline applied when an event is created without one:
/// 24 hours before the event starts.
pub fn default_voting_deadline(date: Timestamp) -> Timestamp {
    date.saturating_sub_secs(DAY_SECS)
}

/// Trait for storing events.
pub trait EventStore {
    /// Draw the next event id from the store's sequence.
    fn next_event_id(&self) -> Result<EventId, StoreError>;

    /// Insert or overwrite an event.
    fn put_event(&self, record: &EventRecord) -> Result<(), StoreError>;

    /// Get an event by id.
    fn get_event(&self, id: &EventId) -> Result<EventRecord, StoreError>;

    /// All events, in id order.
    fn list_events(&self) -> Result<Vec<EventRecord>, StoreError>;

    /// Events currently in the given status, in id order.
    fn list_events_by_status(&self, status: EventStatus) -> Result<Vec<EventRecord>, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_deadline_is_a_day_before_start() {
        let date = Timestamp::new(10 * DAY_SECS);
        assert_eq!(default_voting_deadline(date), Timestamp::new(9 * DAY_SECS));
    }

    #[test]
    fn default_deadline_saturates_at_epoch() {
        let date = Timestamp::new(100);
        assert_eq!(default_voting_deadline(date), Timestamp::EPOCH);
    }
}
