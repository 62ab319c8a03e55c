//! Attendance storage trait.

use crate::StoreError;
use podium_types::{AttendanceId, EventId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// One user's registration for one event.
///
/// Keyed by `(event_id, user_id)`; at most one record per pair.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: AttendanceId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub created_at: Timestamp,
}

/// Trait for tracking event attendance.
pub trait AttendanceStore {
    /// Draw the next attendance id from the store's sequence.
    fn next_attendance_id(&self) -> Result<AttendanceId, StoreError>;

    /// Insert or overwrite the registration for the record's `(event, user)`
    /// pair.
    fn put_attendance(&self, record: &AttendanceRecord) -> Result<(), StoreError>;

    /// Look up a registration by `(event, user)`.
    fn get_attendance(
        &self,
        event: &EventId,
        user: &UserId,
    ) -> Result<Option<AttendanceRecord>, StoreError>;

    /// Remove a registration. Fails with `NotFound` if it does not exist.
    fn delete_attendance(&self, event: &EventId, user: &UserId) -> Result<(), StoreError>;

    /// Number of users registered for an event.
    fn attendance_count(&self, event: &EventId) -> Result<u64, StoreError>;

    /// All registrations for an event.
    fn attendance_for_event(&self, event: &EventId) -> Result<Vec<AttendanceRecord>, StoreError>;

    /// All events a user is registered for.
    fn events_for_user(&self, user: &UserId) -> Result<Vec<EventId>, StoreError>;
}
