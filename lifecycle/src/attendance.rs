//! Attendance registry: who is going to which event.
//!
//! Attendance gates voting eligibility and sets the quorum denominator, so
//! registration rows are created and deleted here and read everywhere else.

use crate::error::{CoreError, EntityKind};
use crate::lookup;
use crate::notify::{Notification, Outbox};
use podium_store::{AttendanceRecord, Store};
use podium_types::{AttendanceId, EventId, Principal, Timestamp, UserId};
use std::sync::Arc;

pub struct AttendanceRegistry {
    store: Arc<dyn Store>,
}

impl AttendanceRegistry {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Register the caller for an event. Emits a [`Notification::NewAttendee`]
    /// addressed to the event creator.
    pub fn register(
        &self,
        principal: &Principal,
        event_id: &EventId,
        now: Timestamp,
        outbox: &mut Outbox,
    ) -> Result<AttendanceId, CoreError> {
        let event = lookup::event(self.store.as_ref(), event_id)?;
        if self
            .store
            .get_attendance(event_id, &principal.user_id)?
            .is_some()
        {
            return Err(CoreError::AlreadyRegistered);
        }
        let id = self.store.next_attendance_id()?;
        self.store.put_attendance(&AttendanceRecord {
            id: id.clone(),
            event_id: event_id.clone(),
            user_id: principal.user_id.clone(),
            created_at: now,
        })?;
        outbox.push(Notification::NewAttendee {
            event_id: event_id.clone(),
            attendee: principal.user_id.clone(),
            notify: event.created_by,
        });
        tracing::debug!(event = %event_id, user = %principal.user_id, "attendee registered");
        Ok(id)
    }

    /// Drop the caller's registration.
    pub fn unregister(&self, principal: &Principal, event_id: &EventId) -> Result<(), CoreError> {
        if self
            .store
            .get_attendance(event_id, &principal.user_id)?
            .is_none()
        {
            return Err(CoreError::not_found(
                EntityKind::Attendance,
                event_id.as_str(),
            ));
        }
        self.store.delete_attendance(event_id, &principal.user_id)?;
        tracing::debug!(event = %event_id, user = %principal.user_id, "attendee unregistered");
        Ok(())
    }

    /// Whether the user holds a registration for the event.
    pub fn is_attending(&self, event_id: &EventId, user: &UserId) -> Result<bool, CoreError> {
        Ok(self.store.get_attendance(event_id, user)?.is_some())
    }

    /// Number of registered attendees (the quorum denominator).
    pub fn count(&self, event_id: &EventId) -> Result<u64, CoreError> {
        Ok(self.store.attendance_count(event_id)?)
    }

    /// All registrations for an event.
    pub fn list_for_event(&self, event_id: &EventId) -> Result<Vec<AttendanceRecord>, CoreError> {
        Ok(self.store.attendance_for_event(event_id)?)
    }

    /// The events a user is registered for.
    pub fn events_for_user(&self, user: &UserId) -> Result<Vec<EventId>, CoreError> {
        Ok(self.store.events_for_user(user)?)
    }
}
