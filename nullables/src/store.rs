//! Nullable store: thread-safe in-memory storage for testing.

use podium_store::{
    AttendanceRecord, AttendanceStore, EventRecord, EventStore, PresentationRecord,
    PresentationStore, StoreError, UserDirectory, UserRecord, VoteRecord, VoteStore,
};
use podium_types::{AttendanceId, EventId, EventStatus, PresentationId, UserId};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// An in-memory implementation of every storage trait.
///
/// Tables are `BTreeMap`s sharing the LMDB backend's key layout, so listings
/// come back in the same order. Thread-safe for use with tokio's
/// multi-threaded runtime.
pub struct NullStore {
    events: Mutex<BTreeMap<String, EventRecord>>,
    attendance: Mutex<BTreeMap<String, AttendanceRecord>>,
    presentations: Mutex<BTreeMap<String, PresentationRecord>>,
    votes: Mutex<BTreeMap<String, VoteRecord>>,
    users: Mutex<BTreeMap<String, UserRecord>>,
    event_seq: AtomicU64,
    attendance_seq: AtomicU64,
    presentation_seq: AtomicU64,
}

impl NullStore {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(BTreeMap::new()),
            attendance: Mutex::new(BTreeMap::new()),
            presentations: Mutex::new(BTreeMap::new()),
            votes: Mutex::new(BTreeMap::new()),
            users: Mutex::new(BTreeMap::new()),
            event_seq: AtomicU64::new(1),
            attendance_seq: AtomicU64::new(1),
            presentation_seq: AtomicU64::new(1),
        }
    }
}

impl Default for NullStore {
    fn default() -> Self {
        Self::new()
    }
}

fn pair_key(left: &str, right: &str) -> String {
    format!("{left}/{right}")
}

impl EventStore for NullStore {
    fn next_event_id(&self) -> Result<EventId, StoreError> {
        Ok(EventId::from_index(
            self.event_seq.fetch_add(1, Ordering::SeqCst),
        ))
    }

    fn put_event(&self, record: &EventRecord) -> Result<(), StoreError> {
        self.events
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_event(&self, id: &EventId) -> Result<EventRecord, StoreError> {
        self.events
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list_events(&self) -> Result<Vec<EventRecord>, StoreError> {
        Ok(self.events.lock().unwrap().values().cloned().collect())
    }

    fn list_events_by_status(&self, status: EventStatus) -> Result<Vec<EventRecord>, StoreError> {
        Ok(self
            .events
            .lock()
            .unwrap()
            .values()
            .filter(|e| e.status == status)
            .cloned()
            .collect())
    }
}

impl AttendanceStore for NullStore {
    fn next_attendance_id(&self) -> Result<AttendanceId, StoreError> {
        Ok(AttendanceId::from_index(
            self.attendance_seq.fetch_add(1, Ordering::SeqCst),
        ))
    }

    fn put_attendance(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        let key = pair_key(record.event_id.as_str(), record.user_id.as_str());
        self.attendance.lock().unwrap().insert(key, record.clone());
        Ok(())
    }

    fn get_attendance(
        &self,
        event: &EventId,
        user: &UserId,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let key = pair_key(event.as_str(), user.as_str());
        Ok(self.attendance.lock().unwrap().get(&key).cloned())
    }

    fn delete_attendance(&self, event: &EventId, user: &UserId) -> Result<(), StoreError> {
        let key = pair_key(event.as_str(), user.as_str());
        match self.attendance.lock().unwrap().remove(&key) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(key)),
        }
    }

    fn attendance_count(&self, event: &EventId) -> Result<u64, StoreError> {
        Ok(self
            .attendance
            .lock()
            .unwrap()
            .values()
            .filter(|r| &r.event_id == event)
            .count() as u64)
    }

    fn attendance_for_event(&self, event: &EventId) -> Result<Vec<AttendanceRecord>, StoreError> {
        Ok(self
            .attendance
            .lock()
            .unwrap()
            .values()
            .filter(|r| &r.event_id == event)
            .cloned()
            .collect())
    }

    fn events_for_user(&self, user: &UserId) -> Result<Vec<EventId>, StoreError> {
        Ok(self
            .attendance
            .lock()
            .unwrap()
            .values()
            .filter(|r| &r.user_id == user)
            .map(|r| r.event_id.clone())
            .collect())
    }
}

impl PresentationStore for NullStore {
    fn next_presentation_id(&self) -> Result<PresentationId, StoreError> {
        Ok(PresentationId::from_index(
            self.presentation_seq.fetch_add(1, Ordering::SeqCst),
        ))
    }

    fn put_presentation(&self, record: &PresentationRecord) -> Result<(), StoreError> {
        self.presentations
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_presentation(&self, id: &PresentationId) -> Result<PresentationRecord, StoreError> {
        self.presentations
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn presentations_for_event(
        &self,
        event: &EventId,
    ) -> Result<Vec<PresentationRecord>, StoreError> {
        Ok(self
            .presentations
            .lock()
            .unwrap()
            .values()
            .filter(|p| &p.event_id == event)
            .cloned()
            .collect())
    }

    fn pending_presentations_for_event(
        &self,
        event: &EventId,
    ) -> Result<Vec<PresentationRecord>, StoreError> {
        Ok(self
            .presentations
            .lock()
            .unwrap()
            .values()
            .filter(|p| &p.event_id == event && p.status.is_pending())
            .cloned()
            .collect())
    }

    fn presentations_for_submitter(
        &self,
        user: &UserId,
    ) -> Result<Vec<PresentationRecord>, StoreError> {
        Ok(self
            .presentations
            .lock()
            .unwrap()
            .values()
            .filter(|p| &p.submitted_by == user)
            .cloned()
            .collect())
    }
}

impl VoteStore for NullStore {
    fn put_vote(&self, record: &VoteRecord) -> Result<(), StoreError> {
        let key = pair_key(record.presentation_id.as_str(), record.user_id.as_str());
        self.votes.lock().unwrap().insert(key, record.clone());
        Ok(())
    }

    fn get_vote(
        &self,
        presentation: &PresentationId,
        user: &UserId,
    ) -> Result<Option<VoteRecord>, StoreError> {
        let key = pair_key(presentation.as_str(), user.as_str());
        Ok(self.votes.lock().unwrap().get(&key).cloned())
    }

    fn delete_vote(
        &self,
        presentation: &PresentationId,
        user: &UserId,
    ) -> Result<(), StoreError> {
        let key = pair_key(presentation.as_str(), user.as_str());
        match self.votes.lock().unwrap().remove(&key) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(key)),
        }
    }

    fn votes_for_presentation(
        &self,
        presentation: &PresentationId,
    ) -> Result<Vec<VoteRecord>, StoreError> {
        Ok(self
            .votes
            .lock()
            .unwrap()
            .values()
            .filter(|v| &v.presentation_id == presentation)
            .cloned()
            .collect())
    }
}

impl UserDirectory for NullStore {
    fn put_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        self.users
            .lock()
            .unwrap()
            .insert(record.id.as_str().to_string(), record.clone());
        Ok(())
    }

    fn get_user(&self, id: &UserId) -> Result<UserRecord, StoreError> {
        self.users
            .lock()
            .unwrap()
            .get(id.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        Ok(self.users.lock().unwrap().values().cloned().collect())
    }
}
