//! Event catalog: the records the lifecycle engine runs against.
//!
//! Events are managed by moderators; the lifecycle components themselves
//! only ever read them. The voting deadline defaults to 24 hours before the
//! event starts so submissions always have a settling point.

use crate::error::CoreError;
use crate::lookup;
use podium_store::{default_voting_deadline, EventRecord, Store};
use podium_types::{EventId, EventStatus, Principal, Timestamp};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Fields provided when an event is created.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: Timestamp,
    #[serde(default)]
    pub end_date: Option<Timestamp>,
    #[serde(default)]
    pub voting_deadline: Option<Timestamp>,
}

/// Moderator-editable fields; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<Timestamp>,
    pub end_date: Option<Timestamp>,
    pub voting_deadline: Option<Timestamp>,
}

pub struct EventCatalog {
    store: Arc<dyn Store>,
}

impl EventCatalog {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Create an event (moderators). Starts `upcoming`; the voting deadline
    /// falls back to 24 hours before the start when not given.
    pub fn create(
        &self,
        principal: &Principal,
        new: NewEvent,
        now: Timestamp,
    ) -> Result<EventId, CoreError> {
        if !principal.is_moderator() {
            return Err(CoreError::Unauthorized("moderator role required".into()));
        }
        if let Some(end) = new.end_date {
            if end <= new.date {
                return Err(CoreError::InvalidInput(
                    "end date must be after the start date".into(),
                ));
            }
        }
        let voting_deadline = new
            .voting_deadline
            .unwrap_or_else(|| default_voting_deadline(new.date));
        let id = self.store.next_event_id()?;
        self.store.put_event(&EventRecord {
            id: id.clone(),
            title: new.title,
            description: new.description,
            location: new.location,
            date: new.date,
            end_date: new.end_date,
            status: EventStatus::Upcoming,
            voting_deadline: Some(voting_deadline),
            created_by: principal.user_id.clone(),
            created_at: now,
            updated_at: now,
        })?;
        tracing::info!(event = %id, creator = %principal.user_id, "event created");
        Ok(id)
    }

    /// Edit event fields (moderators). The end date, when present after the
    /// patch, must still come after the start date.
    pub fn update(
        &self,
        principal: &Principal,
        event_id: &EventId,
        patch: EventPatch,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        if !principal.is_moderator() {
            return Err(CoreError::Unauthorized("moderator role required".into()));
        }
        let mut record = lookup::event(self.store.as_ref(), event_id)?;
        let date = patch.date.unwrap_or(record.date);
        let end_date = patch.end_date.or(record.end_date);
        if let Some(end) = end_date {
            if end <= date {
                return Err(CoreError::InvalidInput(
                    "end date must be after the start date".into(),
                ));
            }
        }
        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(description) = patch.description {
            record.description = description;
        }
        if let Some(location) = patch.location {
            record.location = location;
        }
        record.date = date;
        record.end_date = end_date;
        if let Some(deadline) = patch.voting_deadline {
            record.voting_deadline = Some(deadline);
        }
        record.updated_at = now;
        self.store.put_event(&record)?;
        Ok(())
    }

    /// Manually override the status (moderators). Setting `cancelled` parks
    /// the event outside the status sweeper's reach.
    pub fn set_status(
        &self,
        principal: &Principal,
        event_id: &EventId,
        status: EventStatus,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        if !principal.is_moderator() {
            return Err(CoreError::Unauthorized("moderator role required".into()));
        }
        let mut record = lookup::event(self.store.as_ref(), event_id)?;
        if record.status != status {
            tracing::info!(
                event = %event_id,
                from = record.status.as_str(),
                to = status.as_str(),
                "event status override"
            );
        }
        record.status = status;
        record.updated_at = now;
        self.store.put_event(&record)?;
        Ok(())
    }

    /// Get an event by id.
    pub fn get(&self, event_id: &EventId) -> Result<EventRecord, CoreError> {
        lookup::event(self.store.as_ref(), event_id)
    }

    /// All events, optionally narrowed to one status.
    pub fn list(&self, status: Option<EventStatus>) -> Result<Vec<EventRecord>, CoreError> {
        match status {
            Some(status) => Ok(self.store.list_events_by_status(status)?),
            None => Ok(self.store.list_events()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_nullables::NullStore;
    use podium_types::{Role, UserId, DAY_SECS};

    fn moderator() -> Principal {
        Principal::new(UserId::new("usr_mod"), Role::Moderator)
    }

    fn new_event(date: u64, end_date: Option<u64>) -> NewEvent {
        NewEvent {
            title: "Monthly meetup".into(),
            description: "Talks and pizza".into(),
            location: "Community hall".into(),
            date: Timestamp::new(date),
            end_date: end_date.map(Timestamp::new),
            voting_deadline: None,
        }
    }

    fn now() -> Timestamp {
        Timestamp::new(DAY_SECS)
    }

    #[test]
    fn members_cannot_create_events() {
        let catalog = EventCatalog::new(Arc::new(NullStore::new()));
        let member = Principal::new(UserId::new("usr_alice"), Role::Member);
        let err = catalog
            .create(&member, new_event(10 * DAY_SECS, None), now())
            .unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));
    }

    #[test]
    fn create_defaults_the_voting_deadline_to_a_day_before_start() {
        let catalog = EventCatalog::new(Arc::new(NullStore::new()));
        let id = catalog
            .create(&moderator(), new_event(10 * DAY_SECS, None), now())
            .unwrap();

        let record = catalog.get(&id).unwrap();
        assert_eq!(record.status, EventStatus::Upcoming);
        assert_eq!(record.voting_deadline, Some(Timestamp::new(9 * DAY_SECS)));
        assert_eq!(record.created_by, UserId::new("usr_mod"));
    }

    #[test]
    fn explicit_voting_deadline_wins() {
        let catalog = EventCatalog::new(Arc::new(NullStore::new()));
        let mut event = new_event(10 * DAY_SECS, None);
        event.voting_deadline = Some(Timestamp::new(5 * DAY_SECS));
        let id = catalog.create(&moderator(), event, now()).unwrap();
        assert_eq!(
            catalog.get(&id).unwrap().voting_deadline,
            Some(Timestamp::new(5 * DAY_SECS))
        );
    }

    #[test]
    fn end_date_must_follow_start_date() {
        let catalog = EventCatalog::new(Arc::new(NullStore::new()));
        let err = catalog
            .create(
                &moderator(),
                new_event(10 * DAY_SECS, Some(10 * DAY_SECS)),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));

        // a patch cannot sneak the dates out of order either
        let id = catalog
            .create(
                &moderator(),
                new_event(10 * DAY_SECS, Some(11 * DAY_SECS)),
                now(),
            )
            .unwrap();
        let err = catalog
            .update(
                &moderator(),
                &id,
                EventPatch {
                    date: Some(Timestamp::new(12 * DAY_SECS)),
                    ..Default::default()
                },
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn cancel_is_a_manual_override() {
        let catalog = EventCatalog::new(Arc::new(NullStore::new()));
        let id = catalog
            .create(&moderator(), new_event(10 * DAY_SECS, None), now())
            .unwrap();
        catalog
            .set_status(&moderator(), &id, EventStatus::Cancelled, now())
            .unwrap();
        assert_eq!(catalog.get(&id).unwrap().status, EventStatus::Cancelled);
    }

    #[test]
    fn list_filters_by_status() {
        let catalog = EventCatalog::new(Arc::new(NullStore::new()));
        let first = catalog
            .create(&moderator(), new_event(10 * DAY_SECS, None), now())
            .unwrap();
        let second = catalog
            .create(&moderator(), new_event(20 * DAY_SECS, None), now())
            .unwrap();
        catalog
            .set_status(&moderator(), &second, EventStatus::Cancelled, now())
            .unwrap();

        assert_eq!(catalog.list(None).unwrap().len(), 2);
        let upcoming = catalog.list(Some(EventStatus::Upcoming)).unwrap();
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].id, first);
    }
}
