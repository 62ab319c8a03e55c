//! LMDB implementation of EventStore.
//!
//! Events are keyed by their id bytes; listings iterate the database in key
//! order, which is id order.

use podium_store::{EventRecord, EventStore, StoreError};
use podium_types::{EventId, EventStatus};

use crate::environment::SEQ_EVENT;
use crate::{LmdbError, LmdbStore};

impl EventStore for LmdbStore {
    fn next_event_id(&self) -> Result<EventId, StoreError> {
        let index = self.next_seq(SEQ_EVENT)?;
        Ok(EventId::from_index(index))
    }

    fn put_event(&self, record: &EventRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.events_db
            .put(&mut wtxn, record.id.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_event(&self, id: &EventId) -> Result<EventRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .events_db
            .get(&rtxn, id.as_str().as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("event {}", id.as_str())))?;
        let record: EventRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
        Ok(record)
    }

    fn list_events(&self) -> Result<Vec<EventRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.events_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            let record: EventRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
            results.push(record);
        }
        Ok(results)
    }

    fn list_events_by_status(&self, status: EventStatus) -> Result<Vec<EventRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.events_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            let record: EventRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
            if record.status == status {
                results.push(record);
            }
        }
        Ok(results)
    }
}
