//! LMDB implementation of AttendanceStore.
//!
//! Key format: `event_id ++ b"/" ++ user_id` in the main database, plus a
//! `user_id ++ b"/" ++ event_id` index for per-user listings. Ids never
//! contain `/`, so a prefix scan for one event cannot bleed into a
//! neighbour whose id shares a prefix.

use std::ops::Bound;

use podium_store::{AttendanceRecord, AttendanceStore, StoreError};
use podium_types::{AttendanceId, EventId, ParseIdError, UserId};

use crate::environment::{increment_prefix, SEQ_ATTENDANCE};
use crate::{LmdbError, LmdbStore};

/// Build the composite key `event_id ++ b"/" ++ user_id`.
fn attendance_key(event: &EventId, user: &UserId) -> Vec<u8> {
    let mut key = Vec::with_capacity(event.as_str().len() + user.as_str().len() + 1);
    key.extend_from_slice(event.as_str().as_bytes());
    key.push(b'/');
    key.extend_from_slice(user.as_str().as_bytes());
    key
}

/// Build the index key `user_id ++ b"/" ++ event_id`.
fn by_user_key(user: &UserId, event: &EventId) -> Vec<u8> {
    let mut key = Vec::with_capacity(user.as_str().len() + event.as_str().len() + 1);
    key.extend_from_slice(user.as_str().as_bytes());
    key.push(b'/');
    key.extend_from_slice(event.as_str().as_bytes());
    key
}

fn scan_prefix(id: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(id.len() + 1);
    prefix.extend_from_slice(id.as_bytes());
    prefix.push(b'/');
    prefix
}

impl AttendanceStore for LmdbStore {
    fn next_attendance_id(&self) -> Result<AttendanceId, StoreError> {
        let index = self.next_seq(SEQ_ATTENDANCE)?;
        Ok(AttendanceId::from_index(index))
    }

    fn put_attendance(&self, record: &AttendanceRecord) -> Result<(), StoreError> {
        let key = attendance_key(&record.event_id, &record.user_id);
        let index_key = by_user_key(&record.user_id, &record.event_id);
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.attendance_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        self.attendance_by_user_db
            .put(&mut wtxn, &index_key, record.event_id.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_attendance(
        &self,
        event: &EventId,
        user: &UserId,
    ) -> Result<Option<AttendanceRecord>, StoreError> {
        let key = attendance_key(event, user);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self
            .attendance_db
            .get(&rtxn, &key)
            .map_err(LmdbError::from)?
        {
            Some(val) => {
                let record: AttendanceRecord =
                    bincode::deserialize(val).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn delete_attendance(&self, event: &EventId, user: &UserId) -> Result<(), StoreError> {
        let key = attendance_key(event, user);
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let existed = self
            .attendance_db
            .delete(&mut wtxn, &key)
            .map_err(LmdbError::from)?;
        if !existed {
            return Err(LmdbError::NotFound(format!(
                "attendance {}/{}",
                event.as_str(),
                user.as_str()
            ))
            .into());
        }
        self.attendance_by_user_db
            .delete(&mut wtxn, &by_user_key(user, event))
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn attendance_count(&self, event: &EventId) -> Result<u64, StoreError> {
        let prefix = scan_prefix(event.as_str());
        let mut upper = prefix.clone();
        increment_prefix(&mut upper);

        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bounds = (
            Bound::Included(prefix.as_slice()),
            Bound::Excluded(upper.as_slice()),
        );
        let iter = self
            .attendance_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?;
        let mut count = 0u64;
        for entry in iter {
            entry.map_err(LmdbError::from)?;
            count += 1;
        }
        Ok(count)
    }

    fn attendance_for_event(&self, event: &EventId) -> Result<Vec<AttendanceRecord>, StoreError> {
        let prefix = scan_prefix(event.as_str());
        let mut upper = prefix.clone();
        increment_prefix(&mut upper);

        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bounds = (
            Bound::Included(prefix.as_slice()),
            Bound::Excluded(upper.as_slice()),
        );
        let iter = self
            .attendance_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            let record: AttendanceRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
            results.push(record);
        }
        Ok(results)
    }

    fn events_for_user(&self, user: &UserId) -> Result<Vec<EventId>, StoreError> {
        let prefix = scan_prefix(user.as_str());
        let mut upper = prefix.clone();
        increment_prefix(&mut upper);

        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bounds = (
            Bound::Included(prefix.as_slice()),
            Bound::Excluded(upper.as_slice()),
        );
        let iter = self
            .attendance_by_user_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            let text =
                std::str::from_utf8(val).map_err(|e| LmdbError::Serialization(e.to_string()))?;
            let id: EventId = text
                .parse()
                .map_err(|e: ParseIdError| LmdbError::Serialization(e.to_string()))?;
            results.push(id);
        }
        Ok(results)
    }
}
