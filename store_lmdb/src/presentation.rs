//! LMDB implementation of PresentationStore.
//!
//! Presentations are keyed by their id bytes. A second database keyed
//! `event_id ++ b"/" ++ presentation_id` carries per-event listings; its
//! values are the presentation id bytes.

use std::ops::Bound;

use podium_store::{PresentationRecord, PresentationStore, StoreError};
use podium_types::{EventId, PresentationId, UserId};

use crate::environment::{increment_prefix, SEQ_PRESENTATION};
use crate::{LmdbError, LmdbStore};

/// Build the index key `event_id ++ b"/" ++ presentation_id`.
fn by_event_key(event: &EventId, presentation: &PresentationId) -> Vec<u8> {
    let mut key = Vec::with_capacity(event.as_str().len() + presentation.as_str().len() + 1);
    key.extend_from_slice(event.as_str().as_bytes());
    key.push(b'/');
    key.extend_from_slice(presentation.as_str().as_bytes());
    key
}

fn scan_prefix(id: &str) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(id.len() + 1);
    prefix.extend_from_slice(id.as_bytes());
    prefix.push(b'/');
    prefix
}

impl PresentationStore for LmdbStore {
    fn next_presentation_id(&self) -> Result<PresentationId, StoreError> {
        let index = self.next_seq(SEQ_PRESENTATION)?;
        Ok(PresentationId::from_index(index))
    }

    fn put_presentation(&self, record: &PresentationRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let index_key = by_event_key(&record.event_id, &record.id);
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.presentations_db
            .put(&mut wtxn, record.id.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        self.presentations_by_event_db
            .put(&mut wtxn, &index_key, record.id.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_presentation(&self, id: &PresentationId) -> Result<PresentationRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .presentations_db
            .get(&rtxn, id.as_str().as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("presentation {}", id.as_str())))?;
        let record: PresentationRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
        Ok(record)
    }

    fn presentations_for_event(
        &self,
        event: &EventId,
    ) -> Result<Vec<PresentationRecord>, StoreError> {
        let prefix = scan_prefix(event.as_str());
        let mut upper = prefix.clone();
        increment_prefix(&mut upper);

        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bounds = (
            Bound::Included(prefix.as_slice()),
            Bound::Excluded(upper.as_slice()),
        );
        let iter = self
            .presentations_by_event_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, id_bytes) = entry.map_err(LmdbError::from)?;
            let val = self
                .presentations_db
                .get(&rtxn, id_bytes)
                .map_err(LmdbError::from)?
                .ok_or_else(|| {
                    StoreError::Corruption(format!(
                        "presentation index for event {} points at a missing record",
                        event.as_str()
                    ))
                })?;
            let record: PresentationRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
            results.push(record);
        }
        Ok(results)
    }

    fn pending_presentations_for_event(
        &self,
        event: &EventId,
    ) -> Result<Vec<PresentationRecord>, StoreError> {
        Ok(self
            .presentations_for_event(event)?
            .into_iter()
            .filter(|p| p.status.is_pending())
            .collect())
    }

    fn presentations_for_submitter(
        &self,
        user: &UserId,
    ) -> Result<Vec<PresentationRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.presentations_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            let record: PresentationRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
            if &record.submitted_by == user {
                results.push(record);
            }
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_store::EventStore;
    use podium_types::{PresentationStatus, Timestamp};

    fn open_store() -> (tempfile::TempDir, LmdbStore) {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let store = LmdbStore::open(dir.path(), 10 * 1024 * 1024).expect("failed to open env");
        (dir, store)
    }

    fn submit(store: &LmdbStore, event: &EventId, submitter: &str) -> PresentationId {
        let id = store.next_presentation_id().unwrap();
        store
            .put_presentation(&PresentationRecord {
                id: id.clone(),
                event_id: event.clone(),
                title: "A talk".into(),
                description: "About things".into(),
                speaker_name: "Sam".into(),
                speaker_bio: None,
                duration_minutes: 20,
                target_audience: "everyone".into(),
                submitted_by: UserId::new(submitter),
                status: PresentationStatus::Pending,
                admin_approved: false,
                admin_approved_by: None,
                recording_url: None,
                created_at: Timestamp::EPOCH,
                updated_at: Timestamp::EPOCH,
            })
            .unwrap();
        id
    }

    #[test]
    fn get_reads_back_what_put_wrote() {
        let (_dir, store) = open_store();
        let event = store.next_event_id().unwrap();
        let id = submit(&store, &event, "usr_sam");

        let record = store.get_presentation(&id).unwrap();
        assert_eq!(record.event_id, event);
        assert!(record.status.is_pending());

        let err = store
            .get_presentation(&PresentationId::from_index(99))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
    }

    #[test]
    fn event_listings_use_the_index() {
        let (_dir, store) = open_store();
        let first = store.next_event_id().unwrap();
        let second = store.next_event_id().unwrap();
        let a = submit(&store, &first, "usr_sam");
        let b = submit(&store, &first, "usr_kim");
        submit(&store, &second, "usr_sam");

        let listed = store.presentations_for_event(&first).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, a);
        assert_eq!(listed[1].id, b);
    }

    #[test]
    fn pending_listings_exclude_resolved() {
        let (_dir, store) = open_store();
        let event = store.next_event_id().unwrap();
        let keep = submit(&store, &event, "usr_sam");
        let resolve = submit(&store, &event, "usr_kim");

        let mut record = store.get_presentation(&resolve).unwrap();
        record.status = PresentationStatus::Rejected;
        store.put_presentation(&record).unwrap();

        let pending = store.pending_presentations_for_event(&event).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, keep);
    }

    #[test]
    fn submitter_listings_span_events() {
        let (_dir, store) = open_store();
        let first = store.next_event_id().unwrap();
        let second = store.next_event_id().unwrap();
        submit(&store, &first, "usr_sam");
        submit(&store, &second, "usr_sam");
        submit(&store, &second, "usr_kim");

        let sams = store
            .presentations_for_submitter(&UserId::new("usr_sam"))
            .unwrap();
        assert_eq!(sams.len(), 2);
    }
}
