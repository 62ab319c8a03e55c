//! LMDB implementation of VoteStore.
//!
//! Key format: `presentation_id ++ b"/" ++ user_id`. Re-voting overwrites
//! the row in place, so one voter can never hold two live votes.

use std::ops::Bound;

use podium_store::{StoreError, VoteRecord, VoteStore};
use podium_types::{PresentationId, UserId};

use crate::environment::increment_prefix;
use crate::{LmdbError, LmdbStore};

/// Build the composite key `presentation_id ++ b"/" ++ user_id`.
fn vote_key(presentation: &PresentationId, user: &UserId) -> Vec<u8> {
    let mut key = Vec::with_capacity(presentation.as_str().len() + user.as_str().len() + 1);
    key.extend_from_slice(presentation.as_str().as_bytes());
    key.push(b'/');
    key.extend_from_slice(user.as_str().as_bytes());
    key
}

impl VoteStore for LmdbStore {
    fn put_vote(&self, record: &VoteRecord) -> Result<(), StoreError> {
        let key = vote_key(&record.presentation_id, &record.user_id);
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.votes_db
            .put(&mut wtxn, &key, &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_vote(
        &self,
        presentation: &PresentationId,
        user: &UserId,
    ) -> Result<Option<VoteRecord>, StoreError> {
        let key = vote_key(presentation, user);
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        match self.votes_db.get(&rtxn, &key).map_err(LmdbError::from)? {
            Some(val) => {
                let record: VoteRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    fn delete_vote(
        &self,
        presentation: &PresentationId,
        user: &UserId,
    ) -> Result<(), StoreError> {
        let key = vote_key(presentation, user);
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        let existed = self
            .votes_db
            .delete(&mut wtxn, &key)
            .map_err(LmdbError::from)?;
        if !existed {
            return Err(LmdbError::NotFound(format!(
                "vote {}/{}",
                presentation.as_str(),
                user.as_str()
            ))
            .into());
        }
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn votes_for_presentation(
        &self,
        presentation: &PresentationId,
    ) -> Result<Vec<VoteRecord>, StoreError> {
        let mut prefix = presentation.as_str().as_bytes().to_vec();
        prefix.push(b'/');
        let mut upper = prefix.clone();
        increment_prefix(&mut upper);

        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let bounds = (
            Bound::Included(prefix.as_slice()),
            Bound::Excluded(upper.as_slice()),
        );
        let iter = self
            .votes_db
            .range(&rtxn, &bounds)
            .map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            let record: VoteRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
            results.push(record);
        }
        Ok(results)
    }
}
