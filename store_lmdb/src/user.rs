//! LMDB implementation of UserDirectory.

use podium_store::{StoreError, UserDirectory, UserRecord};
use podium_types::UserId;

use crate::{LmdbError, LmdbStore};

impl UserDirectory for LmdbStore {
    fn put_user(&self, record: &UserRecord) -> Result<(), StoreError> {
        let bytes = bincode::serialize(record).map_err(LmdbError::from)?;
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        self.users_db
            .put(&mut wtxn, record.id.as_str().as_bytes(), &bytes)
            .map_err(LmdbError::from)?;
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }

    fn get_user(&self, id: &UserId) -> Result<UserRecord, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .users_db
            .get(&rtxn, id.as_str().as_bytes())
            .map_err(LmdbError::from)?
            .ok_or_else(|| LmdbError::NotFound(format!("user {}", id.as_str())))?;
        let record: UserRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
        Ok(record)
    }

    fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let iter = self.users_db.iter(&rtxn).map_err(LmdbError::from)?;
        let mut results = Vec::new();
        for entry in iter {
            let (_key, val) = entry.map_err(LmdbError::from)?;
            let record: UserRecord = bincode::deserialize(val).map_err(LmdbError::from)?;
            results.push(record);
        }
        Ok(results)
    }
}
