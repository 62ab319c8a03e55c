//! LMDB environment setup.

use std::path::Path;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::LmdbError;

const MAX_DBS: u32 = 8;

/// The schema version that the current code expects.
const SCHEMA_VERSION: u32 = 1;
const SCHEMA_VERSION_KEY: &[u8] = b"schema_version";

pub(crate) const SEQ_EVENT: &[u8] = b"seq:event";
pub(crate) const SEQ_ATTENDANCE: &[u8] = b"seq:attendance";
pub(crate) const SEQ_PRESENTATION: &[u8] = b"seq:presentation";

/// Wraps the LMDB environment and all database handles.
///
/// Implements every storage trait from `podium-store`; the per-entity
/// modules carry the key layouts and trait impls.
pub struct LmdbStore {
    pub(crate) env: Env,
    pub(crate) events_db: Database<Bytes, Bytes>,
    pub(crate) attendance_db: Database<Bytes, Bytes>,
    pub(crate) attendance_by_user_db: Database<Bytes, Bytes>,
    pub(crate) presentations_db: Database<Bytes, Bytes>,
    pub(crate) presentations_by_event_db: Database<Bytes, Bytes>,
    pub(crate) votes_db: Database<Bytes, Bytes>,
    pub(crate) users_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbStore {
    /// Open or create an LMDB environment at the given path.
    pub fn open(path: &Path, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path).map_err(|e| LmdbError::Heed(e.to_string()))?;
        let env = unsafe {
            EnvOpenOptions::new()
                .max_dbs(MAX_DBS)
                .map_size(map_size)
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let events_db = env.create_database(&mut wtxn, Some("events"))?;
        let attendance_db = env.create_database(&mut wtxn, Some("attendance"))?;
        let attendance_by_user_db = env.create_database(&mut wtxn, Some("attendance_by_user"))?;
        let presentations_db = env.create_database(&mut wtxn, Some("presentations"))?;
        let presentations_by_event_db =
            env.create_database(&mut wtxn, Some("presentations_by_event"))?;
        let votes_db = env.create_database(&mut wtxn, Some("votes"))?;
        let users_db = env.create_database(&mut wtxn, Some("users"))?;
        let meta_db = env.create_database(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        let store = Self {
            env,
            events_db,
            attendance_db,
            attendance_by_user_db,
            presentations_db,
            presentations_by_event_db,
            votes_db,
            users_db,
            meta_db,
        };
        store.check_schema()?;
        Ok(store)
    }

    /// Check the stored schema version.
    ///
    /// - A fresh database (no version stored yet) is stamped with the
    ///   current version.
    /// - If the stored version is *higher* than what this code supports,
    ///   the database was written by newer code and we refuse to open it.
    fn check_schema(&self) -> Result<(), LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        let stored = {
            match self.meta_db.get(&wtxn, SCHEMA_VERSION_KEY)? {
                Some(bytes) if bytes.len() == 4 => {
                    let mut buf = [0u8; 4];
                    buf.copy_from_slice(bytes);
                    Some(u32::from_le_bytes(buf))
                }
                Some(_) => {
                    return Err(LmdbError::Serialization(
                        "schema_version has unexpected byte length".to_string(),
                    ))
                }
                None => None,
            }
        };
        match stored {
            None => {
                self.meta_db
                    .put(&mut wtxn, SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_le_bytes())?;
                wtxn.commit()?;
                tracing::info!(version = SCHEMA_VERSION, "initialized database schema");
                Ok(())
            }
            Some(version) if version > SCHEMA_VERSION => Err(LmdbError::Heed(format!(
                "database schema version {} is newer than supported version {}",
                version, SCHEMA_VERSION
            ))),
            Some(version) => {
                tracing::debug!(version, "database schema is up to date");
                Ok(())
            }
        }
    }

    /// Atomically draw the next value from a named sequence in the meta
    /// database. Sequences start at 1.
    pub(crate) fn next_seq(&self, key: &[u8]) -> Result<u64, LmdbError> {
        let mut wtxn = self.env.write_txn()?;
        let current = {
            match self.meta_db.get(&wtxn, key)? {
                Some(bytes) if bytes.len() == 8 => {
                    let mut buf = [0u8; 8];
                    buf.copy_from_slice(bytes);
                    u64::from_le_bytes(buf)
                }
                Some(_) => {
                    return Err(LmdbError::Serialization(
                        "sequence has unexpected byte length".to_string(),
                    ))
                }
                None => 0,
            }
        };
        let next = current + 1;
        self.meta_db.put(&mut wtxn, key, &next.to_le_bytes())?;
        wtxn.commit()?;
        Ok(next)
    }
}

/// Increment a byte prefix in place, producing the exclusive upper bound for
/// a prefix range scan. Trailing `0xFF` bytes are dropped; an empty result
/// means the scan has no upper bound.
pub(crate) fn increment_prefix(prefix: &mut Vec<u8>) {
    while let Some(last) = prefix.last_mut() {
        if *last < u8::MAX {
            *last += 1;
            return;
        }
        prefix.pop();
    }
}
