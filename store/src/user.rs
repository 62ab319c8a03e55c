//! User directory trait.

use crate::StoreError;
use podium_types::{Role, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// A known user and the role they act with.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub created_at: Timestamp,
}

/// Trait for resolving users to their roles.
///
/// The directory is the source of truth for authorization: callers present a
/// user id, the directory says what role it carries.
pub trait UserDirectory {
    /// Insert or overwrite a user.
    fn put_user(&self, record: &UserRecord) -> Result<(), StoreError>;

    /// Get a user by id.
    fn get_user(&self, id: &UserId) -> Result<UserRecord, StoreError>;

    /// All known users, in id order.
    fn list_users(&self) -> Result<Vec<UserRecord>, StoreError>;
}
