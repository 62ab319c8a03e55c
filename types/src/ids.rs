//! Entity identifiers with type-distinguishing prefixes.
//!
//! Every id is a prefixed string (`usr_`, `evt_`, `prs_`, `att_`). Ids
//! assigned by the store embed a zero-padded sequence number so that their
//! lexicographic order matches assignment order, so composite storage keys
//! built from them scan in insertion order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Width of the zero-padded sequence number inside store-assigned ids.
const INDEX_WIDTH: usize = 12;

/// Error returned when parsing an id from its string form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} id: expected prefix '{prefix}'")]
pub struct ParseIdError {
    pub kind: &'static str,
    pub prefix: &'static str,
}

fn check_prefix(
    s: &str,
    kind: &'static str,
    prefix: &'static str,
) -> Result<(), ParseIdError> {
    if s.starts_with(prefix) && s.len() > prefix.len() {
        Ok(())
    } else {
        Err(ParseIdError { kind, prefix })
    }
}

/// A user id, always prefixed with `usr_`.
///
/// Users are owned by the external identity service; the suffix is whatever
/// that service uses (not necessarily numeric).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    pub const PREFIX: &'static str = "usr_";

    /// Create a user id from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `usr_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "user id must start with usr_");
        Self(s)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_prefix(s, "user", Self::PREFIX)?;
        Ok(Self(s.to_string()))
    }
}

/// An event id, always prefixed with `evt_`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    pub const PREFIX: &'static str = "evt_";

    /// Create an event id from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `evt_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(s.starts_with(Self::PREFIX), "event id must start with evt_");
        Self(s)
    }

    /// Build the id for the `index`-th store-assigned event.
    pub fn from_index(index: u64) -> Self {
        Self(format!("{}{:0width$}", Self::PREFIX, index, width = INDEX_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_prefix(s, "event", Self::PREFIX)?;
        Ok(Self(s.to_string()))
    }
}

/// A presentation id, always prefixed with `prs_`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PresentationId(String);

impl PresentationId {
    pub const PREFIX: &'static str = "prs_";

    /// Create a presentation id from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `prs_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(
            s.starts_with(Self::PREFIX),
            "presentation id must start with prs_"
        );
        Self(s)
    }

    /// Build the id for the `index`-th store-assigned presentation.
    pub fn from_index(index: u64) -> Self {
        Self(format!("{}{:0width$}", Self::PREFIX, index, width = INDEX_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PresentationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PresentationId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_prefix(s, "presentation", Self::PREFIX)?;
        Ok(Self(s.to_string()))
    }
}

/// An attendance-row id, always prefixed with `att_`.
///
/// Attendance rows are keyed by (event, user); this id exists so that
/// registration can return a row handle, matching the external API shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AttendanceId(String);

impl AttendanceId {
    pub const PREFIX: &'static str = "att_";

    /// Create an attendance id from a raw string.
    ///
    /// # Panics
    /// Panics if the string does not start with `att_`.
    pub fn new(raw: impl Into<String>) -> Self {
        let s = raw.into();
        assert!(
            s.starts_with(Self::PREFIX),
            "attendance id must start with att_"
        );
        Self(s)
    }

    /// Build the id for the `index`-th store-assigned attendance row.
    pub fn from_index(index: u64) -> Self {
        Self(format!("{}{:0width$}", Self::PREFIX, index, width = INDEX_WIDTH))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AttendanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AttendanceId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_prefix(s, "attendance", Self::PREFIX)?;
        Ok(Self(s.to_string()))
    }
}
