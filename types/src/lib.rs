//! Fundamental types for the podium events platform.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: entity identifiers, timestamps, roles, and status enums.

pub mod ids;
pub mod role;
pub mod status;
pub mod time;

pub use ids::{AttendanceId, EventId, ParseIdError, PresentationId, UserId};
pub use role::{Principal, Role};
pub use status::{EventStatus, PresentationStatus, VoteChoice};
pub use time::{Timestamp, DAY_SECS};
