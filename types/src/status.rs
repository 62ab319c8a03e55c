//! Status enums for events, presentations, and votes.

use serde::{Deserialize, Serialize};

/// Where an event sits in its schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    /// Scheduled in the future; the only state accepting submissions and votes.
    Upcoming,
    /// Currently running (between start and end date).
    Ongoing,
    /// Finished.
    Past,
    /// Manually cancelled; terminal, never touched by the status sweeper.
    Cancelled,
}

impl EventStatus {
    /// Whether presentations may be submitted to (and voted on for) this event.
    pub fn accepts_submissions(&self) -> bool {
        matches!(self, Self::Upcoming)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Ongoing => "ongoing",
            Self::Past => "past",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Where a presentation sits in its lifecycle.
///
/// `Pending` is the only non-terminal state: a presentation moves to
/// `Approved` or `Rejected` exactly once and never back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresentationStatus {
    /// Awaiting admin sign-off and attendee votes.
    Pending,
    /// Selected for the event.
    Approved,
    /// Not selected.
    Rejected,
}

impl PresentationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// An attendee's vote on a pending presentation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Approve,
    Reject,
}

impl VoteChoice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}
