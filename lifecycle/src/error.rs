use podium_store::StoreError;
use thiserror::Error;

/// The kind of entity a `NotFound` refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Event,
    Presentation,
    Attendance,
    Vote,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Presentation => "presentation",
            Self::Attendance => "attendance",
            Self::Vote => "vote",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: String },

    #[error("not authorized: {0}")]
    Unauthorized(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("already registered for this event")]
    AlreadyRegistered,

    #[error("presentation is no longer accepting votes")]
    NotVotable,

    #[error("caller is not registered for the event")]
    NotEligible,

    #[error("voting deadline has passed")]
    DeadlinePassed,

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl CoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }
}
