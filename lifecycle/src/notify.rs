//! Notification signals emitted by core operations.
//!
//! Mutating operations push signals into an [`Outbox`] passed in by the
//! caller; the node drains the outbox into its dispatcher after the mutation
//! commits. Delivery is fire-and-forget and never affects the operation that
//! produced the signal.

use podium_types::{EventId, PresentationId, PresentationStatus, UserId};

/// A fire-and-forget signal for the notification boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    /// Someone registered for an event; addressed to the event creator.
    NewAttendee {
        event_id: EventId,
        attendee: UserId,
        notify: UserId,
    },
    /// A presentation was submitted; fan-out to the event's attendees is the
    /// dispatcher's job.
    PresentationSubmitted {
        event_id: EventId,
        presentation_id: PresentationId,
        submitted_by: UserId,
    },
    /// Deadline resolution settled a presentation; addressed to the submitter.
    PresentationResult {
        presentation_id: PresentationId,
        submitted_by: UserId,
        status: PresentationStatus,
    },
}

/// Ordered buffer of signals produced during one core operation.
#[derive(Debug, Default)]
pub struct Outbox {
    signals: Vec<Notification>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signal: Notification) {
        self.signals.push(signal);
    }

    /// Take all buffered signals, leaving the outbox empty.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.signals)
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }
}
