//! Presentation lifecycle engine for community events.
//!
//! A submitted talk proposal starts `pending` and is settled through two
//! independent gates: an admin sign-off and attendee voting under a
//! quorum-plus-majority rule. Vote writes and the sign-off re-evaluate the
//! rule immediately; once the owning event's voting deadline elapses, the
//! deadline sweeper forces a final verdict on whatever is still pending.
//!
//! Engines hold an `Arc<dyn Store>` and take the authenticated caller and
//! the current time as explicit arguments. Mutations that produce
//! notification signals push them into a caller-supplied [`Outbox`]; the
//! node drains it after the mutation commits.

pub mod attendance;
pub mod error;
pub mod events;
mod lookup;
pub mod notify;
pub mod presentations;
pub mod resolution;
pub mod sweep;
pub mod votes;

pub use attendance::AttendanceRegistry;
pub use error::{CoreError, EntityKind};
pub use events::{EventCatalog, EventPatch, NewEvent};
pub use notify::{Notification, Outbox};
pub use presentations::{NewPresentation, PresentationLifecycle, PresentationPatch};
pub use sweep::{DeadlineSweeper, EventStatusSweeper};
pub use votes::{Tally, VoteLedger};
