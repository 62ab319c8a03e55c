//! Shared resolution rule for pending presentations.
//!
//! One predicate, three triggers: vote writes and the admin sign-off re-check
//! it through [`check_auto_approve`] (which only ever approves), and the
//! deadline sweeper settles the remainder through [`force_resolve`].

use crate::error::CoreError;
use crate::notify::{Notification, Outbox};
use crate::votes::Tally;
use podium_store::{PresentationRecord, Store};
use podium_types::{PresentationId, PresentationStatus, Timestamp};

/// Minimum number of votes before a pending presentation can resolve: half
/// the event's registered attendees, rounded up.
pub fn min_votes_required(attendee_count: u64) -> u64 {
    attendee_count.div_ceil(2)
}

/// Whether the combined gate holds: still pending, admin signed off, quorum
/// reached, and at least half the cast votes approve. An exactly-even split
/// passes; zero votes never pass.
pub fn passes(record: &PresentationRecord, tally: &Tally, attendee_count: u64) -> bool {
    record.status.is_pending()
        && record.admin_approved
        && tally.total() > 0
        && tally.total() >= min_votes_required(attendee_count)
        && 2 * tally.approve >= tally.total()
}

/// Re-evaluate a presentation after a vote write or an admin sign-off.
///
/// Patches it to `approved` and returns `true` when [`passes`] holds;
/// otherwise leaves it pending. This path never rejects.
pub fn check_auto_approve(
    store: &dyn Store,
    id: &PresentationId,
    now: Timestamp,
) -> Result<bool, CoreError> {
    let record = store.get_presentation(id)?;
    if !record.status.is_pending() || !record.admin_approved {
        return Ok(false);
    }
    let attendee_count = store.attendance_count(&record.event_id)?;
    let tally = Tally::count(&store.votes_for_presentation(id)?);
    if !passes(&record, &tally, attendee_count) {
        return Ok(false);
    }
    let mut updated = record;
    updated.status = PresentationStatus::Approved;
    updated.updated_at = now;
    store.put_presentation(&updated)?;
    tracing::info!(
        presentation = %updated.id,
        approve = tally.approve,
        reject = tally.reject,
        attendee_count,
        "presentation approved by vote"
    );
    Ok(true)
}

/// Deadline-forced verdict: `approved` when [`passes`] holds, `rejected`
/// otherwise, with a [`Notification::PresentationResult`] for the submitter.
/// Returns `None` without touching already-resolved presentations, which is
/// what makes a repeated sweep a no-op.
pub fn force_resolve(
    store: &dyn Store,
    record: &PresentationRecord,
    now: Timestamp,
    outbox: &mut Outbox,
) -> Result<Option<PresentationStatus>, CoreError> {
    if !record.status.is_pending() {
        return Ok(None);
    }
    let attendee_count = store.attendance_count(&record.event_id)?;
    let tally = Tally::count(&store.votes_for_presentation(&record.id)?);
    let verdict = if passes(record, &tally, attendee_count) {
        PresentationStatus::Approved
    } else {
        PresentationStatus::Rejected
    };
    let mut updated = record.clone();
    updated.status = verdict;
    updated.updated_at = now;
    store.put_presentation(&updated)?;
    outbox.push(Notification::PresentationResult {
        presentation_id: updated.id.clone(),
        submitted_by: updated.submitted_by.clone(),
        status: verdict,
    });
    Ok(Some(verdict))
}
