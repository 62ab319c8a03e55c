//! Vote ledger: one vote per attendee per pending presentation.

use crate::error::{CoreError, EntityKind};
use crate::lookup;
use crate::resolution;
use podium_store::{Store, VoteRecord};
use podium_types::{PresentationId, Principal, Timestamp, UserId, VoteChoice};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Vote counts for one presentation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub approve: u64,
    pub reject: u64,
}

impl Tally {
    pub fn count(votes: &[VoteRecord]) -> Self {
        let mut tally = Tally::default();
        for vote in votes {
            match vote.choice {
                VoteChoice::Approve => tally.approve += 1,
                VoteChoice::Reject => tally.reject += 1,
            }
        }
        tally
    }

    pub fn total(&self) -> u64 {
        self.approve + self.reject
    }
}

/// Records attendee votes and re-evaluates the resolution rule on every cast.
pub struct VoteLedger {
    store: Arc<dyn Store>,
}

impl VoteLedger {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Cast or flip a vote. A flip overwrites the choice in place and keeps
    /// the first-cast `created_at`. Returns whether this write completed the
    /// presentation's approval.
    pub fn cast(
        &self,
        principal: &Principal,
        presentation_id: &PresentationId,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<bool, CoreError> {
        let presentation = lookup::presentation(self.store.as_ref(), presentation_id)?;
        if !presentation.status.is_pending() {
            return Err(CoreError::NotVotable);
        }
        let event = lookup::event(self.store.as_ref(), &presentation.event_id)?;
        if let Some(deadline) = event.voting_deadline {
            if deadline.is_before(now) {
                return Err(CoreError::DeadlinePassed);
            }
        }
        if self
            .store
            .get_attendance(&presentation.event_id, &principal.user_id)?
            .is_none()
        {
            return Err(CoreError::NotEligible);
        }

        let created_at = match self.store.get_vote(presentation_id, &principal.user_id)? {
            Some(existing) => existing.created_at,
            None => now,
        };
        self.store.put_vote(&VoteRecord {
            presentation_id: presentation_id.clone(),
            user_id: principal.user_id.clone(),
            choice,
            created_at,
        })?;
        tracing::debug!(
            presentation = %presentation_id,
            voter = %principal.user_id,
            choice = choice.as_str(),
            "vote recorded"
        );
        resolution::check_auto_approve(self.store.as_ref(), presentation_id, now)
    }

    /// Withdraw the caller's vote. Retraction never re-evaluates the
    /// resolution rule; the next cast or the deadline sweep settles things.
    pub fn retract(
        &self,
        principal: &Principal,
        presentation_id: &PresentationId,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        let presentation = lookup::presentation(self.store.as_ref(), presentation_id)?;
        if !presentation.status.is_pending() {
            return Err(CoreError::NotVotable);
        }
        let event = lookup::event(self.store.as_ref(), &presentation.event_id)?;
        if let Some(deadline) = event.voting_deadline {
            if deadline.is_before(now) {
                return Err(CoreError::DeadlinePassed);
            }
        }
        if self
            .store
            .get_vote(presentation_id, &principal.user_id)?
            .is_none()
        {
            return Err(CoreError::not_found(EntityKind::Vote, presentation_id.as_str()));
        }
        self.store.delete_vote(presentation_id, &principal.user_id)?;
        tracing::debug!(
            presentation = %presentation_id,
            voter = %principal.user_id,
            "vote withdrawn"
        );
        Ok(())
    }

    /// Vote counts; all zeros when nothing has been cast.
    pub fn tally(&self, presentation_id: &PresentationId) -> Result<Tally, CoreError> {
        Ok(Tally::count(
            &self.store.votes_for_presentation(presentation_id)?,
        ))
    }

    /// The given user's current vote, if any.
    pub fn my_vote(
        &self,
        presentation_id: &PresentationId,
        user: &UserId,
    ) -> Result<Option<VoteChoice>, CoreError> {
        Ok(self
            .store
            .get_vote(presentation_id, user)?
            .map(|vote| vote.choice))
    }
}
