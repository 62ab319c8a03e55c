//! Periodic sweeps: forced deadline resolution and event status rollover.
//!
//! Both sweepers are plain synchronous passes over the store. The hosting
//! node decides the cadence; a pass is idempotent, so overlapping or extra
//! runs only cost the scan.

use crate::error::CoreError;
use crate::notify::Outbox;
use crate::resolution;
use podium_store::{EventRecord, Store};
use podium_types::{EventStatus, Timestamp};
use std::sync::Arc;

/// Forces a verdict on every pending presentation of events whose voting
/// deadline has elapsed.
pub struct DeadlineSweeper {
    store: Arc<dyn Store>,
}

impl DeadlineSweeper {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// One pass. Returns how many presentations were resolved.
    ///
    /// A failure on one presentation is logged and does not stop the pass;
    /// the next run picks the survivor up again.
    pub fn run_once(&self, now: Timestamp, outbox: &mut Outbox) -> Result<u64, CoreError> {
        let mut resolved = 0u64;
        for event in self.store.list_events_by_status(EventStatus::Upcoming)? {
            match event.voting_deadline {
                Some(deadline) if deadline.is_before(now) => {}
                _ => continue,
            }
            for presentation in self.store.pending_presentations_for_event(&event.id)? {
                match resolution::force_resolve(self.store.as_ref(), &presentation, now, outbox) {
                    Ok(Some(verdict)) => {
                        resolved += 1;
                        tracing::info!(
                            presentation = %presentation.id,
                            event = %event.id,
                            verdict = verdict.as_str(),
                            "deadline resolution"
                        );
                    }
                    Ok(None) => {}
                    Err(err) => {
                        tracing::warn!(
                            presentation = %presentation.id,
                            event = %event.id,
                            error = %err,
                            "deadline resolution failed, continuing"
                        );
                    }
                }
            }
        }
        Ok(resolved)
    }
}

/// Rolls event statuses forward as their dates pass. Cancelled events are
/// never touched.
pub struct EventStatusSweeper {
    store: Arc<dyn Store>,
}

impl EventStatusSweeper {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// One pass. Returns how many events changed status.
    pub fn run_once(&self, now: Timestamp) -> Result<u64, CoreError> {
        let mut changed = 0u64;
        for mut event in self.store.list_events()? {
            if event.status == EventStatus::Cancelled {
                continue;
            }
            let next = schedule_status(&event, now);
            if next == event.status {
                continue;
            }
            tracing::debug!(
                event = %event.id,
                from = event.status.as_str(),
                to = next.as_str(),
                "event status rollover"
            );
            event.status = next;
            event.updated_at = now;
            self.store.put_event(&event)?;
            changed += 1;
        }
        Ok(changed)
    }
}

/// Status an event's schedule calls for at `now`. Events without an end date
/// skip `ongoing` and go straight to `past` at start time.
fn schedule_status(event: &EventRecord, now: Timestamp) -> EventStatus {
    match event.end_date {
        Some(end) => {
            if now < event.date {
                EventStatus::Upcoming
            } else if now < end {
                EventStatus::Ongoing
            } else {
                EventStatus::Past
            }
        }
        None => {
            if now < event.date {
                EventStatus::Upcoming
            } else {
                EventStatus::Past
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Notification;
    use crate::presentations::{NewPresentation, PresentationLifecycle};
    use crate::votes::VoteLedger;
    use podium_nullables::{NullClock, NullStore};
    use podium_store::{AttendanceRecord, AttendanceStore, EventStore, PresentationStore};
    use podium_types::{
        EventId, PresentationId, PresentationStatus, Principal, Role, UserId, VoteChoice, DAY_SECS,
    };

    const DEADLINE: u64 = 9 * DAY_SECS;

    fn admin() -> Principal {
        Principal::new(UserId::new("usr_admin"), Role::Admin)
    }

    fn member(name: &str) -> Principal {
        Principal::new(UserId::new(format!("usr_{name}")), Role::Member)
    }

    fn seed_event(store: &NullStore, deadline: Option<u64>) -> EventId {
        let id = store.next_event_id().unwrap();
        store
            .put_event(&EventRecord {
                id: id.clone(),
                title: "Monthly meetup".into(),
                description: "Talks and pizza".into(),
                location: "Community hall".into(),
                date: Timestamp::new(10 * DAY_SECS),
                end_date: None,
                status: EventStatus::Upcoming,
                voting_deadline: deadline.map(Timestamp::new),
                created_by: UserId::new("usr_mod"),
                created_at: Timestamp::EPOCH,
                updated_at: Timestamp::EPOCH,
            })
            .unwrap();
        id
    }

    fn seed_attendees(store: &NullStore, event: &EventId, count: usize) -> Vec<Principal> {
        (0..count)
            .map(|i| {
                let who = member(&format!("voter{i}"));
                let id = store.next_attendance_id().unwrap();
                store
                    .put_attendance(&AttendanceRecord {
                        id,
                        event_id: event.clone(),
                        user_id: who.user_id.clone(),
                        created_at: Timestamp::EPOCH,
                    })
                    .unwrap();
                who
            })
            .collect()
    }

    fn submit(
        lifecycle: &PresentationLifecycle,
        event: &EventId,
        speaker: &str,
    ) -> PresentationId {
        let mut outbox = Outbox::new();
        lifecycle
            .submit(
                &member(speaker),
                event,
                NewPresentation {
                    title: format!("Talk by {speaker}"),
                    description: "A talk".into(),
                    speaker_name: speaker.into(),
                    speaker_bio: None,
                    duration_minutes: 20,
                    target_audience: "everyone".into(),
                },
                Timestamp::new(DAY_SECS),
                &mut outbox,
            )
            .unwrap()
    }

    // --- deadline sweeper tests ---

    #[test]
    fn elapsed_deadline_forces_a_verdict_both_ways() {
        let store = Arc::new(NullStore::new());
        let lifecycle = PresentationLifecycle::new(store.clone());
        let ledger = VoteLedger::new(store.clone());
        let event = seed_event(&store, Some(DEADLINE));
        let voters = seed_attendees(&store, &event, 4);

        // winner: 3 of 4 approve; loser: 1 approve against 2 rejects
        let winner = submit(&lifecycle, &event, "sam");
        let loser = submit(&lifecycle, &event, "kim");
        let clock = NullClock::new(DEADLINE - 1);
        let before = clock.now();
        for voter in &voters[..3] {
            ledger
                .cast(voter, &winner, VoteChoice::Approve, before)
                .unwrap();
        }
        ledger
            .cast(&voters[0], &loser, VoteChoice::Approve, before)
            .unwrap();
        for voter in &voters[1..3] {
            ledger
                .cast(voter, &loser, VoteChoice::Reject, before)
                .unwrap();
        }
        // sign-off completes the winner on the spot; the loser keeps waiting
        assert!(lifecycle.admin_approve(&admin(), &winner, before).unwrap());
        assert!(!lifecycle.admin_approve(&admin(), &loser, before).unwrap());
        assert_eq!(
            store.get_presentation(&winner).unwrap().status,
            PresentationStatus::Approved
        );
        assert!(store.get_presentation(&loser).unwrap().status.is_pending());

        clock.advance(2);
        let mut outbox = Outbox::new();
        let sweeper = DeadlineSweeper::new(store.clone());
        let resolved = sweeper.run_once(clock.now(), &mut outbox).unwrap();

        assert_eq!(resolved, 1);
        assert_eq!(
            store.get_presentation(&loser).unwrap().status,
            PresentationStatus::Rejected
        );
        let signals = outbox.drain();
        assert_eq!(
            signals,
            vec![Notification::PresentationResult {
                presentation_id: loser,
                submitted_by: UserId::new("usr_kim"),
                status: PresentationStatus::Rejected,
            }]
        );

        // nothing left to resolve on a second pass
        clock.advance(1);
        let resolved = sweeper.run_once(clock.now(), &mut outbox).unwrap();
        assert_eq!(resolved, 0);
        assert!(outbox.is_empty());
    }

    #[test]
    fn missing_sign_off_means_rejection_at_the_deadline() {
        let store = Arc::new(NullStore::new());
        let lifecycle = PresentationLifecycle::new(store.clone());
        let ledger = VoteLedger::new(store.clone());
        let event = seed_event(&store, Some(DEADLINE));
        let voters = seed_attendees(&store, &event, 2);

        let presentation = submit(&lifecycle, &event, "sam");
        for voter in &voters {
            ledger
                .cast(
                    voter,
                    &presentation,
                    VoteChoice::Approve,
                    Timestamp::new(DEADLINE - 1),
                )
                .unwrap();
        }

        let mut outbox = Outbox::new();
        let resolved = DeadlineSweeper::new(store.clone())
            .run_once(Timestamp::new(DEADLINE + 1), &mut outbox)
            .unwrap();

        assert_eq!(resolved, 1);
        assert_eq!(
            store.get_presentation(&presentation).unwrap().status,
            PresentationStatus::Rejected
        );
    }

    #[test]
    fn unexpired_or_absent_deadlines_are_left_alone() {
        let store = Arc::new(NullStore::new());
        let lifecycle = PresentationLifecycle::new(store.clone());
        let open = seed_event(&store, Some(DEADLINE));
        let unbounded = seed_event(&store, None);
        let first = submit(&lifecycle, &open, "sam");
        let second = submit(&lifecycle, &unbounded, "kim");

        let mut outbox = Outbox::new();
        let sweeper = DeadlineSweeper::new(store.clone());
        // exactly at the deadline still counts as open
        let resolved = sweeper
            .run_once(Timestamp::new(DEADLINE), &mut outbox)
            .unwrap();

        assert_eq!(resolved, 0);
        assert!(outbox.is_empty());
        assert!(store.get_presentation(&first).unwrap().status.is_pending());
        assert!(store.get_presentation(&second).unwrap().status.is_pending());
    }

    #[test]
    fn only_upcoming_events_are_swept() {
        let store = Arc::new(NullStore::new());
        let lifecycle = PresentationLifecycle::new(store.clone());
        let event = seed_event(&store, Some(DEADLINE));
        let presentation = submit(&lifecycle, &event, "sam");

        let mut record = store.get_event(&event).unwrap();
        record.status = EventStatus::Cancelled;
        store.put_event(&record).unwrap();

        let mut outbox = Outbox::new();
        let resolved = DeadlineSweeper::new(store.clone())
            .run_once(Timestamp::new(DEADLINE + 1), &mut outbox)
            .unwrap();

        assert_eq!(resolved, 0);
        assert!(store
            .get_presentation(&presentation)
            .unwrap()
            .status
            .is_pending());
    }

    // --- status sweeper tests ---

    #[test]
    fn statuses_roll_forward_with_the_schedule() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, None);
        let mut record = store.get_event(&event).unwrap();
        record.end_date = Some(Timestamp::new(11 * DAY_SECS));
        store.put_event(&record).unwrap();

        let sweeper = EventStatusSweeper::new(store.clone());
        let clock = NullClock::new(DAY_SECS);

        assert_eq!(sweeper.run_once(clock.now()).unwrap(), 0);
        assert_eq!(
            store.get_event(&event).unwrap().status,
            EventStatus::Upcoming
        );

        clock.set(10 * DAY_SECS);
        assert_eq!(sweeper.run_once(clock.now()).unwrap(), 1);
        assert_eq!(store.get_event(&event).unwrap().status, EventStatus::Ongoing);

        clock.set(11 * DAY_SECS);
        assert_eq!(sweeper.run_once(clock.now()).unwrap(), 1);
        assert_eq!(store.get_event(&event).unwrap().status, EventStatus::Past);

        // settled; nothing changes on a repeat pass
        clock.advance(DAY_SECS);
        assert_eq!(sweeper.run_once(clock.now()).unwrap(), 0);
    }

    #[test]
    fn events_without_an_end_date_skip_ongoing() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, None);

        let sweeper = EventStatusSweeper::new(store.clone());
        assert_eq!(sweeper.run_once(Timestamp::new(10 * DAY_SECS)).unwrap(), 1);
        assert_eq!(store.get_event(&event).unwrap().status, EventStatus::Past);
    }

    #[test]
    fn cancelled_events_never_roll() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, None);
        let mut record = store.get_event(&event).unwrap();
        record.status = EventStatus::Cancelled;
        store.put_event(&record).unwrap();

        let sweeper = EventStatusSweeper::new(store.clone());
        assert_eq!(sweeper.run_once(Timestamp::new(20 * DAY_SECS)).unwrap(), 0);
        assert_eq!(
            store.get_event(&event).unwrap().status,
            EventStatus::Cancelled
        );
    }
}
