//! Presentation lifecycle: submission, owner edits, the admin gates, and
//! recording links.

use crate::error::CoreError;
use crate::lookup;
use crate::notify::{Notification, Outbox};
use crate::resolution;
use podium_store::{PresentationRecord, Store};
use podium_types::{EventId, PresentationId, PresentationStatus, Principal, Timestamp, UserId};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

static YOUTUBE_URL: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?(youtube\.com/(watch\?v=|embed/)|youtu\.be/)")
        .expect("invalid youtube pattern")
});
static VIMEO_URL: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^(https?://)?(www\.)?vimeo\.com/").expect("invalid vimeo pattern")
});

/// Whether a recording link points at YouTube or Vimeo.
fn is_video_url(url: &str) -> bool {
    YOUTUBE_URL.is_match(url) || VIMEO_URL.is_match(url)
}

/// Fields provided at submission time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewPresentation {
    pub title: String,
    pub description: String,
    pub speaker_name: String,
    #[serde(default)]
    pub speaker_bio: Option<String>,
    pub duration_minutes: u32,
    pub target_audience: String,
}

/// Owner-editable fields; `None` leaves a field unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PresentationPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub speaker_name: Option<String>,
    pub speaker_bio: Option<String>,
    pub duration_minutes: Option<u32>,
    pub target_audience: Option<String>,
}

/// Drives a presentation from submission through the moderation gates.
pub struct PresentationLifecycle {
    store: Arc<dyn Store>,
}

impl PresentationLifecycle {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Submit a proposal to an upcoming event. It starts `pending` with the
    /// admin gate unset and announces itself via
    /// [`Notification::PresentationSubmitted`].
    pub fn submit(
        &self,
        principal: &Principal,
        event_id: &EventId,
        new: NewPresentation,
        now: Timestamp,
        outbox: &mut Outbox,
    ) -> Result<PresentationId, CoreError> {
        let event = lookup::event(self.store.as_ref(), event_id)?;
        if !event.status.accepts_submissions() {
            return Err(CoreError::InvalidState(format!(
                "event {} is {}, submissions need an upcoming event",
                event_id,
                event.status.as_str()
            )));
        }
        let id = self.store.next_presentation_id()?;
        self.store.put_presentation(&PresentationRecord {
            id: id.clone(),
            event_id: event_id.clone(),
            title: new.title,
            description: new.description,
            speaker_name: new.speaker_name,
            speaker_bio: new.speaker_bio,
            duration_minutes: new.duration_minutes,
            target_audience: new.target_audience,
            submitted_by: principal.user_id.clone(),
            status: PresentationStatus::Pending,
            admin_approved: false,
            admin_approved_by: None,
            recording_url: None,
            created_at: now,
            updated_at: now,
        })?;
        outbox.push(Notification::PresentationSubmitted {
            event_id: event_id.clone(),
            presentation_id: id.clone(),
            submitted_by: principal.user_id.clone(),
        });
        tracing::info!(
            presentation = %id,
            event = %event_id,
            submitter = %principal.user_id,
            "presentation submitted"
        );
        Ok(id)
    }

    /// Edit a pending presentation's submission fields (owner only).
    pub fn update(
        &self,
        principal: &Principal,
        presentation_id: &PresentationId,
        patch: PresentationPatch,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        let mut record = lookup::presentation(self.store.as_ref(), presentation_id)?;
        if record.submitted_by != principal.user_id {
            return Err(CoreError::Unauthorized(
                "only the submitter can edit a presentation".into(),
            ));
        }
        if !record.status.is_pending() {
            return Err(CoreError::InvalidState(
                "only pending presentations can be edited".into(),
            ));
        }
        if let Some(title) = patch.title {
            record.title = title;
        }
        if let Some(description) = patch.description {
            record.description = description;
        }
        if let Some(speaker_name) = patch.speaker_name {
            record.speaker_name = speaker_name;
        }
        if let Some(speaker_bio) = patch.speaker_bio {
            record.speaker_bio = Some(speaker_bio);
        }
        if let Some(duration_minutes) = patch.duration_minutes {
            record.duration_minutes = duration_minutes;
        }
        if let Some(target_audience) = patch.target_audience {
            record.target_audience = target_audience;
        }
        record.updated_at = now;
        self.store.put_presentation(&record)?;
        Ok(())
    }

    /// Admin sign-off, the first of the two approval gates. The flag is
    /// monotonic; signing off twice fails. Re-evaluates the resolution rule
    /// immediately and returns whether that completed the approval.
    pub fn admin_approve(
        &self,
        principal: &Principal,
        presentation_id: &PresentationId,
        now: Timestamp,
    ) -> Result<bool, CoreError> {
        if !principal.is_admin() {
            return Err(CoreError::Unauthorized("admin role required".into()));
        }
        let mut record = lookup::presentation(self.store.as_ref(), presentation_id)?;
        if !record.status.is_pending() {
            return Err(CoreError::InvalidState(
                "presentation is not pending".into(),
            ));
        }
        if record.admin_approved {
            return Err(CoreError::InvalidState(
                "presentation is already admin-approved".into(),
            ));
        }
        record.admin_approved = true;
        record.admin_approved_by = Some(principal.user_id.clone());
        record.updated_at = now;
        self.store.put_presentation(&record)?;
        tracing::info!(
            presentation = %presentation_id,
            admin = %principal.user_id,
            "admin sign-off"
        );
        resolution::check_auto_approve(self.store.as_ref(), presentation_id, now)
    }

    /// Hard rejection: settles a pending presentation as `rejected` no matter
    /// how the votes stand.
    pub fn admin_reject(
        &self,
        principal: &Principal,
        presentation_id: &PresentationId,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        if !principal.is_admin() {
            return Err(CoreError::Unauthorized("admin role required".into()));
        }
        let mut record = lookup::presentation(self.store.as_ref(), presentation_id)?;
        if !record.status.is_pending() {
            return Err(CoreError::InvalidState(
                "presentation is not pending".into(),
            ));
        }
        record.status = PresentationStatus::Rejected;
        record.updated_at = now;
        self.store.put_presentation(&record)?;
        tracing::info!(
            presentation = %presentation_id,
            admin = %principal.user_id,
            "admin rejection"
        );
        Ok(())
    }

    /// Attach or clear the recording link (moderators; allowed in any
    /// status). `None` clears.
    pub fn update_recording_url(
        &self,
        principal: &Principal,
        presentation_id: &PresentationId,
        url: Option<String>,
        now: Timestamp,
    ) -> Result<(), CoreError> {
        if !principal.is_moderator() {
            return Err(CoreError::Unauthorized("moderator role required".into()));
        }
        let mut record = lookup::presentation(self.store.as_ref(), presentation_id)?;
        if let Some(ref link) = url {
            if !is_video_url(link) {
                return Err(CoreError::InvalidInput(
                    "recording URL must be a YouTube or Vimeo link".into(),
                ));
            }
        }
        record.recording_url = url;
        record.updated_at = now;
        self.store.put_presentation(&record)?;
        Ok(())
    }

    /// Get a presentation by id.
    pub fn get(&self, presentation_id: &PresentationId) -> Result<PresentationRecord, CoreError> {
        lookup::presentation(self.store.as_ref(), presentation_id)
    }

    /// All presentations for an event.
    pub fn list_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<PresentationRecord>, CoreError> {
        Ok(self.store.presentations_for_event(event_id)?)
    }

    /// Pending presentations for an event (what the voting page shows).
    pub fn list_pending_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<PresentationRecord>, CoreError> {
        Ok(self.store.pending_presentations_for_event(event_id)?)
    }

    /// Approved presentations for an event (the public listing).
    pub fn list_approved_for_event(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<PresentationRecord>, CoreError> {
        Ok(self
            .store
            .presentations_for_event(event_id)?
            .into_iter()
            .filter(|p| p.status == PresentationStatus::Approved)
            .collect())
    }

    /// Everything the user has submitted, across events.
    pub fn list_for_submitter(
        &self,
        user: &UserId,
    ) -> Result<Vec<PresentationRecord>, CoreError> {
        Ok(self.store.presentations_for_submitter(user)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::votes::VoteLedger;
    use podium_nullables::NullStore;
    use podium_store::{
        AttendanceRecord, AttendanceStore, EventRecord, EventStore, PresentationStore,
    };
    use podium_types::{EventStatus, Role, VoteChoice, DAY_SECS};

    fn member(name: &str) -> Principal {
        Principal::new(UserId::new(format!("usr_{name}")), Role::Member)
    }

    fn admin() -> Principal {
        Principal::new(UserId::new("usr_admin"), Role::Admin)
    }

    fn moderator() -> Principal {
        Principal::new(UserId::new("usr_mod"), Role::Moderator)
    }

    fn seed_event(store: &NullStore, status: EventStatus) -> EventId {
        let id = store.next_event_id().unwrap();
        store
            .put_event(&EventRecord {
                id: id.clone(),
                title: "Monthly meetup".into(),
                description: "Talks and pizza".into(),
                location: "Community hall".into(),
                date: Timestamp::new(10 * DAY_SECS),
                end_date: None,
                status,
                voting_deadline: Some(Timestamp::new(9 * DAY_SECS)),
                created_by: UserId::new("usr_host"),
                created_at: Timestamp::EPOCH,
                updated_at: Timestamp::EPOCH,
            })
            .unwrap();
        id
    }

    fn seed_attendees(store: &NullStore, event: &EventId, count: usize) -> Vec<Principal> {
        (0..count)
            .map(|i| {
                let principal = member(&format!("att{i}"));
                let id = store.next_attendance_id().unwrap();
                store
                    .put_attendance(&AttendanceRecord {
                        id,
                        event_id: event.clone(),
                        user_id: principal.user_id.clone(),
                        created_at: Timestamp::EPOCH,
                    })
                    .unwrap();
                principal
            })
            .collect()
    }

    fn talk() -> NewPresentation {
        NewPresentation {
            title: "Growing chili at home".into(),
            description: "From seed to salsa".into(),
            speaker_name: "Alex".into(),
            speaker_bio: None,
            duration_minutes: 20,
            target_audience: "Everyone".into(),
        }
    }

    fn now() -> Timestamp {
        Timestamp::new(DAY_SECS)
    }

    #[test]
    fn submit_requires_an_upcoming_event() {
        let store = Arc::new(NullStore::new());
        let past = seed_event(&store, EventStatus::Past);
        let lifecycle = PresentationLifecycle::new(store);
        let mut outbox = Outbox::new();

        let err = lifecycle
            .submit(&member("sam"), &past, talk(), now(), &mut outbox)
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
        assert!(outbox.is_empty());
    }

    #[test]
    fn submit_starts_pending_without_admin_gate() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let lifecycle = PresentationLifecycle::new(store.clone());
        let sam = member("sam");
        let mut outbox = Outbox::new();

        let id = lifecycle
            .submit(&sam, &event, talk(), now(), &mut outbox)
            .unwrap();

        let record = store.get_presentation(&id).unwrap();
        assert_eq!(record.status, PresentationStatus::Pending);
        assert!(!record.admin_approved);
        assert_eq!(record.submitted_by, sam.user_id);

        let signals = outbox.drain();
        assert_eq!(
            signals,
            vec![Notification::PresentationSubmitted {
                event_id: event,
                presentation_id: id,
                submitted_by: sam.user_id,
            }]
        );
    }

    #[test]
    fn only_the_submitter_may_edit() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let lifecycle = PresentationLifecycle::new(store);
        let mut outbox = Outbox::new();

        let id = lifecycle
            .submit(&member("sam"), &event, talk(), now(), &mut outbox)
            .unwrap();
        let err = lifecycle
            .update(
                &member("mallory"),
                &id,
                PresentationPatch {
                    title: Some("Hijacked".into()),
                    ..Default::default()
                },
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));
    }

    #[test]
    fn edits_apply_only_while_pending() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let lifecycle = PresentationLifecycle::new(store.clone());
        let sam = member("sam");
        let mut outbox = Outbox::new();

        let id = lifecycle
            .submit(&sam, &event, talk(), now(), &mut outbox)
            .unwrap();
        lifecycle
            .update(
                &sam,
                &id,
                PresentationPatch {
                    title: Some("Growing habaneros".into()),
                    duration_minutes: Some(25),
                    ..Default::default()
                },
                Timestamp::new(DAY_SECS + 60),
            )
            .unwrap();

        let record = store.get_presentation(&id).unwrap();
        assert_eq!(record.title, "Growing habaneros");
        assert_eq!(record.duration_minutes, 25);
        assert_eq!(record.updated_at, Timestamp::new(DAY_SECS + 60));

        lifecycle.admin_reject(&admin(), &id, now()).unwrap();
        let err = lifecycle
            .update(
                &sam,
                &id,
                PresentationPatch {
                    title: Some("Too late".into()),
                    ..Default::default()
                },
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
    }

    #[test]
    fn admin_approve_requires_the_admin_role() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let lifecycle = PresentationLifecycle::new(store);
        let mut outbox = Outbox::new();

        let id = lifecycle
            .submit(&member("sam"), &event, talk(), now(), &mut outbox)
            .unwrap();

        for caller in [member("sam"), moderator()] {
            let err = lifecycle.admin_approve(&caller, &id, now()).unwrap_err();
            assert!(matches!(err, CoreError::Unauthorized(_)));
        }
        lifecycle.admin_approve(&admin(), &id, now()).unwrap();
    }

    #[test]
    fn second_sign_off_fails() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let lifecycle = PresentationLifecycle::new(store.clone());
        let mut outbox = Outbox::new();

        let id = lifecycle
            .submit(&member("sam"), &event, talk(), now(), &mut outbox)
            .unwrap();
        let resolved = lifecycle.admin_approve(&admin(), &id, now()).unwrap();
        assert!(!resolved);

        let record = store.get_presentation(&id).unwrap();
        assert!(record.admin_approved);
        assert_eq!(record.admin_approved_by, Some(UserId::new("usr_admin")));

        let err = lifecycle.admin_approve(&admin(), &id, now()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
    }

    #[test]
    fn sign_off_after_quorum_completes_the_approval() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let voters = seed_attendees(&store, &event, 2);
        let lifecycle = PresentationLifecycle::new(store.clone());
        let ledger = VoteLedger::new(store.clone());
        let mut outbox = Outbox::new();

        let id = lifecycle
            .submit(&member("sam"), &event, talk(), now(), &mut outbox)
            .unwrap();
        // votes land before the sign-off, so nothing resolves yet
        ledger.cast(&voters[0], &id, VoteChoice::Approve, now()).unwrap();
        assert_eq!(
            store.get_presentation(&id).unwrap().status,
            PresentationStatus::Pending
        );

        let resolved = lifecycle.admin_approve(&admin(), &id, now()).unwrap();
        assert!(resolved);
        assert_eq!(
            store.get_presentation(&id).unwrap().status,
            PresentationStatus::Approved
        );
    }

    #[test]
    fn admin_reject_overrides_passing_votes() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let voters = seed_attendees(&store, &event, 2);
        let lifecycle = PresentationLifecycle::new(store.clone());
        let ledger = VoteLedger::new(store.clone());
        let mut outbox = Outbox::new();

        let id = lifecycle
            .submit(&member("sam"), &event, talk(), now(), &mut outbox)
            .unwrap();
        // a full house of approvals, but no sign-off, keeps it pending
        ledger.cast(&voters[0], &id, VoteChoice::Approve, now()).unwrap();
        ledger.cast(&voters[1], &id, VoteChoice::Approve, now()).unwrap();
        assert_eq!(
            store.get_presentation(&id).unwrap().status,
            PresentationStatus::Pending
        );

        lifecycle.admin_reject(&admin(), &id, now()).unwrap();
        assert_eq!(
            store.get_presentation(&id).unwrap().status,
            PresentationStatus::Rejected
        );

        // terminal: neither gate reopens it
        let err = lifecycle.admin_approve(&admin(), &id, now()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidState(_)));
    }

    #[test]
    fn recording_url_accepts_youtube_and_vimeo_only() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let lifecycle = PresentationLifecycle::new(store.clone());
        let mut outbox = Outbox::new();

        let id = lifecycle
            .submit(&member("sam"), &event, talk(), now(), &mut outbox)
            .unwrap();

        let err = lifecycle
            .update_recording_url(
                &member("sam"),
                &id,
                Some("https://vimeo.com/123".into()),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Unauthorized(_)));

        lifecycle
            .update_recording_url(
                &moderator(),
                &id,
                Some("https://vimeo.com/123456".into()),
                now(),
            )
            .unwrap();
        assert_eq!(
            store.get_presentation(&id).unwrap().recording_url,
            Some("https://vimeo.com/123456".into())
        );

        let err = lifecycle
            .update_recording_url(
                &moderator(),
                &id,
                Some("https://example.com/watch?v=123".into()),
                now(),
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));

        lifecycle
            .update_recording_url(&moderator(), &id, None, now())
            .unwrap();
        assert_eq!(store.get_presentation(&id).unwrap().recording_url, None);
    }

    #[test]
    fn recording_url_is_settable_in_any_status() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let lifecycle = PresentationLifecycle::new(store.clone());
        let mut outbox = Outbox::new();

        let id = lifecycle
            .submit(&member("sam"), &event, talk(), now(), &mut outbox)
            .unwrap();
        lifecycle.admin_reject(&admin(), &id, now()).unwrap();

        lifecycle
            .update_recording_url(
                &moderator(),
                &id,
                Some("https://www.youtube.com/watch?v=abc123".into()),
                now(),
            )
            .unwrap();
    }

    #[test]
    fn video_url_patterns() {
        assert!(is_video_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_video_url("http://youtube.com/embed/dQw4w9WgXcQ"));
        assert!(is_video_url("youtu.be/dQw4w9WgXcQ"));
        assert!(is_video_url("https://vimeo.com/123456789"));
        assert!(is_video_url("www.vimeo.com/987654321"));

        assert!(!is_video_url("https://example.com/watch?v=123"));
        assert!(!is_video_url("https://youtube.example.com/watch?v=123"));
        assert!(!is_video_url(""));
    }

    #[test]
    fn listings_split_by_status() {
        let store = Arc::new(NullStore::new());
        let event = seed_event(&store, EventStatus::Upcoming);
        let lifecycle = PresentationLifecycle::new(store.clone());
        let sam = member("sam");
        let mut outbox = Outbox::new();

        let first = lifecycle.submit(&sam, &event, talk(), now(), &mut outbox).unwrap();
        let second = lifecycle.submit(&sam, &event, talk(), now(), &mut outbox).unwrap();
        lifecycle.admin_reject(&admin(), &second, now()).unwrap();

        let all = lifecycle.list_for_event(&event).unwrap();
        assert_eq!(all.len(), 2);

        let pending = lifecycle.list_pending_for_event(&event).unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, first);

        assert!(lifecycle.list_approved_for_event(&event).unwrap().is_empty());

        let mine = lifecycle.list_for_submitter(&sam.user_id).unwrap();
        assert_eq!(mine.len(), 2);
    }
}
