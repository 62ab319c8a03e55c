//! Request handlers for the HTTP API.
//!
//! Handlers stay thin: resolve the caller, parse path ids, call one engine
//! operation with `Timestamp::now()`, and shape the response. Engine input
//! types double as request bodies where they match the wire shape
//! ([`NewEvent`], [`EventPatch`], [`NewPresentation`], [`PresentationPatch`]).
//! Mutating handlers hold the shared mutation lock across the engine call;
//! outbox signals are published after the lock drops.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use prometheus::{Encoder, TextEncoder};
use serde::{Deserialize, Serialize};

use podium_lifecycle::resolution::min_votes_required;
use podium_lifecycle::{EventPatch, NewEvent, NewPresentation, Outbox, PresentationPatch};
use podium_store::{EventRecord, PresentationRecord, StoreError, UserRecord};
use podium_types::{
    AttendanceId, EventId, EventStatus, PresentationId, PresentationStatus, Principal, Role,
    Timestamp, UserId, VoteChoice,
};

use crate::auth;
use crate::error::RpcError;
use crate::pagination::{paginate, PaginationMeta, PaginationParams};
use crate::server::RpcState;

// ── Shared helpers ───────────────────────────────────────────────────────

fn parse_event_id(raw: &str) -> Result<EventId, RpcError> {
    raw.parse()
        .map_err(|_| RpcError::InvalidRequest(format!("'{raw}' is not an event id")))
}

fn parse_presentation_id(raw: &str) -> Result<PresentationId, RpcError> {
    raw.parse()
        .map_err(|_| RpcError::InvalidRequest(format!("'{raw}' is not a presentation id")))
}

fn parse_user_id(raw: &str) -> Result<UserId, RpcError> {
    raw.parse()
        .map_err(|_| RpcError::InvalidRequest(format!("'{raw}' is not a user id")))
}

/// Hand every signal the mutation produced to the node.
fn publish(state: &RpcState, mut outbox: Outbox) {
    for signal in outbox.drain() {
        state.notifications.publish(&signal);
    }
}

fn require_admin(principal: &Principal) -> Result<(), RpcError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(RpcError::Forbidden("admin role required".into()))
    }
}

// ── Health and metrics ───────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

pub async fn health(State(state): State<Arc<RpcState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: Timestamp::now()
            .as_secs()
            .saturating_sub(state.started_at.as_secs()),
    })
}

/// Prometheus text exposition of the node's registry. 404 when metrics
/// are disabled in the node config.
pub async fn metrics(State(state): State<Arc<RpcState>>) -> Response {
    let Some(registry) = &state.metrics_registry else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let mut buf = Vec::new();
    if TextEncoder::new()
        .encode(&registry.gather(), &mut buf)
        .is_err()
    {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        buf,
    )
        .into_response()
}

// ── Events ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ListEventsQuery {
    pub status: Option<EventStatus>,
    pub cursor: Option<String>,
    pub count: Option<u32>,
}

#[derive(Serialize)]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    pub location: String,
    pub date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_deadline: Option<Timestamp>,
}

impl From<EventRecord> for EventSummary {
    fn from(record: EventRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            location: record.location,
            date: record.date,
            end_date: record.end_date,
            status: record.status,
            voting_deadline: record.voting_deadline,
        }
    }
}

#[derive(Serialize)]
pub struct EventListResponse {
    pub events: Vec<EventSummary>,
    pub pagination: PaginationMeta,
}

pub async fn list_events(
    State(state): State<Arc<RpcState>>,
    Query(query): Query<ListEventsQuery>,
) -> Result<Json<EventListResponse>, RpcError> {
    let listing = state.events.list(query.status)?;
    let params = PaginationParams {
        cursor: query.cursor,
        count: query.count,
    };
    let (page, pagination) = paginate(listing, &params);

    Ok(Json(EventListResponse {
        events: page.into_iter().map(EventSummary::from).collect(),
        pagination,
    }))
}

#[derive(Debug, Serialize)]
pub struct CreatedEventResponse {
    pub event_id: EventId,
}

pub async fn create_event(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Json(body): Json<NewEvent>,
) -> Result<Json<CreatedEventResponse>, RpcError> {
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    let event_id = state.events.create(&principal, body, Timestamp::now())?;
    Ok(Json(CreatedEventResponse { event_id }))
}

#[derive(Debug, Serialize)]
pub struct EventDetailResponse {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<Timestamp>,
    pub status: EventStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voting_deadline: Option<Timestamp>,
    pub created_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Registered attendee headcount.
    pub attendee_count: u64,
    /// Votes a presentation needs under the current headcount.
    pub votes_required: u64,
    /// Whether the caller is registered; omitted for anonymous reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attending: Option<bool>,
}

pub async fn get_event(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<EventDetailResponse>, RpcError> {
    let id = parse_event_id(&id)?;
    let caller = auth::maybe_caller(state.store.as_ref(), &headers)?;

    let record = state.events.get(&id)?;
    let attendee_count = state.attendance.count(&id)?;
    let attending = match &caller {
        Some(principal) => Some(state.attendance.is_attending(&id, &principal.user_id)?),
        None => None,
    };

    Ok(Json(EventDetailResponse {
        id: record.id,
        title: record.title,
        description: record.description,
        location: record.location,
        date: record.date,
        end_date: record.end_date,
        status: record.status,
        voting_deadline: record.voting_deadline,
        created_by: record.created_by,
        created_at: record.created_at,
        updated_at: record.updated_at,
        attendee_count,
        votes_required: min_votes_required(attendee_count),
        attending,
    }))
}

pub async fn update_event(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<EventPatch>,
) -> Result<StatusCode, RpcError> {
    let id = parse_event_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    state.events.update(&principal, &id, patch, Timestamp::now())?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SetEventStatusRequest {
    pub status: EventStatus,
}

pub async fn set_event_status(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<SetEventStatusRequest>,
) -> Result<StatusCode, RpcError> {
    let id = parse_event_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    state
        .events
        .set_status(&principal, &id, body.status, Timestamp::now())?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Attendance ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RegisteredResponse {
    pub attendance_id: AttendanceId,
}

pub async fn register(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<RegisteredResponse>, RpcError> {
    let id = parse_event_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let mut outbox = Outbox::new();
    let attendance_id = {
        let _guard = state.mutation_lock.lock().await;
        state
            .attendance
            .register(&principal, &id, Timestamp::now(), &mut outbox)?
    };
    publish(&state, outbox);

    Ok(Json(RegisteredResponse { attendance_id }))
}

pub async fn unregister(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, RpcError> {
    let id = parse_event_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    state.attendance.unregister(&principal, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct AttendeeEntry {
    pub user_id: UserId,
    pub registered_at: Timestamp,
}

#[derive(Serialize)]
pub struct AttendeeListResponse {
    pub attendees: Vec<AttendeeEntry>,
}

pub async fn list_attendees(
    State(state): State<Arc<RpcState>>,
    Path(id): Path<String>,
) -> Result<Json<AttendeeListResponse>, RpcError> {
    let id = parse_event_id(&id)?;
    let attendees = state
        .attendance
        .list_for_event(&id)?
        .into_iter()
        .map(|row| AttendeeEntry {
            user_id: row.user_id,
            registered_at: row.created_at,
        })
        .collect();
    Ok(Json(AttendeeListResponse { attendees }))
}

// ── Presentations ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PresentationSummary {
    pub id: PresentationId,
    pub event_id: EventId,
    pub title: String,
    pub speaker_name: String,
    pub duration_minutes: u32,
    pub target_audience: String,
    pub status: PresentationStatus,
    pub admin_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    pub submitted_by: UserId,
    pub approve_votes: u64,
    pub reject_votes: u64,
    /// The caller's own vote; omitted for anonymous reads.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_vote: Option<VoteChoice>,
}

fn summarize(
    state: &RpcState,
    record: PresentationRecord,
    caller: Option<&Principal>,
) -> Result<PresentationSummary, RpcError> {
    let tally = state.votes.tally(&record.id)?;
    let my_vote = match caller {
        Some(principal) => state.votes.my_vote(&record.id, &principal.user_id)?,
        None => None,
    };

    Ok(PresentationSummary {
        id: record.id,
        event_id: record.event_id,
        title: record.title,
        speaker_name: record.speaker_name,
        duration_minutes: record.duration_minutes,
        target_audience: record.target_audience,
        status: record.status,
        admin_approved: record.admin_approved,
        recording_url: record.recording_url,
        submitted_by: record.submitted_by,
        approve_votes: tally.approve,
        reject_votes: tally.reject,
        my_vote,
    })
}

#[derive(Deserialize)]
pub struct ListPresentationsQuery {
    pub status: Option<PresentationStatus>,
}

#[derive(Serialize)]
pub struct PresentationListResponse {
    pub presentations: Vec<PresentationSummary>,
}

pub async fn list_event_presentations(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<ListPresentationsQuery>,
) -> Result<Json<PresentationListResponse>, RpcError> {
    let id = parse_event_id(&id)?;
    let caller = auth::maybe_caller(state.store.as_ref(), &headers)?;

    let records = match query.status {
        None => state.presentations.list_for_event(&id)?,
        Some(PresentationStatus::Pending) => state.presentations.list_pending_for_event(&id)?,
        Some(PresentationStatus::Approved) => state.presentations.list_approved_for_event(&id)?,
        Some(status) => state
            .presentations
            .list_for_event(&id)?
            .into_iter()
            .filter(|p| p.status == status)
            .collect(),
    };

    let presentations = records
        .into_iter()
        .map(|record| summarize(&state, record, caller.as_ref()))
        .collect::<Result<_, _>>()?;
    Ok(Json(PresentationListResponse { presentations }))
}

#[derive(Serialize)]
pub struct SubmittedResponse {
    pub presentation_id: PresentationId,
}

pub async fn submit_presentation(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<NewPresentation>,
) -> Result<Json<SubmittedResponse>, RpcError> {
    let id = parse_event_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let mut outbox = Outbox::new();
    let presentation_id = {
        let _guard = state.mutation_lock.lock().await;
        state
            .presentations
            .submit(&principal, &id, body, Timestamp::now(), &mut outbox)?
    };
    publish(&state, outbox);

    Ok(Json(SubmittedResponse { presentation_id }))
}

#[derive(Debug, Serialize)]
pub struct PresentationDetailResponse {
    pub id: PresentationId,
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub speaker_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaker_bio: Option<String>,
    pub duration_minutes: u32,
    pub target_audience: String,
    pub status: PresentationStatus,
    pub admin_approved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_approved_by: Option<UserId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recording_url: Option<String>,
    pub submitted_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub approve_votes: u64,
    pub reject_votes: u64,
    pub total_votes: u64,
    /// Votes needed under the event's current headcount.
    pub votes_required: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_vote: Option<VoteChoice>,
}

pub async fn get_presentation(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<PresentationDetailResponse>, RpcError> {
    let id = parse_presentation_id(&id)?;
    let caller = auth::maybe_caller(state.store.as_ref(), &headers)?;

    let record = state.presentations.get(&id)?;
    let tally = state.votes.tally(&id)?;
    let attendee_count = state.attendance.count(&record.event_id)?;
    let my_vote = match &caller {
        Some(principal) => state.votes.my_vote(&id, &principal.user_id)?,
        None => None,
    };

    Ok(Json(PresentationDetailResponse {
        id: record.id,
        event_id: record.event_id,
        title: record.title,
        description: record.description,
        speaker_name: record.speaker_name,
        speaker_bio: record.speaker_bio,
        duration_minutes: record.duration_minutes,
        target_audience: record.target_audience,
        status: record.status,
        admin_approved: record.admin_approved,
        admin_approved_by: record.admin_approved_by,
        recording_url: record.recording_url,
        submitted_by: record.submitted_by,
        created_at: record.created_at,
        updated_at: record.updated_at,
        approve_votes: tally.approve,
        reject_votes: tally.reject,
        total_votes: tally.total(),
        votes_required: min_votes_required(attendee_count),
        my_vote,
    }))
}

pub async fn update_presentation(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<PresentationPatch>,
) -> Result<StatusCode, RpcError> {
    let id = parse_presentation_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    state
        .presentations
        .update(&principal, &id, patch, Timestamp::now())?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct SignOffResponse {
    /// Whether the sign-off settled the presentation on the spot (the vote
    /// rule was already passing).
    pub settled: bool,
    pub status: PresentationStatus,
}

pub async fn approve_presentation(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<SignOffResponse>, RpcError> {
    let id = parse_presentation_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    let settled = state
        .presentations
        .admin_approve(&principal, &id, Timestamp::now())?;
    let status = state.presentations.get(&id)?.status;

    Ok(Json(SignOffResponse { settled, status }))
}

pub async fn reject_presentation(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, RpcError> {
    let id = parse_presentation_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    state
        .presentations
        .admin_reject(&principal, &id, Timestamp::now())?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct RecordingRequest {
    /// The recording link, or `null` to clear it.
    pub url: Option<String>,
}

pub async fn set_recording_url(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<RecordingRequest>,
) -> Result<StatusCode, RpcError> {
    let id = parse_presentation_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    state
        .presentations
        .update_recording_url(&principal, &id, body.url, Timestamp::now())?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Votes ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CastVoteRequest {
    pub choice: VoteChoice,
}

#[derive(Serialize)]
pub struct CastVoteResponse {
    /// Whether this vote settled the presentation (quorum, majority, and
    /// sign-off all in place).
    pub settled: bool,
    pub approve_votes: u64,
    pub reject_votes: u64,
}

pub async fn cast_vote(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<CastVoteRequest>,
) -> Result<Json<CastVoteResponse>, RpcError> {
    let id = parse_presentation_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    let settled = state
        .votes
        .cast(&principal, &id, body.choice, Timestamp::now())?;
    let tally = state.votes.tally(&id)?;

    Ok(Json(CastVoteResponse {
        settled,
        approve_votes: tally.approve,
        reject_votes: tally.reject,
    }))
}

pub async fn retract_vote(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, RpcError> {
    let id = parse_presentation_id(&id)?;
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let _guard = state.mutation_lock.lock().await;
    state.votes.retract(&principal, &id, Timestamp::now())?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct TallyResponse {
    pub approve_votes: u64,
    pub reject_votes: u64,
    pub total_votes: u64,
    pub votes_required: u64,
}

pub async fn get_tally(
    State(state): State<Arc<RpcState>>,
    Path(id): Path<String>,
) -> Result<Json<TallyResponse>, RpcError> {
    let id = parse_presentation_id(&id)?;

    let record = state.presentations.get(&id)?;
    let tally = state.votes.tally(&id)?;
    let attendee_count = state.attendance.count(&record.event_id)?;

    Ok(Json(TallyResponse {
        approve_votes: tally.approve,
        reject_votes: tally.reject,
        total_votes: tally.total(),
        votes_required: min_votes_required(attendee_count),
    }))
}

// ── Caller's own data ────────────────────────────────────────────────────

pub async fn my_events(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
) -> Result<Json<EventListResponse>, RpcError> {
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let mut events = Vec::new();
    for event_id in state.attendance.events_for_user(&principal.user_id)? {
        events.push(EventSummary::from(state.events.get(&event_id)?));
    }

    Ok(Json(EventListResponse {
        events,
        pagination: PaginationMeta { cursor: None },
    }))
}

pub async fn my_presentations(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
) -> Result<Json<PresentationListResponse>, RpcError> {
    let principal = auth::caller(state.store.as_ref(), &headers)?;

    let presentations = state
        .presentations
        .list_for_submitter(&principal.user_id)?
        .into_iter()
        .map(|record| summarize(&state, record, Some(&principal)))
        .collect::<Result<_, _>>()?;
    Ok(Json(PresentationListResponse { presentations }))
}

// ── User directory (admin) ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpsertUserRequest {
    pub id: String,
    pub name: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct UserEntry {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub created_at: Timestamp,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserEntry>,
}

pub async fn list_users(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
) -> Result<Json<UserListResponse>, RpcError> {
    let principal = auth::caller(state.store.as_ref(), &headers)?;
    require_admin(&principal)?;

    let users = state
        .store
        .list_users()?
        .into_iter()
        .map(|user| UserEntry {
            id: user.id,
            name: user.name,
            role: user.role,
            created_at: user.created_at,
        })
        .collect();
    Ok(Json(UserListResponse { users }))
}

pub async fn upsert_user(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
    Json(body): Json<UpsertUserRequest>,
) -> Result<StatusCode, RpcError> {
    let principal = auth::caller(state.store.as_ref(), &headers)?;
    require_admin(&principal)?;

    let id = parse_user_id(&body.id)?;

    let _guard = state.mutation_lock.lock().await;
    let created_at = match state.store.get_user(&id) {
        Ok(existing) => existing.created_at,
        Err(StoreError::NotFound(_)) => Timestamp::now(),
        Err(e) => return Err(e.into()),
    };
    state.store.put_user(&UserRecord {
        id: id.clone(),
        name: body.name,
        role: body.role,
        created_at,
    })?;

    tracing::info!(user = %id, role = body.role.as_str(), "directory user upserted");
    Ok(StatusCode::NO_CONTENT)
}

// ── Admin operations ─────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SweepResponse {
    /// Presentations settled by this pass.
    pub resolved: u64,
}

/// Force a deadline sweep outside the node's regular cadence.
pub async fn run_sweep(
    State(state): State<Arc<RpcState>>,
    headers: HeaderMap,
) -> Result<Json<SweepResponse>, RpcError> {
    let principal = auth::caller(state.store.as_ref(), &headers)?;
    require_admin(&principal)?;

    let mut outbox = Outbox::new();
    let resolved = {
        let _guard = state.mutation_lock.lock().await;
        state
            .deadline_sweeper
            .run_once(Timestamp::now(), &mut outbox)?
    };
    publish(&state, outbox);

    Ok(Json(SweepResponse { resolved }))
}
