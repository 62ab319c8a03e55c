//! Router assembly and the HTTP server itself.

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;
use prometheus::Registry;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use podium_lifecycle::{
    AttendanceRegistry, DeadlineSweeper, EventCatalog, Notification, PresentationLifecycle,
    VoteLedger,
};
use podium_store::Store;
use podium_types::Timestamp;

use crate::handlers;

/// Where mutation handlers deliver the signals their engine calls produce.
///
/// The node plugs its dispatcher in behind this; tests plug in a recorder.
pub trait NotificationSink: Send + Sync {
    fn publish(&self, signal: &Notification);
}

/// Everything handlers need, shared across requests.
pub struct RpcState {
    pub store: Arc<dyn Store>,
    pub events: EventCatalog,
    pub attendance: AttendanceRegistry,
    pub presentations: PresentationLifecycle,
    pub votes: VoteLedger,
    pub deadline_sweeper: DeadlineSweeper,
    pub notifications: Arc<dyn NotificationSink>,
    /// Serializes every core mutation. The node's sweeper tasks hold the
    /// same lock, so each read-then-write sequence runs to completion
    /// before the next begins. Reads go lock-free.
    pub mutation_lock: Arc<Mutex<()>>,
    /// Set when the node exposes metrics; `/metrics` 404s otherwise.
    pub metrics_registry: Option<Registry>,
    pub started_at: Timestamp,
}

impl RpcState {
    pub fn new(
        store: Arc<dyn Store>,
        notifications: Arc<dyn NotificationSink>,
        mutation_lock: Arc<Mutex<()>>,
        metrics_registry: Option<Registry>,
    ) -> Self {
        Self {
            events: EventCatalog::new(Arc::clone(&store)),
            attendance: AttendanceRegistry::new(Arc::clone(&store)),
            presentations: PresentationLifecycle::new(Arc::clone(&store)),
            votes: VoteLedger::new(Arc::clone(&store)),
            deadline_sweeper: DeadlineSweeper::new(Arc::clone(&store)),
            store,
            notifications,
            mutation_lock,
            metrics_registry,
            started_at: Timestamp::now(),
        }
    }
}

/// Build the full route table. Versioned API under `/v1`; the Prometheus
/// endpoint stays at the root where scrapers expect it.
pub fn router(state: Arc<RpcState>) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/events",
            get(handlers::list_events).post(handlers::create_event),
        )
        .route(
            "/events/:id",
            get(handlers::get_event).patch(handlers::update_event),
        )
        .route("/events/:id/status", put(handlers::set_event_status))
        .route(
            "/events/:id/attendance",
            post(handlers::register).delete(handlers::unregister),
        )
        .route("/events/:id/attendees", get(handlers::list_attendees))
        .route(
            "/events/:id/presentations",
            get(handlers::list_event_presentations).post(handlers::submit_presentation),
        )
        .route(
            "/presentations/:id",
            get(handlers::get_presentation).patch(handlers::update_presentation),
        )
        .route(
            "/presentations/:id/approve",
            post(handlers::approve_presentation),
        )
        .route(
            "/presentations/:id/reject",
            post(handlers::reject_presentation),
        )
        .route(
            "/presentations/:id/recording",
            put(handlers::set_recording_url),
        )
        .route(
            "/presentations/:id/votes",
            get(handlers::get_tally)
                .post(handlers::cast_vote)
                .delete(handlers::retract_vote),
        )
        .route("/me/events", get(handlers::my_events))
        .route("/me/presentations", get(handlers::my_presentations))
        .route(
            "/users",
            get(handlers::list_users).put(handlers::upsert_user),
        )
        .route("/admin/sweep", post(handlers::run_sweep));

    // Browser clients call this API cross-origin; auth is a forwarded
    // identity header, so a permissive policy is fine.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/v1", api)
        .route("/metrics", get(handlers::metrics))
        .layer(cors)
        .with_state(state)
}

pub struct RpcServer {
    port: u16,
    state: Arc<RpcState>,
}

impl RpcServer {
    pub fn with_state(port: u16, state: Arc<RpcState>) -> Self {
        Self { port, state }
    }

    /// Bind and serve until the task is dropped or the listener fails.
    pub async fn start(&self) -> std::io::Result<()> {
        let app = router(Arc::clone(&self.state));
        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("HTTP API listening on {}", addr);
        axum::serve(listener, app).await
    }
}
