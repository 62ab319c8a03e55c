//! The podium node owns the store and runs the background machinery.
//!
//! On start the node spawns:
//! - the deadline sweeper, which forces a verdict on pending presentations
//!   once their event's voting deadline has elapsed;
//! - the status sweeper, which rolls event statuses forward along the
//!   schedule (upcoming → ongoing → past);
//! - the HTTP API server, when enabled.
//!
//! All tasks exit on the shutdown signal; [`PodiumNode::stop`] waits for
//! them with a timeout.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;

use podium_lifecycle::{DeadlineSweeper, EventStatusSweeper, Notification, Outbox};
use podium_rpc::{NotificationSink, RpcServer, RpcState};
use podium_store::{Store, StoreError, UserRecord};
use podium_store_lmdb::LmdbStore;
use podium_types::{EventStatus, Role, Timestamp, UserId};

use crate::config::NodeConfig;
use crate::dispatcher::NotificationDispatcher;
use crate::error::NodeError;
use crate::metrics::NodeMetrics;
use crate::shutdown::ShutdownController;

/// Default LMDB map size: 1 GiB.
pub const DEFAULT_MAP_SIZE: usize = 1 << 30;

/// How long [`PodiumNode::stop`] waits for background tasks to finish.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A running podium node.
pub struct PodiumNode {
    pub config: NodeConfig,
    store: Arc<dyn Store>,
    dispatcher: Arc<NotificationDispatcher>,
    metrics: Arc<NodeMetrics>,
    shutdown: Arc<ShutdownController>,
    /// Serializes every core mutation across the sweepers and the HTTP
    /// handlers, so each read-then-write sequence completes before the
    /// next begins.
    mutation_lock: Arc<Mutex<()>>,
    task_handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PodiumNode {
    /// Open the store at `config.data_dir` and wire up the subsystems.
    /// Nothing runs until [`start`](Self::start) is called.
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        let store = LmdbStore::open(&config.data_dir, DEFAULT_MAP_SIZE)
            .map_err(StoreError::from)?;
        let store: Arc<dyn Store> = Arc::new(store);
        let metrics = Arc::new(NodeMetrics::new());

        let mut dispatcher = NotificationDispatcher::new();

        let store_for_log = Arc::clone(&store);
        dispatcher.subscribe(Box::new(move |signal| {
            log_signal(store_for_log.as_ref(), signal);
        }));

        let metrics_for_fanout = Arc::clone(&metrics);
        dispatcher.subscribe(Box::new(move |_| {
            metrics_for_fanout.notifications_dispatched.inc();
        }));

        Ok(Self {
            config,
            store,
            dispatcher: Arc::new(dispatcher),
            metrics,
            shutdown: Arc::new(ShutdownController::new()),
            mutation_lock: Arc::new(Mutex::new(())),
            task_handles: Vec::new(),
        })
    }

    /// Spawn the sweepers and, if enabled, the HTTP API server.
    pub async fn start(&mut self) -> Result<(), NodeError> {
        tracing::info!(
            data_dir = %self.config.data_dir.display(),
            "podium node starting"
        );

        self.refresh_metrics();

        // ── Deadline sweeper ──────────────────────────────────────────────
        let sweeper = DeadlineSweeper::new(Arc::clone(&self.store));
        let dispatcher = Arc::clone(&self.dispatcher);
        let metrics = Arc::clone(&self.metrics);
        let mutation_lock = Arc::clone(&self.mutation_lock);
        let sweep_every = Duration::from_secs(self.config.sweep_interval_secs.max(1));
        let mut shutdown_rx = self.shutdown.subscribe();

        let sweep_handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(sweep_every);
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx.recv() => {
                        tracing::info!("deadline sweeper shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let started = std::time::Instant::now();
                        let mut outbox = Outbox::new();
                        let result = {
                            let _guard = mutation_lock.lock().await;
                            sweeper.run_once(Timestamp::now(), &mut outbox)
                        };
                        match result {
                            Ok(resolved) => {
                                metrics.sweep_runs.inc();
                                if resolved > 0 {
                                    metrics.deadline_verdicts.inc_by(resolved);
                                    tracing::info!(resolved, "deadline sweep settled presentations");
                                }
                                for signal in outbox.drain() {
                                    dispatcher.emit(&signal);
                                }
                            }
                            Err(e) => tracing::warn!(error = %e, "deadline sweep failed"),
                        }
                        metrics
                            .sweep_duration_ms
                            .observe(started.elapsed().as_secs_f64() * 1000.0);
                    }
                }
            }
        });
        self.task_handles.push(sweep_handle);

        // ── Status sweeper ────────────────────────────────────────────────
        let status_sweeper = EventStatusSweeper::new(Arc::clone(&self.store));
        let store_status = Arc::clone(&self.store);
        let metrics_status = Arc::clone(&self.metrics);
        let mutation_lock_status = Arc::clone(&self.mutation_lock);
        let status_every = Duration::from_secs(self.config.status_interval_secs.max(1));
        let mut shutdown_rx_status = self.shutdown.subscribe();

        let status_handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(status_every);
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx_status.recv() => {
                        tracing::info!("status sweeper shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let result = {
                            let _guard = mutation_lock_status.lock().await;
                            status_sweeper.run_once(Timestamp::now())
                        };
                        match result {
                            Ok(changed) if changed > 0 => {
                                metrics_status.event_rollovers.inc_by(changed);
                                tracing::info!(changed, "event statuses rolled forward");
                            }
                            Ok(_) => {}
                            Err(e) => tracing::warn!(error = %e, "status sweep failed"),
                        }
                        refresh_counts(store_status.as_ref(), &metrics_status);
                    }
                }
            }
        });
        self.task_handles.push(status_handle);

        // ── HTTP API server (optional) ────────────────────────────────────
        if self.config.enable_rpc {
            let metrics_registry = if self.config.enable_metrics {
                Some(self.metrics.registry.clone())
            } else {
                None
            };
            let rpc_state = Arc::new(RpcState::new(
                Arc::clone(&self.store),
                Arc::new(DispatcherSink {
                    dispatcher: Arc::clone(&self.dispatcher),
                }),
                Arc::clone(&self.mutation_lock),
                metrics_registry,
            ));
            let rpc_server = RpcServer::with_state(self.config.rpc_port, rpc_state);
            let mut shutdown_rx_rpc = self.shutdown.subscribe();

            let rpc_handle = tokio::spawn(async move {
                tokio::select! {
                    biased;
                    _ = shutdown_rx_rpc.recv() => {
                        tracing::info!("HTTP API shutting down");
                    }
                    result = rpc_server.start() => {
                        match result {
                            Ok(()) => tracing::info!("HTTP API exited"),
                            Err(e) => tracing::error!("HTTP API error: {e}"),
                        }
                    }
                }
            });
            self.task_handles.push(rpc_handle);
        }

        tracing::info!("podium node started");
        Ok(())
    }

    /// Stop the node gracefully: signal every task, then wait for them
    /// to finish (with a timeout).
    pub async fn stop(&mut self) -> Result<(), NodeError> {
        tracing::info!("podium node stopping");

        self.shutdown.shutdown();

        let handles: Vec<_> = self.task_handles.drain(..).collect();
        let drain = async {
            for handle in handles {
                let _ = handle.await;
            }
        };
        if tokio::time::timeout(SHUTDOWN_TIMEOUT, drain).await.is_err() {
            tracing::warn!("timed out waiting for background tasks to stop");
        }

        self.refresh_metrics();
        tracing::info!("podium node stopped");
        Ok(())
    }

    /// Create or update a directory user.
    ///
    /// The daemon uses this to seed the first admin before the HTTP surface
    /// is reachable; every later user change goes through the API.
    pub fn ensure_user(&self, id: UserId, name: &str, role: Role) -> Result<(), NodeError> {
        let record = match self.store.get_user(&id) {
            Ok(mut existing) => {
                existing.name = name.to_string();
                existing.role = role;
                existing
            }
            Err(StoreError::NotFound(_)) => UserRecord {
                id: id.clone(),
                name: name.to_string(),
                role,
                created_at: Timestamp::now(),
            },
            Err(e) => return Err(e.into()),
        };
        self.store.put_user(&record)?;
        tracing::info!(user = %record.id, role = record.role.as_str(), "directory user ensured");
        Ok(())
    }

    /// Handle to the underlying store.
    pub fn store(&self) -> Arc<dyn Store> {
        Arc::clone(&self.store)
    }

    /// Handle to the shutdown controller, for signal handling and tests.
    pub fn shutdown_handle(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    fn refresh_metrics(&self) {
        refresh_counts(self.store.as_ref(), &self.metrics);
    }
}

/// Bridges signals produced by API mutations into the node's dispatcher.
struct DispatcherSink {
    dispatcher: Arc<NotificationDispatcher>,
}

impl NotificationSink for DispatcherSink {
    fn publish(&self, signal: &Notification) {
        self.dispatcher.emit(signal);
    }
}

/// Write one log line per signal, resolving the audience size where the
/// signal only names the event.
fn log_signal(store: &dyn Store, signal: &Notification) {
    match signal {
        Notification::NewAttendee {
            event_id,
            attendee,
            notify,
        } => {
            tracing::info!(
                event = %event_id,
                attendee = %attendee,
                recipient = %notify,
                "notify: new attendee"
            );
        }
        Notification::PresentationSubmitted {
            event_id,
            presentation_id,
            submitted_by,
        } => {
            let audience = store
                .attendance_for_event(event_id)
                .map(|rows| rows.len())
                .unwrap_or(0);
            tracing::info!(
                event = %event_id,
                presentation = %presentation_id,
                submitter = %submitted_by,
                audience,
                "notify: presentation submitted"
            );
        }
        Notification::PresentationResult {
            presentation_id,
            submitted_by,
            status,
        } => {
            tracing::info!(
                presentation = %presentation_id,
                recipient = %submitted_by,
                verdict = status.as_str(),
                "notify: presentation settled"
            );
        }
    }
}

/// Refresh the catalog-size gauges from the store.
fn refresh_counts(store: &dyn Store, metrics: &NodeMetrics) {
    if let Ok(events) = store.list_events() {
        metrics.event_count.set(events.len() as i64);

        let upcoming = events
            .iter()
            .filter(|e| e.status == EventStatus::Upcoming)
            .count();
        metrics.upcoming_event_count.set(upcoming as i64);

        let mut pending = 0;
        for event in &events {
            if let Ok(list) = store.pending_presentations_for_event(&event.id) {
                pending += list.len();
            }
        }
        metrics.pending_presentation_count.set(pending as i64);
    }

    if let Ok(users) = store.list_users() {
        metrics.user_count.set(users.len() as i64);
    }
}
