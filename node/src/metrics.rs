//! Prometheus metrics for the podium node.
//!
//! Covers sweeper activity, notification fan-out, and the current size of
//! the catalog.  The [`NodeMetrics`] struct owns a dedicated [`Registry`]
//! that the HTTP `/metrics` endpoint can encode into the Prometheus text
//! exposition format.

use prometheus::{
    register_histogram_with_registry, register_int_counter_with_registry,
    register_int_gauge_with_registry, Histogram, HistogramOpts, IntCounter, IntGauge, Opts,
    Registry,
};

/// Central collection of all node-level Prometheus metrics.
pub struct NodeMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Total number of deadline sweep passes.
    pub sweep_runs: IntCounter,
    /// Total number of presentations force-resolved at a voting deadline.
    pub deadline_verdicts: IntCounter,
    /// Total number of event status rollovers (upcoming → ongoing → past).
    pub event_rollovers: IntCounter,
    /// Total number of notification signals fanned out to listeners.
    pub notifications_dispatched: IntCounter,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// Current number of events in the catalog.
    pub event_count: IntGauge,
    /// Current number of events still upcoming.
    pub upcoming_event_count: IntGauge,
    /// Current number of presentations awaiting a verdict.
    pub pending_presentation_count: IntGauge,
    /// Current number of users in the directory.
    pub user_count: IntGauge,

    // ── Histograms ──────────────────────────────────────────────────────
    /// Wall-clock time of one deadline sweep pass, in milliseconds.
    pub sweep_duration_ms: Histogram,
}

impl NodeMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        // Counters
        let sweep_runs = register_int_counter_with_registry!(
            Opts::new("podium_sweep_runs_total", "Total deadline sweep passes"),
            registry
        )
        .expect("failed to register sweep_runs counter");

        let deadline_verdicts = register_int_counter_with_registry!(
            Opts::new(
                "podium_deadline_verdicts_total",
                "Total presentations force-resolved at a voting deadline"
            ),
            registry
        )
        .expect("failed to register deadline_verdicts counter");

        let event_rollovers = register_int_counter_with_registry!(
            Opts::new(
                "podium_event_rollovers_total",
                "Total event status rollovers"
            ),
            registry
        )
        .expect("failed to register event_rollovers counter");

        let notifications_dispatched = register_int_counter_with_registry!(
            Opts::new(
                "podium_notifications_dispatched_total",
                "Total notification signals fanned out"
            ),
            registry
        )
        .expect("failed to register notifications_dispatched counter");

        // Gauges
        let event_count = register_int_gauge_with_registry!(
            Opts::new("podium_event_count", "Current number of events"),
            registry
        )
        .expect("failed to register event_count gauge");

        let upcoming_event_count = register_int_gauge_with_registry!(
            Opts::new(
                "podium_upcoming_event_count",
                "Current number of upcoming events"
            ),
            registry
        )
        .expect("failed to register upcoming_event_count gauge");

        let pending_presentation_count = register_int_gauge_with_registry!(
            Opts::new(
                "podium_pending_presentation_count",
                "Current number of pending presentations"
            ),
            registry
        )
        .expect("failed to register pending_presentation_count gauge");

        let user_count = register_int_gauge_with_registry!(
            Opts::new("podium_user_count", "Current number of directory users"),
            registry
        )
        .expect("failed to register user_count gauge");

        // Histograms – exponential buckets covering 0.1 ms → ~1.6 s.
        let sweep_duration_ms = register_histogram_with_registry!(
            HistogramOpts::new(
                "podium_sweep_duration_ms",
                "Deadline sweep duration in milliseconds"
            )
            .buckets(prometheus::exponential_buckets(0.1, 2.0, 15).unwrap()),
            registry
        )
        .expect("failed to register sweep_duration_ms histogram");

        Self {
            registry,
            sweep_runs,
            deadline_verdicts,
            event_rollovers,
            notifications_dispatched,
            event_count,
            upcoming_event_count,
            pending_presentation_count,
            user_count,
            sweep_duration_ms,
        }
    }
}

impl Default for NodeMetrics {
    fn default() -> Self {
        Self::new()
    }
}
