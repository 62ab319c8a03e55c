//! Structured logging initialisation.
//!
//! Output is either coloured human-readable lines ([`LogFormat::Human`],
//! the development default) or newline-delimited JSON ([`LogFormat::Json`],
//! for aggregation pipelines). A `RUST_LOG` environment variable takes
//! precedence over the configured filter; without it the caller-supplied
//! `level` string applies (e.g. `"info"`, `"debug,podium_node=trace"`).

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Selects the output format for structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Pretty-printed, coloured output for local development.
    Human,
    /// Newline-delimited JSON for production and log aggregation pipelines.
    Json,
}

impl LogFormat {
    /// Parse the config-file string form. Anything that is not `"json"`
    /// falls back to human-readable output.
    pub fn from_config(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Human,
        }
    }
}

/// Install the process-wide tracing subscriber.
///
/// # Panics
///
/// Panics if a subscriber was already installed, so call this once from
/// `main` and nowhere else.
pub fn init_logging(format: LogFormat, level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Human => registry.with(fmt::layer().with_target(true)).init(),
        LogFormat::Json => registry.with(fmt::layer().json().with_target(true)).init(),
    }
}
