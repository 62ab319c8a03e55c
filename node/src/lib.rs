//! Podium node: wires storage, engines, sweepers, and the HTTP API.
//!
//! The node owns the LMDB store, periodically runs the deadline and status
//! sweepers, fans notification signals out to subscribers, and serves the
//! HTTP API when enabled.

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod node;
pub mod shutdown;

pub use config::NodeConfig;
pub use dispatcher::NotificationDispatcher;
pub use error::NodeError;
pub use logging::{init_logging, LogFormat};
pub use metrics::NodeMetrics;
pub use node::{PodiumNode, DEFAULT_MAP_SIZE};
pub use shutdown::ShutdownController;
