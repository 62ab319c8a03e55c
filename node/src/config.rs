//! Node settings, loadable from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::NodeError;

/// Runtime settings for a podium node.
///
/// Usually read from a TOML file ([`NodeConfig::from_toml_file`]); tests
/// and embedders can fill the struct directly instead. Every field has a
/// serde default, so a partial file is enough.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Data directory for the LMDB store.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Whether to enable the HTTP API.
    #[serde(default = "default_true")]
    pub enable_rpc: bool,

    /// HTTP API port (if enabled).
    #[serde(default = "default_rpc_port")]
    pub rpc_port: u16,

    /// Whether to expose Prometheus metrics on `/metrics`.
    #[serde(default)]
    pub enable_metrics: bool,

    /// Seconds between deadline sweeps (forced resolution of pending
    /// presentations once their event's voting deadline has elapsed).
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Seconds between event status sweeps (upcoming → ongoing → past).
    #[serde(default = "default_status_interval")]
    pub status_interval_secs: u64,

    /// `"human"` for coloured lines, `"json"` for aggregation.
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Default tracing filter, e.g. `"info"` or `"debug,podium_node=trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_data_dir() -> PathBuf {
    PathBuf::from("./podium_data")
}

fn default_true() -> bool {
    true
}

fn default_rpc_port() -> u16 {
    7700
}

fn default_sweep_interval() -> u64 {
    300
}

fn default_status_interval() -> u64 {
    60
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Loading ────────────────────────────────────────────────────────────

impl NodeConfig {
    /// Read and parse a config file.
    pub fn from_toml_file(path: &str) -> Result<Self, NodeError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NodeError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse a config from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, NodeError> {
        toml::from_str(s).map_err(|e| NodeError::Config(e.to_string()))
    }

    /// Render the config as TOML.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("serializing NodeConfig cannot fail")
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            enable_rpc: default_true(),
            rpc_port: default_rpc_port(),
            enable_metrics: false,
            sweep_interval_secs: default_sweep_interval(),
            status_interval_secs: default_status_interval(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
