//! HTTP API for a podium node.
//!
//! A thin JSON layer over the core engines: each handler resolves the
//! caller through the user directory, calls one engine operation with an
//! explicit "now", and encodes the outcome. Engine errors map onto HTTP
//! status codes in [`error`]; notification signals produced by mutations
//! are handed to the node through the [`NotificationSink`] hook.
//!
//! All application routes live under `/v1`; Prometheus metrics, when
//! enabled, are served at `/metrics`.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod pagination;
pub mod server;

pub use error::RpcError;
pub use server::{router, NotificationSink, RpcServer, RpcState};
