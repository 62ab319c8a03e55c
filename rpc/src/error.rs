//! API error type and its mapping onto HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use podium_lifecycle::CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    /// The request did not carry a readable `x-user-id` header.
    #[error("missing x-user-id header")]
    MissingCaller,

    /// The caller id is not in the user directory.
    #[error("unknown caller: {0}")]
    UnknownCaller(String),

    /// The caller is known but lacks the required role.
    #[error("not authorized: {0}")]
    Forbidden(String),

    /// The path or body failed validation before reaching an engine.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An engine rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Storage failed outside an engine call.
    #[error("store error: {0}")]
    Store(String),
}

impl From<podium_store::StoreError> for RpcError {
    fn from(e: podium_store::StoreError) -> Self {
        RpcError::Store(e.to_string())
    }
}

/// The HTTP status a given error maps to.
///
/// Engine refusals split three ways: who-you-are problems are 403, state
/// problems (terminal presentation, elapsed deadline, duplicate
/// registration) are 409, and malformed values are 400.
fn status_for(err: &RpcError) -> StatusCode {
    match err {
        RpcError::MissingCaller | RpcError::UnknownCaller(_) => StatusCode::UNAUTHORIZED,
        RpcError::Forbidden(_) => StatusCode::FORBIDDEN,
        RpcError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        RpcError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        RpcError::Core(core) => match core {
            CoreError::NotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::Unauthorized(_) | CoreError::NotEligible => StatusCode::FORBIDDEN,
            CoreError::InvalidState(_)
            | CoreError::NotVotable
            | CoreError::AlreadyRegistered
            | CoreError::DeadlinePassed => StatusCode::CONFLICT,
            CoreError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            CoreError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        },
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use podium_lifecycle::EntityKind;

    #[test]
    fn missing_entities_are_404() {
        let err = RpcError::from(CoreError::not_found(EntityKind::Event, "evt_x"));
        assert_eq!(status_for(&err), StatusCode::NOT_FOUND);
    }

    #[test]
    fn role_refusals_are_403() {
        assert_eq!(
            status_for(&RpcError::Core(CoreError::Unauthorized("nope".into()))),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&RpcError::Core(CoreError::NotEligible)),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&RpcError::Forbidden("admin role required".into())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn state_refusals_are_409() {
        for core in [
            CoreError::NotVotable,
            CoreError::AlreadyRegistered,
            CoreError::DeadlinePassed,
            CoreError::InvalidState("already signed off".into()),
        ] {
            assert_eq!(status_for(&RpcError::Core(core)), StatusCode::CONFLICT);
        }
    }

    #[test]
    fn anonymous_callers_are_401() {
        assert_eq!(status_for(&RpcError::MissingCaller), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_for(&RpcError::UnknownCaller("usr_ghost".into())),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn bad_values_are_400() {
        assert_eq!(
            status_for(&RpcError::InvalidRequest("not an event id".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&RpcError::Core(CoreError::InvalidInput("bad date".into()))),
            StatusCode::BAD_REQUEST
        );
    }
}
