//! Caller resolution for the HTTP surface.
//!
//! Requests carry the caller's user id in the `x-user-id` header; the user
//! directory says what role that id acts with. There is no session or token
//! layer here: authentication happens upstream (gateway or reverse proxy),
//! and this service trusts the forwarded id.

use axum::http::HeaderMap;
use podium_store::{Store, StoreError};
use podium_types::{Principal, UserId};

use crate::error::RpcError;

/// Header naming the calling user.
pub const USER_HEADER: &str = "x-user-id";

/// Resolve the calling principal, failing if the header is absent or the
/// id is not in the directory.
pub fn caller(store: &dyn Store, headers: &HeaderMap) -> Result<Principal, RpcError> {
    match maybe_caller(store, headers)? {
        Some(principal) => Ok(principal),
        None => Err(RpcError::MissingCaller),
    }
}

/// Resolve the calling principal if the header is present.
///
/// An absent header is `Ok(None)`; reads that merely personalise their
/// response use this. A header that is present but unreadable or names an
/// unknown user is still an error, never treated as anonymous.
pub fn maybe_caller(
    store: &dyn Store,
    headers: &HeaderMap,
) -> Result<Option<Principal>, RpcError> {
    let Some(value) = headers.get(USER_HEADER) else {
        return Ok(None);
    };
    let raw = value.to_str().map_err(|_| RpcError::MissingCaller)?;
    let id: UserId = raw
        .parse()
        .map_err(|_| RpcError::UnknownCaller(raw.to_string()))?;

    let user = store.get_user(&id).map_err(|e| match e {
        StoreError::NotFound(_) => RpcError::UnknownCaller(raw.to_string()),
        other => RpcError::from(other),
    })?;

    Ok(Some(Principal::new(user.id, user.role)))
}
