//! Shared utility functions for the web client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::commit::CommitError;
use crate::screens::LoadState;
use crate::session;
use crate::storage::StorageError;
use crate::web_client::state::AppState;

/// Build a standard JSON error response.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> Response {
    let body = serde_json::json!({ "error": message.into() });
    (status, axum::Json(body)).into_response()
}

pub fn ok_json(body: serde_json::Value) -> Response {
    (StatusCode::OK, axum::Json(body)).into_response()
}

pub fn storage_error(e: StorageError) -> Response {
    crate::llog!("web: {e}");
    api_error(StatusCode::INTERNAL_SERVER_ERROR, format!("storage error: {e}"))
}

pub fn commit_error(e: CommitError) -> Response {
    let status = match &e {
        CommitError::UnknownPost(_)
        | CommitError::UnknownJob(_)
        | CommitError::UnknownCandidate(_) => StatusCode::NOT_FOUND,
        CommitError::EmptyComment => StatusCode::BAD_REQUEST,
        CommitError::NotOwnProfile { .. } => StatusCode::FORBIDDEN,
        CommitError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        crate::llog!("web: {e}");
    }
    api_error(status, e.to_string())
}

/// Guarded screens answer 401 until the login flag is set.
pub fn require_login(state: &AppState) -> Result<(), Response> {
    match session::is_logged_in(&state.store) {
        Ok(true) => Ok(()),
        Ok(false) => Err(api_error(StatusCode::UNAUTHORIZED, "login required")),
        Err(e) => Err(storage_error(e)),
    }
}

/// The mounted screen in `slot`, or 409 when no mount has finished.
pub fn mounted<'a, T>(slot: &'a mut LoadState<T>, screen: &str) -> Result<&'a mut T, Response> {
    let status = slot.status();
    slot.ready_mut().ok_or_else(|| {
        api_error(
            StatusCode::CONFLICT,
            format!("{screen} is not mounted ({status})"),
        )
    })
}
