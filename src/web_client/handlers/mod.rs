//! Route handler modules for the linkboard-web JSON API.
//!
//! `GET` on a screen mounts it; `POST` / `DELETE` act on the mounted
//! instance and answer 409 until a mount has finished.

pub mod feed;
pub mod health;
pub mod jobs;
pub mod network;
pub mod profile;
pub mod session;

use axum::response::Response;
use serde::Deserialize;
use tokio::sync::MutexGuard;

use crate::connections::{ConnectOutcome, ConnectionGraph};
use crate::web_client::state::{AppState, SharedState};
use crate::web_client::utils::require_login;

#[derive(Debug, Deserialize)]
pub struct CommentRequest {
    pub text: String,
}

/// Lock the state for a guarded screen.
pub(crate) async fn guarded(state: &SharedState) -> Result<MutexGuard<'_, AppState>, Response> {
    let st = state.lock().await;
    require_login(&st)?;
    Ok(st)
}

pub(crate) fn connect_json(id: u32, outcome: &ConnectOutcome) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "connected": true,
        "already_connected": matches!(outcome, ConnectOutcome::AlreadyConnected),
        "message": outcome.acknowledgment(),
    })
}

pub(crate) fn dismiss_json(id: u32, removed: bool) -> serde_json::Value {
    serde_json::json!({ "id": id, "dismissed": removed })
}

pub(crate) fn graph_json(graph: &ConnectionGraph) -> (serde_json::Value, serde_json::Value) {
    (
        serde_json::json!(graph.connections()),
        serde_json::json!(graph.suggestions()),
    )
}
