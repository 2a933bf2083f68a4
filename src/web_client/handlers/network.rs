//! "My Network" endpoints.

use axum::extract::{Path, State};
use axum::response::Response;

use crate::screens::{LoadState, NetworkScreen};
use crate::web_client::handlers::{connect_json, dismiss_json, graph_json, guarded};
use crate::web_client::state::SharedState;
use crate::web_client::utils::{commit_error, mounted, ok_json, storage_error};

fn network_json(network: &NetworkScreen) -> serde_json::Value {
    let (connections, suggestions) = graph_json(network.graph());
    serde_json::json!({
        "status": "ready",
        "connections": connections,
        "suggestions": suggestions,
    })
}

/// Mounting only reads the store, so it happens under the lock.
pub async fn mount_network_handler(State(state): State<SharedState>) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let st = &mut *guard;
    match NetworkScreen::mount(&st.store, &st.viewer) {
        Ok(screen) => {
            let body = network_json(&screen);
            st.network = LoadState::Ready(screen);
            ok_json(body)
        }
        Err(e) => {
            st.network = LoadState::Failed(e.to_string());
            storage_error(e)
        }
    }
}

pub async fn connect_handler(State(state): State<SharedState>, Path(id): Path<u32>) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let st = &mut *guard;
    let network = match mounted(&mut st.network, "network") {
        Ok(n) => n,
        Err(resp) => return resp,
    };
    match network.connect(&st.store, id) {
        Ok(outcome) => ok_json(connect_json(id, &outcome)),
        Err(e) => commit_error(e),
    }
}

pub async fn dismiss_handler(State(state): State<SharedState>, Path(id): Path<u32>) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    match mounted(&mut guard.network, "network") {
        Ok(network) => ok_json(dismiss_json(id, network.dismiss(id))),
        Err(resp) => resp,
    }
}

pub async fn remove_connection_handler(
    State(state): State<SharedState>,
    Path(id): Path<u32>,
) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let st = &mut *guard;
    let network = match mounted(&mut st.network, "network") {
        Ok(n) => n,
        Err(resp) => return resp,
    };
    match network.remove_connection(&st.store, id) {
        Ok(removed) => ok_json(serde_json::json!({ "id": id, "removed": removed })),
        Err(e) => storage_error(e),
    }
}
