//! Health check endpoint.

use axum::extract::State;
use axum::response::Response;

use crate::session;
use crate::web_client::state::SharedState;
use crate::web_client::utils::{ok_json, storage_error};

pub async fn health_handler(State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    let logged_in = match session::is_logged_in(&st.store) {
        Ok(v) => v,
        Err(e) => return storage_error(e),
    };
    ok_json(serde_json::json!({
        "status": "ok",
        "viewer": st.viewer.user_id,
        "fixtures": st.loader.source().to_string(),
        "logged_in": logged_in,
        "screens": {
            "feed": st.feed.status(),
            "network": st.network.status(),
            "profile": st.profile.status(),
            "jobs": st.jobs.status(),
        },
    }))
}
