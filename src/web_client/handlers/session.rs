//! Login flag and route resolution.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use crate::screens::LoadState;
use crate::session::{self, Route};
use crate::web_client::state::SharedState;
use crate::web_client::utils::{api_error, ok_json, storage_error};

pub async fn get_session_handler(State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    match session::is_logged_in(&st.store) {
        Ok(logged_in) => ok_json(serde_json::json!({
            "logged_in": logged_in,
            "viewer": st.viewer,
        })),
        Err(e) => storage_error(e),
    }
}

pub async fn login_handler(State(state): State<SharedState>) -> Response {
    let st = state.lock().await;
    if let Err(e) = session::login(&st.store) {
        return storage_error(e);
    }
    crate::llog!("session: {} logged in", crate::logging::user_id(st.viewer.user_id));
    ok_json(serde_json::json!({
        "logged_in": true,
        "redirect": Route::Home.path(),
    }))
}

pub async fn logout_handler(State(state): State<SharedState>) -> Response {
    let mut st = state.lock().await;
    if let Err(e) = session::logout(&st.store) {
        return storage_error(e);
    }
    // Leaving the guarded area unmounts every screen.
    st.feed = LoadState::Loading;
    st.network = LoadState::Loading;
    st.profile = LoadState::Loading;
    st.jobs = LoadState::Loading;
    crate::llog!("session: logged out");
    ok_json(serde_json::json!({
        "logged_in": false,
        "redirect": Route::Login.path(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    path: String,
}

pub async fn resolve_route_handler(
    State(state): State<SharedState>,
    Query(query): Query<RouteQuery>,
) -> Response {
    let Some(route) = Route::parse(&query.path) else {
        return api_error(StatusCode::NOT_FOUND, format!("unknown route: {}", query.path));
    };
    let st = state.lock().await;
    match session::is_logged_in(&st.store) {
        Ok(logged_in) => ok_json(serde_json::json!({
            "requested": query.path,
            "path": session::resolve(route, logged_in).path(),
        })),
        Err(e) => storage_error(e),
    }
}
