//! Profile endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use crate::screens::{LoadState, ProfileFixtures, ProfileScreen};
use crate::web_client::handlers::{connect_json, dismiss_json, graph_json, guarded, CommentRequest};
use crate::web_client::state::SharedState;
use crate::web_client::utils::{api_error, commit_error, mounted, ok_json, storage_error};

fn profile_json(profile: &ProfileScreen) -> serde_json::Value {
    let (connections, suggestions) = graph_json(profile.graph());
    serde_json::json!({
        "status": "ready",
        "user": profile.user(),
        "own_profile": profile.is_own_profile(),
        "posts": profile.posts(),
        "connections": connections,
        "suggestions": suggestions,
    })
}

pub async fn mount_profile_handler(
    State(state): State<SharedState>,
    Path(user_id): Path<u32>,
) -> Response {
    let (loader, viewer) = {
        let mut st = match guarded(&state).await {
            Ok(st) => st,
            Err(resp) => return resp,
        };
        st.profile = LoadState::Loading;
        (st.loader.clone(), st.viewer.clone())
    };

    let fixtures =
        match tokio::task::spawn_blocking(move || ProfileFixtures::fetch(&loader)).await {
            Ok(f) => f,
            Err(e) => {
                return api_error(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("fixture fetch failed: {e}"),
                )
            }
        };

    let mut guard = state.lock().await;
    let st = &mut *guard;
    let loaded = match ProfileScreen::from_fixtures(fixtures, &st.store, &viewer, user_id, &mut st.rng)
    {
        Ok(loaded) => loaded,
        Err(e) => {
            st.profile = LoadState::Failed(e.to_string());
            return storage_error(e);
        }
    };
    let response = match &loaded {
        LoadState::Ready(screen) => ok_json(profile_json(screen)),
        LoadState::NotFound(msg) => api_error(StatusCode::NOT_FOUND, msg.clone()),
        LoadState::Failed(msg) => api_error(StatusCode::BAD_GATEWAY, msg.clone()),
        LoadState::Loading => api_error(StatusCode::ACCEPTED, "loading"),
    };
    st.profile = loaded;
    response
}

pub async fn like_post_handler(
    State(state): State<SharedState>,
    Path(post_id): Path<u32>,
) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let st = &mut *guard;
    let profile = match mounted(&mut st.profile, "profile") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match profile.like(&st.store, post_id) {
        Ok(likes) => ok_json(serde_json::json!({ "post_id": post_id, "likes": likes })),
        Err(e) => commit_error(e),
    }
}

pub async fn comment_handler(
    State(state): State<SharedState>,
    Path(post_id): Path<u32>,
    axum::Json(req): axum::Json<CommentRequest>,
) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let st = &mut *guard;
    let profile = match mounted(&mut st.profile, "profile") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match profile.comment(&st.store, post_id, &req.text) {
        Ok(comment) => ok_json(serde_json::json!({ "post_id": post_id, "comment": comment })),
        Err(e) => commit_error(e),
    }
}

pub async fn connect_handler(State(state): State<SharedState>, Path(id): Path<u32>) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let st = &mut *guard;
    let profile = match mounted(&mut st.profile, "profile") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match profile.connect(&st.store, id) {
        Ok(outcome) => ok_json(connect_json(id, &outcome)),
        Err(e) => commit_error(e),
    }
}

pub async fn dismiss_handler(State(state): State<SharedState>, Path(id): Path<u32>) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    match mounted(&mut guard.profile, "profile") {
        Ok(profile) => ok_json(dismiss_json(id, profile.dismiss(id))),
        Err(resp) => resp,
    }
}

#[derive(Debug, Deserialize)]
pub struct EditProfileRequest {
    bio: String,
    job_title: String,
}

pub async fn edit_profile_handler(
    State(state): State<SharedState>,
    axum::Json(req): axum::Json<EditProfileRequest>,
) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let st = &mut *guard;
    let profile = match mounted(&mut st.profile, "profile") {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    match profile.save_profile(&st.store, &req.bio, &req.job_title) {
        Ok(()) => ok_json(serde_json::json!({ "user": profile.user() })),
        Err(e) => commit_error(e),
    }
}
