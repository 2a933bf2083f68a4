//! Home feed endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use crate::screens::{FeedFixtures, FeedScreen, LoadState};
use crate::web_client::handlers::{connect_json, dismiss_json, graph_json, guarded, CommentRequest};
use crate::web_client::state::SharedState;
use crate::web_client::utils::{api_error, commit_error, mounted, ok_json, storage_error};

fn feed_json(feed: &FeedScreen) -> serde_json::Value {
    let (connections, suggestions) = graph_json(feed.graph());
    serde_json::json!({
        "status": "ready",
        "profile_pic": feed.profile_pic(),
        "posts": feed.posts(),
        "connections": connections,
        "suggestions": suggestions,
    })
}

pub async fn mount_feed_handler(State(state): State<SharedState>) -> Response {
    let (loader, viewer) = {
        let mut st = match guarded(&state).await {
            Ok(st) => st,
            Err(resp) => return resp,
        };
        st.feed = LoadState::Loading;
        (st.loader.clone(), st.viewer.clone())
    };

    // Fetch with the lock released; merge only once both fetches are done.
    let fixtures = match tokio::task::spawn_blocking(move || FeedFixtures::fetch(&loader)).await {
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
    match FeedScreen::from_fixtures(fixtures, &st.store, &viewer) {
        Ok(screen) => {
            let body = feed_json(&screen);
            st.feed = LoadState::Ready(screen);
            ok_json(body)
        }
        Err(e) => {
            st.feed = LoadState::Failed(e.to_string());
            storage_error(e)
        }
    }
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
    let feed = match mounted(&mut st.feed, "feed") {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    match feed.like(&st.store, post_id) {
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
    let feed = match mounted(&mut st.feed, "feed") {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    match feed.comment(&st.store, post_id, &req.text) {
        Ok(comment) => {
            let total = feed.post(post_id).map(|p| p.comments.len()).unwrap_or(0);
            ok_json(serde_json::json!({
                "post_id": post_id,
                "comment": comment,
                "comment_count": total,
            }))
        }
        Err(e) => commit_error(e),
    }
}

pub async fn connect_handler(State(state): State<SharedState>, Path(id): Path<u32>) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let st = &mut *guard;
    let feed = match mounted(&mut st.feed, "feed") {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    match feed.connect(&st.store, id) {
        Ok(outcome) => ok_json(connect_json(id, &outcome)),
        Err(e) => commit_error(e),
    }
}

pub async fn dismiss_handler(State(state): State<SharedState>, Path(id): Path<u32>) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    match mounted(&mut guard.feed, "feed") {
        Ok(feed) => ok_json(dismiss_json(id, feed.dismiss(id))),
        Err(resp) => resp,
    }
}
