//! Job board endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use crate::commit::SaveOutcome;
use crate::screens::{JobsScreen, LoadState};
use crate::web_client::handlers::guarded;
use crate::web_client::state::SharedState;
use crate::web_client::utils::{api_error, commit_error, mounted, ok_json, storage_error};

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    #[serde(default)]
    search: Option<String>,
}

pub async fn mount_jobs_handler(
    State(state): State<SharedState>,
    Query(query): Query<JobsQuery>,
) -> Response {
    let loader = {
        let mut st = match guarded(&state).await {
            Ok(st) => st,
            Err(resp) => return resp,
        };
        st.jobs = LoadState::Loading;
        st.loader.clone()
    };

    let fetched = match tokio::task::spawn_blocking(move || loader.load_jobs()).await {
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
    match JobsScreen::from_fixtures(fetched, &st.store) {
        Ok(screen) => {
            let term = query.search.unwrap_or_default();
            let body = serde_json::json!({
                "status": "ready",
                "search": term,
                "jobs": screen.search(&term),
                "saved": screen.saved(),
            });
            st.jobs = LoadState::Ready(screen);
            ok_json(body)
        }
        Err(e) => {
            st.jobs = LoadState::Failed(e.to_string());
            storage_error(e)
        }
    }
}

pub async fn get_job_handler(State(state): State<SharedState>, Path(id): Path<u32>) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let jobs = match mounted(&mut guard.jobs, "jobs") {
        Ok(j) => j,
        Err(resp) => return resp,
    };
    match jobs.job(id) {
        Some(job) => ok_json(serde_json::json!({
            "job": job,
            "saved": jobs.is_saved(id),
        })),
        None => api_error(StatusCode::NOT_FOUND, format!("job {id} not found")),
    }
}

pub async fn save_job_handler(State(state): State<SharedState>, Path(id): Path<u32>) -> Response {
    let mut guard = match guarded(&state).await {
        Ok(st) => st,
        Err(resp) => return resp,
    };
    let st = &mut *guard;
    let jobs = match mounted(&mut st.jobs, "jobs") {
        Ok(j) => j,
        Err(resp) => return resp,
    };
    match jobs.save_job(&st.store, id) {
        Ok(outcome) => ok_json(serde_json::json!({
            "id": id,
            "newly_saved": outcome == SaveOutcome::Saved,
            "message": outcome.message(),
            "saved": jobs.saved(),
        })),
        Err(e) => commit_error(e),
    }
}
