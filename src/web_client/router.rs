//! Axum router construction.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::web_client::handlers;
use crate::web_client::state::SharedState;

/// Build the complete Axum router with all API routes.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        // Session
        .route("/api/session", get(handlers::session::get_session_handler))
        .route("/api/session/login", post(handlers::session::login_handler))
        .route(
            "/api/session/logout",
            post(handlers::session::logout_handler),
        )
        .route(
            "/api/route",
            get(handlers::session::resolve_route_handler),
        )
        // Feed
        .route("/api/feed", get(handlers::feed::mount_feed_handler))
        .route(
            "/api/feed/posts/:post_id/like",
            post(handlers::feed::like_post_handler),
        )
        .route(
            "/api/feed/posts/:post_id/comments",
            post(handlers::feed::comment_handler),
        )
        .route(
            "/api/feed/suggestions/:id/connect",
            post(handlers::feed::connect_handler),
        )
        .route(
            "/api/feed/suggestions/:id",
            delete(handlers::feed::dismiss_handler),
        )
        // Network
        .route("/api/network", get(handlers::network::mount_network_handler))
        .route(
            "/api/network/suggestions/:id/connect",
            post(handlers::network::connect_handler),
        )
        .route(
            "/api/network/suggestions/:id",
            delete(handlers::network::dismiss_handler),
        )
        .route(
            "/api/network/connections/:id",
            delete(handlers::network::remove_connection_handler),
        )
        // Profile
        .route("/api/profile", post(handlers::profile::edit_profile_handler))
        .route(
            "/api/profile/:user_id",
            get(handlers::profile::mount_profile_handler),
        )
        .route(
            "/api/profile/posts/:post_id/like",
            post(handlers::profile::like_post_handler),
        )
        .route(
            "/api/profile/posts/:post_id/comments",
            post(handlers::profile::comment_handler),
        )
        .route(
            "/api/profile/suggestions/:id/connect",
            post(handlers::profile::connect_handler),
        )
        .route(
            "/api/profile/suggestions/:id",
            delete(handlers::profile::dismiss_handler),
        )
        // Jobs
        .route("/api/jobs", get(handlers::jobs::mount_jobs_handler))
        .route("/api/jobs/:id", get(handlers::jobs::get_job_handler))
        .route("/api/jobs/:id/save", post(handlers::jobs::save_job_handler))
        .with_state(state)
}
