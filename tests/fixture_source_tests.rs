//! Fixture loading over HTTP, served from the bundled fixture directory.

use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::sync::oneshot;

use linkboard::config::bundled_fixtures_dir;
use linkboard::fixtures::{FetchError, FixtureLoader, FixtureSource};
use linkboard::model::ViewerContext;
use linkboard::screens::FeedScreen;
use linkboard::storage::LocalStore;

async fn serve_fixture(Path(name): Path<String>) -> Response {
    match std::fs::read_to_string(bundled_fixtures_dir().join(&name)) {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn start_fixture_server(prefix: &'static str) -> (String, oneshot::Sender<()>) {
    let router = Router::new()
        .route(&format!("{prefix}/:name"), get(serve_fixture))
        .route("/garbled/:name", get(|| async { "{not json" }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .ok();
    });
    (format!("http://{addr}{prefix}"), shutdown_tx)
}

#[tokio::test]
async fn loads_fixtures_over_http() {
    let (base, shutdown) = start_fixture_server("/static").await;
    let source = FixtureSource::parse(&format!("{base}/"));
    assert_eq!(source, FixtureSource::Http(base.clone()));

    let (users, posts, jobs) = tokio::task::spawn_blocking(move || {
        let loader = FixtureLoader::new(source);
        (loader.load_users(), loader.load_posts(), loader.load_jobs())
    })
    .await
    .expect("fetch task");

    assert_eq!(users.expect("users").len(), 10);
    assert_eq!(posts.expect("posts").len(), 6);
    assert_eq!(jobs.expect("jobs").len(), 5);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn http_failures_are_reported() {
    let (base, shutdown) = start_fixture_server("/missing").await;
    let unreachable = tokio::task::spawn_blocking({
        // Serves `/missing/:name` only; the loader asks for `/elsewhere/...`.
        let wrong = base.replace("/missing", "/elsewhere");
        move || FixtureLoader::new(FixtureSource::Http(wrong)).load_users()
    })
    .await
    .expect("fetch task");
    assert!(matches!(unreachable, Err(FetchError::Unreachable { .. })));

    let malformed = tokio::task::spawn_blocking({
        let garbled = base.replace("/missing", "/garbled");
        move || FixtureLoader::new(FixtureSource::Http(garbled)).load_jobs()
    })
    .await
    .expect("fetch task");
    assert!(matches!(malformed, Err(FetchError::Malformed { .. })));

    // An HTTP-backed feed degrades to empty like a directory-backed one.
    let feed = tokio::task::spawn_blocking({
        let wrong = base.replace("/missing", "/elsewhere");
        move || {
            let store = LocalStore::open_in_memory().expect("store");
            let loader = FixtureLoader::new(FixtureSource::Http(wrong));
            let feed = FeedScreen::mount(&loader, &store, &ViewerContext::default())
                .expect("mount feed");
            feed.posts().len()
        }
    })
    .await
    .expect("mount task");
    assert_eq!(feed, 0);

    shutdown.send(()).ok();
}
