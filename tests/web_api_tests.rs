//! Integration tests for the linkboard-web JSON API.
//!
//! Each test starts the router on an ephemeral port over an in-memory store
//! and the bundled fixtures, then drives it with blocking `ureq` calls.

use std::io::Read;
use std::net::SocketAddr;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::Value;
use tokio::sync::oneshot;

use linkboard::config::bundled_fixtures_dir;
use linkboard::fixtures::{FixtureLoader, FixtureSource};
use linkboard::model::ViewerContext;
use linkboard::storage::LocalStore;
use linkboard::web_client::router::build_router;
use linkboard::web_client::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn start_server() -> (String, oneshot::Sender<()>) {
    let state = AppState::with_rng(
        LocalStore::open_in_memory().expect("store"),
        FixtureLoader::new(FixtureSource::Dir(bundled_fixtures_dir())),
        ViewerContext::default(),
        ChaCha8Rng::seed_from_u64(42),
    )
    .into_shared();
    let router = build_router(state);
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
    (format!("http://{addr}"), shutdown_tx)
}

fn read_json(response: ureq::Response) -> Value {
    let mut body = String::new();
    response
        .into_reader()
        .read_to_string(&mut body)
        .expect("read body");
    serde_json::from_str(&body).unwrap_or(Value::Null)
}

fn request(method: &str, url: &str, body: Option<Value>) -> (u16, Value) {
    let req = ureq::request(method, url);
    let result = match body {
        Some(b) => req
            .set("Content-Type", "application/json")
            .send_string(&b.to_string()),
        None => req.call(),
    };
    match result {
        Ok(r) => (r.status(), read_json(r)),
        Err(ureq::Error::Status(code, r)) => (code, read_json(r)),
        Err(e) => panic!("request failed: {e}"),
    }
}

/// Run `request` on the blocking pool.
async fn call(method: &'static str, url: String, body: Option<Value>) -> (u16, Value) {
    tokio::task::spawn_blocking(move || request(method, &url, body))
        .await
        .expect("request task")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn health_and_session_flow() {
    let (base, shutdown) = start_server().await;

    let (status, health) = call("GET", format!("{base}/api/health"), None).await;
    assert_eq!(status, 200);
    assert_eq!(health["status"], "ok");
    assert_eq!(health["viewer"], 101);
    assert_eq!(health["logged_in"], false);

    let (_, route) = call("GET", format!("{base}/api/route?path=/jobs"), None).await;
    assert_eq!(route["path"], "/login");

    let (status, _) = call("GET", format!("{base}/api/feed"), None).await;
    assert_eq!(status, 401);

    let (status, login) = call("POST", format!("{base}/api/session/login"), None).await;
    assert_eq!(status, 200);
    assert_eq!(login["redirect"], "/home");

    let (_, route) = call("GET", format!("{base}/api/route?path=/login"), None).await;
    assert_eq!(route["path"], "/home");
    let (status, _) = call("GET", format!("{base}/api/route?path=/signup"), None).await;
    assert_eq!(status, 404);

    let (status, _) = call("POST", format!("{base}/api/session/logout"), None).await;
    assert_eq!(status, 200);
    let (status, _) = call("GET", format!("{base}/api/network"), None).await;
    assert_eq!(status, 401);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn feed_actions_persist_across_mounts() {
    let (base, shutdown) = start_server().await;
    call("POST", format!("{base}/api/session/login"), None).await;

    // Acting before a mount is a conflict.
    let (status, _) = call("POST", format!("{base}/api/feed/posts/3/like"), None).await;
    assert_eq!(status, 409);

    let (status, feed) = call("GET", format!("{base}/api/feed"), None).await;
    assert_eq!(status, 200);
    assert_eq!(feed["posts"].as_array().unwrap().len(), 6);
    assert_eq!(
        feed["profile_pic"],
        "https://randomuser.me/api/portraits/men/99.jpg"
    );

    let (status, liked) = call("POST", format!("{base}/api/feed/posts/3/like"), None).await;
    assert_eq!(status, 200);
    assert_eq!(liked["likes"], 6);

    let (status, _) = call("POST", format!("{base}/api/feed/posts/404/like"), None).await;
    assert_eq!(status, 404);

    let (status, commented) = call(
        "POST",
        format!("{base}/api/feed/posts/4/comments"),
        Some(serde_json::json!({ "text": "Interested!" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(commented["comment"]["content"], "Interested!");
    assert_eq!(commented["comment"]["user"]["id"], 101);

    let (status, _) = call(
        "POST",
        format!("{base}/api/feed/posts/4/comments"),
        Some(serde_json::json!({ "text": "   " })),
    )
    .await;
    assert_eq!(status, 400);

    let (_, feed) = call("GET", format!("{base}/api/feed"), None).await;
    let posts = feed["posts"].as_array().unwrap();
    let post3 = posts.iter().find(|p| p["id"] == 3).unwrap();
    assert_eq!(post3["likes"], 6);
    let post4 = posts.iter().find(|p| p["id"] == 4).unwrap();
    assert_eq!(post4["comments"].as_array().unwrap().len(), 1);

    shutdown.send(()).ok();
}

#[tokio::test]
async fn network_connect_dismiss_and_remove() {
    let (base, shutdown) = start_server().await;
    call("POST", format!("{base}/api/session/login"), None).await;

    let (_, network) = call("GET", format!("{base}/api/network"), None).await;
    assert_eq!(network["suggestions"].as_array().unwrap().len(), 6);
    assert!(network["connections"].as_array().unwrap().is_empty());

    let (status, connected) = call(
        "POST",
        format!("{base}/api/network/suggestions/1/connect"),
        None,
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(
        connected["message"],
        "Connection request sent to Jane Smith"
    );

    let (_, again) = call(
        "POST",
        format!("{base}/api/network/suggestions/1/connect"),
        None,
    )
    .await;
    assert_eq!(again["already_connected"], true);

    let (_, dismissed) = call("DELETE", format!("{base}/api/network/suggestions/2"), None).await;
    assert_eq!(dismissed["dismissed"], true);

    let (_, network) = call("GET", format!("{base}/api/network"), None).await;
    let suggestion_ids: Vec<u64> = network["suggestions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect();
    // Dismissal is forgotten on remount; the connection is not.
    assert_eq!(suggestion_ids, vec![2, 3, 4, 5, 6]);
    assert_eq!(network["connections"][0]["id"], 1);
    assert_eq!(network["connections"][0]["connected"], true);

    let (_, removed) = call("DELETE", format!("{base}/api/network/connections/1"), None).await;
    assert_eq!(removed["removed"], true);
    let (_, network) = call("GET", format!("{base}/api/network"), None).await;
    assert!(network["connections"].as_array().unwrap().is_empty());

    shutdown.send(()).ok();
}

#[tokio::test]
async fn profile_mount_and_edit() {
    let (base, shutdown) = start_server().await;
    call("POST", format!("{base}/api/session/login"), None).await;

    let (status, missing) = call("GET", format!("{base}/api/profile/999"), None).await;
    assert_eq!(status, 404);
    assert_eq!(missing["error"], "User not found");

    let (status, other) = call("GET", format!("{base}/api/profile/1"), None).await;
    assert_eq!(status, 200);
    assert_eq!(other["own_profile"], false);
    assert!(other["suggestions"].as_array().unwrap().len() <= 5);

    let (status, _) = call(
        "POST",
        format!("{base}/api/profile"),
        Some(serde_json::json!({ "bio": "b", "job_title": "t" })),
    )
    .await;
    assert_eq!(status, 403);

    let (_, own) = call("GET", format!("{base}/api/profile/101"), None).await;
    assert_eq!(own["own_profile"], true);
    let (status, edited) = call(
        "POST",
        format!("{base}/api/profile"),
        Some(serde_json::json!({ "bio": "Rust all day", "job_title": "Platform Engineer" })),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(edited["user"]["headline"], "Platform Engineer at TechNova");

    let (_, own) = call("GET", format!("{base}/api/profile/101"), None).await;
    assert_eq!(own["user"]["bio"], "Rust all day");
    let (_, other) = call("GET", format!("{base}/api/profile/1"), None).await;
    assert_ne!(other["user"]["bio"], "Rust all day");

    shutdown.send(()).ok();
}

#[tokio::test]
async fn jobs_search_and_save() {
    let (base, shutdown) = start_server().await;
    call("POST", format!("{base}/api/session/login"), None).await;

    let (status, jobs) = call("GET", format!("{base}/api/jobs?search=seattle"), None).await;
    assert_eq!(status, 200);
    let listed = jobs["jobs"].as_array().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["company"], "Amazon");

    let (_, detail) = call("GET", format!("{base}/api/jobs/3"), None).await;
    assert_eq!(detail["job"]["title"], "Backend Developer");
    assert_eq!(detail["saved"], false);

    let (_, saved) = call("POST", format!("{base}/api/jobs/3/save"), None).await;
    assert_eq!(saved["message"], "Job saved successfully!");
    let (_, again) = call("POST", format!("{base}/api/jobs/3/save"), None).await;
    assert_eq!(again["message"], "This job is already saved!");
    assert_eq!(again["saved"], serde_json::json!([3]));

    let (status, _) = call("POST", format!("{base}/api/jobs/77/save"), None).await;
    assert_eq!(status, 404);

    shutdown.send(()).ok();
}
