//! linkboard-web: JSON API over the screens.
//!
//! Each screen is mounted by a `GET` and acted on by `POST` / `DELETE`.
//! All state lives behind one mutex, so handlers run one at a time.

pub mod config;
pub mod handlers;
pub mod router;
pub mod state;
pub mod utils;

use std::error::Error;

use clap::Parser;

use crate::config::resolve;
use crate::storage::db_path;

use config::{Cli, Config};
use state::AppState;

/// Entry point: parse CLI, resolve configuration, start server.
pub async fn run() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let config = Config::from_cli_and_env(cli);

    crate::logging::init();
    crate::llog!("linkboard-web starting");

    let resolved = resolve(config.overrides)?;
    crate::llog!("  data directory: {}", resolved.data_dir.display());
    crate::llog!("  database: {}", db_path(&resolved.data_dir).display());
    crate::llog!("  fixtures: {}", resolved.loader.source());
    crate::llog!(
        "  viewer: {} ({})",
        crate::logging::user_id(resolved.viewer.user_id),
        resolved.viewer.name
    );

    let state = AppState::new(resolved.store, resolved.loader, resolved.viewer).into_shared();
    let app = router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    crate::llog!("linkboard-web listening on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
