//! Configuration for the linkboard-web server.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Overrides;

pub(crate) const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub(crate) const BIND_ENV: &str = "LINKBOARD_WEB_BIND";

/// JSON API for the linkboard screens.
///
/// Serves the feed, network, profile and jobs screens over HTTP and persists
/// every action in the local SQLite store.
///
/// Configuration can be set via CLI arguments, environment variables or
/// `config.toml`. CLI arguments take precedence over environment variables.
#[derive(Parser, Debug)]
#[command(name = "linkboard-web", version, about)]
pub struct Cli {
    /// HTTP server bind address [env: LINKBOARD_WEB_BIND] [default: 127.0.0.1:3000]
    #[arg(long, short = 'b')]
    pub bind: Option<String>,

    /// Data directory for config.toml and the database [env: LINKBOARD_HOME] [default: ~/.linkboard]
    #[arg(long, short = 'd')]
    pub data_dir: Option<PathBuf>,

    /// Fixture directory or base URL [env: LINKBOARD_FIXTURES]
    #[arg(long, short = 'f')]
    pub fixtures: Option<String>,

    /// Act as this user id [env: LINKBOARD_VIEWER]
    #[arg(long)]
    pub viewer: Option<u32>,
}

pub struct Config {
    pub bind_addr: String,
    pub overrides: Overrides,
}

impl Config {
    pub fn from_cli_and_env(cli: Cli) -> Self {
        let bind_addr = cli
            .bind
            .or_else(|| std::env::var(BIND_ENV).ok())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        Self {
            bind_addr,
            overrides: Overrides {
                data_dir: cli.data_dir,
                fixtures: cli.fixtures,
                viewer: cli.viewer,
            },
        }
    }
}
