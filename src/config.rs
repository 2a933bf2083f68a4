//! Data directory layout and the top-level `config.toml`.
//!
//! Each setting is taken from the command line first, then the environment,
//! then `{data_dir}/config.toml`, then a built-in default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::fixtures::{FixtureLoader, FixtureSource};
use crate::model::ViewerContext;
use crate::storage::{db_path, LocalStore, StorageError};

pub const HOME_ENV: &str = "LINKBOARD_HOME";
pub const FIXTURES_ENV: &str = "LINKBOARD_FIXTURES";
pub const VIEWER_ENV: &str = "LINKBOARD_VIEWER";

/// Top-level configuration stored in `{data_dir}/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LinkboardConfig {
    /// Fixture directory or base URL.
    #[serde(default)]
    pub fixtures: Option<String>,
    /// Who is using this device.
    #[serde(default)]
    pub viewer: Option<ViewerContext>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Storage(StorageError),
    Toml(String),
    InvalidViewer(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "io error: {e}"),
            ConfigError::Storage(e) => write!(f, "storage error: {e}"),
            ConfigError::Toml(e) => write!(f, "config error: {e}"),
            ConfigError::InvalidViewer(v) => write!(f, "invalid viewer id: {v}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<StorageError> for ConfigError {
    fn from(e: StorageError) -> Self {
        ConfigError::Storage(e)
    }
}

fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

/// Load the top-level config, returning defaults if it doesn't exist.
pub fn load_config(data_dir: &Path) -> Result<LinkboardConfig, ConfigError> {
    let path = config_path(data_dir);
    if !path.exists() {
        return Ok(LinkboardConfig::default());
    }
    let contents = fs::read_to_string(&path)?;
    toml::from_str(&contents).map_err(|e| ConfigError::Toml(e.to_string()))
}

pub fn save_config(data_dir: &Path, config: &LinkboardConfig) -> Result<(), ConfigError> {
    fs::create_dir_all(data_dir)?;
    let contents =
        toml::to_string_pretty(config).map_err(|e| ConfigError::Toml(e.to_string()))?;
    fs::write(config_path(data_dir), contents)?;
    Ok(())
}

/// Fixture directory shipped with the crate.
pub fn bundled_fixtures_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures"))
}

/// Values given on the command line. `None` falls through to the
/// environment and then to `config.toml`.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub fixtures: Option<String>,
    pub viewer: Option<u32>,
}

/// Everything a command or server needs to mount screens.
pub struct Resolved {
    pub data_dir: PathBuf,
    pub store: LocalStore,
    pub loader: FixtureLoader,
    pub viewer: ViewerContext,
}

pub fn resolve(overrides: Overrides) -> Result<Resolved, ConfigError> {
    resolve_with_env(overrides, |key| std::env::var(key).ok())
}

/// Same as [`resolve`] with the environment supplied by `env`.
pub fn resolve_with_env(
    overrides: Overrides,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Resolved, ConfigError> {
    let data_dir = overrides
        .data_dir
        .or_else(|| env(HOME_ENV).map(PathBuf::from))
        .unwrap_or_else(|| {
            env("HOME")
                .map(|h| PathBuf::from(h).join(".linkboard"))
                .unwrap_or_else(|| PathBuf::from(".linkboard"))
        });
    fs::create_dir_all(&data_dir)?;

    let config = if config_path(&data_dir).exists() {
        load_config(&data_dir)?
    } else {
        // First run: write the defaults out so they can be edited.
        let config = LinkboardConfig {
            fixtures: None,
            viewer: Some(ViewerContext::default()),
        };
        save_config(&data_dir, &config)?;
        config
    };

    let fixtures = overrides
        .fixtures
        .or_else(|| env(FIXTURES_ENV))
        .or(config.fixtures.clone())
        .map(|v| FixtureSource::parse(&v))
        .unwrap_or_else(|| FixtureSource::Dir(bundled_fixtures_dir()));

    let viewer_id = match overrides.viewer {
        Some(id) => Some(id),
        None => match env(VIEWER_ENV) {
            Some(raw) => Some(
                raw.trim()
                    .parse::<u32>()
                    .map_err(|_| ConfigError::InvalidViewer(raw.clone()))?,
            ),
            None => None,
        },
    };
    let configured = config.viewer.unwrap_or_default();
    // The configured name and picture belong to the configured id. Another
    // id starts from a placeholder and takes its fixture record at mount.
    let viewer = match viewer_id {
        Some(id) if id != configured.user_id => ViewerContext::new(id, format!("User {id}")),
        _ => configured,
    };

    let store = LocalStore::open(&db_path(&data_dir))?;
    Ok(Resolved {
        data_dir,
        store,
        loader: FixtureLoader::new(fixtures),
        viewer,
    })
}
