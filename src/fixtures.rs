//! Read-only fixture collections: `users.json`, `posts.json`, `jobs.json`.
//!
//! Fixtures are fetched once per screen mount from a directory or an HTTP
//! base URL. Nothing is cached between mounts.

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use crate::model::{Job, Post, User};

pub const USERS_RESOURCE: &str = "users.json";
pub const POSTS_RESOURCE: &str = "posts.json";
pub const JOBS_RESOURCE: &str = "jobs.json";

/// A fixture fetch that could not produce a collection.
#[derive(Debug)]
pub enum FetchError {
    /// The resource could not be read at all.
    Unreachable { resource: String, reason: String },
    /// The resource was read but is not the expected JSON shape.
    Malformed {
        resource: String,
        source: serde_json::Error,
    },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Unreachable { resource, reason } => {
                write!(f, "fixture {resource} unreachable: {reason}")
            }
            FetchError::Malformed { resource, source } => {
                write!(f, "fixture {resource} malformed: {source}")
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Where fixture resources are fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureSource {
    Dir(PathBuf),
    Http(String),
}

impl FixtureSource {
    /// `http://` and `https://` values are URLs, anything else a directory.
    pub fn parse(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            FixtureSource::Http(value.trim_end_matches('/').to_string())
        } else {
            FixtureSource::Dir(PathBuf::from(value))
        }
    }

    fn locate(&self, resource: &str) -> String {
        match self {
            FixtureSource::Dir(dir) => dir.join(resource).display().to_string(),
            FixtureSource::Http(base) => format!("{base}/{resource}"),
        }
    }
}

impl std::fmt::Display for FixtureSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FixtureSource::Dir(dir) => write!(f, "{}", dir.display()),
            FixtureSource::Http(base) => write!(f, "{base}"),
        }
    }
}

/// One-shot fixture reader.
#[derive(Debug, Clone)]
pub struct FixtureLoader {
    source: FixtureSource,
}

impl FixtureLoader {
    pub fn new(source: FixtureSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &FixtureSource {
        &self.source
    }

    pub fn load_users(&self) -> Result<Vec<User>, FetchError> {
        self.fetch(USERS_RESOURCE)
    }

    pub fn load_posts(&self) -> Result<Vec<Post>, FetchError> {
        self.fetch(POSTS_RESOURCE)
    }

    pub fn load_jobs(&self) -> Result<Vec<Job>, FetchError> {
        self.fetch(JOBS_RESOURCE)
    }

    fn fetch<T: DeserializeOwned>(&self, resource: &str) -> Result<Vec<T>, FetchError> {
        let location = self.source.locate(resource);
        let body = match &self.source {
            FixtureSource::Dir(_) => {
                std::fs::read_to_string(&location).map_err(|e| FetchError::Unreachable {
                    resource: location.clone(),
                    reason: e.to_string(),
                })?
            }
            FixtureSource::Http(_) => ureq::get(&location)
                .call()
                .map_err(|e| FetchError::Unreachable {
                    resource: location.clone(),
                    reason: e.to_string(),
                })?
                .into_string()
                .map_err(|e| FetchError::Unreachable {
                    resource: location.clone(),
                    reason: e.to_string(),
                })?,
        };
        serde_json::from_str(&body).map_err(|source| FetchError::Malformed {
            resource: location,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_source_parse() {
        assert_eq!(
            FixtureSource::parse("http://localhost:8000/"),
            FixtureSource::Http("http://localhost:8000".to_string())
        );
        assert_eq!(
            FixtureSource::parse("fixtures"),
            FixtureSource::Dir(PathBuf::from("fixtures"))
        );
    }

    #[test]
    fn test_load_from_dir() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(JOBS_RESOURCE),
            r#"[{"id": 3, "title": "Rust Engineer", "company": "Acme", "location": "Remote",
                 "requirements": ["Rust", "SQL"], "posted": "2 days ago"}]"#,
        )
        .unwrap();

        let loader = FixtureLoader::new(FixtureSource::Dir(tmp.path().to_path_buf()));
        let jobs = loader.load_jobs().unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].requirements, vec!["Rust", "SQL"]);
    }

    #[test]
    fn test_missing_resource_is_unreachable() {
        let tmp = TempDir::new().unwrap();
        let loader = FixtureLoader::new(FixtureSource::Dir(tmp.path().to_path_buf()));
        match loader.load_users() {
            Err(FetchError::Unreachable { resource, .. }) => {
                assert!(resource.ends_with(USERS_RESOURCE))
            }
            other => panic!("expected unreachable, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_json_is_malformed() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(POSTS_RESOURCE), r#"{"posts": []}"#).unwrap();
        let loader = FixtureLoader::new(FixtureSource::Dir(tmp.path().to_path_buf()));
        assert!(matches!(
            loader.load_posts(),
            Err(FetchError::Malformed { .. })
        ));
    }
}
