//! SQLite-backed local key/value store for linkboard.
//!
//! Every persisted override (likes, comments, connections, saved jobs,
//! profile edits, the login flag) lives in a single `kv` table with string
//! keys and string values, JSON-encoded where structured. This module is the
//! only place that touches the raw strings; everything above it goes through
//! the typed accessors.
//!
//! A value that does not parse for its key's shape is logged and treated as
//! absent. Write failures are always returned to the caller.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::model::{Comment, Connection as PersistedConnection, ViewerContext};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    Serde(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Sqlite(e) => write!(f, "sqlite error: {e}"),
            StorageError::Io(e) => write!(f, "io error: {e}"),
            StorageError::Serde(e) => write!(f, "serialization error: {e}"),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<rusqlite::Error> for StorageError {
    fn from(e: rusqlite::Error) -> Self {
        StorageError::Sqlite(e)
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Serde(e)
    }
}

// ---------------------------------------------------------------------------
// Key scheme
// ---------------------------------------------------------------------------

/// Store keys. Per-entity keys are namespaced by the entity id.
pub mod keys {
    pub const CONNECTIONS: &str = "connections";
    pub const SAVED_JOBS: &str = "savedJobs";
    pub const LOGGED_IN: &str = "isLoggedIn";

    /// Global bio key written by the browser version of the app.
    pub const LEGACY_BIO: &str = "userBio";
    /// Global job-title key written by the browser version of the app.
    pub const LEGACY_JOB_TITLE: &str = "userJobTitle";

    pub fn post_comments(post_id: u32) -> String {
        format!("post_{post_id}_comments")
    }

    pub fn post_likes(post_id: u32) -> String {
        format!("post_{post_id}_likes")
    }

    pub fn user_bio(user_id: u32) -> String {
        format!("user_{user_id}_bio")
    }

    pub fn user_job_title(user_id: u32) -> String {
        format!("user_{user_id}_jobTitle")
    }
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// Persisted bio / job-title edits for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileOverride {
    pub bio: Option<String>,
    pub job_title: Option<String>,
}

/// Outcome of [`LocalStore::import_browser_export`].
#[derive(Debug, Default)]
pub struct ImportReport {
    pub entries_imported: usize,
    /// Legacy global profile keys moved under the viewer's id.
    pub profile_keys_rekeyed: usize,
}

impl std::fmt::Display for ImportReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "imported {} entr{}, re-keyed {} profile field(s)",
            self.entries_imported,
            if self.entries_imported == 1 { "y" } else { "ies" },
            self.profile_keys_rekeyed
        )
    }
}

// ---------------------------------------------------------------------------
// Store handle
// ---------------------------------------------------------------------------

/// Main store handle wrapping a SQLite connection.
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    /// Open or create a database at the given path. Creates schema if needed.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let store = Self { conn };
        store.create_schema()?;
        Ok(store)
    }

    /// Create an in-memory database.
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.create_schema()?;
        Ok(store)
    }

    fn create_schema(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS kv (
                key         TEXT PRIMARY KEY,
                value       TEXT NOT NULL,
                updated_at  INTEGER NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Reject all further writes on this connection.
    #[cfg(test)]
    pub(crate) fn set_query_only(&self) {
        self.conn
            .execute_batch("PRAGMA query_only = ON;")
            .expect("query_only pragma");
    }

    // -----------------------------------------------------------------------
    // Raw string access
    // -----------------------------------------------------------------------

    pub fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, now_secs() as i64],
        )?;
        Ok(())
    }

    /// Write several keys in one transaction: either all land or none do.
    pub fn set_many(&self, entries: &[(String, String)]) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        let now = now_secs() as i64;
        for (key, value) in entries {
            tx.execute(
                "INSERT OR REPLACE INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                params![key, value, now],
            )?;
        }
        tx.commit()?;
        Ok(())
    }

    /// Remove a key. Returns whether it existed.
    pub fn remove(&self, key: &str) -> Result<bool, StorageError> {
        let affected = self
            .conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(affected > 0)
    }

    // -----------------------------------------------------------------------
    // Typed access
    // -----------------------------------------------------------------------

    /// Read a JSON-encoded value. A value of the wrong shape counts as absent.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                crate::llog!("store: ignoring corrupt value under {key:?}: {e}");
                Ok(None)
            }
        }
    }

    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(value)?;
        self.set(key, &encoded)
    }

    /// Read a decimal counter. A non-numeric value counts as absent.
    pub fn get_u32(&self, key: &str) -> Result<Option<u32>, StorageError> {
        let Some(raw) = self.get(key)? else {
            return Ok(None);
        };
        match raw.trim().parse::<u32>() {
            Ok(n) => Ok(Some(n)),
            Err(e) => {
                crate::llog!("store: ignoring corrupt counter under {key:?}: {e}");
                Ok(None)
            }
        }
    }

    // -----------------------------------------------------------------------
    // Post overrides
    // -----------------------------------------------------------------------

    pub fn load_comments(&self, post_id: u32) -> Result<Option<Vec<Comment>>, StorageError> {
        self.get_json(&keys::post_comments(post_id))
    }

    pub fn save_comments(&self, post_id: u32, comments: &[Comment]) -> Result<(), StorageError> {
        self.set_json(&keys::post_comments(post_id), comments)
    }

    pub fn load_likes(&self, post_id: u32) -> Result<Option<u32>, StorageError> {
        self.get_u32(&keys::post_likes(post_id))
    }

    pub fn save_likes(&self, post_id: u32, likes: u32) -> Result<(), StorageError> {
        self.set(&keys::post_likes(post_id), &likes.to_string())
    }

    // -----------------------------------------------------------------------
    // Connections and saved jobs
    // -----------------------------------------------------------------------

    pub fn load_connections(&self) -> Result<Vec<PersistedConnection>, StorageError> {
        Ok(self.get_json(keys::CONNECTIONS)?.unwrap_or_default())
    }

    pub fn save_connections(&self, connections: &[PersistedConnection]) -> Result<(), StorageError> {
        self.set_json(keys::CONNECTIONS, connections)
    }

    pub fn load_saved_jobs(&self) -> Result<Vec<u32>, StorageError> {
        Ok(self.get_json(keys::SAVED_JOBS)?.unwrap_or_default())
    }

    pub fn save_saved_jobs(&self, job_ids: &[u32]) -> Result<(), StorageError> {
        self.set_json(keys::SAVED_JOBS, job_ids)
    }

    // -----------------------------------------------------------------------
    // Profile overrides
    // -----------------------------------------------------------------------

    pub fn load_profile_override(&self, user_id: u32) -> Result<ProfileOverride, StorageError> {
        Ok(ProfileOverride {
            bio: self.get(&keys::user_bio(user_id))?,
            job_title: self.get(&keys::user_job_title(user_id))?,
        })
    }

    /// Persist both profile fields in one transaction.
    pub fn save_profile_override(
        &self,
        user_id: u32,
        bio: &str,
        job_title: &str,
    ) -> Result<(), StorageError> {
        self.set_many(&[
            (keys::user_bio(user_id), bio.to_string()),
            (keys::user_job_title(user_id), job_title.to_string()),
        ])
    }

    // -----------------------------------------------------------------------
    // Browser export import
    // -----------------------------------------------------------------------

    /// Import a JSON object of key -> string dumped from the browser app's
    /// local storage.
    ///
    /// The legacy global `userBio` / `userJobTitle` keys are stored under the
    /// viewer's id. The file is renamed to `*.imported` afterwards.
    pub fn import_browser_export(
        &self,
        path: &Path,
        viewer: &ViewerContext,
    ) -> Result<ImportReport, StorageError> {
        let data = std::fs::read_to_string(path)?;
        let dump: BTreeMap<String, serde_json::Value> = serde_json::from_str(&data)?;

        let mut report = ImportReport::default();
        let mut entries = Vec::with_capacity(dump.len());
        for (key, value) in dump {
            // Browser storage only holds strings; anything else is re-encoded.
            let value = match value {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            let key = match key.as_str() {
                keys::LEGACY_BIO => {
                    report.profile_keys_rekeyed += 1;
                    keys::user_bio(viewer.user_id)
                }
                keys::LEGACY_JOB_TITLE => {
                    report.profile_keys_rekeyed += 1;
                    keys::user_job_title(viewer.user_id)
                }
                _ => key,
            };
            entries.push((key, value));
        }
        self.set_many(&entries)?;
        report.entries_imported = entries.len();

        let mut imported = path.as_os_str().to_owned();
        imported.push(".imported");
        std::fs::rename(path, PathBuf::from(imported))?;
        Ok(report)
    }
}

/// Resolve the database path: `{data_dir}/linkboard.db`.
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("linkboard.db")
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthorSnapshot, Candidate};
    use tempfile::TempDir;

    fn test_store() -> LocalStore {
        LocalStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_raw_crud() {
        let store = test_store();

        assert!(store.get("missing").unwrap().is_none());

        store.set("isLoggedIn", "true").unwrap();
        assert_eq!(store.get("isLoggedIn").unwrap().as_deref(), Some("true"));

        // Overwrite
        store.set("isLoggedIn", "false").unwrap();
        assert_eq!(store.get("isLoggedIn").unwrap().as_deref(), Some("false"));

        assert!(store.remove("isLoggedIn").unwrap());
        assert!(!store.remove("isLoggedIn").unwrap());
        assert!(store.get("isLoggedIn").unwrap().is_none());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        let path = db_path(dir);
        {
            let store = LocalStore::open(&path).unwrap();
            store.save_likes(1, 6).unwrap();
        }
        let store = LocalStore::open(&path).unwrap();
        assert_eq!(store.load_likes(1).unwrap(), Some(6));
    }

    #[test]
    fn test_corrupt_values_read_as_absent() {
        let store = test_store();
        store.set(&keys::post_likes(1), "lots").unwrap();
        store.set(&keys::post_comments(1), "{not json").unwrap();
        store.set(keys::CONNECTIONS, r#"{"id": 1}"#).unwrap();

        assert_eq!(store.load_likes(1).unwrap(), None);
        assert_eq!(store.load_comments(1).unwrap(), None);
        assert!(store.load_connections().unwrap().is_empty());
    }

    #[test]
    fn test_comments_round_trip() {
        let store = test_store();
        let comments = vec![Comment {
            id: 1_700_000_000_000,
            user: AuthorSnapshot {
                id: 101,
                name: "Current User".to_string(),
                profile_pic: "me.jpg".to_string(),
                title: None,
            },
            content: "Great post!".to_string(),
            timestamp: "2026-10-19T12:00:00.000Z".to_string(),
        }];
        store.save_comments(7, &comments).unwrap();
        assert_eq!(store.load_comments(7).unwrap(), Some(comments));
        assert_eq!(store.load_comments(8).unwrap(), None);
    }

    #[test]
    fn test_connections_and_saved_jobs() {
        let store = test_store();
        assert!(store.load_connections().unwrap().is_empty());
        assert!(store.load_saved_jobs().unwrap().is_empty());

        let conn = PersistedConnection::from(Candidate {
            id: 2,
            name: "Michael Johnson".to_string(),
            title: "Product Manager at Amazon".to_string(),
            profile_pic: String::new(),
            mutual_connections: None,
            relevance_score: None,
        });
        store.save_connections(&[conn.clone()]).unwrap();
        store.save_saved_jobs(&[3, 1]).unwrap();

        assert_eq!(store.load_connections().unwrap(), vec![conn]);
        assert_eq!(store.load_saved_jobs().unwrap(), vec![3, 1]);
        assert_eq!(store.get(keys::SAVED_JOBS).unwrap().as_deref(), Some("[3,1]"));
    }

    #[test]
    fn test_profile_override_scoped_by_user() {
        let store = test_store();
        store.save_profile_override(101, "New bio", "New Title").unwrap();

        let own = store.load_profile_override(101).unwrap();
        assert_eq!(own.bio.as_deref(), Some("New bio"));
        assert_eq!(own.job_title.as_deref(), Some("New Title"));

        assert_eq!(store.load_profile_override(1).unwrap(), ProfileOverride::default());
    }

    #[test]
    fn test_failed_write_is_reported() {
        let store = test_store();
        store.set_query_only();
        assert!(store.set("k", "v").is_err());
        assert!(store
            .set_many(&[("a".to_string(), "1".to_string())])
            .is_err());
        assert!(store.get("a").unwrap().is_none());
    }

    #[test]
    fn test_browser_export_import() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path();
        let path = dir.join("localStorage.json");
        std::fs::write(
            &path,
            r#"{
                "isLoggedIn": "true",
                "post_1_likes": "6",
                "savedJobs": [3],
                "userBio": "Imported bio",
                "userJobTitle": "Imported Title"
            }"#,
        )
        .unwrap();

        let store = test_store();
        let viewer = ViewerContext::new(101, "Current User");
        let report = store.import_browser_export(&path, &viewer).unwrap();
        assert_eq!(report.entries_imported, 5);
        assert_eq!(report.profile_keys_rekeyed, 2);

        assert_eq!(store.load_likes(1).unwrap(), Some(6));
        assert_eq!(store.load_saved_jobs().unwrap(), vec![3]);
        assert!(store.get(keys::LEGACY_BIO).unwrap().is_none());
        let own = store.load_profile_override(101).unwrap();
        assert_eq!(own.bio.as_deref(), Some("Imported bio"));
        assert_eq!(own.job_title.as_deref(), Some("Imported Title"));

        assert!(!path.exists());
        assert!(dir.join("localStorage.json.imported").exists());
    }
}
