//! Entity types shared by the fixture loader, the merge engine and the screens.
//!
//! Field names follow the fixture JSON (`jobTitle`, `profilePic`, ...) so the
//! same types round-trip through both the fixture files and the local store.

use serde::{Deserialize, Serialize};

/// Picture shown when no fixture record supplies one.
pub const DEFAULT_PROFILE_PIC: &str = "https://randomuser.me/api/portraits/men/99.jpg";

/// A member profile as served by `users.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub profile_pic: String,
    /// Connection count shown on the profile header.
    #[serde(default)]
    pub connections: u32,
}

impl User {
    /// Suggestion record for this user.
    pub fn candidate(&self) -> Candidate {
        let title = if self.headline.is_empty() {
            self.job_title.clone()
        } else {
            self.headline.clone()
        };
        Candidate {
            id: self.id,
            name: self.name.clone(),
            title,
            profile_pic: self.profile_pic.clone(),
            mutual_connections: None,
            relevance_score: None,
        }
    }
}

/// Copy of an author's public fields taken when a post or comment is created.
///
/// Never re-resolved against the live [`User`]: a later profile edit must not
/// rewrite history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSnapshot {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub profile_pic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// A comment on a post. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Creation time in milliseconds, bumped past any existing id on the post.
    pub id: i64,
    pub user: AuthorSnapshot,
    pub content: String,
    /// ISO-8601, UTC.
    pub timestamp: String,
}

/// A feed post from `posts.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u32,
    pub user: AuthorSnapshot,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub timestamp: String,
    #[serde(default)]
    pub likes: u32,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// A person offered in a suggestion pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub profile_pic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mutual_connections: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevance_score: Option<u32>,
}

/// An accepted connection: the candidate record flagged as connected.
///
/// Fields the candidate shape does not know (an imported record may carry
/// `company`, `bio` and so on) are kept in `extra` and written back as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    #[serde(flatten)]
    pub person: Candidate,
    pub connected: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Connection {
    pub fn id(&self) -> u32 {
        self.person.id
    }
}

impl From<Candidate> for Connection {
    fn from(person: Candidate) -> Self {
        Self {
            person,
            connected: true,
            extra: serde_json::Map::new(),
        }
    }
}

/// A job listing from `jobs.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: u32,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub posted: String,
}

/// The person acting on this device.
///
/// Every merge and commit operation takes the viewer explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
    pub user_id: u32,
    pub name: String,
    #[serde(default = "default_profile_pic")]
    pub profile_pic: String,
}

fn default_profile_pic() -> String {
    DEFAULT_PROFILE_PIC.to_string()
}

impl ViewerContext {
    pub fn new(user_id: u32, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            profile_pic: default_profile_pic(),
        }
    }

    /// Take name and picture from the viewer's own fixture record so that
    /// comment snapshots describe one person.
    pub fn adopt_record(&mut self, user: &User) {
        if user.id != self.user_id {
            return;
        }
        if !user.name.is_empty() {
            self.name = user.name.clone();
        }
        if !user.profile_pic.is_empty() {
            self.profile_pic = user.profile_pic.clone();
        }
    }

    /// Author snapshot used for comments written by the viewer.
    pub fn author(&self) -> AuthorSnapshot {
        AuthorSnapshot {
            id: self.user_id,
            name: self.name.clone(),
            profile_pic: self.profile_pic.clone(),
            title: None,
        }
    }
}

impl Default for ViewerContext {
    fn default() -> Self {
        Self::new(101, "Current User")
    }
}
