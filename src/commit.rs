//! Write path for user actions.
//!
//! Each action computes its new value, swaps it into the in-memory view state
//! and persists it. When persisting fails the previous value is put back, so
//! the caller sees either both changes or neither.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::model::{Comment, Post, User, ViewerContext};
use crate::storage::{LocalStore, StorageError};

#[derive(Debug)]
pub enum CommitError {
    UnknownPost(u32),
    UnknownJob(u32),
    UnknownCandidate(u32),
    EmptyComment,
    /// Profile edits are only allowed on the viewer's own profile.
    NotOwnProfile { viewer: u32, profile: u32 },
    Storage(StorageError),
}

impl std::fmt::Display for CommitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommitError::UnknownPost(id) => write!(f, "post {id} is not on this screen"),
            CommitError::UnknownJob(id) => write!(f, "job {id} is not on this screen"),
            CommitError::UnknownCandidate(id) => write!(f, "user {id} is not a suggestion here"),
            CommitError::EmptyComment => write!(f, "comment text cannot be empty"),
            CommitError::NotOwnProfile { viewer, profile } => {
                write!(f, "user {viewer} cannot edit the profile of user {profile}")
            }
            CommitError::Storage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CommitError {}

impl From<StorageError> for CommitError {
    fn from(e: StorageError) -> Self {
        CommitError::Storage(e)
    }
}

/// Replace `slot` with `new_value`, then persist it. Restores the old value
/// if `persist` fails.
pub fn commit<T, F>(slot: &mut T, new_value: T, persist: F) -> Result<(), StorageError>
where
    F: FnOnce(&T) -> Result<(), StorageError>,
{
    let previous = std::mem::replace(slot, new_value);
    if let Err(e) = persist(slot) {
        *slot = previous;
        return Err(e);
    }
    Ok(())
}

fn find_post(posts: &mut [Post], post_id: u32) -> Result<&mut Post, CommitError> {
    posts
        .iter_mut()
        .find(|p| p.id == post_id)
        .ok_or(CommitError::UnknownPost(post_id))
}

/// Count one more like. Every call counts; there is no un-like.
pub fn like(store: &LocalStore, posts: &mut [Post], post_id: u32) -> Result<u32, CommitError> {
    let post = find_post(posts, post_id)?;
    let likes = post.likes.saturating_add(1);
    commit(&mut post.likes, likes, |n| store.save_likes(post_id, *n))?;
    crate::llog!("like: {} -> {}", crate::logging::post_id(post_id), likes);
    Ok(likes)
}

/// Append a comment by the viewer and persist the post's full comment list.
pub fn add_comment(
    store: &LocalStore,
    posts: &mut [Post],
    post_id: u32,
    viewer: &ViewerContext,
    text: &str,
    now: DateTime<Utc>,
) -> Result<Comment, CommitError> {
    if text.trim().is_empty() {
        return Err(CommitError::EmptyComment);
    }
    let post = find_post(posts, post_id)?;

    // Ids come from the clock but must stay strictly increasing per post.
    let last_id = post.comments.iter().map(|c| c.id).max().unwrap_or(i64::MIN);
    let comment = Comment {
        id: now.timestamp_millis().max(last_id.saturating_add(1)),
        user: viewer.author(),
        content: text.to_string(),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
    };

    let mut updated = post.comments.clone();
    updated.push(comment.clone());
    commit(&mut post.comments, updated, |list| {
        store.save_comments(post_id, list)
    })?;
    crate::llog!(
        "comment: {} by {} ({} total)",
        crate::logging::post_id(post_id),
        crate::logging::user_id(viewer.user_id),
        post.comments.len()
    );
    Ok(comment)
}

/// Result of saving a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    AlreadySaved,
}

impl SaveOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            SaveOutcome::Saved => "Job saved successfully!",
            SaveOutcome::AlreadySaved => "This job is already saved!",
        }
    }
}

/// Add `job_id` to the saved list, de-duplicating against the persisted list.
pub fn save_job(
    store: &LocalStore,
    saved: &mut Vec<u32>,
    job_id: u32,
) -> Result<SaveOutcome, CommitError> {
    let mut updated = store.load_saved_jobs()?;
    if updated.contains(&job_id) {
        *saved = updated;
        return Ok(SaveOutcome::AlreadySaved);
    }
    updated.push(job_id);
    commit(saved, updated, |ids| store.save_saved_jobs(ids))?;
    crate::llog!("jobs: saved job {job_id} ({} saved)", saved.len());
    Ok(SaveOutcome::Saved)
}

/// Save the viewer's edited bio and job title.
///
/// The headline is rebuilt as `"{job_title} at {company}"`.
pub fn save_profile(
    store: &LocalStore,
    user: &mut User,
    viewer: &ViewerContext,
    bio: &str,
    job_title: &str,
) -> Result<(), CommitError> {
    if user.id != viewer.user_id {
        return Err(CommitError::NotOwnProfile {
            viewer: viewer.user_id,
            profile: user.id,
        });
    }
    let updated = User {
        bio: bio.to_string(),
        job_title: job_title.to_string(),
        headline: format!("{job_title} at {}", user.company),
        ..user.clone()
    };
    commit(user, updated, |u| {
        store.save_profile_override(u.id, &u.bio, &u.job_title)
    })?;
    crate::llog!("profile: saved edits for {}", crate::logging::user_id(user.id));
    Ok(())
}
