//! Overlaying persisted overrides on fixture snapshots, and profile-screen
//! connection suggestions.

use std::collections::BTreeSet;

use rand::Rng;

use crate::model::{Candidate, Connection, Post, User, ViewerContext};
use crate::storage::{LocalStore, StorageError};

/// How many scored suggestions the profile screen shows.
pub const MAX_SUGGESTIONS: usize = 5;
pub const SAME_COMPANY_SCORE: u32 = 5;
pub const SIMILAR_TITLE_SCORE: u32 = 3;
pub const MUTUAL_CONNECTIONS_MAX: u32 = 15;

/// Apply persisted comment lists and like counts to fixture posts.
///
/// A persisted comment list replaces the fixture list outright.
pub fn merge_post_overrides(
    store: &LocalStore,
    posts: Vec<Post>,
) -> Result<Vec<Post>, StorageError> {
    posts
        .into_iter()
        .map(|mut post| {
            if let Some(comments) = store.load_comments(post.id)? {
                post.comments = comments;
            }
            if let Some(likes) = store.load_likes(post.id)? {
                post.likes = likes;
            }
            Ok(post)
        })
        .collect()
}

/// Apply the persisted bio / job title stored for this user's id.
pub fn merge_user_overrides(store: &LocalStore, mut user: User) -> Result<User, StorageError> {
    let overrides = store.load_profile_override(user.id)?;
    if let Some(bio) = overrides.bio {
        user.bio = bio;
    }
    if let Some(job_title) = overrides.job_title {
        user.job_title = job_title;
    }
    Ok(user)
}

/// Rank people the viewer might know, relative to the profile being viewed.
///
/// Same company as the viewed user scores [`SAME_COMPANY_SCORE`], a job title
/// containing the viewed user's title (case-insensitive) adds
/// [`SIMILAR_TITLE_SCORE`], and a mutual-connection count drawn from
/// `1..=MUTUAL_CONNECTIONS_MAX` is added on top.
pub fn suggest_connections(
    users: &[User],
    viewed: &User,
    viewer: &ViewerContext,
    connections: &[Connection],
    rng: &mut impl Rng,
) -> Vec<Candidate> {
    let connected: BTreeSet<u32> = connections.iter().map(Connection::id).collect();
    let viewed_title = viewed.job_title.to_lowercase();

    let mut scored: Vec<Candidate> = users
        .iter()
        .filter(|u| u.id != viewed.id && u.id != viewer.user_id && !connected.contains(&u.id))
        .map(|person| {
            let mut score = 0;
            if person.company == viewed.company {
                score += SAME_COMPANY_SCORE;
            }
            if !person.job_title.is_empty()
                && !viewed_title.is_empty()
                && person.job_title.to_lowercase().contains(&viewed_title)
            {
                score += SIMILAR_TITLE_SCORE;
            }
            let mutual = rng.gen_range(1..=MUTUAL_CONNECTIONS_MAX);
            score += mutual;

            Candidate {
                mutual_connections: Some(mutual),
                relevance_score: Some(score),
                ..person.candidate()
            }
        })
        .collect();

    scored.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
    scored.truncate(MAX_SUGGESTIONS);
    scored
}
