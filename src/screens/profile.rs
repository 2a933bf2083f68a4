//! Profile page for the user named by the route parameter.
//!
//! The only screen whose correctness depends on finding one record: a failed
//! fetch or an unknown id is surfaced as a blocking state instead of an empty
//! page.

use chrono::Utc;
use rand::Rng;

use crate::commit::{self, CommitError};
use crate::connections::{ConnectOutcome, ConnectionGraph};
use crate::fixtures::{FetchError, FixtureLoader};
use crate::merge::{merge_post_overrides, merge_user_overrides, suggest_connections};
use crate::model::{Comment, Post, User, ViewerContext};
use crate::storage::{LocalStore, StorageError};

use super::LoadState;

pub const PROFILE_LOAD_ERROR: &str = "Error loading profile";
pub const PROFILE_NOT_FOUND: &str = "User not found";

/// Fixture fetch results for one profile mount.
#[derive(Debug)]
pub struct ProfileFixtures {
    pub users: Result<Vec<User>, FetchError>,
    pub posts: Result<Vec<Post>, FetchError>,
}

impl ProfileFixtures {
    pub fn fetch(loader: &FixtureLoader) -> Self {
        Self {
            users: loader.load_users(),
            posts: loader.load_posts(),
        }
    }
}

#[derive(Debug)]
pub struct ProfileScreen {
    viewer: ViewerContext,
    user: User,
    posts: Vec<Post>,
    graph: ConnectionGraph,
}

impl ProfileScreen {
    pub fn mount(
        loader: &FixtureLoader,
        store: &LocalStore,
        viewer: &ViewerContext,
        user_id: u32,
        rng: &mut impl Rng,
    ) -> Result<LoadState<Self>, StorageError> {
        Self::from_fixtures(ProfileFixtures::fetch(loader), store, viewer, user_id, rng)
    }

    pub fn from_fixtures(
        fixtures: ProfileFixtures,
        store: &LocalStore,
        viewer: &ViewerContext,
        user_id: u32,
        rng: &mut impl Rng,
    ) -> Result<LoadState<Self>, StorageError> {
        let (users, posts) = match (fixtures.users, fixtures.posts) {
            (Ok(users), Ok(posts)) => (users, posts),
            (Err(e), _) | (_, Err(e)) => {
                crate::llog!("profile: {e}");
                return Ok(LoadState::Failed(PROFILE_LOAD_ERROR.to_string()));
            }
        };
        let Some(found) = users.iter().find(|u| u.id == user_id).cloned() else {
            crate::llog!("profile: no user {}", crate::logging::user_id(user_id));
            return Ok(LoadState::NotFound(PROFILE_NOT_FOUND.to_string()));
        };

        let mut viewer = viewer.clone();
        if let Some(me) = users.iter().find(|u| u.id == viewer.user_id) {
            viewer.adopt_record(me);
        }

        let user = merge_user_overrides(store, found)?;
        let own_posts = posts.into_iter().filter(|p| p.user.id == user.id).collect();
        let posts = merge_post_overrides(store, own_posts)?;

        let mut graph = ConnectionGraph::load(store, viewer.user_id, Vec::new())?;
        let suggestions = suggest_connections(&users, &user, &viewer, graph.connections(), rng);
        for candidate in suggestions {
            graph.offer(candidate);
        }

        crate::llog!(
            "profile: mounted {} with {} post(s), {} suggestion(s)",
            crate::logging::user_id(user.id),
            posts.len(),
            graph.suggestions().len()
        );
        Ok(LoadState::Ready(Self {
            viewer,
            user,
            posts,
            graph,
        }))
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    pub fn is_own_profile(&self) -> bool {
        self.user.id == self.viewer.user_id
    }

    pub fn like(&mut self, store: &LocalStore, post_id: u32) -> Result<u32, CommitError> {
        commit::like(store, &mut self.posts, post_id)
    }

    pub fn comment(
        &mut self,
        store: &LocalStore,
        post_id: u32,
        text: &str,
    ) -> Result<Comment, CommitError> {
        commit::add_comment(store, &mut self.posts, post_id, &self.viewer, text, Utc::now())
    }

    pub fn connect(&mut self, store: &LocalStore, id: u32) -> Result<ConnectOutcome, CommitError> {
        self.graph.connect_by_id(store, id)
    }

    pub fn dismiss(&mut self, id: u32) -> bool {
        self.graph.dismiss(id)
    }

    pub fn save_profile(
        &mut self,
        store: &LocalStore,
        bio: &str,
        job_title: &str,
    ) -> Result<(), CommitError> {
        commit::save_profile(store, &mut self.user, &self.viewer, bio, job_title)
    }
}
