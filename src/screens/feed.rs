//! Home feed: every post, the viewer's picture and a short suggestion list.

use chrono::Utc;

use crate::commit::{self, CommitError};
use crate::connections::{ConnectOutcome, ConnectionGraph};
use crate::fixtures::{FetchError, FixtureLoader};
use crate::merge::merge_post_overrides;
use crate::model::{Comment, Post, User, ViewerContext};
use crate::storage::{LocalStore, StorageError};

use super::feed_candidates;

/// Fixture fetch results for one feed mount.
#[derive(Debug)]
pub struct FeedFixtures {
    pub posts: Result<Vec<Post>, FetchError>,
    pub users: Result<Vec<User>, FetchError>,
}

impl FeedFixtures {
    pub fn fetch(loader: &FixtureLoader) -> Self {
        Self {
            posts: loader.load_posts(),
            users: loader.load_users(),
        }
    }
}

#[derive(Debug)]
pub struct FeedScreen {
    viewer: ViewerContext,
    profile_pic: String,
    posts: Vec<Post>,
    graph: ConnectionGraph,
}

impl FeedScreen {
    pub fn mount(
        loader: &FixtureLoader,
        store: &LocalStore,
        viewer: &ViewerContext,
    ) -> Result<Self, StorageError> {
        Self::from_fixtures(FeedFixtures::fetch(loader), store, viewer)
    }

    /// Build the feed once every fetch has finished. Failed fetches leave
    /// the feed empty and keep the default picture.
    pub fn from_fixtures(
        fixtures: FeedFixtures,
        store: &LocalStore,
        viewer: &ViewerContext,
    ) -> Result<Self, StorageError> {
        let posts = fixtures.posts.unwrap_or_else(|e| {
            crate::llog!("feed: {e}; showing no posts");
            Vec::new()
        });
        let mut viewer = viewer.clone();
        let mut profile_pic = viewer.profile_pic.clone();
        match fixtures.users {
            Ok(users) => {
                let me = users.iter().find(|u| u.id == viewer.user_id);
                if let Some(me) = me {
                    viewer.adopt_record(me);
                }
                // The sidebar falls back to the first user; comment authors do not.
                let shown = me.or_else(|| users.first());
                if let Some(pic) = shown.map(|u| &u.profile_pic).filter(|p| !p.is_empty()) {
                    profile_pic = pic.clone();
                }
            }
            Err(e) => crate::llog!("feed: {e}; keeping default profile picture"),
        }

        let posts = merge_post_overrides(store, posts)?;
        let graph = ConnectionGraph::load(store, viewer.user_id, feed_candidates())?;
        crate::llog!(
            "feed: mounted {} post(s), {} suggestion(s)",
            posts.len(),
            graph.suggestions().len()
        );
        Ok(Self {
            viewer,
            profile_pic,
            posts,
            graph,
        })
    }

    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    pub fn post(&self, id: u32) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    pub fn profile_pic(&self) -> &str {
        &self.profile_pic
    }

    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
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
}
