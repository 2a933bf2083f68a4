//! Screen view state. Each screen mounts independently: it fetches its
//! fixtures, merges the persisted overrides and owns the result until the
//! next mount.

pub mod feed;
pub mod jobs;
pub mod network;
pub mod profile;

pub use feed::{FeedFixtures, FeedScreen};
pub use jobs::JobsScreen;
pub use network::NetworkScreen;
pub use profile::{ProfileFixtures, ProfileScreen};

use crate::model::Candidate;

/// Where a screen is in its mount lifecycle.
#[derive(Debug)]
pub enum LoadState<T> {
    /// Fixture fetches still in flight.
    Loading,
    Ready(T),
    NotFound(String),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            LoadState::Ready(screen) => Some(screen),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::NotFound(_) => "not_found",
            LoadState::Failed(_) => "error",
        }
    }
}

fn seed(id: u32, name: &str, title: &str, profile_pic: &str) -> Candidate {
    Candidate {
        id,
        name: name.to_string(),
        title: title.to_string(),
        profile_pic: profile_pic.to_string(),
        mutual_connections: None,
        relevance_score: None,
    }
}

/// Fixed suggestion list on the feed sidebar.
pub fn feed_candidates() -> Vec<Candidate> {
    vec![
        seed(
            7,
            "Alex Johnson",
            "Front-end Developer",
            "https://randomuser.me/api/portraits/men/45.jpg",
        ),
        seed(
            8,
            "Sarah Wilson",
            "Product Manager",
            "https://randomuser.me/api/portraits/women/45.jpg",
        ),
    ]
}

/// Fixed "People You May Know" list on the network screen.
pub fn network_candidates() -> Vec<Candidate> {
    vec![
        seed(
            1,
            "Jane Smith",
            "Software Engineer at Google",
            "https://randomuser.me/api/portraits/women/32.jpg",
        ),
        seed(
            2,
            "Michael Johnson",
            "Product Manager at Amazon",
            "https://randomuser.me/api/portraits/men/42.jpg",
        ),
        seed(
            3,
            "Emily Davis",
            "UX Designer at Apple",
            "https://randomuser.me/api/portraits/women/43.jpg",
        ),
        seed(
            4,
            "Robert Wilson",
            "Data Scientist at Microsoft",
            "https://randomuser.me/api/portraits/men/55.jpg",
        ),
        seed(
            5,
            "Sarah Taylor",
            "Marketing Manager at Netflix",
            "https://randomuser.me/api/portraits/women/67.jpg",
        ),
        seed(
            6,
            "Hariom Saini",
            "Android Developer",
            "https://randomuser.me/api/portraits/men/69.jpg",
        ),
    ]
}
