//! Shared application state: the store plus the currently mounted screens.

use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tokio::sync::Mutex;

use crate::fixtures::FixtureLoader;
use crate::model::ViewerContext;
use crate::screens::{FeedScreen, JobsScreen, LoadState, NetworkScreen, ProfileScreen};
use crate::storage::LocalStore;

/// One mounted instance of each screen. A screen stays `Loading` until its
/// first `GET` finishes; a later `GET` replaces it wholesale.
pub struct AppState {
    pub store: LocalStore,
    pub loader: FixtureLoader,
    pub viewer: ViewerContext,
    pub rng: ChaCha8Rng,
    pub feed: LoadState<FeedScreen>,
    pub network: LoadState<NetworkScreen>,
    pub profile: LoadState<ProfileScreen>,
    pub jobs: LoadState<JobsScreen>,
}

impl AppState {
    pub fn new(store: LocalStore, loader: FixtureLoader, viewer: ViewerContext) -> Self {
        Self::with_rng(store, loader, viewer, ChaCha8Rng::from_entropy())
    }

    pub fn with_rng(
        store: LocalStore,
        loader: FixtureLoader,
        viewer: ViewerContext,
        rng: ChaCha8Rng,
    ) -> Self {
        Self {
            store,
            loader,
            viewer,
            rng,
            feed: LoadState::Loading,
            network: LoadState::Loading,
            profile: LoadState::Loading,
            jobs: LoadState::Loading,
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(Mutex::new(self))
    }
}

pub type SharedState = Arc<Mutex<AppState>>;
