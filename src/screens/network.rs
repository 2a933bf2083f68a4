//! "My Network": accepted connections plus the fixed suggestion list.

use crate::commit::CommitError;
use crate::connections::{ConnectOutcome, ConnectionGraph};
use crate::model::ViewerContext;
use crate::storage::{LocalStore, StorageError};

use super::network_candidates;

#[derive(Debug)]
pub struct NetworkScreen {
    graph: ConnectionGraph,
}

impl NetworkScreen {
    pub fn mount(store: &LocalStore, viewer: &ViewerContext) -> Result<Self, StorageError> {
        let graph = ConnectionGraph::load(store, viewer.user_id, network_candidates())?;
        crate::llog!(
            "network: mounted {} connection(s), {} suggestion(s)",
            graph.connections().len(),
            graph.suggestions().len()
        );
        Ok(Self { graph })
    }

    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    pub fn connect(&mut self, store: &LocalStore, id: u32) -> Result<ConnectOutcome, CommitError> {
        self.graph.connect_by_id(store, id)
    }

    pub fn dismiss(&mut self, id: u32) -> bool {
        self.graph.dismiss(id)
    }

    pub fn remove_connection(&mut self, store: &LocalStore, id: u32) -> Result<bool, StorageError> {
        self.graph.remove_connection(store, id)
    }
}
