//! The viewer's connections and the suggestion pool of one mounted screen.
//!
//! The two pools are disjoint by id. Connect and remove rewrite the whole
//! persisted `connections` list; dismissals stay in memory and last only as
//! long as the screen that holds this graph.

use std::collections::BTreeSet;

use crate::commit::{commit, CommitError};
use crate::model::{Candidate, Connection};
use crate::storage::{LocalStore, StorageError};

/// Result of a connect action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectOutcome {
    Connected { name: String },
    AlreadyConnected,
}

impl ConnectOutcome {
    /// User-visible acknowledgment, if the action changed anything.
    pub fn acknowledgment(&self) -> Option<String> {
        match self {
            ConnectOutcome::Connected { name } => Some(format!("Connection request sent to {name}")),
            ConnectOutcome::AlreadyConnected => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConnectionGraph {
    viewer_id: u32,
    connections: Vec<Connection>,
    suggestions: Vec<Candidate>,
    dismissed: BTreeSet<u32>,
}

impl ConnectionGraph {
    /// Load the persisted connections and offer every seed not already
    /// connected. The viewer is never offered to themself.
    pub fn load(
        store: &LocalStore,
        viewer_id: u32,
        seeds: Vec<Candidate>,
    ) -> Result<Self, StorageError> {
        let mut graph = Self {
            viewer_id,
            connections: store.load_connections()?,
            ..Self::default()
        };
        for seed in seeds {
            graph.offer(seed);
        }
        Ok(graph)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn suggestions(&self) -> &[Candidate] {
        &self.suggestions
    }

    pub fn is_connected(&self, id: u32) -> bool {
        self.connections.iter().any(|c| c.id() == id)
    }

    pub fn suggestion(&self, id: u32) -> Option<&Candidate> {
        self.suggestions.iter().find(|c| c.id == id)
    }

    /// Add a suggestion unless it is the viewer, connected, dismissed or
    /// already offered.
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        if candidate.id == self.viewer_id
            || self.is_connected(candidate.id)
            || self.dismissed.contains(&candidate.id)
            || self.suggestion(candidate.id).is_some()
        {
            return false;
        }
        self.suggestions.push(candidate);
        true
    }

    /// Connect with `candidate`. A second connect for the same id is a no-op.
    pub fn connect(
        &mut self,
        store: &LocalStore,
        candidate: &Candidate,
    ) -> Result<ConnectOutcome, StorageError> {
        if self.is_connected(candidate.id) {
            return Ok(ConnectOutcome::AlreadyConnected);
        }

        let mut updated = self.connections.clone();
        updated.push(Connection::from(candidate.clone()));
        commit(&mut self.connections, updated, |list| {
            store.save_connections(list)
        })?;
        self.suggestions.retain(|c| c.id != candidate.id);

        crate::llog!(
            "connections: connected {} ({} total)",
            crate::logging::user_id(candidate.id),
            self.connections.len()
        );
        Ok(ConnectOutcome::Connected {
            name: candidate.name.clone(),
        })
    }

    /// Connect with the suggestion carrying `id`.
    pub fn connect_by_id(
        &mut self,
        store: &LocalStore,
        id: u32,
    ) -> Result<ConnectOutcome, CommitError> {
        if self.is_connected(id) {
            return Ok(ConnectOutcome::AlreadyConnected);
        }
        let candidate = self
            .suggestion(id)
            .cloned()
            .ok_or(CommitError::UnknownCandidate(id))?;
        Ok(self.connect(store, &candidate)?)
    }

    /// Drop a suggestion for the rest of this mount. Nothing is persisted.
    pub fn dismiss(&mut self, id: u32) -> bool {
        self.dismissed.insert(id);
        let before = self.suggestions.len();
        self.suggestions.retain(|c| c.id != id);
        self.suggestions.len() != before
    }

    /// Remove an accepted connection. It is not offered again as a suggestion.
    pub fn remove_connection(&mut self, store: &LocalStore, id: u32) -> Result<bool, StorageError> {
        if !self.is_connected(id) {
            return Ok(false);
        }
        let updated: Vec<Connection> = self
            .connections
            .iter()
            .filter(|c| c.id() != id)
            .cloned()
            .collect();
        commit(&mut self.connections, updated, |list| {
            store.save_connections(list)
        })?;
        crate::llog!(
            "connections: removed {} ({} left)",
            crate::logging::user_id(id),
            self.connections.len()
        );
        Ok(true)
    }
}
