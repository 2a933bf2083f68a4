//! Job board with search and saved jobs.

use crate::commit::{self, CommitError, SaveOutcome};
use crate::fixtures::{FetchError, FixtureLoader};
use crate::model::Job;
use crate::storage::{LocalStore, StorageError};

#[derive(Debug)]
pub struct JobsScreen {
    jobs: Vec<Job>,
    saved: Vec<u32>,
}

impl JobsScreen {
    pub fn mount(loader: &FixtureLoader, store: &LocalStore) -> Result<Self, StorageError> {
        Self::from_fixtures(loader.load_jobs(), store)
    }

    /// A failed fetch is logged and leaves the board empty.
    pub fn from_fixtures(
        jobs: Result<Vec<Job>, FetchError>,
        store: &LocalStore,
    ) -> Result<Self, StorageError> {
        let jobs = jobs.unwrap_or_else(|e| {
            crate::llog!("jobs: {e}; showing no jobs");
            Vec::new()
        });
        let saved = store.load_saved_jobs()?;
        crate::llog!("jobs: mounted {} job(s), {} saved", jobs.len(), saved.len());
        Ok(Self { jobs, saved })
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn job(&self, id: u32) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    /// Jobs whose title, location or company contains `term`, ignoring case.
    /// An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<&Job> {
        let term = term.trim().to_lowercase();
        self.jobs
            .iter()
            .filter(|job| {
                job.title.to_lowercase().contains(&term)
                    || job.location.to_lowercase().contains(&term)
                    || job.company.to_lowercase().contains(&term)
            })
            .collect()
    }

    pub fn saved(&self) -> &[u32] {
        &self.saved
    }

    pub fn is_saved(&self, id: u32) -> bool {
        self.saved.contains(&id)
    }

    pub fn save_job(&mut self, store: &LocalStore, id: u32) -> Result<SaveOutcome, CommitError> {
        if self.job(id).is_none() {
            return Err(CommitError::UnknownJob(id));
        }
        commit::save_job(store, &mut self.saved, id)
    }
}
