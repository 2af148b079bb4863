use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::models::job::{Job, JobId, Visit};

#[derive(Debug, Default)]
struct RegistryInner {
    last_id: JobId,
    jobs: HashMap<JobId, Arc<Job>>,
}

/// In-memory store of every job created during the process lifetime.
///
/// A single lock covers id allocation and the key space. It is held only for
/// the allocate-and-insert or the lookup itself, never while a job runs.
#[derive(Debug, Default)]
pub struct JobRegistry {
    inner: Mutex<RegistryInner>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id and store a new ongoing job under it.
    pub fn create_job(&self, visits: Vec<Visit>) -> Arc<Job> {
        let mut inner = self.lock();
        inner.last_id += 1;
        let job = Arc::new(Job::new(inner.last_id, visits));
        inner.jobs.insert(job.id(), Arc::clone(&job));
        job
    }

    /// Shared handle to a stored job, so callers observe its live status.
    pub fn get_job(&self, id: JobId) -> Option<Arc<Job>> {
        self.lock().jobs.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
