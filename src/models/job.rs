use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::null_as_default;

/// Identifier assigned by the job registry. Starts at 1 and is never reused.
pub type JobId = u64;

/// Status of a visit-processing job.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Ongoing,
    Failed,
    Completed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Ongoing => "ongoing",
            JobStatus::Failed => "failed",
            JobStatus::Completed => "completed",
        }
    }
}

/// One store's set of image references within a job.
///
/// `visit_time` is carried for reporting but plays no part in processing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Visit {
    #[serde(default, deserialize_with = "null_as_default")]
    pub store_id: String,
    #[serde(default, rename = "image_url", deserialize_with = "null_as_default")]
    pub image_urls: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visit_time: String,
}

/// A processing problem recorded against a store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobError {
    pub store_id: String,
    #[serde(rename = "error")]
    pub message: String,
}

impl JobError {
    pub fn new(store_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            store_id: store_id.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
struct JobState {
    status: JobStatus,
    errors: Vec<JobError>,
}

/// Point-in-time copy of a job's status.
///
/// `errors` is only populated when the job has failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSnapshot {
    pub id: JobId,
    pub status: JobStatus,
    pub errors: Vec<JobError>,
}

/// A submitted batch of visits.
///
/// The id and visit list are fixed at creation. Status and errors sit behind
/// the job's own lock, separate from the registry lock, so readers of one job
/// never wait on another job's processor.
#[derive(Debug)]
pub struct Job {
    id: JobId,
    visits: Vec<Visit>,
    state: Mutex<JobState>,
}

impl Job {
    pub fn new(id: JobId, visits: Vec<Visit>) -> Self {
        Self {
            id,
            visits,
            state: Mutex::new(JobState {
                status: JobStatus::Ongoing,
                errors: Vec::new(),
            }),
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn visits(&self) -> &[Visit] {
        &self.visits
    }

    pub fn status(&self) -> JobStatus {
        self.lock().status
    }

    /// Mark the job failed and append an error. Later errors keep appending.
    pub fn record_error(&self, error: JobError) {
        let mut state = self.lock();
        state.status = JobStatus::Failed;
        state.errors.push(error);
    }

    /// Settle the final status once every visit has been handled.
    ///
    /// An ongoing job becomes completed; a failed job stays failed.
    pub fn finish(&self) -> JobStatus {
        let mut state = self.lock();
        if state.status == JobStatus::Ongoing {
            state.status = JobStatus::Completed;
        }
        state.status
    }

    pub fn snapshot(&self) -> JobSnapshot {
        let state = self.lock();
        let errors = if state.status == JobStatus::Failed {
            state.errors.clone()
        } else {
            Vec::new()
        };
        JobSnapshot {
            id: self.id,
            status: state.status,
            errors,
        }
    }

    // No code path panics while holding the lock, so a poisoned guard still
    // holds consistent data.
    fn lock(&self) -> MutexGuard<'_, JobState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
