use serde::{Deserialize, Serialize};

use super::job::{JobError, JobId, JobSnapshot, Visit};
use super::null_as_default;

/// Body of `POST /api/submit/`.
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub visits: Vec<Visit>,
}

impl SubmitRequest {
    pub fn count_matches(&self) -> bool {
        usize::try_from(self.count).is_ok_and(|count| count == self.visits.len())
    }
}

/// Response after a batch has been accepted.
#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub job_id: JobId,
}

/// Query string of `GET /api/status`.
#[derive(Debug, Default)]
pub struct StatusQuery {
    pub jobid: Option<String>,
}

impl From<Vec<(String, String)>> for StatusQuery {
    /// The first `jobid` wins when the parameter is repeated.
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self {
            jobid: pairs
                .into_iter()
                .find(|(key, _)| key == "jobid")
                .map(|(_, value)| value),
        }
    }
}

/// Response for querying job status.
#[derive(Debug, Serialize, Deserialize)]
pub struct JobStatusResponse {
    pub status: String,
    pub job_id: String,
    #[serde(rename = "error", default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<JobError>>,
}

impl From<JobSnapshot> for JobStatusResponse {
    fn from(snapshot: JobSnapshot) -> Self {
        Self {
            status: snapshot.status.as_str().to_string(),
            job_id: snapshot.id.to_string(),
            errors: (!snapshot.errors.is_empty()).then_some(snapshot.errors),
        }
    }
}
