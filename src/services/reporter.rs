use crate::models::job::{JobId, JobSnapshot};
use crate::services::registry::JobRegistry;

/// Current status of a job, or `None` if no job with that id was created.
///
/// Only the registry lookup happens under the registry lock; the snapshot is
/// taken under the job's own lock and detached from later mutation.
pub fn get_status(registry: &JobRegistry, id: JobId) -> Option<JobSnapshot> {
    registry.get_job(id).map(|job| job.snapshot())
}
