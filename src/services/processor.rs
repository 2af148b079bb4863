//! Background worker for a single job.
//!
//! Visits are walked in submission order and each visit's images in URL
//! order, so results and errors for a given input always come out in the
//! same sequence. Every problem is recorded on the job; nothing here aborts
//! the batch.

use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;

use crate::config::ProcessingConfig;
use crate::models::job::{Job, JobError, JobStatus, Visit};
use crate::services::image_fetcher::ImageFetcher;
use crate::services::store_directory::StoreDirectory;

pub const INVALID_STORE_MESSAGE: &str = "Invalid store_id";

/// Runs jobs against the store directory and an image fetcher.
#[derive(Clone)]
pub struct JobProcessor {
    directory: Arc<StoreDirectory>,
    fetcher: Arc<dyn ImageFetcher>,
    processing: ProcessingConfig,
}

impl JobProcessor {
    pub fn new(
        directory: Arc<StoreDirectory>,
        fetcher: Arc<dyn ImageFetcher>,
        processing: ProcessingConfig,
    ) -> Self {
        Self {
            directory,
            fetcher,
            processing,
        }
    }

    /// Start processing `job` on its own task and return immediately.
    ///
    /// The task owns only the job handle; it never touches the registry.
    pub fn spawn(&self, job: Arc<Job>) -> JoinHandle<()> {
        let processor = self.clone();
        tokio::spawn(async move {
            processor.process(&job).await;
        })
    }

    /// Process every visit of `job` and settle its final status.
    pub async fn process(&self, job: &Job) -> JobStatus {
        let start = Instant::now();
        tracing::info!(
            job_id = job.id(),
            visits = job.visits().len(),
            "Processing visit job"
        );

        for visit in job.visits() {
            self.process_visit(job, visit).await;
        }

        let status = job.finish();
        let elapsed = start.elapsed();

        metrics::histogram!("visit_job_processing_seconds").record(elapsed.as_secs_f64());
        match status {
            JobStatus::Failed => metrics::counter!("visit_jobs_failed_total").increment(1),
            _ => metrics::counter!("visit_jobs_completed_total").increment(1),
        }

        tracing::info!(
            job_id = job.id(),
            status = status.as_str(),
            errors = job.snapshot().errors.len(),
            duration_ms = elapsed.as_millis() as u64,
            "Visit job finished"
        );

        status
    }

    async fn process_visit(&self, job: &Job, visit: &Visit) {
        if self.directory.lookup(&visit.store_id).is_none() {
            record(job, &visit.store_id, INVALID_STORE_MESSAGE.to_string());
            return;
        }

        for url in &visit.image_urls {
            let dimensions = match self.fetcher.fetch_dimensions(url).await {
                Ok(dimensions) => dimensions,
                Err(e) => {
                    metrics::counter!("visit_image_failures_total").increment(1);
                    record(
                        job,
                        &visit.store_id,
                        format!("Failed to download image: {e}"),
                    );
                    continue;
                }
            };

            let perimeter = dimensions.perimeter();

            if let Some(delay) = self.processing.sample_delay() {
                tokio::time::sleep(delay).await;
            }

            metrics::counter!("visit_images_processed_total").increment(1);
            tracing::info!(
                job_id = job.id(),
                store_id = %visit.store_id,
                image_url = %url,
                perimeter,
                "Image processed"
            );
        }
    }
}

fn record(job: &Job, store_id: &str, message: String) {
    tracing::warn!(job_id = job.id(), store_id, error = %message, "Visit processing error");
    job.record_error(JobError::new(store_id, message));
}
