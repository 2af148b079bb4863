use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Prometheus metrics scrape endpoint.
pub async fn prometheus_metrics(
    axum::extract::State(handle): axum::extract::State<Arc<PrometheusHandle>>,
) -> impl IntoResponse {
    handle.render()
}

/// Register descriptions for the job metrics.
pub fn describe() {
    metrics::describe_counter!(
        "visit_jobs_submitted_total",
        "Total visit jobs accepted for processing"
    );
    metrics::describe_counter!(
        "visit_jobs_completed_total",
        "Total visit jobs that finished without errors"
    );
    metrics::describe_counter!(
        "visit_jobs_failed_total",
        "Total visit jobs that finished with at least one error"
    );
    metrics::describe_counter!(
        "visit_images_processed_total",
        "Total images downloaded and measured"
    );
    metrics::describe_counter!(
        "visit_image_failures_total",
        "Total images that could not be downloaded or decoded"
    );
    metrics::describe_histogram!(
        "visit_job_processing_seconds",
        "Time to process all visits of a job"
    );
}
