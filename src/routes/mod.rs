use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::app_state::AppState;

pub mod health;
pub mod jobs;
pub mod metrics;

/// API and health routes. Unsupported methods on a known path get 405.
///
/// `max_body_bytes` replaces axum's 2 MB default for buffered bodies.
pub fn router(state: AppState, max_body_bytes: usize) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/submit/", post(jobs::submit_job))
        .route("/api/submit", post(jobs::submit_job))
        .route("/api/status", get(jobs::get_job_status))
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
