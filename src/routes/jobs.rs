use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::app_state::AppState;
use crate::error::{AppError, AppResult};
use crate::models::job::JobId;
use crate::models::submission::{JobStatusResponse, StatusQuery, SubmitRequest, SubmitResponse};
use crate::services::reporter;

/// POST /api/submit/ — Accept a batch of store visits for background processing.
///
/// Responds as soon as the job id is allocated; processing errors only show
/// up through the status endpoint.
pub async fn submit_job(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<(StatusCode, Json<SubmitResponse>)> {
    let request: SubmitRequest =
        serde_json::from_slice(&body).map_err(AppError::InvalidPayload)?;

    if !request.count_matches() {
        return Err(AppError::CountMismatch);
    }

    let job = state.registry.create_job(request.visits);
    let job_id = job.id();
    // Detached: the handle is dropped and the task runs to completion on its own.
    state.processor.spawn(job);

    metrics::counter!("visit_jobs_submitted_total").increment(1);
    tracing::info!(job_id, visits = request.count, "Visit job submitted");

    Ok((StatusCode::CREATED, Json(SubmitResponse { job_id })))
}

/// GET /api/status?jobid=N — Report a job's status and, if failed, its errors.
pub async fn get_job_status(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<JobStatusResponse>> {
    let raw = StatusQuery::from(pairs)
        .jobid
        .filter(|id| !id.is_empty())
        .ok_or(AppError::MissingJobId)?;

    let job_id: JobId = raw.parse().map_err(|_| AppError::JobNotFound)?;

    let snapshot = reporter::get_status(&state.registry, job_id).ok_or(AppError::JobNotFound)?;

    Ok(Json(snapshot.into()))
}
