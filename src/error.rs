use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request validation failures surfaced to HTTP clients.
///
/// Problems found while a job runs are recorded on the job instead and never
/// reach this type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid JSON payload")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("Count does not match the number of visits")]
    CountMismatch,

    #[error("Missing jobid parameter")]
    MissingJobId,

    #[error("Job not found")]
    JobNotFound,
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidPayload(err) => {
                tracing::debug!(error = %err, "Rejected submission body");
                StatusCode::BAD_REQUEST
            }
            AppError::CountMismatch | AppError::MissingJobId | AppError::JobNotFound => {
                StatusCode::BAD_REQUEST
            }
        };

        (status, self.to_string()).into_response()
    }
}
