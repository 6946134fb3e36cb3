use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Failure taxonomy crossing the core/presentation boundary. Every handler
/// maps onto one of these; nothing else escapes uncaught.
#[derive(Debug, Error)]
pub enum Error {
    /// Store unavailable or a read/write round-trip failed. Retryable.
    #[error("Store error, please retry: {0}")]
    Transient(#[from] sqlx::Error),

    /// Rejected before any write was attempted.
    #[error("{0}")]
    Validation(String),

    /// A state both sides agree must never exist (e.g. a calendar exception
    /// and attendance rows for the same group and date).
    #[error("{0}")]
    InvariantViolation(String),

    /// A full-roster attendance commit failed. Nothing from the batch was
    /// kept; the whole commit must be re-run.
    #[error("Attendance commit failed, no rows were saved: {0}")]
    BatchFailed(#[source] sqlx::Error),

    /// The exception row was written but the attendance purge failed,
    /// leaving both sides present. Re-running the operation repeats the
    /// purge.
    #[error("Exception saved but attendance purge failed, re-run to finish: {0}")]
    PartiallyApplied(#[source] sqlx::Error),

    #[error("{0} not found")]
    NotFound(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Transient(_) | Error::BatchFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::InvariantViolation(_) | Error::PartiallyApplied(_) => StatusCode::CONFLICT,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "message": self.to_string()
        }))
    }
}
