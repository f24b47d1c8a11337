//! HTTP error type.
//!
//! Every failure is rendered as `{ "error": <message>, "code": <CODE> }`.
//! CSV rejections add `details` with one entry per problem found.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use checklist_core::error::CoreError;
use checklist_db::RepoError;
use serde::Serialize;

const INTERNAL_MESSAGE: &str = "An internal error occurred";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed request that never reached the service layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A CSV upload that failed validation. Nothing was written.
    #[error("CSV rejected: {message}")]
    CsvRejected { message: String, errors: Vec<String> },

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Database(e) => AppError::Database(e),
            RepoError::Ordering(e) => AppError::Core(e.into()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Vec<String>>,
}

impl ErrorBody {
    fn new(code: &'static str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }
}

impl AppError {
    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Core(CoreError::NotFound { entity, id }) => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("NOT_FOUND", format!("{entity} with id {id} not found")),
            ),
            AppError::Core(CoreError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("VALIDATION_ERROR", msg))
            }
            AppError::Core(CoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, ErrorBody::new("CONFLICT", msg))
            }
            AppError::Core(CoreError::Forbidden(msg)) => {
                (StatusCode::FORBIDDEN, ErrorBody::new("FORBIDDEN", msg))
            }
            AppError::Core(CoreError::Internal(msg)) | AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
            AppError::Database(err) => classify_sqlx_error(&err),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorBody::new("BAD_REQUEST", msg))
            }
            AppError::CsvRejected { message, errors } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    details: Some(errors),
                    ..ErrorBody::new("CSV_VALIDATION_ERROR", message)
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, ErrorBody) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new("INTERNAL_ERROR", INTERNAL_MESSAGE),
    )
}

/// Map a sqlx error that escaped the service layer.
///
/// `RowNotFound` is 404 and a unique violation is 409. Anything else is
/// logged and reported as a generic 500.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", "Resource not found"),
        ),
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => (
            StatusCode::CONFLICT,
            ErrorBody::new("CONFLICT", "Duplicate value violates a unique constraint"),
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            internal()
        }
    }
}
