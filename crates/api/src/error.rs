use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kelvisan_core::error::CoreError;
use kelvisan_db::repositories::CreateAdminError;
use kelvisan_mailer::MailError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds dependency-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `kelvisan_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The outbound mailer failed.
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<CreateAdminError> for AppError {
    fn from(err: CreateAdminError) -> Self {
        match err {
            CreateAdminError::LimitExceeded { ceiling } => {
                AppError::Core(CoreError::LimitExceeded { limit: ceiling })
            }
            CreateAdminError::DuplicateEmail => AppError::Core(CoreError::Conflict(
                "Admin with that email already exists".into(),
            )),
            CreateAdminError::Database(e) => AppError::Database(e),
        }
    }
}

/// Generic message shown for every 5xx so internals never reach the client.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::InvalidToken(msg) => {
                    (StatusCode::BAD_REQUEST, "INVALID_TOKEN", msg.clone())
                }
                CoreError::LimitExceeded { limit } => (
                    StatusCode::FORBIDDEN,
                    "LIMIT_EXCEEDED",
                    format!("Admin limit of {limit} reached"),
                ),
                CoreError::TooManyAttempts => (
                    StatusCode::FORBIDDEN,
                    "TOO_MANY_ATTEMPTS",
                    "Too many failed attempts. Try again later.".to_string(),
                ),
            },

            // --- Dependency errors ---
            AppError::Database(err) => classify_sqlx_error(err),
            AppError::Mail(err) => {
                tracing::error!(error = %err, "Mail delivery failed");
                internal()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if let sqlx::Error::Database(db_err) = err {
        // PostgreSQL unique constraint violation: error code 23505
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    internal()
}
