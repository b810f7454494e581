use crate::types::DbId;

/// Domain error taxonomy shared by every layer of the service.
///
/// Each variant maps to exactly one HTTP status in the API crate; the
/// mapping lives there so this crate stays free of HTTP types.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Bad credentials or an invalid bearer token.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// A password-reset secret that is wrong, expired, already used, or
    /// presented with the wrong email. The causes are never distinguished.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Admin limit of {limit} reached")]
    LimitExceeded { limit: i64 },

    #[error("Too many failed login attempts")]
    TooManyAttempts,
}
