//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use kelvisan_core::types::DbId;

use crate::auth::jwt::verify_token;
use crate::auth::service::invalid_bearer_token;
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated admin extracted from `Authorization: Bearer <token>`.
///
/// Use this as an extractor parameter in any handler that requires authentication:
///
/// ```ignore
/// async fn my_handler(admin: AuthAdmin) -> AppResult<Json<()>> {
///     tracing::info!(admin_id = %admin.admin_id, role = %admin.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
///
/// A missing header, a malformed header and a bad or expired token are all
/// rejected with the same 401.
#[derive(Debug, Clone)]
pub struct AuthAdmin {
    /// The admin's id (from `claims.sub`).
    pub admin_id: DbId,
    /// The admin's email as of token issuance.
    pub email: String,
    /// The admin's role name.
    pub role: String,
}

impl FromRequestParts<AppState> for AuthAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let claims = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .and_then(|token| verify_token(token.trim(), state.auth.jwt()))
            .ok_or_else(invalid_bearer_token)?;

        Ok(AuthAdmin {
            admin_id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}
