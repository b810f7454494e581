//! Handlers for the `/auth` resource (login, register, password reset, me).
//!
//! Every body field is optional at the serde level so a missing field is
//! reported as a validation error by the service. Bodies that fail to parse
//! are turned into a 400 by [`JsonBody`].

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use kelvisan_core::auth_policy::FORGOT_PASSWORD_MESSAGE;
use kelvisan_db::models::admin::AdminResponse;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::middleware::auth::AuthAdmin;
use crate::response::{DataResponse, MessageResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login` and `POST /auth/register`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for `POST /auth/forgot-password`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ForgotPasswordRequest {
    pub email: Option<String>,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: Option<String>,
    pub email: Option<String>,
    pub new_password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CredentialsRequest>,
) -> AppResult<Json<LoginResponse>> {
    let outcome = state
        .auth
        .login(input.email.as_deref(), input.password.as_deref())
        .await?;

    Ok(Json(LoginResponse {
        token: outcome.token,
        expires_in: outcome.expires_in,
    }))
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    state
        .auth
        .register(input.email.as_deref(), input.password.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Admin created successfully.",
        }),
    ))
}

/// POST /api/auth/forgot-password
///
/// Answers identically whether or not the email belongs to an admin.
pub async fn forgot_password(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state.auth.forgot_password(input.email.as_deref()).await?;

    Ok(Json(MessageResponse {
        message: FORGOT_PASSWORD_MESSAGE,
    }))
}

/// POST /api/auth/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .auth
        .reset_password(
            input.token.as_deref(),
            input.email.as_deref(),
            input.new_password.as_deref(),
        )
        .await?;

    Ok(Json(MessageResponse {
        message: "Password updated successfully.",
    }))
}

/// GET /api/auth/me
///
/// Profile of the admin the bearer token belongs to.
pub async fn me(
    State(state): State<AppState>,
    admin: AuthAdmin,
) -> AppResult<Json<DataResponse<AdminResponse>>> {
    let record = state.auth.current_admin(admin.admin_id).await?;
    Ok(Json(DataResponse {
        data: record.into(),
    }))
}
