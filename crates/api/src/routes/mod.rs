pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login             login (public)
/// /auth/register          register (public, capped by the admin ceiling)
/// /auth/forgot-password   request a reset link (public)
/// /auth/reset-password    set a new password with a reset token (public)
/// /auth/me                current admin (requires bearer token)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/auth", auth::router())
}
