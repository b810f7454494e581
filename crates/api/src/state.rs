use std::sync::Arc;

use crate::auth::service::AuthService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: kelvisan_db::DbPool,
    /// Login, registration and password-reset orchestration.
    pub auth: Arc<AuthService>,
}
