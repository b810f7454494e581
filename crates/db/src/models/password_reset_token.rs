//! Password-reset token model.

use kelvisan_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `password_reset_tokens` table.
///
/// The `token` field is the secret itself; do not log it.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub admin_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
    pub used: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
