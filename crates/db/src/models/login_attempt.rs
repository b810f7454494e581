//! Login attempt ledger row.

use kelvisan_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the append-only `login_attempts` table.
#[derive(Debug, Clone, FromRow)]
pub struct LoginAttempt {
    pub id: i64,
    pub email: String,
    pub success: bool,
    pub attempted_at: Timestamp,
}
