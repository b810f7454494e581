//! Repository for the `password_reset_tokens` table.

use kelvisan_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::password_reset_token::PasswordResetToken;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, admin_id, token, expires_at, used, created_at, updated_at";

/// Provides the lifecycle operations of password-reset tokens.
pub struct PasswordResetTokenRepo;

impl PasswordResetTokenRepo {
    /// Insert a new token row. Earlier tokens for the same admin are left
    /// untouched; see [`Self::invalidate_outstanding_for_admin`].
    pub async fn save<'e, E>(
        executor: E,
        admin_id: DbId,
        token: &str,
        expires_at: Timestamp,
    ) -> Result<PasswordResetToken, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO password_reset_tokens (admin_id, token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(admin_id)
            .bind(token)
            .bind(expires_at)
            .fetch_one(executor)
            .await
    }

    /// Find a token that matches exactly, is unused, and has not expired.
    ///
    /// A wrong, expired, or used token all yield `None`.
    pub async fn find_valid(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM password_reset_tokens
             WHERE token = $1
               AND used = false
               AND expires_at > NOW()"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Mark a token as used.
    ///
    /// Only flips a token that is still unused, so a second call returns
    /// `None` while leaving the row in the same dead state. Inside a
    /// transaction this doubles as the claim step of a reset: of two
    /// concurrent callers, only one gets the row back.
    pub async fn invalidate<'e, E>(
        executor: E,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE password_reset_tokens SET used = true, updated_at = NOW()
             WHERE token = $1 AND used = false
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token)
            .fetch_optional(executor)
            .await
    }

    /// Mark every unused, unexpired token of an admin as used.
    /// Returns the number of tokens revoked.
    pub async fn invalidate_outstanding_for_admin<'e, E>(
        executor: E,
        admin_id: DbId,
    ) -> Result<u64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query(
            "UPDATE password_reset_tokens SET used = true, updated_at = NOW()
             WHERE admin_id = $1 AND used = false AND expires_at > NOW()",
        )
        .bind(admin_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
