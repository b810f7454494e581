//! Repository for the append-only `login_attempts` ledger.

use sqlx::PgPool;

use crate::models::login_attempt::LoginAttempt;

/// Provides append and aggregate operations over login attempts.
pub struct LoginAttemptRepo;

impl LoginAttemptRepo {
    /// Append one attempt for `email`, stamped with the database clock.
    pub async fn record(
        pool: &PgPool,
        email: &str,
        success: bool,
    ) -> Result<LoginAttempt, sqlx::Error> {
        sqlx::query_as::<_, LoginAttempt>(
            "INSERT INTO login_attempts (email, success, attempted_at)
             VALUES ($1, $2, NOW())
             RETURNING id, email, success, attempted_at",
        )
        .bind(email)
        .bind(success)
        .fetch_one(pool)
        .await
    }

    /// Count failed attempts for the exact `email` string within the
    /// trailing `window_mins` minutes.
    pub async fn count_failed_since(
        pool: &PgPool,
        email: &str,
        window_mins: i32,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM login_attempts
             WHERE email = $1
               AND success = false
               AND attempted_at > NOW() - make_interval(mins => $2)",
        )
        .bind(email)
        .bind(window_mins)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
