//! Repository for the `admins` table.

use kelvisan_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::admin::{Admin, CreateAdmin};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, role, created_at, updated_at";

/// Name of the unique constraint on `admins.email`.
const EMAIL_CONSTRAINT: &str = "uq_admins_email";

/// PostgreSQL SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Failure modes of [`AdminRepo::create`].
#[derive(Debug, thiserror::Error)]
pub enum CreateAdminError {
    /// The table already holds `ceiling` admins.
    #[error("admin ceiling of {ceiling} reached")]
    LimitExceeded { ceiling: i64 },

    /// Another admin already uses this email.
    #[error("an admin with this email already exists")]
    DuplicateEmail,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Provides persistence operations for admin identities.
pub struct AdminRepo;

impl AdminRepo {
    /// Insert a new admin unless the table already holds `ceiling` rows.
    ///
    /// The count and the insert run in one transaction behind a
    /// `SHARE ROW EXCLUSIVE` table lock. That lock mode conflicts with
    /// itself, so concurrent registrations are serialized and can never
    /// push the row count past `ceiling`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAdmin,
        ceiling: i64,
    ) -> Result<Admin, CreateAdminError> {
        let mut tx = pool.begin().await?;

        sqlx::query("LOCK TABLE admins IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let count = Self::count(&mut *tx).await?;
        if count >= ceiling {
            tracing::debug!(count, ceiling, "Admin ceiling reached, insert refused");
            return Err(CreateAdminError::LimitExceeded { ceiling });
        }

        let query = format!(
            "INSERT INTO admins (email, password_hash, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let admin = sqlx::query_as::<_, Admin>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.role)
            .fetch_one(&mut *tx)
            .await
            .map_err(classify_insert_error)?;

        tx.commit().await?;
        Ok(admin)
    }

    /// Find an admin by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE id = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an admin by email (case-sensitive exact match).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Admin>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admins WHERE email = $1");
        sqlx::query_as::<_, Admin>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Count all admins.
    pub async fn count<'e, E>(executor: E) -> Result<i64, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admins")
            .fetch_one(executor)
            .await?;
        Ok(count)
    }

    /// Overwrite an admin's password hash and bump `updated_at`.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_password<'e, E>(
        executor: E,
        id: DbId,
        password_hash: &str,
    ) -> Result<Option<Admin>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "UPDATE admins SET password_hash = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Admin>(&query)
            .bind(id)
            .bind(password_hash)
            .fetch_optional(executor)
            .await
    }
}

/// Map a unique violation on the email constraint to
/// [`CreateAdminError::DuplicateEmail`]; pass everything else through.
fn classify_insert_error(err: sqlx::Error) -> CreateAdminError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION)
            && db_err.constraint() == Some(EMAIL_CONSTRAINT)
        {
            return CreateAdminError::DuplicateEmail;
        }
    }
    CreateAdminError::Database(err)
}
