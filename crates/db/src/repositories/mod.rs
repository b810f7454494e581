//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept a `&PgPool` (or, for writes that may join a transaction, any
//! Postgres executor) as the first argument.

pub mod admin_repo;
pub mod login_attempt_repo;
pub mod password_reset_token_repo;

pub use admin_repo::{AdminRepo, CreateAdminError};
pub use login_attempt_repo::LoginAttemptRepo;
pub use password_reset_token_repo::PasswordResetTokenRepo;
