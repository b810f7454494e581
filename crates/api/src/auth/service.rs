//! Orchestration of the admin-authentication flows.
//!
//! [`AuthService`] owns everything the flows need (pool, policy, codec
//! settings, mailer) as explicit values handed in at startup, so tests can
//! build one with fixtures instead of environment variables.
//!
//! Reset-token lifecycle, per token:
//!
//! ```text
//! ISSUED -> VALID (unused, unexpired) -> CONSUMED | EXPIRED
//! ```
//!
//! `CONSUMED` and `EXPIRED` are terminal and look identical to callers.

use std::sync::Arc;

use chrono::{Duration, Utc};
use kelvisan_core::auth_policy::{is_locked_out, DEFAULT_ADMIN_ROLE};
use kelvisan_core::credentials::{require, require_secret, validate_email};
use kelvisan_core::error::CoreError;
use kelvisan_core::tokens::generate_secure_token;
use kelvisan_core::types::DbId;
use kelvisan_db::models::admin::{Admin, CreateAdmin};
use kelvisan_db::repositories::{AdminRepo, LoginAttemptRepo, PasswordResetTokenRepo};
use kelvisan_db::DbPool;
use kelvisan_mailer::templates::{password_reset_html, PASSWORD_RESET_SUBJECT};
use kelvisan_mailer::Mailer;
use url::Url;

use crate::auth::jwt::{issue_token, JwtConfig};
use crate::auth::password::{hash_password, verify_password, HashingConfig};
use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

/// Plaintext run through the hasher for unknown emails so a miss costs
/// as much time as a wrong password.
const TIMING_DECOY_PASSWORD: &str = "kelvisan-timing-decoy";

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Login, registration and password-reset flows.
pub struct AuthService {
    pool: DbPool,
    jwt: JwtConfig,
    hashing: HashingConfig,
    policy: AuthConfig,
    mailer: Arc<dyn Mailer>,
    decoy_hash: String,
}

impl AuthService {
    /// Build the service. Hashes the timing decoy once up front, which is
    /// the only fallible step.
    pub fn new(
        pool: DbPool,
        jwt: JwtConfig,
        hashing: HashingConfig,
        policy: AuthConfig,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, argon2::password_hash::Error> {
        let decoy_hash = hash_password(TIMING_DECOY_PASSWORD, &hashing)?;
        Ok(Self {
            pool,
            jwt,
            hashing,
            policy,
            mailer,
            decoy_hash,
        })
    }

    /// Bearer-token settings, for the request extractor.
    pub fn jwt(&self) -> &JwtConfig {
        &self.jwt
    }

    // -----------------------------------------------------------------------
    // Login
    // -----------------------------------------------------------------------

    /// Authenticate an admin and issue a bearer token.
    ///
    /// Every call appends to the login ledger. The lockout check is keyed on
    /// the submitted email alone and runs before the password is looked at,
    /// so an unknown email and a wrong password are indistinguishable, and a
    /// locked-out email is refused even with the right password.
    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> AppResult<LoginOutcome> {
        let email = require(email, "email")?;
        let password = require_secret(password, "password")?;

        if self.is_locked_out(email).await? {
            self.record_attempt(email, false).await;
            tracing::warn!("Login refused: too many failed attempts");
            return Err(CoreError::TooManyAttempts.into());
        }

        let admin = AdminRepo::find_by_email(&self.pool, email).await?;
        let stored_hash = admin
            .as_ref()
            .map_or_else(|| self.decoy_hash.clone(), |a| a.password_hash.clone());
        let matched = self.verify(password, stored_hash).await? && admin.is_some();

        self.record_attempt(email, matched).await;

        let known_account = admin.is_some();
        let admin = match admin {
            Some(admin) if matched => admin,
            _ => {
                tracing::warn!(known_account, "Login failed");
                if self.is_locked_out(email).await? {
                    return Err(CoreError::TooManyAttempts.into());
                }
                return Err(invalid_credentials());
            }
        };

        let token = issue_token(admin.id, &admin.email, &admin.role, &self.jwt)
            .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

        tracing::info!(admin_id = %admin.id, "Admin logged in");
        Ok(LoginOutcome {
            token,
            expires_in: self.jwt.expiry_mins * 60,
        })
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Create a new admin, subject to the admin ceiling.
    pub async fn register(&self, email: Option<&str>, password: Option<&str>) -> AppResult<Admin> {
        let email = require(email, "email")?;
        let password = require_secret(password, "password")?;
        validate_email(email)?;

        if AdminRepo::find_by_email(&self.pool, email).await?.is_some() {
            return Err(CoreError::Conflict("Admin with that email already exists".into()).into());
        }

        let input = CreateAdmin {
            email: email.to_string(),
            password_hash: self.hash(password).await?,
            role: DEFAULT_ADMIN_ROLE.to_string(),
        };

        // The store re-checks both the ceiling and uniqueness atomically;
        // its verdict wins over the pre-check above.
        let admin = AdminRepo::create(&self.pool, &input, self.policy.admin_ceiling).await?;

        tracing::info!(admin_id = %admin.id, "Admin registered");
        Ok(admin)
    }

    // -----------------------------------------------------------------------
    // Forgot password
    // -----------------------------------------------------------------------

    /// Issue a reset token and email the link.
    ///
    /// Returns `Ok(())` both when the link was sent and when no admin has
    /// this email. Only genuine failures (store, mailer) surface as errors.
    ///
    /// The new token and the revocation of older ones commit only after the
    /// mailer accepts the message. A failed send leaves the previously
    /// delivered link usable.
    ///
    /// The unknown-email path skips the store writes and the SMTP round
    /// trip, so it answers faster than the known-email path. The body and
    /// status are identical; the timing is not.
    pub async fn forgot_password(&self, email: Option<&str>) -> AppResult<()> {
        let email = require(email, "email")?;

        let Some(admin) = AdminRepo::find_by_email(&self.pool, email).await? else {
            tracing::info!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_secure_token(self.policy.reset_token_length);
        let expires_at = Utc::now() + Duration::minutes(self.policy.reset_token_expiry_mins);

        let mut tx = self.pool.begin().await?;
        let revoked =
            PasswordResetTokenRepo::invalidate_outstanding_for_admin(&mut *tx, admin.id).await?;
        PasswordResetTokenRepo::save(&mut *tx, admin.id, &token, expires_at).await?;

        let link = self.reset_link(&token, &admin.email);
        let body = password_reset_html(link.as_str(), self.policy.reset_token_expiry_mins);
        // On failure `tx` is dropped and both writes roll back.
        self.mailer
            .send(&admin.email, PASSWORD_RESET_SUBJECT, &body)
            .await?;
        tx.commit().await?;

        tracing::info!(admin_id = %admin.id, revoked, "Password reset link sent");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Reset password
    // -----------------------------------------------------------------------

    /// Set a new password using a reset token.
    ///
    /// The password update and the token consumption commit together. The
    /// consumption only succeeds on a still-unused row, so two concurrent
    /// requests with the same token cannot both change the password.
    pub async fn reset_password(
        &self,
        token: Option<&str>,
        email: Option<&str>,
        new_password: Option<&str>,
    ) -> AppResult<()> {
        let token = require(token, "token")?;
        let email = require(email, "email")?;
        let new_password = require_secret(new_password, "newPassword")?;

        let record = PasswordResetTokenRepo::find_valid(&self.pool, token)
            .await?
            .ok_or_else(invalid_reset_token)?;

        let admin = AdminRepo::find_by_id(&self.pool, record.admin_id)
            .await?
            .ok_or_else(|| admin_not_found(record.admin_id))?;

        if admin.email != email {
            tracing::warn!(admin_id = %admin.id, "Reset token presented with a different email");
            return Err(invalid_reset_token());
        }

        let password_hash = self.hash(new_password).await?;

        let mut tx = self.pool.begin().await?;
        AdminRepo::update_password(&mut *tx, admin.id, &password_hash)
            .await?
            .ok_or_else(|| admin_not_found(admin.id))?;
        if PasswordResetTokenRepo::invalidate(&mut *tx, token)
            .await?
            .is_none()
        {
            // Consumed by a concurrent request; dropping `tx` rolls back
            // the password update.
            return Err(invalid_reset_token());
        }
        tx.commit().await?;

        tracing::info!(admin_id = %admin.id, "Password reset completed");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Current admin
    // -----------------------------------------------------------------------

    /// Load the admin a verified bearer token refers to.
    ///
    /// A token whose admin has since been deleted is treated like an
    /// invalid token.
    pub async fn current_admin(&self, admin_id: DbId) -> AppResult<Admin> {
        AdminRepo::find_by_id(&self.pool, admin_id)
            .await?
            .ok_or_else(invalid_bearer_token)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn is_locked_out(&self, email: &str) -> AppResult<bool> {
        let failed = LoginAttemptRepo::count_failed_since(
            &self.pool,
            email,
            self.policy.lockout_window_mins,
        )
        .await?;
        Ok(is_locked_out(failed, self.policy.lockout_threshold))
    }

    /// Append to the ledger. A write failure is logged and otherwise
    /// ignored so it never changes the login response.
    async fn record_attempt(&self, email: &str, success: bool) {
        if let Err(e) = LoginAttemptRepo::record(&self.pool, email, success).await {
            tracing::warn!(error = %e, success, "Failed to record login attempt");
        }
    }

    /// Hash on the blocking pool; Argon2 is deliberately slow.
    async fn hash(&self, password: &str) -> AppResult<String> {
        let password = password.to_owned();
        let hashing = self.hashing.clone();
        tokio::task::spawn_blocking(move || hash_password(&password, &hashing))
            .await
            .map_err(|e| AppError::InternalError(format!("Password hashing task failed: {e}")))?
            .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))
    }

    async fn verify(&self, password: &str, hash: String) -> AppResult<bool> {
        let password = password.to_owned();
        tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|e| AppError::InternalError(format!("Password verification task failed: {e}")))?
            .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))
    }

    fn reset_link(&self, token: &str, email: &str) -> Url {
        let mut link = self.policy.reset_url_base.clone();
        link.query_pairs_mut()
            .append_pair("token", token)
            .append_pair("email", email);
        link
    }
}

fn invalid_credentials() -> AppError {
    CoreError::Unauthorized("Invalid credentials".into()).into()
}

fn invalid_reset_token() -> AppError {
    CoreError::InvalidToken("Invalid or expired reset token".into()).into()
}

pub(crate) fn invalid_bearer_token() -> AppError {
    CoreError::Unauthorized("Invalid or expired token".into()).into()
}

fn admin_not_found(id: DbId) -> AppError {
    CoreError::NotFound { entity: "Admin", id }.into()
}
