use std::str::FromStr;

use kelvisan_core::auth_policy::{
    DEFAULT_ADMIN_CEILING, DEFAULT_LOCKOUT_THRESHOLD, DEFAULT_LOCKOUT_WINDOW_MINS,
    DEFAULT_RESET_TOKEN_EXPIRY_MINS, DEFAULT_RESET_TOKEN_LENGTH,
};
use kelvisan_mailer::EmailConfig;
use url::Url;

use crate::auth::jwt::JwtConfig;
use crate::auth::password::HashingConfig;

/// Default frontend page that password-reset links point at.
const DEFAULT_RESET_URL_BASE: &str = "http://localhost:5173/reset-password";

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Bearer-token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Password hashing work factor.
    pub hashing: HashingConfig,
    /// Lockout, ceiling and reset-token policy.
    pub auth: AuthConfig,
    /// SMTP settings; `None` installs a mailer that always fails.
    pub email: Option<EmailConfig>,
}

/// Tunables of the authentication flows.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Failed attempts within the window at which login is refused.
    pub lockout_threshold: i64,
    /// Trailing window, in minutes, for counting failed attempts.
    pub lockout_window_mins: i32,
    /// Maximum number of admin identities.
    pub admin_ceiling: i64,
    /// Length in characters of a generated reset secret.
    pub reset_token_length: usize,
    /// Validity of a reset secret, in minutes.
    pub reset_token_expiry_mins: i64,
    /// Frontend page the emailed reset link points at; `token` and
    /// `email` are appended as query parameters.
    pub reset_url_base: Url,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            lockout_threshold: DEFAULT_LOCKOUT_THRESHOLD,
            lockout_window_mins: DEFAULT_LOCKOUT_WINDOW_MINS,
            admin_ceiling: DEFAULT_ADMIN_CEILING,
            reset_token_length: DEFAULT_RESET_TOKEN_LENGTH,
            reset_token_expiry_mins: DEFAULT_RESET_TOKEN_EXPIRY_MINS,
            reset_url_base: Url::parse(DEFAULT_RESET_URL_BASE)
                .unwrap_or_else(|e| panic!("Invalid default reset URL: {e}")),
        }
    }
}

impl AuthConfig {
    /// Load the auth policy from environment variables with defaults.
    ///
    /// | Env Var                      | Default                                 |
    /// |------------------------------|-----------------------------------------|
    /// | `LOGIN_LOCKOUT_THRESHOLD`    | `5`                                     |
    /// | `LOGIN_LOCKOUT_WINDOW_MINS`  | `15`                                    |
    /// | `ADMIN_CEILING`              | `4`                                     |
    /// | `RESET_TOKEN_LENGTH`         | `32`                                    |
    /// | `RESET_TOKEN_EXPIRY_MINS`    | `60`                                    |
    /// | `RESET_URL_BASE`             | `http://localhost:5173/reset-password`  |
    ///
    /// # Panics
    ///
    /// Panics on unparseable values or a reset token shorter than 16 characters.
    pub fn from_env() -> Self {
        let reset_token_length: usize = env_or("RESET_TOKEN_LENGTH", DEFAULT_RESET_TOKEN_LENGTH);
        assert!(
            reset_token_length >= 16,
            "RESET_TOKEN_LENGTH must be at least 16"
        );

        let reset_url_base = std::env::var("RESET_URL_BASE")
            .unwrap_or_else(|_| DEFAULT_RESET_URL_BASE.into());
        let reset_url_base = Url::parse(&reset_url_base)
            .unwrap_or_else(|e| panic!("RESET_URL_BASE must be a valid URL: {e}"));

        Self {
            lockout_threshold: env_or("LOGIN_LOCKOUT_THRESHOLD", DEFAULT_LOCKOUT_THRESHOLD),
            lockout_window_mins: env_or("LOGIN_LOCKOUT_WINDOW_MINS", DEFAULT_LOCKOUT_WINDOW_MINS),
            admin_ceiling: env_or("ADMIN_CEILING", DEFAULT_ADMIN_CEILING),
            reset_token_length,
            reset_token_expiry_mins: env_or(
                "RESET_TOKEN_EXPIRY_MINS",
                DEFAULT_RESET_TOKEN_EXPIRY_MINS,
            ),
            reset_url_base,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    ///
    /// Nested sections are documented on [`JwtConfig::from_env`],
    /// [`HashingConfig::from_env`], [`AuthConfig::from_env`] and
    /// [`EmailConfig::from_env`].
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 3000);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            hashing: HashingConfig::from_env(),
            auth: AuthConfig::from_env(),
            email: EmailConfig::from_env(),
        }
    }
}

/// Read `key` from the environment, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse as `T`.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|_| panic!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}
