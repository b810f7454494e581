//! Bearer-token issuance and verification.
//!
//! Tokens are HS256-signed JWTs containing a [`Claims`] payload. Verification
//! never errors: a bad signature, a malformed token and an expired token all
//! come back as `None`, and callers must not try to tell them apart.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use kelvisan_core::auth_policy::DEFAULT_SESSION_EXPIRY_MINS;
use kelvisan_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims embedded in every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the admin's id.
    pub sub: DbId,
    /// The admin's email at the time of issuance.
    pub email: String,
    /// The admin's role name (e.g. `"admin"`).
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4) for audit.
    pub jti: String,
}

/// Configuration for bearer-token generation and validation.
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Token lifetime in minutes (default: 60).
    pub expiry_mins: i64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiry_mins", &self.expiry_mins)
            .finish()
    }
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_MINS` | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty, or if
    /// `JWT_EXPIRY_MINS` is not a positive integer.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_mins: i64 = std::env::var("JWT_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_SESSION_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_EXPIRY_MINS must be a valid i64");
        assert!(expiry_mins > 0, "JWT_EXPIRY_MINS must be positive");

        Self {
            secret,
            expiry_mins,
        }
    }
}

/// Issue an HS256 bearer token bound to the given admin.
pub fn issue_token(
    admin_id: DbId,
    email: &str,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let exp = now + config.expiry_mins * 60;

    let claims = Claims {
        sub: admin_id,
        email: email.to_string(),
        role: role.to_string(),
        exp,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify a bearer token, returning its [`Claims`] or `None` on any failure.
///
/// Expiry is enforced to the second: no clock-skew leeway past `exp`.
pub fn verify_token(token: &str, config: &JwtConfig) -> Option<Claims> {
    let mut validation = Validation::default(); // HS256, validates exp
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .ok()
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper to build a test config with a known secret.
    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_mins: 60,
        }
    }

    #[test]
    fn issue_and_verify() {
        let config = test_config();
        let id = Uuid::new_v4();
        let token = issue_token(id, "a@x.com", "admin", &config).expect("issue should succeed");

        let claims = verify_token(&token, &config).expect("token should verify");
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp - claims.iat, 60 * 60);
        assert!(!claims.jti.is_empty());
    }

    /// Sign claims expiring `exp_offset` seconds from now.
    fn token_expiring_in(exp_offset: i64, config: &JwtConfig) -> String {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@x.com".to_string(),
            role: "admin".to_string(),
            exp: now + exp_offset,
            iat: now - 3600,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed")
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();
        let token = token_expiring_in(-300, &config);
        assert!(verify_token(&token, &config).is_none());
    }

    #[test]
    fn token_expired_seconds_ago_is_rejected() {
        let config = test_config();
        let token = token_expiring_in(-5, &config);
        assert!(verify_token(&token, &config).is_none());
    }

    #[test]
    fn token_near_expiry_still_verifies() {
        let config = test_config();
        let token = token_expiring_in(30, &config);
        assert!(verify_token(&token, &config).is_some());
    }

    #[test]
    fn different_secret_is_rejected() {
        let config_a = JwtConfig {
            secret: "secret-alpha".to_string(),
            expiry_mins: 60,
        };
        let config_b = JwtConfig {
            secret: "secret-bravo".to_string(),
            expiry_mins: 60,
        };

        let token = issue_token(Uuid::new_v4(), "a@x.com", "admin", &config_a).unwrap();
        assert!(verify_token(&token, &config_b).is_none());
    }

    #[test]
    fn garbage_is_rejected_without_panicking() {
        let config = test_config();
        assert!(verify_token("", &config).is_none());
        assert!(verify_token("not.a.jwt", &config).is_none());
    }

    #[test]
    fn debug_redacts_secret() {
        let rendered = format!("{:?}", test_config());
        assert!(!rendered.contains("test-secret"));
    }
}
