//! Argon2id password hashing and verification.
//!
//! All password hashes use the Argon2id variant with a cryptographically random
//! salt generated via [`OsRng`]. The PHC string format is used for storage so
//! that algorithm parameters and salt are embedded in the hash itself, which
//! lets the work factor change without invalidating existing hashes.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

/// Argon2 work factor applied to newly created hashes.
#[derive(Debug, Clone, Default)]
pub struct HashingConfig {
    pub params: Params,
}

impl HashingConfig {
    /// Load the work factor from environment variables.
    ///
    /// | Env Var                     | Default |
    /// |-----------------------------|---------|
    /// | `PASSWORD_HASH_MEMORY_KIB`  | `19456` |
    /// | `PASSWORD_HASH_ITERATIONS`  | `2`     |
    /// | `PASSWORD_HASH_PARALLELISM` | `1`     |
    ///
    /// # Panics
    ///
    /// Panics if a value does not parse or the combination is rejected by Argon2.
    pub fn from_env() -> Self {
        let read = |key: &str, default: u32| -> u32 {
            std::env::var(key)
                .map(|v| v.parse().unwrap_or_else(|_| panic!("{key} must be a valid u32")))
                .unwrap_or(default)
        };

        let params = Params::new(
            read("PASSWORD_HASH_MEMORY_KIB", Params::DEFAULT_M_COST),
            read("PASSWORD_HASH_ITERATIONS", Params::DEFAULT_T_COST),
            read("PASSWORD_HASH_PARALLELISM", Params::DEFAULT_P_COST),
            None,
        )
        .unwrap_or_else(|e| panic!("Invalid password hashing parameters: {e}"));

        Self { params }
    }

    fn hasher(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

/// Hash a plaintext password using Argon2id with a random salt.
///
/// Returns the PHC-formatted hash string (includes algorithm, params, salt, and hash).
pub fn hash_password(
    password: &str,
    config: &HashingConfig,
) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = config.hasher().hash_password(password.as_bytes(), &salt)?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored PHC-formatted Argon2id hash.
///
/// Returns `Ok(true)` if the password matches, `Ok(false)` if it does not.
/// The comparison inside `argon2` is constant-time.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Cheap parameters so the tests stay fast.
    fn fast_config() -> HashingConfig {
        HashingConfig {
            params: Params::new(1024, 1, 1, None).unwrap(),
        }
    }

    #[test]
    fn hash_and_verify() {
        let password = "correct-horse-battery-staple";
        let hash = hash_password(password, &fast_config()).expect("hashing should succeed");

        assert!(
            hash.starts_with("$argon2id$"),
            "expected argon2id PHC prefix"
        );
        assert!(!hash.contains(password), "plaintext must not leak into the hash");

        let verified = verify_password(password, &hash).expect("verify should succeed");
        assert!(verified, "correct password should verify as true");
    }

    #[test]
    fn wrong_password_fails() {
        let hash = hash_password("real-password", &fast_config()).unwrap();
        let verified = verify_password("wrong-password", &hash).expect("verify should succeed");
        assert!(!verified, "wrong password should verify as false");
    }

    #[test]
    fn configured_work_factor_is_embedded() {
        let hash = hash_password("pw", &fast_config()).unwrap();
        assert!(hash.contains("m=1024,t=1,p=1"), "got {hash}");
    }

    #[test]
    fn salts_differ_per_hash() {
        let config = fast_config();
        let a = hash_password("same", &config).unwrap();
        let b = hash_password("same", &config).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("pw", "not-a-phc-string").is_err());
    }
}
