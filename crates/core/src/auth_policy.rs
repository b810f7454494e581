//! Default values for the authentication policy knobs.
//!
//! The API crate overrides every one of these from the environment; they
//! live here so tests and tooling agree on the same baseline.

/// Failed attempts inside the window at which login is refused.
pub const DEFAULT_LOCKOUT_THRESHOLD: i64 = 5;

/// Trailing window, in minutes, over which failed attempts are counted.
pub const DEFAULT_LOCKOUT_WINDOW_MINS: i32 = 15;

/// Maximum number of admin identities that may exist.
pub const DEFAULT_ADMIN_CEILING: i64 = 4;

/// Length in characters of a password-reset secret.
pub const DEFAULT_RESET_TOKEN_LENGTH: usize = 32;

/// Validity window of a password-reset secret, in minutes.
pub const DEFAULT_RESET_TOKEN_EXPIRY_MINS: i64 = 60;

/// Bearer-token lifetime in minutes.
pub const DEFAULT_SESSION_EXPIRY_MINS: i64 = 60;

/// Role stored on newly registered admins.
pub const DEFAULT_ADMIN_ROLE: &str = "admin";

/// Response body for forgot-password, identical whether or not the
/// account exists.
pub const FORGOT_PASSWORD_MESSAGE: &str =
    "If an account with that email exists, a password reset link has been sent.";

/// Returns `true` when the number of failed attempts in the window means
/// the next login must be refused.
pub fn is_locked_out(failed_in_window: i64, threshold: i64) -> bool {
    failed_in_window >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockout_trips_at_threshold() {
        assert!(!is_locked_out(4, DEFAULT_LOCKOUT_THRESHOLD));
        assert!(is_locked_out(5, DEFAULT_LOCKOUT_THRESHOLD));
        assert!(is_locked_out(9, DEFAULT_LOCKOUT_THRESHOLD));
    }

    #[test]
    fn zero_threshold_always_locks() {
        assert!(is_locked_out(0, 0));
    }
}
