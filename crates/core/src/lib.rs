//! Kelvisan domain layer.
//!
//! Holds everything the admin-authentication service needs that does not
//! touch I/O: the error taxonomy, shared id/timestamp aliases, the auth
//! policy defaults, credential validation, and reset-secret generation.

pub mod auth_policy;
pub mod credentials;
pub mod error;
pub mod tokens;
pub mod types;
