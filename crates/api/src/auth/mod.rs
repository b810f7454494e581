//! Authentication primitives and orchestration.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- bearer-token issuance and verification.
//! - [`service`] -- [`AuthService`](service::AuthService): login, registration,
//!   forgot-password and reset-password flows.

pub mod jwt;
pub mod password;
pub mod service;
