//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row and, where rows are inserted from Rust, a create DTO.

pub mod admin;
pub mod login_attempt;
pub mod password_reset_token;
