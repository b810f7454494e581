//! Request extractors shared by protected handlers.

pub mod auth;
