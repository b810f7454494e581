//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope for resource payloads.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ... }` body for flows that return no resource.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
