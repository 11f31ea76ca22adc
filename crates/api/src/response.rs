//! Shared response envelope types for API handlers.
//!
//! Read endpoints use a `{ "data": ... }` envelope; workflow mutations add
//! a human-readable `message` string for the notification layer. Use these
//! instead of ad-hoc `serde_json::json!` to get compile-time type safety
//! and consistent serialization.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "message": ..., "data": T }` envelope for workflow mutations.
///
/// The message is advisory, human-readable text; correctness never depends
/// on it.
#[derive(Debug, Serialize)]
pub struct MessageResponse<T: Serialize> {
    pub message: String,
    pub data: T,
}
