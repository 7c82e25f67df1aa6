//! Data Transfer Objects - response shapes that differ from the domain entities.

use serde::{Deserialize, Serialize};

/// Comment as echoed back by create and update; the timestamp is not re-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i32,
    pub post_id: i32,
    pub body: String,
}

/// Confirmation returned by every delete endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub detail: String,
}

impl DeletedResponse {
    /// `DeletedResponse::new("User")` serializes as `{"detail": "User deleted"}`.
    pub fn new(resource: &str) -> Self {
        Self {
            detail: format!("{resource} deleted"),
        }
    }
}
