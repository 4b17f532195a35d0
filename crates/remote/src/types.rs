//! Response types for the request-manager API.

use serde::Deserialize;

/// Upload response document: `{ "status": "ok"|"error", "error"?: string }`.
///
/// Parsed once per upload attempt and consumed immediately to decide the
/// outcome. Any status other than `"error"` counts as success.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    #[serde(default)]
    pub error: Option<String>,
}

impl ApiResponse {
    /// True when the backend reported an application-level failure.
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}
