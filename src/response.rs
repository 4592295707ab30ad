use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status and parsed body of one call, read together so the caller awaits once.
///
/// `msg` is the reason phrase from the status line. `body` holds the remote
/// diagnostics when `success` is false, and is `Value::Null` when the server
/// sent no body (e.g. `204 No Content`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SfResponse {
    pub success: bool,
    pub status: u16,
    pub msg: String,
    pub body: Value,
}

impl SfResponse {
    pub fn new(status: StatusCode, msg: impl Into<String>, body: Value) -> Self {
        SfResponse {
            success: status.is_success(),
            status: status.as_u16(),
            msg: msg.into(),
            body,
        }
    }

    /// `None` only for a hand-built envelope with an out-of-range status.
    pub fn status_code(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.status).ok()
    }

    /// Record id from an insert response (`{"id": "...", "success": true}`).
    pub fn id(&self) -> Option<&str> {
        self.body.get("id").and_then(Value::as_str)
    }
}
