use serde::{Deserialize, Serialize};

/// Error payload shape both APIs use for 4xx/5xx responses.
///
/// The `message` field is optional on the wire; callers fall back to a
/// static string when it is absent or the body is not JSON at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiErrorBody {
    /// Extract the upstream message from a raw error body, if any.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.is_empty())
    }
}
