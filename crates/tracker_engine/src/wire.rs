//! JSON bodies exchanged with the analysis backend.

use serde::{Deserialize, Serialize};

/// Response to either submission endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    pub task_id: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SubmitUrlRequest<'a> {
    pub video_url: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResultResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<ResultPayload>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct ResultPayload {
    #[serde(default)]
    pub action_segments: Option<Vec<WireSegment>>,
    #[serde(default)]
    pub downloaded_video_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WireSegment {
    pub action: String,
    pub start_time: WireTime,
    pub end_time: WireTime,
}

/// Segment times arrive either as seconds or as `"MM:SS"` text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WireTime {
    Seconds(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CleanupResponse {
    pub message: String,
}

/// Error body of any non-2xx response. `detail` is usually a string but
/// validation errors carry a list.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub(crate) fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(text) if text.trim().is_empty() => None,
            serde_json::Value::String(text) => Some(text.clone()),
            other => Some(other.to_string()),
        }
    }
}
