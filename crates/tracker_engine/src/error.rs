use thiserror::Error;

pub const SUBMIT_FILE_FALLBACK: &str = "Failed to upload video";
pub const SUBMIT_URL_FALLBACK: &str = "Failed to process video URL";
pub const POLLING_FALLBACK: &str = "Failed to check task status";
pub const JOB_FAILURE_FALLBACK: &str = "Task failed. Please try again.";
pub const RESULT_FETCH_FALLBACK: &str = "Failed to fetch task result";

/// Failure of a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BackendError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("http status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("unexpected response body: {0}")]
    Decode(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl BackendError {
    /// The diagnostic the backend attached to an error response, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            BackendError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message shown to the user: backend detail, then local validation
    /// message, then the call site's fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            BackendError::Status {
                detail: Some(detail),
                ..
            } => detail.clone(),
            BackendError::InvalidRequest(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

/// Terminal failure of a tracked job, as surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackerError {
    #[error("{message}")]
    Submission { message: String },
    #[error("{message}")]
    Polling { message: String },
    #[error("{message}")]
    JobFailure { message: String },
    #[error("{message}")]
    ResultFetch { message: String },
}

impl TrackerError {
    pub fn message(&self) -> &str {
        match self {
            TrackerError::Submission { message }
            | TrackerError::Polling { message }
            | TrackerError::JobFailure { message }
            | TrackerError::ResultFetch { message } => message,
        }
    }
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build backend client: {0}")]
    Backend(#[from] BackendError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_detail() {
        let err = BackendError::Status {
            status: 400,
            detail: Some("File must be a video".to_string()),
        };
        assert_eq!(err.user_message(SUBMIT_FILE_FALLBACK), "File must be a video");
        assert_eq!(err.detail(), Some("File must be a video"));
    }

    #[test]
    fn user_message_falls_back_without_detail() {
        let err = BackendError::Status {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message(SUBMIT_URL_FALLBACK), SUBMIT_URL_FALLBACK);
        assert_eq!(
            BackendError::Transport("connection refused".into()).user_message(POLLING_FALLBACK),
            POLLING_FALLBACK
        );
        assert_eq!(
            BackendError::Decode("eof".into()).user_message(POLLING_FALLBACK),
            POLLING_FALLBACK
        );
    }

    #[test]
    fn tracker_error_displays_its_message() {
        let err = TrackerError::JobFailure {
            message: "model crashed".to_string(),
        };
        assert_eq!(err.to_string(), "model crashed");
        assert_eq!(err.message(), "model crashed");
    }
}
