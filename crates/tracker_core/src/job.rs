use std::fmt;

/// Local counter identifying one submit action, assigned before the backend
/// has handed out a [`JobId`].
pub type SubmissionTicket = u64;

/// Opaque job identifier assigned by the backend at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JobId(String);

impl JobId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for JobId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Submitting,
    Processing,
    Succeeded,
    Failed,
}

impl LifecycleState {
    pub fn is_terminal(self) -> bool {
        matches!(self, LifecycleState::Succeeded | LifecycleState::Failed)
    }
}

/// Which submission path produced a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    File,
    Url,
}

/// One detected action interval, in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub action: String,
    pub start_time: f64,
    pub end_time: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// Backend order, never re-sorted.
    pub segments: Vec<Segment>,
    pub media_locator: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport or validation failure before a job existed.
    Submission,
    /// The status query itself failed.
    Polling,
    /// The backend reported the job as failed.
    JobFailure,
    /// The result could not be retrieved or was malformed.
    ResultFetch,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Submission => write!(f, "submission"),
            FailureKind::Polling => write!(f, "polling"),
            FailureKind::JobFailure => write!(f, "job failure"),
            FailureKind::ResultFetch => write!(f, "result fetch"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}
