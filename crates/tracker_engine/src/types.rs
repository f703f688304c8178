use crate::submit::SubmittedJob;
use crate::wire::WireSegment;
use crate::{BackendError, TrackerError};

/// Backend-assigned task identifier.
pub type TaskId = String;

/// Caller-chosen tag echoed back with the submission outcome.
pub type SubmissionTicket = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    File,
    Url,
}

/// Payload of a successfully finished task, not yet normalized.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskResult {
    /// `None` when the backend sent no `action_segments`.
    pub segments: Option<Vec<WireSegment>>,
    /// `downloaded_video_path` resolved against the backend base URL.
    pub media_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Submitted {
        ticket: SubmissionTicket,
        result: Result<SubmittedJob, TrackerError>,
    },
    /// A status tick returned a non-terminal status.
    StatusChanged { task_id: TaskId, status: String },
    /// Polling for the task ended.
    Completed {
        task_id: TaskId,
        result: Result<TaskResult, TrackerError>,
    },
    /// Answer to a health probe: the backend's reported status.
    Health(Result<String, BackendError>),
    /// The backend dropped its stored copy of the task's media.
    CleanedUp {
        task_id: TaskId,
        result: Result<String, BackendError>,
    },
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}
