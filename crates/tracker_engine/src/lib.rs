//! Tracker engine: backend IO, submission, polling and effect execution.
mod backend;
mod engine;
mod error;
mod poll;
mod settings;
mod submit;
mod types;
mod wire;

pub use backend::{BackendClient, ReqwestBackend};
pub use engine::{EngineHandle, SubmitRequest};
pub use error::{
    BackendError, EngineError, TrackerError, JOB_FAILURE_FALLBACK, POLLING_FALLBACK,
    RESULT_FETCH_FALLBACK, SUBMIT_FILE_FALLBACK, SUBMIT_URL_FALLBACK,
};
pub use poll::{interpret_failure, interpret_success, poll_job, PollOutcome, PollScheduler};
pub use settings::{BackendSettings, DEFAULT_BACKEND_URL};
pub use submit::{mime_for_path, submit_file, submit_url, SubmittedJob, VideoFile};
pub use types::{
    ChannelEventSink, EngineEvent, EventSink, InputMode, SubmissionTicket, TaskId, TaskResult,
};
pub use wire::{
    CleanupResponse, HealthResponse, ResultPayload, ResultResponse, StatusResponse,
    SubmitResponse, WireSegment, WireTime,
};
