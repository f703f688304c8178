use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked a local video file. Clears any entered URL.
    FileSelected(PathBuf),
    /// User edited the URL input. A non-empty URL clears the selected file.
    UrlChanged(String),
    /// User asked to submit whichever input was set last.
    SubmitClicked,
    /// The backend accepted a submission and assigned a job id.
    SubmissionAccepted {
        ticket: crate::SubmissionTicket,
        job_id: crate::JobId,
        input_mode: crate::InputMode,
    },
    /// The submission request failed before a job existed.
    SubmissionFailed {
        ticket: crate::SubmissionTicket,
        message: String,
    },
    /// A status tick returned a non-terminal status string.
    StatusPolled { job_id: crate::JobId, status: String },
    /// The job succeeded and its result payload was fetched.
    ResultReceived {
        job_id: crate::JobId,
        result: crate::RawResult,
    },
    /// Tracking of the job ended in failure.
    JobFailed {
        job_id: crate::JobId,
        kind: crate::FailureKind,
        message: String,
    },
    /// User picked a result segment to jump to.
    SegmentClicked { index: usize },
    /// The consumer is going away; outstanding polling must stop.
    Teardown,
    /// Fallback for placeholder wiring.
    NoOp,
}
