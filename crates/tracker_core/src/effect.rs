use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Stop any outstanding status polling. Always precedes a new submission.
    CancelPolling,
    SubmitFile {
        ticket: crate::SubmissionTicket,
        path: PathBuf,
    },
    SubmitUrl {
        ticket: crate::SubmissionTicket,
        url: String,
    },
    StartPolling { job_id: crate::JobId },
    /// Move the media player cursor to `seconds` and resume playback.
    SeekPlayer {
        seconds: f64,
        media: Option<String>,
    },
}
