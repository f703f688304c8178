use std::path::{Path, PathBuf};

use url::Url;

use crate::view_model::TrackerView;
use crate::{
    Failure, FailureKind, InputMode, JobId, LifecycleState, ResultSet, SubmissionTicket,
};

/// The submission form. A selected file and a typed URL are mutually
/// exclusive; whichever was set last decides the submission path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InputForm {
    pub selected_file: Option<PathBuf>,
    pub video_url: String,
    pub mode: Option<InputMode>,
}

impl InputForm {
    pub(crate) fn select_file(&mut self, path: PathBuf) {
        self.selected_file = Some(path);
        self.video_url.clear();
        self.mode = Some(InputMode::File);
    }

    pub(crate) fn set_url(&mut self, url: String) {
        if !url.is_empty() {
            self.selected_file = None;
            self.mode = Some(InputMode::Url);
        }
        self.video_url = url;
    }

    pub fn can_submit(&self) -> bool {
        match self.mode {
            Some(InputMode::File) => self.selected_file.is_some(),
            Some(InputMode::Url) => !self.video_url.trim().is_empty(),
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Succeeded(ResultSet),
    Failed(Failure),
}

/// The single job currently tracked.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedJob {
    pub ticket: SubmissionTicket,
    /// Known once the backend accepted the submission.
    pub id: Option<JobId>,
    pub input_mode: InputMode,
    pub lifecycle: LifecycleState,
    pub status_text: String,
    pub preview: Option<String>,
    pub outcome: Option<JobOutcome>,
}

impl TrackedJob {
    pub fn result(&self) -> Option<&ResultSet> {
        match &self.outcome {
            Some(JobOutcome::Succeeded(result)) => Some(result),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match &self.outcome {
            Some(JobOutcome::Failed(failure)) => Some(failure),
            _ => None,
        }
    }

    pub(crate) fn is_tracking(&self, job_id: &JobId) -> bool {
        self.lifecycle == LifecycleState::Processing && self.id.as_ref() == Some(job_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackerState {
    input: InputForm,
    last_ticket: SubmissionTicket,
    job: Option<TrackedJob>,
    dirty: bool,
}

impl TrackerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> TrackerView {
        TrackerView::from_state(self)
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.job
            .as_ref()
            .map(|job| job.lifecycle)
            .unwrap_or_default()
    }

    pub fn job(&self) -> Option<&TrackedJob> {
        self.job.as_ref()
    }

    pub fn input(&self) -> &InputForm {
        &self.input
    }

    /// Seek target for the segment at `index`, available once the job succeeded.
    pub fn seek_target(&self, index: usize) -> Option<f64> {
        self.job
            .as_ref()?
            .result()?
            .segments
            .get(index)
            .map(|segment| segment.start_time)
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn input_mut(&mut self) -> &mut InputForm {
        &mut self.input
    }

    pub(crate) fn job_mut(&mut self) -> Option<&mut TrackedJob> {
        self.job.as_mut()
    }

    /// Replaces any previous job with a fresh one in `Submitting`.
    pub(crate) fn begin_submission(
        &mut self,
        input_mode: InputMode,
        status_text: &str,
        preview: Option<String>,
    ) -> SubmissionTicket {
        self.last_ticket += 1;
        self.job = Some(TrackedJob {
            ticket: self.last_ticket,
            id: None,
            input_mode,
            lifecycle: LifecycleState::Submitting,
            status_text: status_text.to_string(),
            preview,
            outcome: None,
        });
        self.mark_dirty();
        self.last_ticket
    }

    pub(crate) fn fail_job(&mut self, kind: FailureKind, message: String, status_text: &str) {
        if let Some(job) = self.job.as_mut() {
            job.lifecycle = LifecycleState::Failed;
            job.status_text = status_text.to_string();
            job.outcome = Some(JobOutcome::Failed(Failure { kind, message }));
            self.dirty = true;
        }
    }
}

/// Local preview locator for a selected file: a `file://` URL when the path is
/// absolute, the plain path otherwise.
pub fn preview_locator_for_file(path: &Path) -> String {
    Url::from_file_path(path)
        .map(String::from)
        .unwrap_or_else(|()| path.display().to_string())
}
