use std::path::PathBuf;

use crate::{FailureKind, InputMode, LifecycleState, TrackerState};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrackerView {
    pub lifecycle: LifecycleState,
    pub job_id: Option<String>,
    pub input_mode: Option<InputMode>,
    pub status_text: Option<String>,
    pub preview: Option<String>,
    /// URL submissions have no preview until the backend provides one.
    pub awaiting_preview: bool,
    pub segments: Vec<SegmentRow>,
    pub error: Option<String>,
    pub failure_kind: Option<FailureKind>,
    pub selected_file: Option<PathBuf>,
    pub video_url: String,
    pub can_submit: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRow {
    /// One-based position as shown to the user.
    pub number: usize,
    pub action: String,
    pub start_time: f64,
    pub end_time: f64,
}

impl TrackerView {
    pub(crate) fn from_state(state: &TrackerState) -> Self {
        let input = state.input();
        let mut view = TrackerView {
            lifecycle: state.lifecycle(),
            selected_file: input.selected_file.clone(),
            video_url: input.video_url.clone(),
            can_submit: input.can_submit(),
            ..TrackerView::default()
        };

        let Some(job) = state.job() else {
            return view;
        };

        view.job_id = job.id.as_ref().map(ToString::to_string);
        view.input_mode = Some(job.input_mode);
        view.status_text = Some(job.status_text.clone());
        view.preview = job.preview.clone();
        view.awaiting_preview = job.input_mode == InputMode::Url && job.preview.is_none();

        if let Some(result) = job.result() {
            view.segments = result
                .segments
                .iter()
                .enumerate()
                .map(|(index, segment)| SegmentRow {
                    number: index + 1,
                    action: segment.action.clone(),
                    start_time: segment.start_time,
                    end_time: segment.end_time,
                })
                .collect();
        }
        if let Some(failure) = job.failure() {
            view.error = Some(failure.message.clone());
            view.failure_kind = Some(failure.kind);
        }
        view
    }
}
