use crate::state::preview_locator_for_file;
use crate::{
    normalize_result, Effect, FailureKind, InputMode, JobOutcome, LifecycleState, Msg,
    TrackerState,
};

pub const STATUS_UPLOADING: &str = "Uploading...";
pub const STATUS_PROCESSING_URL: &str = "Processing URL...";
pub const STATUS_PROCESSING: &str = "Processing...";
pub const STATUS_SUCCESS: &str = "SUCCESS";
pub const STATUS_FAILURE: &str = "FAILURE";

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that refer to a job other than the tracked one (an earlier
/// submission, or a job that already reached a terminal state) are ignored.
pub fn update(mut state: TrackerState, msg: Msg) -> (TrackerState, Vec<Effect>) {
    let effects = match msg {
        Msg::FileSelected(path) => {
            state.input_mut().select_file(path);
            state.mark_dirty();
            Vec::new()
        }
        Msg::UrlChanged(url) => {
            state.input_mut().set_url(url);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SubmitClicked => submit(&mut state),
        Msg::SubmissionAccepted {
            ticket,
            job_id,
            input_mode,
        } => match state.job_mut() {
            Some(job)
                if job.ticket == ticket && job.lifecycle == LifecycleState::Submitting =>
            {
                job.id = Some(job_id.clone());
                job.input_mode = input_mode;
                job.lifecycle = LifecycleState::Processing;
                job.status_text = STATUS_PROCESSING.to_string();
                state.mark_dirty();
                vec![Effect::StartPolling { job_id }]
            }
            _ => Vec::new(),
        },
        Msg::SubmissionFailed { ticket, message } => {
            let current = state.job().is_some_and(|job| {
                job.ticket == ticket && job.lifecycle == LifecycleState::Submitting
            });
            if current {
                state.fail_job(FailureKind::Submission, message, STATUS_FAILURE);
            }
            Vec::new()
        }
        Msg::StatusPolled { job_id, status } => {
            if let Some(job) = state.job_mut().filter(|job| job.is_tracking(&job_id)) {
                if job.status_text != status {
                    job.status_text = status;
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::ResultReceived { job_id, result } => {
            if !state.job().is_some_and(|job| job.is_tracking(&job_id)) {
                return (state, Vec::new());
            }
            match normalize_result(result) {
                Ok(result_set) => {
                    if let Some(job) = state.job_mut() {
                        if let Some(locator) = &result_set.media_locator {
                            job.preview = Some(locator.clone());
                        }
                        job.lifecycle = LifecycleState::Succeeded;
                        job.status_text = STATUS_SUCCESS.to_string();
                        job.outcome = Some(JobOutcome::Succeeded(result_set));
                    }
                    state.mark_dirty();
                }
                Err(err) => state.fail_job(
                    FailureKind::ResultFetch,
                    format!("Malformed task result: {err}"),
                    STATUS_FAILURE,
                ),
            }
            Vec::new()
        }
        Msg::JobFailed {
            job_id,
            kind,
            message,
        } => {
            if state.job().is_some_and(|job| job.is_tracking(&job_id)) {
                state.fail_job(kind, message, STATUS_FAILURE);
            }
            Vec::new()
        }
        Msg::SegmentClicked { index } => {
            let media = state.job().and_then(|job| job.preview.clone());
            match state.seek_target(index) {
                Some(seconds) => vec![Effect::SeekPlayer { seconds, media }],
                None => Vec::new(),
            }
        }
        Msg::Teardown => {
            if state.lifecycle() == LifecycleState::Processing {
                vec![Effect::CancelPolling]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit(state: &mut TrackerState) -> Vec<Effect> {
    if !state.input().can_submit() {
        return Vec::new();
    }

    // Any earlier job is superseded: its polling must stop before new polling can start.
    let mut effects = Vec::with_capacity(2);
    if state.job().is_some() {
        effects.push(Effect::CancelPolling);
    }

    let input = state.input().clone();
    match (input.mode, input.selected_file) {
        (Some(InputMode::File), Some(path)) => {
            let preview = preview_locator_for_file(&path);
            let ticket = state.begin_submission(InputMode::File, STATUS_UPLOADING, Some(preview));
            effects.push(Effect::SubmitFile { ticket, path });
        }
        _ => {
            let url = input.video_url.trim().to_string();
            let ticket = state.begin_submission(InputMode::Url, STATUS_PROCESSING_URL, None);
            effects.push(Effect::SubmitUrl { ticket, url });
        }
    }
    effects
}
