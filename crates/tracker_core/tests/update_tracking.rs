use std::sync::Once;

use pretty_assertions::assert_eq;
use tracker_core::{
    update, Effect, FailureKind, InputMode, JobId, LifecycleState, Msg, RawResult, RawSegment,
    TimeValue, TrackerState, STATUS_FAILURE, STATUS_SUCCESS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tracker_logging::initialize_for_tests);
}

fn processing(job: &str) -> TrackerState {
    let (state, _) = update(
        TrackerState::new(),
        Msg::UrlChanged("https://example.com/v.mp4".to_string()),
    );
    let (state, _) = update(state, Msg::SubmitClicked);
    let (mut state, _) = update(
        state,
        Msg::SubmissionAccepted {
            ticket: 1,
            job_id: JobId::from(job),
            input_mode: InputMode::Url,
        },
    );
    state.consume_dirty();
    state
}

fn walk_result() -> RawResult {
    RawResult {
        segments: Some(vec![RawSegment {
            action: "walk".to_string(),
            start_time: TimeValue::Seconds(0.0),
            end_time: TimeValue::Seconds(5.0),
        }]),
        media_locator: None,
    }
}

#[test]
fn in_progress_status_is_displayed_verbatim() {
    init_logging();
    let (mut state, effects) = update(
        processing("t1"),
        Msg::StatusPolled {
            job_id: JobId::from("t1"),
            status: "STARTED".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(state.lifecycle(), LifecycleState::Processing);
    assert_eq!(state.view().status_text.as_deref(), Some("STARTED"));
    assert!(state.consume_dirty());

    // Same status again is not a change.
    let (mut state, _) = update(
        state,
        Msg::StatusPolled {
            job_id: JobId::from("t1"),
            status: "STARTED".to_string(),
        },
    );
    assert!(!state.consume_dirty());
}

#[test]
fn pending_pending_success_ends_with_one_segment() {
    init_logging();
    let mut state = processing("t1");
    for _ in 0..2 {
        let (next, _) = update(
            state,
            Msg::StatusPolled {
                job_id: JobId::from("t1"),
                status: "PENDING".to_string(),
            },
        );
        state = next;
    }
    let (state, effects) = update(
        state,
        Msg::ResultReceived {
            job_id: JobId::from("t1"),
            result: walk_result(),
        },
    );

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.lifecycle, LifecycleState::Succeeded);
    assert_eq!(view.status_text.as_deref(), Some(STATUS_SUCCESS));
    assert_eq!(view.segments.len(), 1);
    assert_eq!(view.segments[0].action, "walk");
    assert_eq!(view.segments[0].number, 1);
    assert_eq!(view.error, None);
}

#[test]
fn downloaded_media_supersedes_preview() {
    init_logging();
    let mut result = walk_result();
    result.media_locator = Some("http://localhost:8000/uploads/t1.mp4".to_string());
    let (state, _) = update(
        processing("t1"),
        Msg::ResultReceived {
            job_id: JobId::from("t1"),
            result,
        },
    );

    let view = state.view();
    assert_eq!(
        view.preview.as_deref(),
        Some("http://localhost:8000/uploads/t1.mp4")
    );
    assert!(!view.awaiting_preview);
}

#[test]
fn backend_failure_message_is_surfaced() {
    init_logging();
    let (state, _) = update(
        processing("t1"),
        Msg::StatusPolled {
            job_id: JobId::from("t1"),
            status: "PENDING".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobFailed {
            job_id: JobId::from("t1"),
            kind: FailureKind::JobFailure,
            message: "model crashed".to_string(),
        },
    );

    let view = state.view();
    assert_eq!(view.lifecycle, LifecycleState::Failed);
    assert_eq!(view.error.as_deref(), Some("model crashed"));
    assert_eq!(view.failure_kind, Some(FailureKind::JobFailure));
    assert_eq!(view.status_text.as_deref(), Some(STATUS_FAILURE));
    assert!(view.segments.is_empty());
}

#[test]
fn malformed_result_fails_the_job() {
    init_logging();
    let (state, _) = update(
        processing("t1"),
        Msg::ResultReceived {
            job_id: JobId::from("t1"),
            result: RawResult::default(),
        },
    );

    let view = state.view();
    assert_eq!(view.lifecycle, LifecycleState::Failed);
    assert_eq!(view.failure_kind, Some(FailureKind::ResultFetch));
    assert!(view.error.unwrap().starts_with("Malformed task result"));
}

#[test]
fn events_for_other_jobs_are_ignored() {
    init_logging();
    let state = processing("current");
    let before = state.view();

    let (state, _) = update(
        state,
        Msg::StatusPolled {
            job_id: JobId::from("old"),
            status: "STARTED".to_string(),
        },
    );
    let (state, _) = update(
        state,
        Msg::ResultReceived {
            job_id: JobId::from("old"),
            result: walk_result(),
        },
    );
    let (mut state, _) = update(
        state,
        Msg::JobFailed {
            job_id: JobId::from("old"),
            kind: FailureKind::Polling,
            message: "boom".to_string(),
        },
    );

    assert_eq!(state.view(), before);
    assert!(!state.consume_dirty());
}

#[test]
fn terminal_state_is_not_overwritten() {
    init_logging();
    let (state, _) = update(
        processing("t1"),
        Msg::ResultReceived {
            job_id: JobId::from("t1"),
            result: walk_result(),
        },
    );
    let (state, _) = update(
        state,
        Msg::JobFailed {
            job_id: JobId::from("t1"),
            kind: FailureKind::Polling,
            message: "late".to_string(),
        },
    );

    assert_eq!(state.lifecycle(), LifecycleState::Succeeded);
}

#[test]
fn segment_click_seeks_to_start_time() {
    init_logging();
    let result = RawResult {
        segments: Some(vec![
            RawSegment {
                action: "reach".to_string(),
                start_time: "0:05".into(),
                end_time: "0:20".into(),
            },
            RawSegment {
                action: "place".to_string(),
                start_time: "1:30".into(),
                end_time: "1:42".into(),
            },
        ]),
        media_locator: Some("http://localhost:8000/uploads/t1.mp4".to_string()),
    };
    let (state, _) = update(
        processing("t1"),
        Msg::ResultReceived {
            job_id: JobId::from("t1"),
            result,
        },
    );

    let (state, effects) = update(state, Msg::SegmentClicked { index: 1 });
    assert_eq!(
        effects,
        vec![Effect::SeekPlayer {
            seconds: 90.0,
            media: Some("http://localhost:8000/uploads/t1.mp4".to_string()),
        }]
    );

    let (_state, effects) = update(state, Msg::SegmentClicked { index: 7 });
    assert!(effects.is_empty());
}

#[test]
fn segment_click_before_success_does_nothing() {
    init_logging();
    let (_state, effects) = update(processing("t1"), Msg::SegmentClicked { index: 0 });
    assert!(effects.is_empty());
}

#[test]
fn teardown_cancels_only_active_polling() {
    init_logging();
    let (_state, effects) = update(processing("t1"), Msg::Teardown);
    assert_eq!(effects, vec![Effect::CancelPolling]);

    let (_state, effects) = update(TrackerState::new(), Msg::Teardown);
    assert!(effects.is_empty());
}
