use std::sync::{Arc, Mutex};

use tracker_core::{
    update, Effect, InputMode, JobId, LifecycleState, Msg, TrackerState, TrackerStore,
    TrackerView,
};

fn recording_store() -> (TrackerStore, Arc<Mutex<Vec<TrackerView>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut store = TrackerStore::new();
    let sink = seen.clone();
    store.subscribe(Box::new(move |view| sink.lock().unwrap().push(view.clone())));
    (store, seen)
}

#[test]
fn subscribers_see_each_state_change() {
    let (mut store, seen) = recording_store();

    store.dispatch(Msg::UrlChanged("https://example.com/v.mp4".to_string()));
    let effects = store.dispatch(Msg::SubmitClicked);
    assert!(matches!(effects.as_slice(), [Effect::SubmitUrl { ticket: 1, .. }]));

    let effects = store.dispatch(Msg::SubmissionAccepted {
        ticket: 1,
        job_id: JobId::from("t1"),
        input_mode: InputMode::Url,
    });
    assert_eq!(
        effects,
        vec![Effect::StartPolling {
            job_id: JobId::from("t1")
        }]
    );

    let lifecycles: Vec<_> = seen.lock().unwrap().iter().map(|v| v.lifecycle).collect();
    assert_eq!(
        lifecycles,
        vec![
            LifecycleState::Idle,
            LifecycleState::Submitting,
            LifecycleState::Processing,
        ]
    );
    assert_eq!(store.state().lifecycle(), LifecycleState::Processing);
}

#[test]
fn unchanged_state_is_not_broadcast() {
    let (mut store, seen) = recording_store();

    store.dispatch(Msg::NoOp);
    store.dispatch(Msg::SubmitClicked);
    store.dispatch(Msg::SegmentClicked { index: 0 });

    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn update_is_noop() {
    let state = TrackerState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
