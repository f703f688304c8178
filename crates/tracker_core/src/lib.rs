//! Tracker core: pure task lifecycle state machine and view-model helpers.
mod effect;
mod job;
mod msg;
mod normalize;
mod seek;
mod state;
mod store;
mod update;
mod view_model;

pub use effect::Effect;
pub use job::{
    Failure, FailureKind, InputMode, JobId, LifecycleState, ResultSet, Segment, SubmissionTicket,
};
pub use msg::Msg;
pub use normalize::{normalize_result, NormalizeError, RawResult, RawSegment};
pub use seek::{resolve_seek_target, SeekError, TimeValue};
pub use state::{preview_locator_for_file, InputForm, JobOutcome, TrackedJob, TrackerState};
pub use store::{Subscriber, TrackerStore};
pub use update::{
    update, STATUS_FAILURE, STATUS_PROCESSING, STATUS_PROCESSING_URL, STATUS_SUCCESS,
    STATUS_UPLOADING,
};
pub use view_model::{SegmentRow, TrackerView};
