use tracker_core::{Effect, FailureKind, JobId, Msg, RawResult, RawSegment, TimeValue};
use tracker_engine::{
    EngineEvent, EngineHandle, SubmitRequest, SubmittedJob, TaskResult, TrackerError, VideoFile,
    WireSegment, WireTime,
};
use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use super::render::format_seek;

/// Executes core effects against the engine and translates engine events
/// back into core messages.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub(crate) fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub(crate) fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub(crate) fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::CancelPolling => {
                    tracker_debug!("CancelPolling");
                    self.engine.cancel_polling();
                }
                Effect::SubmitFile { ticket, path } => {
                    tracker_info!("SubmitFile ticket={} path={}", ticket, path.display());
                    self.engine
                        .submit(ticket, SubmitRequest::File(VideoFile::new(path)));
                }
                Effect::SubmitUrl { ticket, url } => {
                    tracker_info!("SubmitUrl ticket={} url={}", ticket, url);
                    self.engine.submit(ticket, SubmitRequest::Url(url));
                }
                Effect::StartPolling { job_id } => {
                    tracker_info!("StartPolling job_id={}", job_id);
                    self.engine.start_polling(job_id.as_str());
                }
                Effect::SeekPlayer { seconds, media } => {
                    tracker_info!("SeekPlayer seconds={} media={:?}", seconds, media);
                    println!("{}", format_seek(seconds, media.as_deref()));
                }
            }
        }
    }
}

/// Maps an engine event onto the core message it stands for.
///
/// Health and cleanup answers are not tracker messages and yield `None`.
pub(crate) fn map_event(event: EngineEvent) -> Option<Msg> {
    match event {
        EngineEvent::Submitted { ticket, result } => Some(map_submission(ticket, result)),
        EngineEvent::StatusChanged { task_id, status } => Some(Msg::StatusPolled {
            job_id: JobId::new(task_id),
            status,
        }),
        EngineEvent::Completed { task_id, result } => Some(map_completion(task_id, result)),
        EngineEvent::Health(_) | EngineEvent::CleanedUp { .. } => None,
    }
}

fn map_submission(ticket: u64, result: Result<SubmittedJob, TrackerError>) -> Msg {
    match result {
        Ok(job) => Msg::SubmissionAccepted {
            ticket,
            job_id: JobId::new(job.task_id),
            input_mode: map_input_mode(job.input_mode),
        },
        Err(err) => {
            tracker_warn!("Submission {} failed: {}", ticket, err);
            Msg::SubmissionFailed {
                ticket,
                message: err.message().to_string(),
            }
        }
    }
}

fn map_completion(task_id: String, result: Result<TaskResult, TrackerError>) -> Msg {
    let job_id = JobId::new(task_id);
    match result {
        Ok(result) => Msg::ResultReceived {
            job_id,
            result: map_result(result),
        },
        Err(err) => {
            tracker_warn!("Job {} failed: {}", job_id, err);
            Msg::JobFailed {
                job_id,
                kind: map_failure_kind(&err),
                message: err.message().to_string(),
            }
        }
    }
}

fn map_result(result: TaskResult) -> RawResult {
    RawResult {
        segments: result
            .segments
            .map(|segments| segments.into_iter().map(map_segment).collect()),
        media_locator: result.media_url,
    }
}

fn map_segment(segment: WireSegment) -> RawSegment {
    RawSegment {
        action: segment.action,
        start_time: map_time(segment.start_time),
        end_time: map_time(segment.end_time),
    }
}

fn map_time(time: WireTime) -> TimeValue {
    match time {
        WireTime::Seconds(seconds) => TimeValue::Seconds(seconds),
        WireTime::Text(text) => TimeValue::Text(text),
    }
}

fn map_failure_kind(err: &TrackerError) -> FailureKind {
    match err {
        TrackerError::Submission { .. } => FailureKind::Submission,
        TrackerError::Polling { .. } => FailureKind::Polling,
        TrackerError::JobFailure { .. } => FailureKind::JobFailure,
        TrackerError::ResultFetch { .. } => FailureKind::ResultFetch,
    }
}

fn map_input_mode(mode: tracker_engine::InputMode) -> tracker_core::InputMode {
    match mode {
        tracker_engine::InputMode::File => tracker_core::InputMode::File,
        tracker_engine::InputMode::Url => tracker_core::InputMode::Url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepted_submission_becomes_accepted_message() {
        let msg = map_event(EngineEvent::Submitted {
            ticket: 3,
            result: Ok(SubmittedJob {
                task_id: "t-1".to_string(),
                input_mode: tracker_engine::InputMode::Url,
            }),
        });
        assert_eq!(
            msg,
            Some(Msg::SubmissionAccepted {
                ticket: 3,
                job_id: JobId::new("t-1"),
                input_mode: tracker_core::InputMode::Url,
            })
        );
    }

    #[test]
    fn failed_submission_keeps_user_message() {
        let msg = map_event(EngineEvent::Submitted {
            ticket: 1,
            result: Err(TrackerError::Submission {
                message: "Failed to upload video".to_string(),
            }),
        });
        assert_eq!(
            msg,
            Some(Msg::SubmissionFailed {
                ticket: 1,
                message: "Failed to upload video".to_string(),
            })
        );
    }

    #[test]
    fn completed_result_keeps_both_time_forms() {
        let msg = map_event(EngineEvent::Completed {
            task_id: "t-1".to_string(),
            result: Ok(TaskResult {
                segments: Some(vec![WireSegment {
                    action: "walk".to_string(),
                    start_time: WireTime::Seconds(0.0),
                    end_time: WireTime::Text("0:05".to_string()),
                }]),
                media_url: Some("http://localhost:8000/uploads/t-1.mp4".to_string()),
            }),
        });
        assert_eq!(
            msg,
            Some(Msg::ResultReceived {
                job_id: JobId::new("t-1"),
                result: RawResult {
                    segments: Some(vec![RawSegment {
                        action: "walk".to_string(),
                        start_time: TimeValue::Seconds(0.0),
                        end_time: TimeValue::Text("0:05".to_string()),
                    }]),
                    media_locator: Some("http://localhost:8000/uploads/t-1.mp4".to_string()),
                },
            })
        );
    }

    #[test]
    fn missing_segments_stay_missing() {
        let msg = map_event(EngineEvent::Completed {
            task_id: "t-1".to_string(),
            result: Ok(TaskResult::default()),
        });
        assert_eq!(
            msg,
            Some(Msg::ResultReceived {
                job_id: JobId::new("t-1"),
                result: RawResult::default(),
            })
        );
    }

    #[test]
    fn failure_kinds_carry_over() {
        let cases = [
            (
                TrackerError::Polling {
                    message: "p".to_string(),
                },
                FailureKind::Polling,
            ),
            (
                TrackerError::JobFailure {
                    message: "j".to_string(),
                },
                FailureKind::JobFailure,
            ),
            (
                TrackerError::ResultFetch {
                    message: "r".to_string(),
                },
                FailureKind::ResultFetch,
            ),
        ];
        for (err, kind) in cases {
            let message = err.message().to_string();
            let msg = map_event(EngineEvent::Completed {
                task_id: "t-2".to_string(),
                result: Err(err),
            });
            assert_eq!(
                msg,
                Some(Msg::JobFailed {
                    job_id: JobId::new("t-2"),
                    kind,
                    message,
                })
            );
        }
    }

    #[test]
    fn health_and_cleanup_are_not_tracker_messages() {
        assert_eq!(map_event(EngineEvent::Health(Ok("ok".to_string()))), None);
        assert_eq!(
            map_event(EngineEvent::CleanedUp {
                task_id: "t".to_string(),
                result: Ok("done".to_string()),
            }),
            None
        );
    }
}
