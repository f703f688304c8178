use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use url::Url;

use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use crate::backend::BackendClient;
use crate::error::{JOB_FAILURE_FALLBACK, POLLING_FALLBACK, RESULT_FETCH_FALLBACK};
use crate::types::{EngineEvent, EventSink, TaskId, TaskResult};
use crate::wire::ResultResponse;
use crate::TrackerError;

const STATUS_SUCCESS: &str = "SUCCESS";
const STATUS_FAILURE: &str = "FAILURE";
const STATUS_ERROR: &str = "ERROR";

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Finished(Result<TaskResult, TrackerError>),
    Cancelled,
}

/// Polls `task_id` once per `interval` until a terminal status or cancellation.
///
/// The first status request goes out one interval after the call. Each tick
/// waits for its request to settle before the next tick is scheduled.
/// Non-terminal statuses are reported through `sink`; the terminal outcome is
/// returned and never emitted here.
pub async fn poll_job(
    backend: &dyn BackendClient,
    task_id: &str,
    interval: Duration,
    cancel: &CancellationToken,
    sink: &dyn EventSink,
) -> PollOutcome {
    let mut ticker = interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return PollOutcome::Cancelled,
            _ = ticker.tick() => {}
        }

        let status = tokio::select! {
            _ = cancel.cancelled() => return PollOutcome::Cancelled,
            status = backend.task_status(task_id) => status,
        };

        let status = match status {
            Ok(response) => response.status,
            Err(err) => {
                tracker_warn!("Status check for task {} failed: {}", task_id, err);
                return PollOutcome::Finished(Err(TrackerError::Polling {
                    message: err.user_message(POLLING_FALLBACK),
                }));
            }
        };
        tracker_debug!("Task {} status {}", task_id, status);

        match status.as_str() {
            STATUS_SUCCESS => {
                let result = tokio::select! {
                    _ = cancel.cancelled() => return PollOutcome::Cancelled,
                    result = backend.task_result(task_id) => result,
                };
                let outcome = match result {
                    Ok(response) => interpret_success(response, backend.base_url()),
                    Err(err) => {
                        tracker_warn!("Result fetch for task {} failed: {}", task_id, err);
                        Err(TrackerError::ResultFetch {
                            message: err.user_message(RESULT_FETCH_FALLBACK),
                        })
                    }
                };
                return PollOutcome::Finished(outcome);
            }
            STATUS_FAILURE => {
                let result = tokio::select! {
                    _ = cancel.cancelled() => return PollOutcome::Cancelled,
                    result = backend.task_result(task_id) => result,
                };
                return PollOutcome::Finished(Err(interpret_failure(result.ok())));
            }
            _ => sink.emit(EngineEvent::StatusChanged {
                task_id: task_id.to_string(),
                status,
            }),
        }
    }
}

/// Reads the result fetched after a `SUCCESS` status.
///
/// A result that itself reports a failure fails the job with the backend's
/// error. Missing segments are passed through for the caller to judge.
pub fn interpret_success(
    response: ResultResponse,
    base_url: &Url,
) -> Result<TaskResult, TrackerError> {
    let reported_failure = matches!(
        response.status.as_deref(),
        Some(STATUS_FAILURE) | Some(STATUS_ERROR)
    );
    if reported_failure || (response.result.is_none() && response.error.is_some()) {
        return Err(interpret_failure(Some(response)));
    }

    let payload = response.result.unwrap_or_default();
    let media_url = payload
        .downloaded_video_path
        .as_deref()
        .and_then(|path| resolve_media(base_url, path));
    Ok(TaskResult {
        segments: payload.action_segments,
        media_url,
    })
}

/// Builds the failure for a job the backend reported as failed.
pub fn interpret_failure(response: Option<ResultResponse>) -> TrackerError {
    let message = response
        .and_then(|response| response.error)
        .filter(|error| !error.trim().is_empty())
        .unwrap_or_else(|| JOB_FAILURE_FALLBACK.to_string());
    TrackerError::JobFailure { message }
}

fn resolve_media(base_url: &Url, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    match base_url.join(path.trim_start_matches('/')) {
        Ok(url) => Some(url.into()),
        Err(err) => {
            tracker_warn!("Ignoring media path {:?}: {}", path, err);
            None
        }
    }
}

struct ActivePoll {
    task_id: TaskId,
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

/// Owns the single live polling task.
///
/// Starting a new task cancels the previous one first, and the new task does
/// not tick until the previous one has fully stopped.
pub struct PollScheduler {
    runtime: Handle,
    backend: Arc<dyn BackendClient>,
    sink: Arc<dyn EventSink>,
    interval: Duration,
    active: Option<ActivePoll>,
}

impl PollScheduler {
    pub fn new(
        runtime: Handle,
        backend: Arc<dyn BackendClient>,
        sink: Arc<dyn EventSink>,
        interval: Duration,
    ) -> Self {
        Self {
            runtime,
            backend,
            sink,
            interval,
            active: None,
        }
    }

    pub fn start(&mut self, task_id: TaskId) {
        let previous = self.stop_active();
        let cancel = CancellationToken::new();
        let backend = self.backend.clone();
        let sink = self.sink.clone();
        let interval = self.interval;
        let token = cancel.clone();
        let id = task_id.clone();

        tracker_info!("Polling task {} every {:?}", task_id, interval);
        let handle = self.runtime.spawn(async move {
            if let Some(previous) = previous {
                let _ = previous.await;
            }
            let outcome = poll_job(backend.as_ref(), &id, interval, &token, sink.as_ref()).await;
            match outcome {
                PollOutcome::Finished(result) if !token.is_cancelled() => {
                    sink.emit(EngineEvent::Completed {
                        task_id: id,
                        result,
                    });
                }
                _ => tracker_debug!("Polling for task {} cancelled", id),
            }
        });

        self.active = Some(ActivePoll {
            task_id,
            cancel,
            handle,
        });
    }

    pub fn cancel(&mut self) {
        let _ = self.stop_active();
    }

    pub fn active_task(&self) -> Option<&str> {
        self.active
            .as_ref()
            .filter(|active| !active.handle.is_finished())
            .map(|active| active.task_id.as_str())
    }

    fn stop_active(&mut self) -> Option<JoinHandle<()>> {
        let active = self.active.take()?;
        if !active.handle.is_finished() {
            tracker_info!("Stopping polling for task {}", active.task_id);
        }
        active.cancel.cancel();
        active.handle.abort();
        Some(active.handle)
    }
}

impl Drop for PollScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
