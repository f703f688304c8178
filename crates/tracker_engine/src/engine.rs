use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tracker_logging::{tracker_debug, tracker_warn};

use crate::backend::{BackendClient, ReqwestBackend};
use crate::poll::PollScheduler;
use crate::settings::BackendSettings;
use crate::submit::{submit_file, submit_url, VideoFile};
use crate::types::{ChannelEventSink, EngineEvent, EventSink, SubmissionTicket, TaskId};
use crate::EngineError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    File(VideoFile),
    Url(String),
}

enum EngineCommand {
    Submit {
        ticket: SubmissionTicket,
        request: SubmitRequest,
    },
    StartPolling {
        task_id: TaskId,
    },
    CancelPolling,
    CheckHealth,
    Cleanup {
        task_id: TaskId,
    },
}

/// Runs backend work on a background runtime. Commands go in through the
/// handle; results come back as [`EngineEvent`]s.
///
/// Dropping the handle stops the worker and cancels any outstanding polling.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: BackendSettings) -> Result<Self, EngineError> {
        let backend = Arc::new(ReqwestBackend::new(&settings)?);
        Self::with_backend(backend, settings.poll_interval)
    }

    pub fn with_backend(
        backend: Arc<dyn BackendClient>,
        poll_interval: Duration,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .thread_name("tracker-engine")
            .build()?;

        thread::spawn(move || {
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
            let mut scheduler = PollScheduler::new(
                runtime.handle().clone(),
                backend.clone(),
                sink.clone(),
                poll_interval,
            );
            while let Ok(command) = cmd_rx.recv() {
                handle_command(&runtime, &mut scheduler, &backend, &sink, command);
            }
            tracker_debug!("Engine command channel closed; shutting down");
            scheduler.cancel();
            drop(scheduler);
            runtime.shutdown_background();
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn submit(&self, ticket: SubmissionTicket, request: SubmitRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { ticket, request });
    }

    pub fn start_polling(&self, task_id: impl Into<TaskId>) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling {
            task_id: task_id.into(),
        });
    }

    pub fn cancel_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelPolling);
    }

    pub fn check_health(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CheckHealth);
    }

    /// Asks the backend to delete the media it stored for `task_id`.
    pub fn cleanup(&self, task_id: impl Into<TaskId>) {
        let _ = self.cmd_tx.send(EngineCommand::Cleanup {
            task_id: task_id.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the worker has stopped.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

fn handle_command(
    runtime: &tokio::runtime::Runtime,
    scheduler: &mut PollScheduler,
    backend: &Arc<dyn BackendClient>,
    sink: &Arc<dyn EventSink>,
    command: EngineCommand,
) {
    match command {
        EngineCommand::Submit { ticket, request } => {
            let backend = backend.clone();
            let sink = sink.clone();
            runtime.spawn(async move {
                let result = match &request {
                    SubmitRequest::File(file) => submit_file(backend.as_ref(), file).await,
                    SubmitRequest::Url(url) => submit_url(backend.as_ref(), url).await,
                };
                sink.emit(EngineEvent::Submitted { ticket, result });
            });
        }
        EngineCommand::StartPolling { task_id } => scheduler.start(task_id),
        EngineCommand::CancelPolling => scheduler.cancel(),
        EngineCommand::CheckHealth => {
            let backend = backend.clone();
            let sink = sink.clone();
            runtime.spawn(async move {
                let result = backend.health().await.map(|health| health.status);
                sink.emit(EngineEvent::Health(result));
            });
        }
        EngineCommand::Cleanup { task_id } => {
            let backend = backend.clone();
            let sink = sink.clone();
            runtime.spawn(async move {
                let result = backend
                    .cleanup(&task_id)
                    .await
                    .map(|response| response.message);
                if let Err(err) = &result {
                    tracker_warn!("Cleanup of task {} failed: {}", task_id, err);
                }
                sink.emit(EngineEvent::CleanedUp { task_id, result });
            });
        }
    }
}
