#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tracker_engine::{
    BackendClient, BackendError, CleanupResponse, EngineEvent, EventSink, HealthResponse,
    ResultResponse, StatusResponse, SubmitResponse,
};
use url::Url;

/// Backend double that replays scripted answers and records every call.
pub struct ScriptedBackend {
    base_url: Url,
    statuses: Mutex<VecDeque<Result<StatusResponse, BackendError>>>,
    results: Mutex<VecDeque<Result<ResultResponse, BackendError>>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self {
            base_url: Url::parse("http://backend.test/").unwrap(),
            statuses: Mutex::new(VecDeque::new()),
            results: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_statuses(self, statuses: &[&str]) -> Self {
        self.statuses
            .lock()
            .unwrap()
            .extend(statuses.iter().map(|s| Ok(StatusResponse::new(*s))));
        self
    }

    pub fn with_status_error(self, err: BackendError) -> Self {
        self.statuses.lock().unwrap().push_back(Err(err));
        self
    }

    pub fn with_result(self, result: Result<ResultResponse, BackendError>) -> Self {
        self.results.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn status_calls_for(&self, task_id: &str) -> usize {
        let needle = format!("status {task_id}");
        self.calls().iter().filter(|c| **c == needle).count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait::async_trait]
impl BackendClient for ScriptedBackend {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn submit_file(
        &self,
        file_name: &str,
        _mime: &str,
        _bytes: Vec<u8>,
    ) -> Result<SubmitResponse, BackendError> {
        self.record(format!("submit_file {file_name}"));
        Ok(SubmitResponse {
            task_id: "file-task".to_string(),
            message: None,
        })
    }

    async fn submit_url(&self, video_url: &str) -> Result<SubmitResponse, BackendError> {
        self.record(format!("submit_url {video_url}"));
        Ok(SubmitResponse {
            task_id: "url-task".to_string(),
            message: None,
        })
    }

    async fn task_status(&self, task_id: &str) -> Result<StatusResponse, BackendError> {
        self.record(format!("status {task_id}"));
        self.statuses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(StatusResponse::new("PENDING")))
    }

    async fn task_result(&self, task_id: &str) -> Result<ResultResponse, BackendError> {
        self.record(format!("result {task_id}"));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(ResultResponse::default()))
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        Ok(HealthResponse {
            status: "ok".to_string(),
        })
    }

    async fn cleanup(&self, task_id: &str) -> Result<CleanupResponse, BackendError> {
        self.record(format!("cleanup {task_id}"));
        Ok(CleanupResponse {
            message: format!("Cleaned up file for task {task_id}"),
        })
    }
}

#[derive(Default, Clone)]
pub struct TestSink {
    events: Arc<Mutex<Vec<EngineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }

    pub fn statuses(&self) -> Vec<(String, String)> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter_map(|event| match event {
                EngineEvent::StatusChanged { task_id, status } => {
                    Some((task_id.clone(), status.clone()))
                }
                _ => None,
            })
            .collect()
    }
}

impl EventSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}
