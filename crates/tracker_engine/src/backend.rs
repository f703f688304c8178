use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use url::Url;

use tracker_logging::tracker_debug;

use crate::settings::BackendSettings;
use crate::wire::{
    CleanupResponse, ErrorBody, HealthResponse, ResultResponse, StatusResponse, SubmitResponse,
    SubmitUrlRequest,
};
use crate::BackendError;

/// The analysis backend as seen by the tracker.
#[async_trait::async_trait]
pub trait BackendClient: Send + Sync {
    /// Base address that relative media paths are resolved against.
    fn base_url(&self) -> &Url;

    async fn submit_file(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<SubmitResponse, BackendError>;

    async fn submit_url(&self, video_url: &str) -> Result<SubmitResponse, BackendError>;

    async fn task_status(&self, task_id: &str) -> Result<StatusResponse, BackendError>;

    async fn task_result(&self, task_id: &str) -> Result<ResultResponse, BackendError>;

    async fn health(&self) -> Result<HealthResponse, BackendError>;

    /// Deletes the backend's stored copy of the task's video.
    async fn cleanup(&self, task_id: &str) -> Result<CleanupResponse, BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    client: reqwest::Client,
    base_url: Url,
}

impl ReqwestBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .build()
            .map_err(|err| BackendError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|err| BackendError::InvalidRequest(err.to_string()))
    }

    /// `{base}/tasks/{task_id}/{leaf}` with the id percent-encoded as one segment.
    fn task_endpoint(&self, task_id: &str, leaf: &str) -> Result<Url, BackendError> {
        if task_id.is_empty() {
            return Err(BackendError::InvalidRequest("task id is empty".into()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| BackendError::InvalidRequest("backend url cannot be a base".into()))?
            .pop_if_empty()
            .extend(["tasks", task_id, leaf]);
        Ok(url)
    }
}

#[async_trait::async_trait]
impl BackendClient for ReqwestBackend {
    fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn submit_file(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<SubmitResponse, BackendError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|err| BackendError::InvalidRequest(err.to_string()))?;
        let form = Form::new().part("file", part);
        let url = self.endpoint("upload_video/")?;
        tracker_debug!("POST {} file={} mime={}", url, file_name, mime);
        let response = self.client.post(url).multipart(form).send().await?;
        decode(response).await
    }

    async fn submit_url(&self, video_url: &str) -> Result<SubmitResponse, BackendError> {
        let url = self.endpoint("process_video_from_url/")?;
        tracker_debug!("POST {} video_url={}", url, video_url);
        let response = self
            .client
            .post(url)
            .json(&SubmitUrlRequest { video_url })
            .send()
            .await?;
        decode(response).await
    }

    async fn task_status(&self, task_id: &str) -> Result<StatusResponse, BackendError> {
        let url = self.task_endpoint(task_id, "status")?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn task_result(&self, task_id: &str) -> Result<ResultResponse, BackendError> {
        let url = self.task_endpoint(task_id, "result")?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn health(&self) -> Result<HealthResponse, BackendError> {
        let url = self.endpoint("health")?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    async fn cleanup(&self, task_id: &str) -> Result<CleanupResponse, BackendError> {
        let url = self.task_endpoint(task_id, "cleanup")?;
        let response = self.client.delete(url).send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.detail_text());
        tracker_debug!("backend answered {} detail={:?}", status, detail);
        return Err(BackendError::Status {
            status: status.as_u16(),
            detail,
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|err| BackendError::Decode(err.to_string()))
}
