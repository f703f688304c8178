use std::path::{Path, PathBuf};

use tracker_logging::{tracker_info, tracker_warn};

use crate::backend::BackendClient;
use crate::error::{SUBMIT_FILE_FALLBACK, SUBMIT_URL_FALLBACK};
use crate::types::{InputMode, TaskId};
use crate::TrackerError;

/// A local video chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    pub path: PathBuf,
}

impl VideoFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "video".to_string())
    }
}

/// A job the backend accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmittedJob {
    pub task_id: TaskId,
    pub input_mode: InputMode,
}

/// Uploads a local video as multipart field `file`.
pub async fn submit_file(
    backend: &dyn BackendClient,
    file: &VideoFile,
) -> Result<SubmittedJob, TrackerError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|err| TrackerError::Submission {
            message: format!("Could not read {}: {}", file.path.display(), err),
        })?;
    if bytes.is_empty() {
        return Err(TrackerError::Submission {
            message: format!("{} is empty", file.path.display()),
        });
    }

    let file_name = file.file_name();
    let mime = mime_for_path(&file.path);
    tracker_info!(
        "Uploading {} ({} bytes, {})",
        file_name,
        bytes.len(),
        mime
    );
    let response = backend
        .submit_file(&file_name, mime, bytes)
        .await
        .map_err(|err| {
            tracker_warn!("Upload of {} failed: {}", file_name, err);
            TrackerError::Submission {
                message: err.user_message(SUBMIT_FILE_FALLBACK),
            }
        })?;

    accepted(response.task_id, response.message, InputMode::File)
}

/// Asks the backend to fetch and analyze the video at `url`.
pub async fn submit_url(
    backend: &dyn BackendClient,
    url: &str,
) -> Result<SubmittedJob, TrackerError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(TrackerError::Submission {
            message: "Video URL is empty".to_string(),
        });
    }

    tracker_info!("Submitting video URL {}", url);
    let response = backend.submit_url(url).await.map_err(|err| {
        tracker_warn!("URL submission of {} failed: {}", url, err);
        TrackerError::Submission {
            message: err.user_message(SUBMIT_URL_FALLBACK),
        }
    })?;

    accepted(response.task_id, response.message, InputMode::Url)
}

fn accepted(
    task_id: String,
    message: Option<String>,
    input_mode: InputMode,
) -> Result<SubmittedJob, TrackerError> {
    if task_id.trim().is_empty() {
        return Err(TrackerError::Submission {
            message: "Backend returned an empty task id".to_string(),
        });
    }
    tracker_info!(
        "Task {} accepted: {}",
        task_id,
        message.as_deref().unwrap_or("no message")
    );
    Ok(SubmittedJob {
        task_id,
        input_mode,
    })
}

/// MIME type sent with an upload; the backend only accepts `video/*`.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("mp4") | Some("m4v") => "video/mp4",
        Some("webm") => "video/webm",
        Some("mov") => "video/quicktime",
        Some("mkv") => "video/x-matroska",
        Some("avi") => "video/x-msvideo",
        Some("mpeg") | Some("mpg") => "video/mpeg",
        Some("ogv") => "video/ogg",
        Some("3gp") => "video/3gpp",
        _ => "application/octet-stream",
    }
}
