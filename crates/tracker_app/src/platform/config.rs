use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use log::LevelFilter;
use serde::Deserialize;
use tracker_engine::BackendSettings;
use tracker_logging::{parse_level, tracker_warn, LogDestination, DEFAULT_LOG_FILE};

/// Config file read from the working directory when `--config` is absent.
pub(crate) const DEFAULT_CONFIG_FILE: &str = "segtrack.ron";

const ENV_BACKEND_URL: &str = "SEGTRACK_BACKEND_URL";
const ENV_POLL_INTERVAL_MS: &str = "SEGTRACK_POLL_INTERVAL_MS";
const ENV_LOG_LEVEL: &str = "SEGTRACK_LOG_LEVEL";
const ENV_LOG_FILE: &str = "SEGTRACK_LOG_FILE";

/// Settings for one `segtrack` run.
///
/// Every field may be left out of the RON file; environment variables win
/// over the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub backend_url: String,
    pub poll_interval_ms: u64,
    pub log_level: String,
    pub log_file: PathBuf,
    /// Mirror log output to the terminal as well as the log file.
    pub log_to_terminal: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: tracker_engine::DEFAULT_BACKEND_URL.to_string(),
            poll_interval_ms: 1000,
            log_level: "info".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_to_terminal: false,
        }
    }
}

impl AppConfig {
    /// Reads `path`, or `segtrack.ron` when it exists, then applies the
    /// process environment.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub(crate) fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        ron::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Overrides fields from environment variables looked up through `lookup`.
    ///
    /// Unparseable numbers are ignored with a warning.
    pub(crate) fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BACKEND_URL).filter(|url| !url.trim().is_empty()) {
            self.backend_url = url;
        }
        if let Some(raw) = lookup(ENV_POLL_INTERVAL_MS) {
            match raw.trim().parse() {
                Ok(ms) => self.poll_interval_ms = ms,
                Err(_) => tracker_warn!("Ignoring {}={:?}: not a number", ENV_POLL_INTERVAL_MS, raw),
            }
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }
        if let Some(file) = lookup(ENV_LOG_FILE).filter(|file| !file.trim().is_empty()) {
            self.log_file = PathBuf::from(file);
        }
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }

    pub(crate) fn backend_settings(&self) -> Result<BackendSettings> {
        let settings = BackendSettings::new(&self.backend_url)
            .with_context(|| format!("Invalid backend URL: {}", self.backend_url))?;
        Ok(settings.with_poll_interval(self.poll_interval()))
    }

    pub(crate) fn log_level(&self) -> LevelFilter {
        parse_level(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    pub(crate) fn log_destination(&self) -> LogDestination {
        if self.log_to_terminal {
            LogDestination::Both(self.log_file.clone())
        } else {
            LogDestination::File(self.log_file.clone())
        }
    }
}
