use std::time::Duration;

use url::Url;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    /// Always ends with `/` so relative endpoint paths join under it.
    pub base_url: Url,
    pub poll_interval: Duration,
    pub connect_timeout: Duration,
}

impl BackendSettings {
    pub fn new(base_url: &str) -> Result<Self, url::ParseError> {
        Ok(Self {
            base_url: normalize_base(base_url)?,
            ..Self::default()
        })
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BACKEND_URL).expect("default backend url is valid"),
            poll_interval: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

fn normalize_base(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim();
    if trimmed.ends_with('/') {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("{trimmed}/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gains_trailing_slash() {
        let settings = BackendSettings::new("http://analysis.local:9000/api").unwrap();
        assert_eq!(settings.base_url.as_str(), "http://analysis.local:9000/api/");
        assert_eq!(
            settings.base_url.join("upload_video/").unwrap().as_str(),
            "http://analysis.local:9000/api/upload_video/"
        );
    }

    #[test]
    fn defaults_poll_every_second() {
        let settings = BackendSettings::default();
        assert_eq!(settings.poll_interval, Duration::from_secs(1));
        assert_eq!(settings.base_url.as_str(), DEFAULT_BACKEND_URL);
    }

    #[test]
    fn invalid_base_is_rejected() {
        assert!(BackendSettings::new("not a url").is_err());
    }
}
