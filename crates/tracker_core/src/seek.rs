/// A segment timestamp as delivered by the backend: plain seconds or a
/// `minutes:seconds` string.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeValue {
    Seconds(f64),
    Text(String),
}

impl From<f64> for TimeValue {
    fn from(seconds: f64) -> Self {
        TimeValue::Seconds(seconds)
    }
}

impl From<&str> for TimeValue {
    fn from(text: &str) -> Self {
        TimeValue::Text(text.to_string())
    }
}

impl From<String> for TimeValue {
    fn from(text: String) -> Self {
        TimeValue::Text(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeekError {
    #[error("timestamp is empty")]
    Empty,
    #[error("invalid {part} value {value:?}")]
    InvalidNumber { part: &'static str, value: String },
    #[error("expected minutes:seconds, got {0:?}")]
    InvalidFormat(String),
    #[error("timestamp is negative")]
    Negative,
    #[error("timestamp is not finite")]
    NotFinite,
}

/// Maps a segment start time onto a playback position in seconds.
///
/// Numbers pass through unchanged. Strings containing a colon are read as
/// `minutes:seconds` (`"1:30"` is 90); other strings are read as seconds.
/// The result is finite and non-negative.
pub fn resolve_seek_target(value: &TimeValue) -> Result<f64, SeekError> {
    match value {
        TimeValue::Seconds(seconds) => check_seconds(*seconds),
        TimeValue::Text(text) => parse_text(text),
    }
}

fn parse_text(text: &str) -> Result<f64, SeekError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SeekError::Empty);
    }

    if !text.contains(':') {
        return check_seconds(parse_part("seconds", text)?);
    }

    let mut parts = text.split(':');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(SeekError::InvalidFormat(text.to_string()));
    };
    let minutes = check_seconds(parse_part("minutes", minutes)?)?;
    let seconds = check_seconds(parse_part("seconds", seconds)?)?;
    check_seconds(minutes * 60.0 + seconds)
}

fn parse_part(part: &'static str, raw: &str) -> Result<f64, SeekError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| SeekError::InvalidNumber {
            part,
            value: raw.to_string(),
        })
}

fn check_seconds(seconds: f64) -> Result<f64, SeekError> {
    if !seconds.is_finite() {
        return Err(SeekError::NotFinite);
    }
    if seconds < 0.0 {
        return Err(SeekError::Negative);
    }
    Ok(seconds)
}
