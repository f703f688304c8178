use crate::seek::{resolve_seek_target, SeekError, TimeValue};
use crate::{ResultSet, Segment};

/// A segment exactly as the backend described it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSegment {
    pub action: String,
    pub start_time: TimeValue,
    pub end_time: TimeValue,
}

/// The result payload of a finished job, before normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawResult {
    /// `None` when the payload carried no segment list at all.
    pub segments: Option<Vec<RawSegment>>,
    pub media_locator: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NormalizeError {
    #[error("result has no action segments")]
    MissingSegments,
    #[error("segment {index} has a bad {field}: {source}")]
    Timestamp {
        index: usize,
        field: &'static str,
        source: SeekError,
    },
    #[error("segment {index} ends before it starts")]
    Inverted { index: usize },
}

/// Converts a raw payload into a [`ResultSet`] with all times in seconds.
///
/// Segment order is preserved. Any malformed segment rejects the whole result.
pub fn normalize_result(raw: RawResult) -> Result<ResultSet, NormalizeError> {
    let raw_segments = raw.segments.ok_or(NormalizeError::MissingSegments)?;

    let segments = raw_segments
        .into_iter()
        .enumerate()
        .map(|(index, segment)| normalize_segment(index, segment))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultSet {
        segments,
        media_locator: raw.media_locator.filter(|locator| !locator.trim().is_empty()),
    })
}

fn normalize_segment(index: usize, raw: RawSegment) -> Result<Segment, NormalizeError> {
    let start_time =
        resolve_seek_target(&raw.start_time).map_err(|source| NormalizeError::Timestamp {
            index,
            field: "start_time",
            source,
        })?;
    let end_time =
        resolve_seek_target(&raw.end_time).map_err(|source| NormalizeError::Timestamp {
            index,
            field: "end_time",
            source,
        })?;
    if start_time > end_time {
        return Err(NormalizeError::Inverted { index });
    }
    Ok(Segment {
        action: raw.action,
        start_time,
        end_time,
    })
}
