use tracker_core::{LifecycleState, TrackerView};

/// Turns successive views into terminal lines, printing only what changed.
#[derive(Default)]
pub(crate) struct Renderer {
    last: Option<TrackerView>,
}

impl Renderer {
    pub(crate) fn render(&mut self, view: &TrackerView) -> Vec<String> {
        let previous = self.last.replace(view.clone());
        let previous = previous.as_ref();
        let mut lines = Vec::new();

        let job_changed = previous.map(|p| &p.job_id) != Some(&view.job_id);
        if job_changed {
            if let Some(job_id) = &view.job_id {
                lines.push(format!("Task {job_id}"));
            }
        }

        let status_changed = previous.map(|p| (&p.status_text, p.lifecycle))
            != Some((&view.status_text, view.lifecycle));
        if status_changed {
            if let Some(status) = &view.status_text {
                lines.push(format!("[{}] {}", lifecycle_label(view.lifecycle), status));
            }
        }

        let preview_changed = previous.map(|p| &p.preview) != Some(&view.preview);
        if preview_changed {
            if let Some(preview) = &view.preview {
                lines.push(format!("Media: {preview}"));
            }
        }

        let first_result = previous.is_none_or(|p| p.lifecycle != LifecycleState::Succeeded)
            && view.lifecycle == LifecycleState::Succeeded;
        if first_result {
            lines.extend(segment_table(view));
        }

        if view.error != previous.and_then(|p| p.error.clone()) {
            if let Some(error) = &view.error {
                lines.push(format!("Error: {error}"));
            }
        }
        lines
    }
}

fn lifecycle_label(lifecycle: LifecycleState) -> &'static str {
    match lifecycle {
        LifecycleState::Idle => "idle",
        LifecycleState::Submitting => "submitting",
        LifecycleState::Processing => "processing",
        LifecycleState::Succeeded => "done",
        LifecycleState::Failed => "failed",
    }
}

fn segment_table(view: &TrackerView) -> Vec<String> {
    if view.segments.is_empty() {
        return vec!["No action segments detected.".to_string()];
    }
    let width = view
        .segments
        .iter()
        .map(|row| row.action.chars().count())
        .max()
        .unwrap_or(0);
    let mut lines = vec![format!("{} action segments:", view.segments.len())];
    lines.extend(view.segments.iter().map(|row| {
        format!(
            "{:>3}. {:<width$}  {} - {}",
            row.number,
            row.action,
            format_time(row.start_time),
            format_time(row.end_time),
        )
    }));
    lines
}

/// Formats seconds as `m:ss`, keeping a tenth when the value has one.
pub(crate) fn format_time(seconds: f64) -> String {
    let tenths = (seconds * 10.0).round() as u64;
    let minutes = tenths / 600;
    let rest = tenths % 600;
    if rest % 10 == 0 {
        format!("{}:{:02}", minutes, rest / 10)
    } else {
        format!("{}:{:02}.{}", minutes, rest / 10, rest % 10)
    }
}

pub(crate) fn format_seek(seconds: f64, media: Option<&str>) -> String {
    match media {
        Some(media) => format!("Seek to {} in {}", format_time(seconds), media),
        None => format!("Seek to {}", format_time(seconds)),
    }
}
