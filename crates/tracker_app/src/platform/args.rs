use std::path::PathBuf;

use anyhow::{bail, Context, Result};

pub(crate) const USAGE: &str = "\
Usage:
  segtrack [--config <file>] submit-file <path> [--seek <n>] [--cleanup]
  segtrack [--config <file>] submit-url <url> [--seek <n>] [--cleanup]
  segtrack [--config <file>] health
  segtrack [--config <file>] cleanup <task_id>

Options:
  --config <file>   Read settings from a RON file (default: ./segtrack.ron if present)
  --seek <n>        After success, seek to result segment n (1-based)
  --cleanup         Delete the backend's copy of the media once the job ends
  -h, --help        Show this help

Environment:
  SEGTRACK_BACKEND_URL, SEGTRACK_POLL_INTERVAL_MS,
  SEGTRACK_LOG_LEVEL, SEGTRACK_LOG_FILE
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    SubmitFile { path: PathBuf, options: RunOptions },
    SubmitUrl { url: String, options: RunOptions },
    Health,
    Cleanup { task_id: String },
    Help,
}

/// What to do once a submitted job reaches a terminal state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct RunOptions {
    /// One-based segment number to seek to after success.
    pub seek: Option<usize>,
    pub cleanup: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Cli {
    pub config: Option<PathBuf>,
    pub command: Command,
}

/// Parses the arguments that follow the program name.
pub(crate) fn parse_args<I>(args: I) -> Result<Cli>
where
    I: IntoIterator<Item = String>,
{
    let mut config = None;
    let mut positional = Vec::new();
    let mut options = RunOptions::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                return Ok(Cli {
                    config,
                    command: Command::Help,
                })
            }
            "--config" => {
                let path = args.next().context("--config requires a file path")?;
                config = Some(PathBuf::from(path));
            }
            "--seek" => {
                let raw = args.next().context("--seek requires a segment number")?;
                options.seek = Some(parse_segment_number(&raw)?);
            }
            "--cleanup" => options.cleanup = true,
            flag if flag.starts_with("--config=") => {
                config = Some(PathBuf::from(&flag["--config=".len()..]));
            }
            flag if flag.starts_with("--seek=") => {
                options.seek = Some(parse_segment_number(&flag["--seek=".len()..])?);
            }
            flag if flag.starts_with('-') && flag.len() > 1 => bail!("Unknown option: {flag}"),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let command = match positional.next().as_deref() {
        None => Command::Help,
        Some("submit-file") => {
            let path = positional.next().context("submit-file requires a path")?;
            Command::SubmitFile {
                path: PathBuf::from(path),
                options: options.clone(),
            }
        }
        Some("submit-url") => {
            let url = positional.next().context("submit-url requires a URL")?;
            Command::SubmitUrl {
                url,
                options: options.clone(),
            }
        }
        Some("health") => Command::Health,
        Some("cleanup") => {
            let task_id = positional.next().context("cleanup requires a task id")?;
            Command::Cleanup { task_id }
        }
        Some(other) => bail!("Unknown command: {other}"),
    };

    if let Some(extra) = positional.next() {
        bail!("Unexpected argument: {extra}");
    }
    let takes_run_options = matches!(
        command,
        Command::SubmitFile { .. } | Command::SubmitUrl { .. }
    );
    if !takes_run_options && options != RunOptions::default() {
        bail!("--seek and --cleanup only apply to submit-file and submit-url");
    }

    Ok(Cli { config, command })
}

fn parse_segment_number(raw: &str) -> Result<usize> {
    let number: usize = raw
        .trim()
        .parse()
        .with_context(|| format!("Invalid segment number: {raw}"))?;
    if number == 0 {
        bail!("Segment numbers start at 1");
    }
    Ok(number)
}
