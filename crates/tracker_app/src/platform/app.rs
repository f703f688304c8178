use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use tracker_core::{LifecycleState, Msg, TrackerStore};
use tracker_engine::{EngineEvent, EngineHandle};
use tracker_logging::{tracker_error, tracker_info, tracker_warn};

use super::args::{parse_args, Cli, Command, RunOptions, USAGE};
use super::config::AppConfig;
use super::effects::{map_event, EffectRunner};
use super::logging;
use super::render::Renderer;

/// What the user asked to track.
enum Submission {
    File(PathBuf),
    Url(String),
}

pub fn run_app() -> ExitCode {
    let cli = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln!("Error: {err:#}");
            eprintln!("Run 'segtrack --help' for usage.");
            return ExitCode::from(2);
        }
    };

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            tracker_error!("{:#}", err);
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    if cli.command == Command::Help {
        print!("{USAGE}");
        return Ok(ExitCode::SUCCESS);
    }

    let config = AppConfig::load(cli.config.as_deref())?;
    logging::initialize(&config);
    let engine =
        EngineHandle::new(config.backend_settings()?).context("Failed to start the engine")?;

    match cli.command {
        Command::SubmitFile { path, options } => {
            track(EffectRunner::new(engine), Submission::File(path), &options)
        }
        Command::SubmitUrl { url, options } => {
            track(EffectRunner::new(engine), Submission::Url(url), &options)
        }
        Command::Health => check_health(&engine),
        Command::Cleanup { task_id } => {
            cleanup(&engine, &task_id)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Help => Ok(ExitCode::SUCCESS),
    }
}

/// Submits one video and follows it to a terminal state.
fn track(runner: EffectRunner, submission: Submission, options: &RunOptions) -> Result<ExitCode> {
    let mut store = TrackerStore::new();
    let mut renderer = Renderer::default();
    store.subscribe(Box::new(move |view| {
        for line in renderer.render(view) {
            println!("{line}");
        }
    }));

    let input = match submission {
        Submission::File(path) => Msg::FileSelected(path),
        Submission::Url(url) => Msg::UrlChanged(url),
    };
    runner.enqueue(store.dispatch(input));
    if !store.state().input().can_submit() {
        bail!("Nothing to submit: the video URL is empty");
    }
    runner.enqueue(store.dispatch(Msg::SubmitClicked));

    while !store.state().lifecycle().is_terminal() {
        let Some(event) = runner.engine().recv() else {
            runner.enqueue(store.dispatch(Msg::Teardown));
            bail!("Engine stopped before the job finished");
        };
        if let Some(msg) = map_event(event) {
            runner.enqueue(store.dispatch(msg));
        }
    }

    let lifecycle = store.state().lifecycle();
    tracker_info!("Job finished: {:?}", lifecycle);

    if lifecycle == LifecycleState::Succeeded {
        if let Some(number) = options.seek {
            let index = number - 1;
            if store.state().seek_target(index).is_some() {
                runner.enqueue(store.dispatch(Msg::SegmentClicked { index }));
            } else {
                tracker_warn!("Seek to missing segment {}", number);
                eprintln!("Segment {number} does not exist");
            }
        }
    }

    if options.cleanup {
        let job_id = store
            .state()
            .job()
            .and_then(|job| job.id.as_ref())
            .map(|id| id.to_string());
        match job_id {
            Some(job_id) => cleanup(runner.engine(), &job_id)?,
            None => eprintln!("Nothing to clean up: the backend never accepted the job"),
        }
    }

    Ok(if lifecycle == LifecycleState::Succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn check_health(engine: &EngineHandle) -> Result<ExitCode> {
    engine.check_health();
    loop {
        match engine.recv().context("Engine stopped before answering")? {
            EngineEvent::Health(Ok(status)) => {
                println!("Backend status: {status}");
                return Ok(ExitCode::SUCCESS);
            }
            EngineEvent::Health(Err(err)) => {
                tracker_warn!("Health check failed: {}", err);
                println!("Backend unavailable: {err}");
                return Ok(ExitCode::FAILURE);
            }
            _ => {}
        }
    }
}

fn cleanup(engine: &EngineHandle, task_id: &str) -> Result<()> {
    engine.cleanup(task_id);
    loop {
        match engine.recv().context("Engine stopped before answering")? {
            EngineEvent::CleanedUp {
                task_id: cleaned,
                result,
            } if cleaned == task_id => {
                let message = result
                    .map_err(|err| anyhow::anyhow!(err.user_message("Cleanup failed")))
                    .with_context(|| format!("Failed to clean up task {task_id}"))?;
                println!("{message}");
                return Ok(());
            }
            _ => {}
        }
    }
}
