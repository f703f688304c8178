//! `segtrack`: submits a video for action segmentation and follows the job
//! until the backend is done with it.
//!
//! Usage:
//!   segtrack submit-file <path> [--seek <n>] [--cleanup]
//!   segtrack submit-url <url> [--seek <n>] [--cleanup]
//!   segtrack health
//!   segtrack cleanup <task_id>

use std::process::ExitCode;

mod platform;

fn main() -> ExitCode {
    platform::run_app()
}
