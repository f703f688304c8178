//! Logger setup for the `segtrack` binary.
//!
//! Logs go to the configured file (default `./segtrack.log`) so the
//! terminal stays free for job output, unless `log_to_terminal` is set.

use tracker_logging::tracker_info;

use super::config::AppConfig;

pub(crate) fn initialize(config: &AppConfig) {
    tracker_logging::initialize(&config.log_destination(), config.log_level());
    tracker_info!(
        "segtrack {} starting; backend {}",
        env!("CARGO_PKG_VERSION"),
        config.backend_url
    );
}
