mod app;
mod config;
mod effects;
mod logging;
mod ui;

use anyhow::Context;
use swarna_logging::swarna_info;

pub fn run() -> anyhow::Result<()> {
    let config = config::AppConfig::load().context("failed to load configuration")?;
    logging::initialize(
        logging::LogDestination::from_flag(config.log_to_file),
        config.log_level.as_deref(),
    );
    swarna_info!(
        "Starting swarna: top_k={:?} retries={} state_dir={:?}",
        config.top_k,
        config.retry.max_retries,
        config.state_dir()
    );
    app::run_app(&config)
}
