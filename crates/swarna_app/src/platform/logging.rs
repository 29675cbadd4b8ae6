//! Logger setup for the terminal front end.
//!
//! The REPL owns stdout, so by default records go to `./swarna.log` only.

use std::fs::File;
use std::path::PathBuf;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

const LOG_FILE: &str = "./swarna.log";

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to ./swarna.log in current directory.
    File,
    /// Write to stderr.
    Terminal,
}

impl LogDestination {
    pub fn from_flag(log_to_file: bool) -> Self {
        if log_to_file {
            LogDestination::File
        } else {
            LogDestination::Terminal
        }
    }
}

pub fn initialize(destination: LogDestination, configured_level: Option<&str>) {
    let level = swarna_logging::resolve_level(configured_level, LevelFilter::Info);
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File => match create_file_logger(level, config.clone()) {
            Some(file_logger) => vec![file_logger],
            // Fall back to warnings on stderr rather than losing everything.
            None => vec![term_logger(LevelFilter::Warn, config)],
        },
        LogDestination::Terminal => vec![term_logger(level, config)],
    };

    let _ = CombinedLogger::init(loggers);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn term_logger(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Stderr, ColorChoice::Auto)
}

fn create_file_logger(level: LevelFilter, config: Config) -> Option<Box<WriteLogger<File>>> {
    let log_path = PathBuf::from(LOG_FILE);
    match File::create(&log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
            None
        }
    }
}
