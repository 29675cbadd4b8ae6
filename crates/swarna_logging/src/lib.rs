#![deny(missing_docs)]
//! Shared logging utilities for the swarna workspace.
//!
//! Every crate logs through the `swarna_*` macros below so that records carry
//! the common `swarna` target and can be filtered as one unit.

use log::LevelFilter;

/// Log target attached to every record emitted through the `swarna_*` macros.
pub const TARGET: &str = "swarna";

/// Environment variable that overrides the configured log level.
pub const LEVEL_ENV: &str = "SWARNA_LOG";

/// Logs a trace-level message under the shared target.
#[macro_export]
macro_rules! swarna_trace {
    ($($arg:tt)*) => {{
        log::trace!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a debug-level message under the shared target.
#[macro_export]
macro_rules! swarna_debug {
    ($($arg:tt)*) => {{
        log::debug!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an info-level message under the shared target.
#[macro_export]
macro_rules! swarna_info {
    ($($arg:tt)*) => {{
        log::info!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs a warn-level message under the shared target.
#[macro_export]
macro_rules! swarna_warn {
    ($($arg:tt)*) => {{
        log::warn!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Logs an error-level message under the shared target.
#[macro_export]
macro_rules! swarna_error {
    ($($arg:tt)*) => {{
        log::error!(target: $crate::TARGET, $($arg)*);
    }};
}

/// Parses a level name such as `"info"` or `"DEBUG"`.
///
/// Returns `None` for anything `log` does not recognise.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse::<LevelFilter>().ok()
}

/// Resolves the effective level: `SWARNA_LOG` wins over `configured`, and
/// `configured` wins over `fallback`.
pub fn resolve_level(configured: Option<&str>, fallback: LevelFilter) -> LevelFilter {
    std::env::var(LEVEL_ENV)
        .ok()
        .as_deref()
        .and_then(parse_level)
        .or_else(|| configured.and_then(parse_level))
        .unwrap_or(fallback)
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let fallback = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let level = resolve_level(None, fallback);

    // Another test may already own the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
