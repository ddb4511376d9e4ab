use std::{fmt, sync::OnceLock};

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

use crate::config::{PROGRAM_LOG_LEVEL, PROGRAM_NAME};

const DEFAULT_LEVEL: Level = Level::Warn;

/// Stderr logger. Every line carries a local timestamp, the level and the
/// module target with the `sieve_` crate prefix stripped.
pub struct Logger {
    level: Level,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            eprintln!(
                "{}",
                format_line(Local::now(), record.level(), record.target(), record.args())
            );
        }
    }

    fn flush(&self) {}
}

fn format_line(
    at: DateTime<Local>,
    level: Level,
    target: &str,
    args: &fmt::Arguments<'_>,
) -> String {
    format!(
        "{} {:<5} [{}] {}",
        at.format("%Y-%m-%d %H:%M:%S%.3f"),
        level,
        short_target(target),
        args
    )
}

/// `sieve_scanner::worker` -> `scanner::worker`
fn short_target(target: &str) -> &str {
    target
        .strip_prefix(PROGRAM_NAME)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(target)
}

fn get_level_from_env() -> Level {
    std::env::var(PROGRAM_LOG_LEVEL)
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(DEFAULT_LEVEL)
}

/// Install the stderr logger using `SIEVE_LOG_LEVEL`.
pub fn init() -> Result<(), SetLoggerError> {
    init_with_level(get_level_from_env())
}

pub fn init_with_level(level: Level) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    // Only the first caller registers the logger; later calls must not
    // lower or raise the max level behind the installed logger's back.
    let init_call = LOGGER.get().is_none();
    let logger = LOGGER.get_or_init(|| Logger { level });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(level.to_level_filter());
    }

    Ok(())
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
