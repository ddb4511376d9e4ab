use std::{num::NonZeroUsize, thread};

pub const PROGRAM_NAME: &str = "sieve";
pub const PROGRAM_LOG_LEVEL: &str = "SIEVE_LOG_LEVEL";
/// Overrides the default worker count when `--threads` is not given.
pub const PROGRAM_THREADS: &str = "SIEVE_THREADS";

/// Timestamp layout used for the last-modified column of the report.
pub const REPORT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const FALLBACK_THREADS: usize = 4;

/// Number of worker threads to use for a scan.
///
/// `SIEVE_THREADS` wins when it holds a positive integer, otherwise the
/// available parallelism of the machine is used.
pub fn default_thread_count() -> usize {
    threads_from_env().unwrap_or_else(|| {
        thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(FALLBACK_THREADS)
    })
}

fn threads_from_env() -> Option<usize> {
    std::env::var(PROGRAM_THREADS)
        .ok()
        .and_then(|s| s.trim().parse::<NonZeroUsize>().ok())
        .map(NonZeroUsize::get)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
