mod config;
pub mod logging;

pub use config::{
    PROGRAM_LOG_LEVEL, PROGRAM_NAME, PROGRAM_THREADS, REPORT_TIME_FORMAT, default_thread_count,
};

pub use logging::init;
