//! Logging setup for the application.

use crate::config::GlobalLogLevel;
use env_logger::{Builder, Env};
use log::LevelFilter;

impl From<GlobalLogLevel> for LevelFilter {
    fn from(level: GlobalLogLevel) -> Self {
        match level {
            GlobalLogLevel::Trace => Self::Trace,
            GlobalLogLevel::Debug => Self::Debug,
            GlobalLogLevel::Info => Self::Info,
            GlobalLogLevel::Warn => Self::Warn,
            GlobalLogLevel::Error => Self::Error,
        }
    }
}

/// Initializes the global logger.
///
/// `RUST_LOG`, when set, takes precedence over `level`. Calling this more than
/// once keeps the first logger.
pub fn init_logger(level: GlobalLogLevel) {
    let default_filter = LevelFilter::from(level).to_string().to_lowercase();
    let env = Env::default().default_filter_or(default_filter);

    if Builder::from_env(env).format_timestamp_millis().try_init().is_err() {
        log::debug!("Logger already initialized; keeping the existing one");
        return;
    }

    log::debug!("Logger initialized with global log level: {level:?}");
}
