//! Logging setup: `env_logger` on stderr, `RUST_LOG` overrides the level.
//!
//! ```rust
//! use fe_core::logger;
//!
//! logger::init();
//! log::info!("compiled {} functions", 3);
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Filter string understood by `env_logger`
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// Initialize logger with default configuration (INFO level)
pub fn init() {
    init_with_level(LogLevel::Info);
}

/// Initialize logger with a default level. A second call is a no-op.
pub fn init_with_level(level: LogLevel) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.as_filter()),
    )
    .format_timestamp(None)
    .format_target(false)
    .target(env_logger::Target::Stderr)
    .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_map_to_filters() {
        assert_eq!(LogLevel::default().as_filter(), "info");
        assert_eq!(log::LevelFilter::from(LogLevel::Debug), log::LevelFilter::Debug);
        assert_eq!(log::LevelFilter::from(LogLevel::Error), log::LevelFilter::Error);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_with_level(LogLevel::Warn);
        init();
    }
}
