//! Structured logging setup for hosts embedding Blossom Bridge

use crate::error::{BlossomError, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "`blossom_config=trace`")
    pub level: String,
    /// Whether to emit one JSON object per event
    pub json_format: bool,
    /// Optional file path for log output, appended to
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            file_path: None,
            include_targets: true,
        }
    }
}

/// Install a global tracing subscriber built from `config`.
///
/// Fails if the level filter does not parse, the log file cannot be opened,
/// or a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_new(&config.level).map_err(|e| {
        BlossomError::logging_with_source(format!("Invalid log filter '{}'", config.level), e)
    })?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let installed = match (&config.file_path, config.json_format) {
        (Some(path), json_format) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            let writer = Mutex::new(file);
            if json_format {
                registry
                    .with(
                        fmt::layer()
                            .json()
                            .with_target(config.include_targets)
                            .with_writer(writer),
                    )
                    .try_init()
            } else {
                registry
                    .with(
                        fmt::layer()
                            .with_ansi(false)
                            .with_target(config.include_targets)
                            .with_writer(writer),
                    )
                    .try_init()
            }
        }
        (None, true) => registry
            .with(fmt::layer().json().with_target(config.include_targets))
            .try_init(),
        (None, false) => registry
            .with(fmt::layer().with_target(config.include_targets))
            .try_init(),
    };

    installed.map_err(|e| {
        BlossomError::logging_with_source("Failed to install global tracing subscriber", e)
    })
}
