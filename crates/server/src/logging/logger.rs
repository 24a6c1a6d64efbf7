// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to install global subscriber: {0}")]
    InitError(#[from] tracing_subscriber::util::TryInitError),
}

/// Configuration for logging initialization
pub struct LoggingConfig<'a> {
    pub level: &'a str,
    pub json_format: bool,
    pub strip_ansi: bool,
    pub write_to_file: bool,
    pub write_path: &'a str,
    pub write_max_file_size: u64,
    pub write_max_files: usize,
}

impl<'a> From<&'a config::LogConfig> for LoggingConfig<'a> {
    fn from(log: &'a config::LogConfig) -> Self {
        Self {
            level: &log.level,
            json_format: log.json,
            strip_ansi: log.strip_ansi,
            write_to_file: log.write,
            write_path: &log.write_path,
            write_max_file_size: log.write_max_file_size,
            write_max_files: log.write_max_files,
        }
    }
}

/// Build the event filter for a configured level.
///
/// `http` keeps everything at `info` and enables the request log target.
pub fn filter_for(level: &str) -> Result<EnvFilter, LoggingError> {
    let directives = if level == "http" {
        "info,http=debug"
    } else {
        level
    };
    EnvFilter::try_new(directives).map_err(|source| LoggingError::InvalidLogLevel {
        level: level.to_string(),
        source,
    })
}

/// Install the global tracing subscriber.
///
/// # Examples
/// ```no_run
/// use server::logging::{self, LoggingConfig};
///
/// logging::init_with_config(LoggingConfig {
///     level: "http",
///     json_format: true,
///     strip_ansi: false,
///     write_to_file: true,
///     write_path: "./logs",
///     write_max_file_size: 5242880,
///     write_max_files: 5,
/// })?;
/// # Ok::<(), server::logging::LoggingError>(())
/// ```
///
/// # Log Rotation
/// When a log file reaches `write_max_file_size` it is rotated to
/// `logs.log.1`, `logs.log.2` and so on, keeping `write_max_files` files in
/// total.
pub fn init_with_config(config: LoggingConfig) -> Result<(), LoggingError> {
    let filter = filter_for(config.level)?;
    let registry = tracing_subscriber::registry().with(filter);

    let console = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(!config.strip_ansi);

    if !config.write_to_file {
        if config.json_format {
            registry.with(fmt::layer().json()).try_init()?;
        } else {
            registry.with(console).try_init()?;
        }
        return Ok(());
    }

    std::fs::create_dir_all(config.write_path)?;
    let log_file_path = PathBuf::from(config.write_path).join("logs.log");
    // write_max_files counts the active file too
    let file_appender = BasicRollingFileAppender::new(
        log_file_path,
        RollingConditionBasic::new().max_size(config.write_max_file_size),
        config.write_max_files.saturating_sub(1),
    )?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // The writer must outlive every event; leak the guard.
    std::mem::forget(guard);

    if config.json_format {
        registry
            .with(fmt::layer().json())
            .with(fmt::layer().json().with_writer(non_blocking))
            .try_init()?;
    } else {
        let file = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_writer(non_blocking);
        registry.with(console).with(file).try_init()?;
    }

    Ok(())
}
