// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

mod args;
mod error;
mod explorer;
mod express;
mod log;
mod metrics;

pub use args::Args;
pub use error::ConfigError;
pub use explorer::{ExplorerConfig, ExplorerError};
pub use express::ExpressConfig;
pub use log::LogConfig;
pub use metrics::{MetricsConfig, MetricsError};

use serde::Deserialize;
use std::path::Path;

const ENV_PREFIX: &str = "ARS_";

/// Flat view of the `ARS_*` environment, split into sections afterwards.
#[derive(Debug, Deserialize)]
struct EnvConfig {
    #[serde(default = "express::default_bind_host")]
    express_bind_host: String,
    #[serde(default = "express::default_port")]
    express_port: u16,

    #[serde(default = "log::default_level")]
    log_level: String,
    #[serde(default)]
    log_json: bool,
    #[serde(default)]
    log_strip_ansi: bool,
    #[serde(default)]
    log_write: bool,
    #[serde(default = "log::default_write_path")]
    log_write_path: String,
    #[serde(default = "log::default_write_max_file_size")]
    log_write_max_file_size: u64,
    #[serde(default = "log::default_write_max_files")]
    log_write_max_files: usize,

    #[serde(default = "explorer::default_url")]
    explorer_url: String,
    #[serde(default = "explorer::default_timeout_secs")]
    explorer_timeout_secs: u64,

    #[serde(default)]
    metrics_enabled: bool,
    #[serde(default = "metrics::default_prometheus_prefix")]
    metrics_prom_prefix: String,
}

impl From<EnvConfig> for RegistryConfig {
    fn from(env: EnvConfig) -> Self {
        Self {
            express: ExpressConfig {
                bind_host: env.express_bind_host,
                port: env.express_port,
            },
            log: LogConfig {
                level: env.log_level,
                json: env.log_json,
                strip_ansi: env.log_strip_ansi,
                write: env.log_write,
                write_path: env.log_write_path,
                write_max_file_size: env.log_write_max_file_size,
                write_max_files: env.log_write_max_files,
            },
            explorer: ExplorerConfig {
                url: env.explorer_url,
                timeout_secs: env.explorer_timeout_secs,
            },
            metrics: MetricsConfig {
                enabled: env.metrics_enabled,
                prometheus_prefix: env.metrics_prom_prefix,
            },
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub express: ExpressConfig,
    pub log: LogConfig,
    pub explorer: ExplorerConfig,
    pub metrics: MetricsConfig,
}

impl RegistryConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let env = envy::prefixed(ENV_PREFIX).from_env::<EnvConfig>()?;
        Self::finish(env)
    }

    /// Load variables from `path` (when it exists) into the process
    /// environment, then read the configuration from the environment.
    ///
    /// Variables already set in the environment take precedence over the file.
    pub fn from_env_file(path: &str) -> Result<Self, ConfigError> {
        if Path::new(path).exists() {
            dotenv::from_path(path).map_err(|e| ConfigError::EnvFileError {
                path: path.to_string(),
                message: e.to_string(),
            })?;
        }
        Self::from_env()
    }

    /// Build the configuration from explicit `(name, value)` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let env = envy::prefixed(ENV_PREFIX).from_iter::<_, EnvConfig>(vars)?;
        Self::finish(env)
    }

    fn finish(env: EnvConfig) -> Result<Self, ConfigError> {
        let config = Self::from(env);
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.express.validate()?;
        self.log.validate()?;
        self.explorer.validate()?;
        self.metrics.validate()?;
        Ok(())
    }
}
