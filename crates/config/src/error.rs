// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Failed to load env file '{path}': {message}")]
    EnvFileError { path: String, message: String },

    #[error("Explorer configuration error: {0}")]
    ExplorerError(#[from] crate::explorer::ExplorerError),

    #[error("Metrics configuration error: {0}")]
    MetricsError(#[from] crate::metrics::MetricsError),

    #[error("{0}")]
    ValidateError(String),
}
