// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Explorer URL cannot be empty")]
    EmptyUrl,

    #[error("Invalid explorer URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Invalid explorer URL scheme '{0}'. Must be http:// or https://")]
    InvalidScheme(String),

    #[error("Explorer timeout must be greater than 0 seconds")]
    ZeroTimeout,
}

/// Block explorer the transaction history is read from.
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Base URL of an Insight-compatible explorer API
    ///
    /// Env: ARS_EXPLORER_URL
    /// Valid schemes: http://, https://
    /// Default: http://127.0.0.1:3001/insight-api
    pub url: String,

    /// Per-request timeout, in seconds
    ///
    /// Env: ARS_EXPLORER_TIMEOUT_SECS
    /// Default: 30
    pub timeout_secs: u64,
}

pub(crate) fn default_url() -> String {
    "http://127.0.0.1:3001/insight-api".to_string()
}

pub(crate) fn default_timeout_secs() -> u64 {
    30
}

impl ExplorerConfig {
    pub(crate) fn validate(&self) -> Result<(), ExplorerError> {
        if self.url.is_empty() {
            return Err(ExplorerError::EmptyUrl);
        }

        let parsed = url::Url::parse(&self.url).map_err(|source| ExplorerError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(ExplorerError::InvalidScheme(scheme.to_string())),
        }

        if self.timeout_secs == 0 {
            return Err(ExplorerError::ZeroTimeout);
        }

        Ok(())
    }
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
