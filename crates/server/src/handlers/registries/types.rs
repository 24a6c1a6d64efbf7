// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::aggregate::{ScanReport, ScanStats};
use crate::protocol::{CompressedProtocol, PositionalProtocol, RegistryProtocol};
use crate::service::RegistryError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

// ================================================================================================
// Errors
// ================================================================================================

#[derive(Debug, Error)]
pub enum RegistryApiError {
    #[error("Unknown registry '{0}', expected 'ba' or 'ts'")]
    UnknownRegistry(String),

    #[error("{0}")]
    Registry(#[from] RegistryError),
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

macro_rules! impl_error_response {
    ($error_type:ty, $($variant:pat => $status:ident),+ $(,)?) => {
        impl IntoResponse for $error_type {
            fn into_response(self) -> Response {
                let status = match &self {
                    $($variant => StatusCode::$status,)+
                };
                error_response(status, self.to_string())
            }
        }
    };
}

impl_error_response!(RegistryApiError,
    RegistryApiError::UnknownRegistry(_) => NOT_FOUND,
    RegistryApiError::Registry(RegistryError::InvalidRequest(_)) => BAD_REQUEST,
    RegistryApiError::Registry(RegistryError::Unsupported { .. }) => NOT_FOUND,
    RegistryApiError::Registry(RegistryError::Source(_)) => BAD_GATEWAY,
);

// ================================================================================================
// Registry selection
// ================================================================================================

/// Registry addressed by the `:tag` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryTag {
    Compressed,
    Positional,
}

impl RegistryTag {
    pub fn parse(tag: &str) -> Result<Self, RegistryApiError> {
        match tag {
            t if t.eq_ignore_ascii_case(<CompressedProtocol as RegistryProtocol>::TAG) => {
                Ok(Self::Compressed)
            }
            t if t.eq_ignore_ascii_case(<PositionalProtocol as RegistryProtocol>::TAG) => {
                Ok(Self::Positional)
            }
            other => Err(RegistryApiError::UnknownRegistry(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compressed => <CompressedProtocol as RegistryProtocol>::TAG,
            Self::Positional => <PositionalProtocol as RegistryProtocol>::TAG,
        }
    }
}

// ================================================================================================
// Query Parameters
// ================================================================================================

/// Query parameters for GET /registries/{tag}/apps
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppsQueryParams {
    /// Registry address the apps were published to.
    pub repo: String,

    /// Case-insensitive name substring; empty matches everything.
    #[serde(default)]
    pub name: String,
}

/// Query parameters for GET /registries/{tag}/latest
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LatestQueryParams {
    /// Comma separated app addresses.
    pub addresses: String,
}

impl LatestQueryParams {
    pub fn address_list(&self) -> Vec<String> {
        self.addresses
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Query parameters for GET /registries/{tag}/categories
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoriesQueryParams {
    pub repo: String,
}

// ================================================================================================
// Responses
// ================================================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryResponse<T> {
    pub protocol: &'static str,
    pub result: T,
    pub stats: ScanStats,
}

impl<T> RegistryResponse<T> {
    pub fn new(tag: RegistryTag, report: ScanReport<T>) -> Self {
        Self {
            protocol: tag.as_str(),
            result: report.result,
            stats: report.stats,
        }
    }
}
