// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error(
        "Invalid Prometheus prefix '{0}': must start with [a-zA-Z_:] and contain only [a-zA-Z0-9_:]"
    )]
    InvalidPrometheusPrefix(String),
}

/// Configuration for Prometheus metrics
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Enable or disable the /metrics endpoint and request metrics
    ///
    /// Env: ARS_METRICS_ENABLED
    /// Default: false
    pub enabled: bool,

    /// Prometheus metric name prefix
    ///
    /// Env: ARS_METRICS_PROM_PREFIX
    /// Default: app_registry
    pub prometheus_prefix: String,
}

pub(crate) fn default_prometheus_prefix() -> String {
    "app_registry".to_string()
}

fn is_valid_prometheus_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

impl MetricsConfig {
    pub(crate) fn validate(&self) -> Result<(), MetricsError> {
        if !is_valid_prometheus_prefix(&self.prometheus_prefix) {
            return Err(MetricsError::InvalidPrometheusPrefix(
                self.prometheus_prefix.clone(),
            ));
        }
        Ok(())
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            prometheus_prefix: default_prometheus_prefix(),
        }
    }
}
