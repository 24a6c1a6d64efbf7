// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::ConfigError;
use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct ExpressConfig {
    /// Address to bind the HTTP server to
    ///
    /// Env: ARS_EXPRESS_BIND_HOST
    /// Default: 127.0.0.1
    pub bind_host: String,

    /// Port to bind the HTTP server to
    ///
    /// Env: ARS_EXPRESS_PORT
    /// Default: 8080
    pub port: u16,
}

pub(crate) fn default_bind_host() -> String {
    "127.0.0.1".to_string()
}

pub(crate) fn default_port() -> u16 {
    8080
}

impl ExpressConfig {
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::ValidateError(
                "Express port cannot be 0".to_string(),
            ));
        }

        if self.bind_host.parse::<IpAddr>().is_err() {
            return Err(ConfigError::ValidateError(format!(
                "Express bind host '{}' is not a valid IP address",
                self.bind_host
            )));
        }

        Ok(())
    }
}

impl Default for ExpressConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
        }
    }
}
