// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::protocol::{CompressedProtocol, PositionalProtocol};
use crate::routes::RouteRegistry;
use crate::service::AppRegistry;
use crate::source::{InsightExplorer, SourceError};
use config::RegistryConfig;
use std::sync::Arc;

pub type Explorer = Arc<InsightExplorer>;

/// The two registries served by this process, sharing one explorer client.
pub struct Registries {
    pub compressed: AppRegistry<CompressedProtocol, Explorer>,
    pub positional: AppRegistry<PositionalProtocol, Explorer>,
}

impl Registries {
    pub fn new(explorer: Explorer) -> Self {
        Self {
            compressed: AppRegistry::new(CompressedProtocol::default(), explorer.clone()),
            positional: AppRegistry::new(PositionalProtocol, explorer),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: RegistryConfig,
    pub route_registry: RouteRegistry,
    pub registries: Arc<Registries>,
}

impl AppState {
    pub fn new(config: RegistryConfig) -> Result<Self, SourceError> {
        let explorer = Arc::new(InsightExplorer::new(&config.explorer)?);
        Ok(Self {
            config,
            route_registry: RouteRegistry::new(),
            registries: Arc::new(Registries::new(explorer)),
        })
    }
}
