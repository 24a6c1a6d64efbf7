// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Bookkeeping of the routes mounted on the router, listed by `GET /`.

use axum::{Router, routing::MethodRouter};
use serde::Serialize;
use std::sync::{Arc, RwLock};

/// Prefix under which every versioned route is nested.
pub const API_VERSION: &str = "/v1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteInfo {
    /// Full path pattern, e.g. `/v1/registries/:tag/apps`.
    pub path: String,
    pub method: String,
}

/// Shared, append-only list of mounted routes.
#[derive(Clone, Default)]
pub struct RouteRegistry(Arc<RwLock<Vec<RouteInfo>>>);

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, path: &str, method: &str) {
        if let Ok(mut routes) = self.0.write() {
            routes.push(RouteInfo {
                path: path.to_string(),
                method: method.to_string(),
            });
        }
    }

    pub fn routes(&self) -> Vec<RouteInfo> {
        self.0.read().map(|r| r.clone()).unwrap_or_default()
    }
}

/// Mount a route and record it, with `prefix`, in a [`RouteRegistry`].
pub trait RegisterRoute<S: Clone + Send + Sync + 'static> {
    /// `path` is mounted as given since routers are nested under `prefix`;
    /// the registry records `prefix` + `path`.
    fn route_registered(
        self,
        registry: &RouteRegistry,
        prefix: &str,
        path: &str,
        method: &str,
        handler: MethodRouter<S>,
    ) -> Self;
}

impl<S: Clone + Send + Sync + 'static> RegisterRoute<S> for Router<S> {
    fn route_registered(
        self,
        registry: &RouteRegistry,
        prefix: &str,
        path: &str,
        method: &str,
        handler: MethodRouter<S>,
    ) -> Self {
        registry.add(&format!("{}{}", prefix, path), method);
        self.route(path, handler)
    }
}
