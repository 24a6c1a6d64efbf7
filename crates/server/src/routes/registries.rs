// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{Router, routing::get};

use crate::{
    handlers::registries,
    routes::{API_VERSION, RegisterRoute, RouteRegistry},
    state::AppState,
};

pub fn routes(registry: &RouteRegistry) -> Router<AppState> {
    Router::new()
        .route_registered(
            registry,
            API_VERSION,
            "/registries/:tag/apps",
            "get",
            get(registries::get_apps),
        )
        .route_registered(
            registry,
            API_VERSION,
            "/registries/:tag/latest",
            "get",
            get(registries::get_latest),
        )
        .route_registered(
            registry,
            API_VERSION,
            "/registries/:tag/categories",
            "get",
            get(registries::get_categories),
        )
}
