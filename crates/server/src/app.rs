// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::{
    logging::http_logger_middleware,
    metrics::metrics_middleware,
    routes::{self, API_VERSION},
    state::AppState,
};
use axum::{Router, middleware, routing::get};
use tower_http::cors::CorsLayer;

/// Assemble the router: versioned API under `/v1`, `/` listing, and
/// `/metrics` when metrics are enabled.
pub fn create_app(state: AppState) -> Router {
    let registry = &state.route_registry;
    registry.add("/", "get");

    let v1 = Router::new()
        .merge(routes::health::routes(registry))
        .merge(routes::version::routes(registry))
        .merge(routes::registries::routes(registry));

    let mut router = Router::new()
        .route("/", get(routes::root::root_handler))
        .nest(API_VERSION, v1);

    if state.config.metrics.enabled {
        router = router
            .merge(routes::metrics::routes(registry))
            .layer(middleware::from_fn(metrics_middleware));
    }

    router
        .layer(middleware::from_fn(http_logger_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
