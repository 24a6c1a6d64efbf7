// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::state::AppState;
use axum::{Json, extract::State};
use serde_json::{Value, json};

/// `GET /`: service metadata, the registries served and every mounted route.
pub async fn root_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "listen": format!("{}:{}", state.config.express.bind_host, state.config.express.port),
        "explorer": state.registries.compressed.source().base_url(),
        "registries": ["ba", "ts"],
        "routes": state.route_registry.routes()
    }))
}
