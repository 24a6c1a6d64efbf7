// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Query parameter structs reject unknown and missing fields with 400 before
//! any explorer request is made.

mod common;

use axum::http::StatusCode;
use common::{ExplorerData, app_for, get, spawn_explorer};
use std::sync::{Arc, Mutex};

async fn check_rejected(uri: &str, mentions: &str) {
    let data = Arc::new(Mutex::new(ExplorerData::default()));
    let url = spawn_explorer(Arc::clone(&data)).await;

    let (status, body) = get(app_for(&url), uri).await;

    assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    let text = body.as_str().unwrap_or_default().to_string();
    assert!(text.contains(mentions), "{uri}: {text}");
    assert!(data.lock().unwrap().requests.is_empty());
}

#[tokio::test]
async fn unknown_apps_param_returns_400() {
    check_rejected("/v1/registries/ba/apps?repo=r&limit=5", "limit").await;
}

#[tokio::test]
async fn unknown_latest_param_returns_400() {
    check_rejected("/v1/registries/ts/latest?addresses=a&address=b", "address").await;
}

#[tokio::test]
async fn unknown_categories_param_returns_400() {
    check_rejected("/v1/registries/ts/categories?repo=r&name=x", "name").await;
}

#[tokio::test]
async fn missing_repo_returns_400() {
    check_rejected("/v1/registries/ts/apps?name=x", "repo").await;
}

#[tokio::test]
async fn missing_addresses_returns_400() {
    check_rejected("/v1/registries/ts/latest", "addresses").await;
}
