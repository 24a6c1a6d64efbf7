// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! In-process Insight explorer and router helpers shared by the integration
//! tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use config::RegistryConfig;
use http_body_util::BodyExt;
use serde::Deserialize;
use serde_json::{Value, json};
use server::app::create_app;
use server::state::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

pub const PUBLISH: &str = "0.00011";
pub const META: &str = "0.0001";
pub const DESCRIPTION: &str = "0.00012";
pub const CATEGORIES: &str = "0.0002";

/// Canned explorer: per-address histories, or a forced error status.
#[derive(Default)]
pub struct ExplorerData {
    pub histories: HashMap<String, Vec<Value>>,
    pub fail_with: Option<u16>,
    pub requests: Vec<(String, usize, usize)>,
}

pub type SharedExplorer = Arc<Mutex<ExplorerData>>;

#[derive(Deserialize)]
struct AddrsTxs {
    addrs: String,
    from: usize,
    to: usize,
}

async fn addrs_txs(
    State(data): State<SharedExplorer>,
    Json(req): Json<AddrsTxs>,
) -> Result<Json<Value>, StatusCode> {
    let mut data = data.lock().unwrap();
    data.requests.push((req.addrs.clone(), req.from, req.to));
    if let Some(code) = data.fail_with {
        return Err(StatusCode::from_u16(code).unwrap());
    }

    let history: Vec<Value> = req
        .addrs
        .split(',')
        .flat_map(|a| data.histories.get(a).cloned().unwrap_or_default())
        .collect();
    let end = req.to.min(history.len());
    let start = req.from.min(end);
    Ok(Json(json!({
        "totalItems": history.len(),
        "from": req.from,
        "to": req.to,
        "items": history[start..end],
    })))
}

/// Serve the explorer on an ephemeral port and return its base URL.
pub async fn spawn_explorer(data: SharedExplorer) -> String {
    let app = Router::new()
        .route("/insight-api/addrs/txs", post(addrs_txs))
        .with_state(data);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/insight-api", addr)
}

pub fn app_for(explorer_url: &str) -> Router {
    let mut config = RegistryConfig::default();
    config.explorer.url = explorer_url.to_string();
    config.explorer.timeout_secs = 5;
    create_app(AppState::new(config).unwrap())
}

/// Send a GET request and return the status with the body parsed as JSON
/// (or as a JSON string when it is not JSON).
pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()));
    (status, body)
}

// ================================================================================================
// Transaction builders
// ================================================================================================

pub fn tx(txid: &str, script_hex: &str, value: &str, address: &str) -> Value {
    json!({
        "txid": txid,
        "vout": [
            {
                "value": "0.00000000",
                "scriptPubKey": {"hex": script_hex, "asm": "OP_RETURN"},
                "spentTxId": null
            },
            {
                "value": value,
                "scriptPubKey": {"hex": "76a914", "addresses": [address]},
                "spentTxId": null
            }
        ]
    })
}

fn utf16_le_hex(units: &[u16]) -> String {
    units.iter().map(|u| hex::encode(u.to_le_bytes())).collect()
}

pub fn compressed_publish(name: &str, json: &str) -> String {
    format!(
        "6a4c50{}{}23{}",
        hex::encode("#ba#"),
        hex::encode(name),
        utf16_le_hex(&lz_str::compress(json))
    )
}

pub fn compressed_meta(json: &str) -> String {
    format!(
        "6a4c50{}{}",
        hex::encode("#ba#"),
        utf16_le_hex(&lz_str::compress(json))
    )
}

pub fn positional(fields: &[&str]) -> String {
    format!("6a4c50{}{}", hex::encode("#ts#"), hex::encode(fields.join("#")))
}
