// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Request log under target `http`: "METHOD /path?query STATUS DURATIONms".
///
/// Successful requests are logged at debug, client errors at warn and server
/// or upstream errors at error.
pub async fn http_logger_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let start = Instant::now();

    let response = next.run(req).await;

    let duration_ms = start.elapsed().as_millis();
    let status = response.status().as_u16();

    if status < 400 {
        tracing::debug!(
            target: "http",
            method = %method,
            path = %uri,
            status,
            duration_ms,
            "{method} {uri} {status} {duration_ms}ms"
        );
    } else if status < 500 {
        tracing::warn!(
            target: "http",
            method = %method,
            path = %uri,
            status,
            duration_ms,
            "{method} {uri} {status} {duration_ms}ms"
        );
    } else {
        tracing::error!(
            target: "http",
            method = %method,
            path = %uri,
            status,
            duration_ms,
            "{method} {uri} {status} {duration_ms}ms"
        );
    }

    response
}
