// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use super::registry::{
    HTTP_REQUEST_ERROR, HTTP_REQUEST_SUCCESS, HTTP_REQUESTS, REQUEST_DURATION_SECONDS,
};

/// Route label for a request: the matched route pattern when there is one,
/// otherwise a fixed label so unmatched paths cannot blow up cardinality.
fn route_label(matched_path: Option<&MatchedPath>) -> String {
    matched_path
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string())
}

/// Metrics middleware for tracking HTTP requests
pub async fn metrics_middleware(
    matched_path: Option<MatchedPath>,
    req: Request,
    next: Next,
) -> Response {
    if req.uri().path() == "/metrics" {
        return next.run(req).await;
    }

    HTTP_REQUESTS.inc();
    let start = Instant::now();
    let method = req.method().to_string();
    let route = route_label(matched_path.as_ref());

    let response = next.run(req).await;

    let status = response.status();
    if status.is_client_error() || status.is_server_error() {
        HTTP_REQUEST_ERROR.inc();
    } else if status.is_success() {
        HTTP_REQUEST_SUCCESS.inc();
    }

    REQUEST_DURATION_SECONDS
        .with_label_values(&[method.as_str(), route.as_str(), status.as_str()])
        .observe(start.elapsed().as_secs_f64());

    response
}
