// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use lazy_static::lazy_static;
use prometheus::{
    Counter, CounterVec, Encoder, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
    core::Collector, proto::MetricFamily,
};
use std::sync::{Mutex, Once};

lazy_static! {
    pub static ref REGISTRY: Mutex<Option<Registry>> = Mutex::new(None);
    static ref INIT_ONCE: Once = Once::new();

    // Counter metrics - created without registering to default registry
    pub static ref HTTP_REQUESTS: Counter = Counter::new(
        "http_requests",
        "Total number of HTTP requests"
    )
    .expect("Failed to create http_requests counter");

    pub static ref HTTP_REQUEST_SUCCESS: Counter = Counter::new(
        "http_request_success",
        "Number of successful HTTP requests"
    )
    .expect("Failed to create http_request_success counter");

    pub static ref HTTP_REQUEST_ERROR: Counter = Counter::new(
        "http_request_error",
        "Number of HTTP request errors"
    )
    .expect("Failed to create http_request_error counter");

    pub static ref PAGES_FETCHED: Counter = Counter::new(
        "pages_fetched_total",
        "Transaction pages fetched from the explorer"
    )
    .expect("Failed to create pages_fetched_total counter");

    pub static ref RECORDS_EXTRACTED: CounterVec = CounterVec::new(
        Opts::new("records_extracted_total", "Registry outputs decoded into records"),
        &["protocol", "op"]
    )
    .expect("Failed to create records_extracted_total counter");

    pub static ref OUTPUTS_SKIPPED: CounterVec = CounterVec::new(
        Opts::new("outputs_skipped_total", "Qualifying registry outputs skipped as malformed"),
        &["protocol", "op"]
    )
    .expect("Failed to create outputs_skipped_total counter");

    // Histogram metrics - created without registering to default registry
    pub static ref REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "request_duration_seconds",
            "Duration of HTTP requests in seconds"
        ).buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["method", "route", "status_code"]
    )
    .expect("Failed to create request_duration_seconds histogram");
}

fn collectors() -> Vec<Box<dyn Collector>> {
    vec![
        Box::new(HTTP_REQUESTS.clone()),
        Box::new(HTTP_REQUEST_SUCCESS.clone()),
        Box::new(HTTP_REQUEST_ERROR.clone()),
        Box::new(PAGES_FETCHED.clone()),
        Box::new(RECORDS_EXTRACTED.clone()),
        Box::new(OUTPUTS_SKIPPED.clone()),
        Box::new(REQUEST_DURATION_SECONDS.clone()),
    ]
}

/// Register every metric under `prefix`. Later calls are no-ops.
pub fn init(prefix: &str) {
    INIT_ONCE.call_once(|| {
        let registry = Registry::new_custom(Some(prefix.to_string()), None)
            .expect("Failed to create Prometheus registry");
        for collector in collectors() {
            registry
                .register(collector)
                .expect("Failed to register metric");
        }

        if let Ok(mut slot) = REGISTRY.lock() {
            *slot = Some(registry);
        }
    });
}

/// Gather all metric families from the custom registry
pub fn gather_metric_families() -> Result<Vec<MetricFamily>, Box<dyn std::error::Error>> {
    let guard = REGISTRY
        .lock()
        .map_err(|_| "Metrics registry lock poisoned")?;
    let registry = guard
        .as_ref()
        .ok_or("Metrics not initialized - call init() first")?;
    Ok(registry.gather())
}

/// Gather all metrics as Prometheus text format
pub fn gather_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let metric_families = gather_metric_families()?;
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
