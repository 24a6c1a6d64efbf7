// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Extraction and aggregation of application-registry records embedded in
//! OP_RETURN outputs, served over HTTP.

pub mod aggregate;
pub mod app;
pub mod codec;
pub mod consts;
pub mod handlers;
pub mod logging;
pub mod metrics;
pub mod pager;
pub mod protocol;
pub mod routes;
pub mod service;
pub mod source;
pub mod state;
pub mod types;

#[cfg(test)]
pub mod test_fixtures;
