// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::{LatestQueryParams, RegistryApiError, RegistryResponse, RegistryTag};
use crate::state::AppState;
use crate::types::AppRecord;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::collections::BTreeMap;

/// Handler for GET /registries/{tag}/latest
///
/// Merged meta records keyed by app address.
pub async fn get_latest(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(params): Query<LatestQueryParams>,
) -> Result<Json<RegistryResponse<BTreeMap<String, AppRecord>>>, RegistryApiError> {
    let tag = RegistryTag::parse(&tag)?;
    let addresses = params.address_list();
    let registries = &state.registries;

    let report = match tag {
        RegistryTag::Compressed => registries.compressed.get_latest(&addresses).await?,
        RegistryTag::Positional => registries.positional.get_latest(&addresses).await?,
    };

    Ok(Json(RegistryResponse::new(tag, report)))
}
