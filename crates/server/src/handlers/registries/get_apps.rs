// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::{AppsQueryParams, RegistryApiError, RegistryResponse, RegistryTag};
use crate::state::AppState;
use crate::types::AppRecord;
use axum::{
    Json,
    extract::{Path, Query, State},
};

/// Handler for GET /registries/{tag}/apps
///
/// Lists apps published to `repo`, oldest first. Only the compressed
/// registry applies the `name` filter.
pub async fn get_apps(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(params): Query<AppsQueryParams>,
) -> Result<Json<RegistryResponse<Vec<AppRecord>>>, RegistryApiError> {
    let tag = RegistryTag::parse(&tag)?;
    let registries = &state.registries;

    let report = match tag {
        RegistryTag::Compressed => {
            registries
                .compressed
                .get_apps(&params.repo, &params.name)
                .await?
        }
        RegistryTag::Positional => {
            registries
                .positional
                .get_apps(&params.repo, &params.name)
                .await?
        }
    };

    Ok(Json(RegistryResponse::new(tag, report)))
}
