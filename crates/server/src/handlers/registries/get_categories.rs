// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::types::{CategoriesQueryParams, RegistryApiError, RegistryResponse, RegistryTag};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::Value;

/// Handler for GET /registries/{tag}/categories
pub async fn get_categories(
    State(state): State<AppState>,
    Path(tag): Path<String>,
    Query(params): Query<CategoriesQueryParams>,
) -> Result<Json<RegistryResponse<Vec<Value>>>, RegistryApiError> {
    let tag = RegistryTag::parse(&tag)?;
    let registries = &state.registries;

    let report = match tag {
        RegistryTag::Compressed => registries.compressed.get_categories(&params.repo).await?,
        RegistryTag::Positional => registries.positional.get_categories(&params.repo).await?,
    };

    Ok(Json(RegistryResponse::new(tag, report)))
}
