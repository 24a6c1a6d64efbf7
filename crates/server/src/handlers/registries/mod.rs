// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Handlers for `/registries/{tag}/...`.

pub mod get_apps;
pub mod get_categories;
pub mod get_latest;
pub mod types;

pub use get_apps::get_apps;
pub use get_categories::get_categories;
pub use get_latest::get_latest;
pub use types::{RegistryApiError, RegistryResponse, RegistryTag};
