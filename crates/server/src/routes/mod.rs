// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod health;
pub mod metrics;
pub mod registries;
pub mod registry;
pub mod root;
pub mod version;

pub use registry::{API_VERSION, RegisterRoute, RouteInfo, RouteRegistry};
