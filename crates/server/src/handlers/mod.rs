// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod health;
pub mod metrics;
pub mod registries;
pub mod version;
