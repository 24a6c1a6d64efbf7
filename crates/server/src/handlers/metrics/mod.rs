// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

mod get_metrics;

pub use get_metrics::*;
