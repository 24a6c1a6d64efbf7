// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry record types shared by the extractors and the HTTP layer.

pub mod record;

pub use record::*;
