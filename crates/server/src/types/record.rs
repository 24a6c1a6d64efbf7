// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Application name.
pub const FIELD_NAME: &str = "n";
/// Long description (publish records).
pub const FIELD_DESCRIPTION: &str = "d";
/// Address controlling the record.
pub const FIELD_ADDRESS: &str = "a";
/// Short description; also the description field of merged meta records.
pub const FIELD_SUMMARY: &str = "s";
/// Release version.
pub const FIELD_VERSION: &str = "v";
/// Content hash of the published release.
pub const FIELD_HASH: &str = "h";

/// Sparse set of application fields, kept in insertion order.
///
/// Records decoded from compressed payloads are pass-through: whatever keys the
/// publisher wrote are kept, the extractor only adds `n` and `a`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppRecord(Map<String, Value>);

impl AppRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Builder form of [`AppRecord::insert`].
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Overwrite this record's fields with every field present in `update`.
    ///
    /// Fields absent from `update` are left untouched.
    pub fn merge(&mut self, update: AppRecord) {
        for (key, value) in update.0 {
            self.0.insert(key, value);
        }
    }
}
