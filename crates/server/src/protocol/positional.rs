// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Positional-fields registry protocol (`#ts#`).
//!
//! Every script is `<prefix> #ts# <body>` with plain UTF-8 fields:
//!
//! | op          | body                          | fields   |
//! |-------------|-------------------------------|----------|
//! | publish     | `<name> # <description>`      | `n`, `d` |
//! | meta        | `<version> # <hash>`          | `v`, `h` |
//! | description | `<text>`                      | `s`      |
//! | categories  | `<JSON array>`                | -        |
//!
//! The leading field is at least one byte long, so a `#` right after the
//! marker belongs to the field.

use super::marker::{MarkedScript, decode_text};
use super::{ExtractError, OpClass, OpValue, RegistryProtocol, ScanMode};
use crate::consts::{
    FIELD_DELIMITER, MARKER_POSITIONAL, OP_CATEGORIES, OP_DESCRIPTION, OP_META, OP_PUBLISH,
};
use crate::types::{
    AppRecord, FIELD_DESCRIPTION, FIELD_HASH, FIELD_NAME, FIELD_SUMMARY, FIELD_VERSION,
};

static OP_VALUES: [OpValue; 4] = [OP_PUBLISH, OP_META, OP_DESCRIPTION, OP_CATEGORIES];

#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalProtocol;

impl PositionalProtocol {
    /// Split a marked script into its leading field and the rest, both decoded.
    fn two_fields(&self, script_hex: &str) -> Result<(String, String), ExtractError> {
        let marked = MarkedScript::locate(script_hex, Self::MARKER)?;
        let (first, rest) = marked
            .split_field(FIELD_DELIMITER, 1)
            .ok_or(ExtractError::MissingSegment("field delimiter"))?;
        Ok((decode_text(first)?, decode_text(rest)?))
    }
}

impl RegistryProtocol for PositionalProtocol {
    const TAG: &'static str = "ts";
    const MARKER: &'static [u8] = MARKER_POSITIONAL;

    fn op_values(&self) -> &'static [OpValue] {
        &OP_VALUES
    }

    fn latest_scan(&self) -> ScanMode {
        ScanMode::Paged
    }

    /// Publish records carry no filterable name, so `_name_filter` is unused.
    fn extract_publish(
        &self,
        script_hex: &str,
        _name_filter: &str,
    ) -> Result<Option<AppRecord>, ExtractError> {
        let (name, description) = self.two_fields(script_hex)?;
        Ok(Some(
            AppRecord::new()
                .with(FIELD_NAME, name)
                .with(FIELD_DESCRIPTION, description),
        ))
    }

    fn extract_update(
        &self,
        class: OpClass,
        script_hex: &str,
    ) -> Result<Option<AppRecord>, ExtractError> {
        match class {
            OpClass::Meta => {
                let (version, hash) = self.two_fields(script_hex)?;
                Ok(Some(
                    AppRecord::new()
                        .with(FIELD_VERSION, version)
                        .with(FIELD_HASH, hash),
                ))
            }
            OpClass::Description => {
                let marked = MarkedScript::locate(script_hex, Self::MARKER)?;
                let summary = decode_text(marked.body())?;
                Ok(Some(AppRecord::new().with(FIELD_SUMMARY, summary)))
            }
            OpClass::Publish | OpClass::Categories => Ok(None),
        }
    }
}
