// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Locating protocol markers inside script hex.
//!
//! A marked script looks like `<prefix><marker><body>`, where the prefix is
//! the script's opcodes and push lengths. Positions are always byte-aligned:
//! a marker or delimiter straddling two bytes does not count.

use super::ExtractError;
use serde_json::Value;

/// A script whose protocol marker has been found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkedScript<'a> {
    body: &'a str,
}

impl<'a> MarkedScript<'a> {
    /// Validate `script_hex` and split it around the first occurrence of
    /// `marker`.
    pub fn locate(script_hex: &'a str, marker: &[u8]) -> Result<Self, ExtractError> {
        if script_hex.len() % 2 != 0 || !script_hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ExtractError::InvalidScriptHex);
        }

        let marker_hex = hex::encode(marker);
        let start = find_aligned(script_hex, &marker_hex, 0).ok_or_else(|| {
            ExtractError::MarkerNotFound(String::from_utf8_lossy(marker).into_owned())
        })?;

        Ok(Self {
            body: &script_hex[start + marker_hex.len()..],
        })
    }

    /// Hex following the marker.
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Split the body at the first `delimiter` byte that comes after at least
    /// `min_field_bytes` bytes.
    ///
    /// Returns the field (without the delimiter) and the remainder.
    pub fn split_field(&self, delimiter: u8, min_field_bytes: usize) -> Option<(&'a str, &'a str)> {
        let delimiter_hex = hex::encode([delimiter]);
        let at = find_aligned(self.body, &delimiter_hex, min_field_bytes * 2)?;
        Some((&self.body[..at], &self.body[at + delimiter_hex.len()..]))
    }
}

/// Byte-aligned, case-insensitive search for `needle` in `haystack`, starting
/// at character offset `from`.
fn find_aligned(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (from..=haystack.len() - needle.len())
        .step_by(2)
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Decode a hex segment as UTF-8 text, replacing invalid sequences.
pub fn decode_text(hex_segment: &str) -> Result<String, ExtractError> {
    let bytes = hex::decode(hex_segment).map_err(|_| ExtractError::InvalidScriptHex)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Decode the whole script as text and parse what follows the first textual
/// occurrence of `marker` as a JSON array.
pub fn extract_json_array(script_hex: &str, marker: &[u8]) -> Result<Vec<Value>, ExtractError> {
    let text = decode_text(script_hex)?;
    let marker_text = String::from_utf8_lossy(marker);
    let start = text
        .find(marker_text.as_ref())
        .ok_or_else(|| ExtractError::MarkerNotFound(marker_text.to_string()))?;

    let json = &text[start + marker_text.len()..];
    match serde_json::from_str::<Value>(json).map_err(ExtractError::CategoriesJson)? {
        Value::Array(items) => Ok(items),
        _ => Err(ExtractError::CategoriesNotAnArray),
    }
}
