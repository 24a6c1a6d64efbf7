// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Formatted hex handling.
//!
//! A "formatted" hex string is a sequence of byte tokens separated by
//! whitespace, e.g. `"4a 00 61 01"`. Compressed payloads travel as UTF-16 code
//! units laid out little-endian, so two bytes make up one unit.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HexError {
    #[error("Invalid hex character '{character}' at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Hex token '{0}' does not fit in a single byte")]
    TokenOverflow(String),
}

/// Parse a whitespace-separated hex string into bytes.
///
/// Empty or whitespace-only input yields an empty vector. Any character that is
/// neither a hex digit nor whitespace is rejected.
pub fn to_bytes(hex_str: &str) -> Result<Vec<u8>, HexError> {
    if let Some((position, character)) = hex_str
        .char_indices()
        .find(|(_, c)| !c.is_ascii_hexdigit() && !c.is_whitespace())
    {
        return Err(HexError::InvalidCharacter {
            character,
            position,
        });
    }

    hex_str
        .split_whitespace()
        .map(|token| {
            u8::from_str_radix(token, 16).map_err(|_| HexError::TokenOverflow(token.to_string()))
        })
        .collect()
}

/// Decode `hex_str` and fold byte pairs into UTF-16 code units, low byte first.
///
/// An odd trailing byte becomes a unit with a zero high byte.
pub fn to_packed_string(hex_str: &str) -> Result<Vec<u16>, HexError> {
    let bytes = to_bytes(hex_str)?;
    Ok(bytes
        .chunks(2)
        .map(|pair| {
            let low = pair[0] as u16;
            let high = pair.get(1).copied().unwrap_or(0) as u16;
            low | (high << 8)
        })
        .collect())
}

/// Render bytes as space-separated lower-case pairs, the inverse of [`to_bytes`].
pub fn to_formatted_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a contiguous hex string into space-separated two-character groups.
///
/// A trailing odd character is kept as its own group.
pub fn group_pairs(hex_str: &str) -> String {
    hex_str
        .as_bytes()
        .chunks(2)
        .map(|pair| String::from_utf8_lossy(pair).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
