// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Decompression and parsing of compressed JSON payloads.

use crate::types::AppRecord;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("Payload did not decompress to any content")]
    Decompression,

    #[error("Decompressed payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Decompressed payload is JSON but not an object")]
    NotAnObject,
}

/// Turns a packed UTF-16 unit sequence back into text.
///
/// `None` or an empty string both mean the input could not be decompressed.
pub trait Decompressor: Send + Sync {
    fn decompress(&self, packed: &[u16]) -> Option<String>;
}

/// LZ-String decompression, the scheme registry publishers compress with.
#[derive(Debug, Clone, Copy, Default)]
pub struct LzStringDecompressor;

impl Decompressor for LzStringDecompressor {
    fn decompress(&self, packed: &[u16]) -> Option<String> {
        let units = lz_str::decompress(packed.to_vec())?;
        String::from_utf16(&units).ok()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PayloadDecoder<D = LzStringDecompressor> {
    decompressor: D,
}

impl<D: Decompressor> PayloadDecoder<D> {
    pub fn new(decompressor: D) -> Self {
        Self { decompressor }
    }

    /// Decompress `packed` and parse it as a JSON object.
    pub fn decode(&self, packed: &[u16]) -> Result<AppRecord, PayloadError> {
        let text = self
            .decompressor
            .decompress(packed)
            .filter(|text| !text.is_empty())
            .ok_or(PayloadError::Decompression)?;

        match serde_json::from_str::<Value>(&text)? {
            Value::Object(fields) => Ok(AppRecord::from_map(fields)),
            _ => Err(PayloadError::NotAnObject),
        }
    }
}
