// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry protocol descriptors.
//!
//! Both registry protocols share one scanning pipeline. What differs between
//! them (marker bytes, which op values they use, how a payload is laid out) is
//! captured by a [`RegistryProtocol`] implementation.

pub mod compressed;
pub mod marker;
pub mod positional;

pub use compressed::CompressedProtocol;
pub use marker::{MarkedScript, extract_json_array};
pub use positional::PositionalProtocol;

use crate::codec::{HexError, PayloadError};
use crate::types::AppRecord;
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Kind of registry annotation, told apart by the coin value of the output
/// that carries the record's address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OpClass {
    Publish,
    Meta,
    Description,
    Categories,
}

impl fmt::Display for OpClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OpClass::Publish => "publish",
            OpClass::Meta => "meta",
            OpClass::Description => "description",
            OpClass::Categories => "categories",
        };
        f.write_str(name)
    }
}

/// An op class together with the decimal amount that tags it on-chain.
#[derive(Debug, Clone, Copy)]
pub struct OpValue {
    pub class: OpClass,
    pub literal: &'static str,
}

impl OpValue {
    pub const fn new(class: OpClass, literal: &'static str) -> Self {
        Self { class, literal }
    }

    /// Whether an explorer amount tags this op.
    ///
    /// Both sides go through the same `f64` parse and are compared exactly.
    pub fn matches(&self, amount: &str) -> bool {
        match (parse_amount(self.literal), parse_amount(amount)) {
            (Some(expected), Some(actual)) => expected == actual,
            _ => false,
        }
    }
}

pub fn parse_amount(amount: &str) -> Option<f64> {
    amount.trim().parse::<f64>().ok()
}

/// How a scan reads an address's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// Page through the history with [`crate::pager::TransactionPager`].
    Paged,
    /// Ask the source for the whole history in one call.
    OneShot,
}

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Script is not valid hex")]
    InvalidScriptHex,

    #[error("Protocol marker '{0}' not found in script")]
    MarkerNotFound(String),

    #[error("Script has no {0} segment")]
    MissingSegment(&'static str),

    #[error("Output carries no destination address")]
    MissingAddress,

    #[error("Invalid hex segment: {0}")]
    Hex(#[from] HexError),

    #[error("Invalid payload: {0}")]
    Payload(#[from] PayloadError),

    #[error("Categories payload is not valid JSON: {0}")]
    CategoriesJson(#[source] serde_json::Error),

    #[error("Categories payload is not a JSON array")]
    CategoriesNotAnArray,
}

/// A registry protocol variant.
pub trait RegistryProtocol: Send + Sync + 'static {
    /// Short identifier used in routes and logs.
    const TAG: &'static str;

    /// Bytes announcing this protocol inside a script.
    const MARKER: &'static [u8];

    /// Op values this protocol recognises.
    fn op_values(&self) -> &'static [OpValue];

    /// How `get_latest` reads the history of the requested addresses.
    fn latest_scan(&self) -> ScanMode;

    /// Extract a complete publish record.
    ///
    /// `Ok(None)` means the output is well-formed but does not match
    /// `name_filter`.
    fn extract_publish(
        &self,
        script_hex: &str,
        name_filter: &str,
    ) -> Result<Option<AppRecord>, ExtractError>;

    /// Extract the fields an update output of `class` supplies.
    ///
    /// Returns `Ok(None)` for classes this protocol does not merge into
    /// latest records.
    fn extract_update(
        &self,
        class: OpClass,
        script_hex: &str,
    ) -> Result<Option<AppRecord>, ExtractError>;

    /// Op class tagged by `amount`, if any.
    fn classify_amount(&self, amount: &str) -> Option<OpClass> {
        self.op_values()
            .iter()
            .find(|op| op.matches(amount))
            .map(|op| op.class)
    }

    fn supports(&self, class: OpClass) -> bool {
        self.op_values().iter().any(|op| op.class == class)
    }

    fn extract_categories(
        &self,
        script_hex: &str,
    ) -> Result<Vec<serde_json::Value>, ExtractError> {
        extract_json_array(script_hex, Self::MARKER)
    }
}
