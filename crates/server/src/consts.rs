// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::protocol::{OpClass, OpValue};

/// Marker of the compressed-JSON registry protocol (`#ba#`).
pub const MARKER_COMPRESSED: &[u8] = b"#ba#";

/// Marker of the positional-fields registry protocol (`#ts#`).
pub const MARKER_POSITIONAL: &[u8] = b"#ts#";

/// Delimiter closing a field inside a marked payload (`#`).
pub const FIELD_DELIMITER: u8 = b'#';

/// Number of transactions requested per explorer page.
pub const ADDR_TX_PAGE_SIZE: usize = 50;

// The literals are compared after parsing, exactly as the explorer amounts are.
// Do not replace them with rounded or tolerance-based comparisons.

pub const OP_PUBLISH: OpValue = OpValue::new(OpClass::Publish, "0.00011");
pub const OP_META: OpValue = OpValue::new(OpClass::Meta, "0.00010");
pub const OP_DESCRIPTION: OpValue = OpValue::new(OpClass::Description, "0.00012");
pub const OP_CATEGORIES: OpValue = OpValue::new(OpClass::Categories, "0.00020");
