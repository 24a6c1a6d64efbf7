// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Byte-level codecs for payloads carried in OP_RETURN scripts.

pub mod hex;
pub mod payload;

pub use self::hex::{HexError, group_pairs, to_bytes, to_formatted_hex, to_packed_string};
pub use payload::{Decompressor, LzStringDecompressor, PayloadDecoder, PayloadError};
