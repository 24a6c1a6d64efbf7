// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Compressed-JSON registry protocol (`#ba#`).
//!
//! Publish script: `<prefix> #ba# <app name> # <compressed JSON>`.
//! Meta script: `<prefix> #ba# <compressed JSON>`.
//!
//! The compressed JSON travels as hex of UTF-16 code units, low byte first.

use super::marker::{MarkedScript, decode_text};
use super::{ExtractError, OpClass, OpValue, RegistryProtocol, ScanMode};
use crate::codec::{self, Decompressor, LzStringDecompressor, PayloadDecoder};
use crate::consts::{FIELD_DELIMITER, MARKER_COMPRESSED, OP_META, OP_PUBLISH};
use crate::types::{AppRecord, FIELD_NAME};

static OP_VALUES: [OpValue; 2] = [OP_PUBLISH, OP_META];

#[derive(Debug, Clone, Default)]
pub struct CompressedProtocol<D = LzStringDecompressor> {
    decoder: PayloadDecoder<D>,
}

impl<D: Decompressor> CompressedProtocol<D> {
    pub fn new(decompressor: D) -> Self {
        Self {
            decoder: PayloadDecoder::new(decompressor),
        }
    }

    fn decode_payload(&self, payload_hex: &str) -> Result<AppRecord, ExtractError> {
        let packed = codec::to_packed_string(&codec::group_pairs(payload_hex))?;
        Ok(self.decoder.decode(&packed)?)
    }
}

impl<D: Decompressor + 'static> RegistryProtocol for CompressedProtocol<D> {
    const TAG: &'static str = "ba";
    const MARKER: &'static [u8] = MARKER_COMPRESSED;

    fn op_values(&self) -> &'static [OpValue] {
        &OP_VALUES
    }

    fn latest_scan(&self) -> ScanMode {
        ScanMode::OneShot
    }

    fn extract_publish(
        &self,
        script_hex: &str,
        name_filter: &str,
    ) -> Result<Option<AppRecord>, ExtractError> {
        let marked = MarkedScript::locate(script_hex, Self::MARKER)?;
        let (name_hex, payload_hex) = marked
            .split_field(FIELD_DELIMITER, 0)
            .ok_or(ExtractError::MissingSegment("payload"))?;

        let name = decode_text(name_hex)?;
        if !name.to_lowercase().contains(&name_filter.to_lowercase()) {
            return Ok(None);
        }

        let mut record = self.decode_payload(payload_hex)?;
        record.insert(FIELD_NAME, name);
        Ok(Some(record))
    }

    fn extract_update(
        &self,
        class: OpClass,
        script_hex: &str,
    ) -> Result<Option<AppRecord>, ExtractError> {
        if class != OpClass::Meta {
            return Ok(None);
        }
        let marked = MarkedScript::locate(script_hex, Self::MARKER)?;
        self.decode_payload(marked.body()).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{compressed_meta_script, compressed_publish_script};

    #[test]
    fn extracts_matching_publish_record() {
        let script = compressed_publish_script(
            "MyApp",
            r#"{"d":"A wallet","i":"https://x/icon.png","s":"Wallet"}"#,
        );
        let record = CompressedProtocol::<LzStringDecompressor>::default()
            .extract_publish(&script, "myapp")
            .unwrap()
            .unwrap();

        assert_eq!(record.get_str("n"), Some("MyApp"));
        assert_eq!(record.get_str("d"), Some("A wallet"));
        assert_eq!(record.get_str("i"), Some("https://x/icon.png"));
        assert_eq!(record.get_str("s"), Some("Wallet"));
    }

    #[test]
    fn name_filter_is_a_case_insensitive_substring() {
        let script = compressed_publish_script("SuperWallet", r#"{"d":"x"}"#);
        let protocol = CompressedProtocol::<LzStringDecompressor>::default();

        assert!(protocol.extract_publish(&script, "WALLET").unwrap().is_some());
        assert!(protocol.extract_publish(&script, "").unwrap().is_some());
        assert!(protocol.extract_publish(&script, "games").unwrap().is_none());
    }

    #[test]
    fn decoded_name_overrides_payload_name() {
        let script = compressed_publish_script("Real", r#"{"n":"Fake","d":"x"}"#);
        let record = CompressedProtocol::<LzStringDecompressor>::default()
            .extract_publish(&script, "")
            .unwrap()
            .unwrap();
        assert_eq!(record.get_str("n"), Some("Real"));
    }

    #[test]
    fn corrupt_payload_is_an_error() {
        let script = format!("6a{}{}23{}", hex::encode("#ba#"), hex::encode("App"), "0000");
        let result =
            CompressedProtocol::<LzStringDecompressor>::default().extract_publish(&script, "app");
        assert!(matches!(result, Err(ExtractError::Payload(_))));
    }

    #[test]
    fn publish_without_delimiter_is_missing_payload() {
        let script = format!("6a{}{}", hex::encode("#ba#"), hex::encode("App"));
        let result =
            CompressedProtocol::<LzStringDecompressor>::default().extract_publish(&script, "");
        assert!(matches!(result, Err(ExtractError::MissingSegment("payload"))));
    }

    #[test]
    fn wrong_marker_is_an_error() {
        let script = format!("6a{}{}23", hex::encode("#ts#"), hex::encode("App"));
        let result =
            CompressedProtocol::<LzStringDecompressor>::default().extract_publish(&script, "");
        assert!(matches!(result, Err(ExtractError::MarkerNotFound(_))));
    }

    #[test]
    fn extracts_meta_fields() {
        let script = compressed_meta_script(r#"{"v":"1.2.0","h":"abc123"}"#);
        let protocol = CompressedProtocol::<LzStringDecompressor>::default();
        let record = protocol
            .extract_update(OpClass::Meta, &script)
            .unwrap()
            .unwrap();

        assert_eq!(record.get_str("v"), Some("1.2.0"));
        assert_eq!(record.get_str("h"), Some("abc123"));
        assert!(
            protocol
                .extract_update(OpClass::Description, &script)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn recognises_only_publish_and_meta() {
        let protocol = CompressedProtocol::<LzStringDecompressor>::default();
        assert_eq!(protocol.classify_amount("0.00011"), Some(OpClass::Publish));
        assert_eq!(protocol.classify_amount("0.00010000"), Some(OpClass::Meta));
        assert_eq!(protocol.classify_amount("0.00012"), None);
        assert_eq!(protocol.classify_amount("0.0002"), None);
        assert!(!protocol.supports(OpClass::Categories));
    }
}
