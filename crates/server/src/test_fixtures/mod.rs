// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Script builders and an in-memory transaction source for tests.

use crate::source::{
    SourceError, Transaction, TransactionOutput, TransactionPage, TransactionSource,
};
use std::sync::Mutex;

/// Script prefix used by the builders: `OP_RETURN OP_PUSHDATA1 <len>`.
pub const TEST_SCRIPT_PREFIX: &str = "6a4c50";

pub const PUBLISH: &str = "0.00011000";
pub const META: &str = "0.00010000";
pub const DESCRIPTION: &str = "0.00012000";
pub const CATEGORIES: &str = "0.00020000";

/// Hex of `json` compressed with LZ-String, as UTF-16 units laid out low byte
/// first.
pub fn compressed_payload_hex(json: &str) -> String {
    lz_str::compress(json)
        .into_iter()
        .flat_map(|unit| unit.to_le_bytes())
        .map(|b| format!("{:02x}", b))
        .collect()
}

pub fn compressed_publish_script(name: &str, json: &str) -> String {
    format!(
        "{}{}{}23{}",
        TEST_SCRIPT_PREFIX,
        hex::encode("#ba#"),
        hex::encode(name),
        compressed_payload_hex(json)
    )
}

pub fn compressed_meta_script(json: &str) -> String {
    format!(
        "{}{}{}",
        TEST_SCRIPT_PREFIX,
        hex::encode("#ba#"),
        compressed_payload_hex(json)
    )
}

/// `#ts#` script whose body is `fields` joined by `#`.
pub fn positional_script(fields: &[&str]) -> String {
    format!(
        "{}{}{}",
        TEST_SCRIPT_PREFIX,
        hex::encode("#ts#"),
        hex::encode(fields.join("#"))
    )
}

pub fn categories_script(json: &str) -> String {
    positional_script(&[json])
}

/// A two-output registry transaction: the data output followed by the output
/// tagging `address` with `value`.
pub fn registry_tx(txid: &str, script_hex: &str, value: &str, address: &str) -> Transaction {
    Transaction {
        txid: txid.to_string(),
        vout: vec![
            TransactionOutput {
                value: "0.00000000".to_string(),
                script_hex: script_hex.to_string(),
                ..Default::default()
            },
            TransactionOutput {
                value: value.to_string(),
                addresses: vec![address.to_string()],
                ..Default::default()
            },
        ],
    }
}

/// Same as [`registry_tx`] with the tagging output already spent.
pub fn spent_registry_tx(txid: &str, script_hex: &str, value: &str, address: &str) -> Transaction {
    let mut tx = registry_tx(txid, script_hex, value, address);
    tx.vout[1].spent_tx_id = Some(format!("{}-spender", txid));
    tx
}

/// In-memory [`TransactionSource`] that serves `transactions` by index range
/// and records every request.
#[derive(Debug, Default)]
pub struct MockSource {
    pub transactions: Vec<Transaction>,
    /// Reported total; defaults to the number of transactions.
    pub total: Option<usize>,
    /// Zero-based request index on which to fail.
    pub fail_on_request: Option<usize>,
    pub requests: Mutex<Vec<(Vec<String>, usize, usize)>>,
}

impl MockSource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions,
            ..Default::default()
        }
    }

    pub fn failing_on(mut self, request: usize) -> Self {
        self.fail_on_request = Some(request);
        self
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }

    pub fn request_ranges(&self) -> Vec<(usize, usize)> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, from, to)| (*from, *to))
            .collect()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl TransactionSource for MockSource {
    async fn fetch_page(
        &self,
        addresses: &[String],
        from: usize,
        to: usize,
    ) -> Result<TransactionPage, SourceError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push((addresses.to_vec(), from, to));
            requests.len() - 1
        };
        if self.fail_on_request == Some(index) {
            return Err(SourceError::Unavailable("connection reset".to_string()));
        }

        let len = self.transactions.len();
        let start = from.min(len);
        let end = to.min(len);
        Ok(TransactionPage {
            items: self.transactions[start..end].to_vec(),
            total: self.total.unwrap_or(len),
        })
    }
}
