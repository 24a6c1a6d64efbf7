// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client for Insight-style block explorer APIs.

use super::{SourceError, Transaction, TransactionOutput, TransactionPage, TransactionSource};
use config::ExplorerConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Body of `POST /addrs/txs`.
#[derive(Debug, Serialize)]
struct AddrsTxsRequest {
    addrs: String,
    from: usize,
    to: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddrsTxsResponse {
    #[serde(default)]
    total_items: usize,
    #[serde(default)]
    items: Vec<RawTransaction>,
}

#[derive(Debug, Deserialize)]
struct RawTransaction {
    #[serde(default)]
    txid: String,
    #[serde(default)]
    vout: Vec<RawOutput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOutput {
    #[serde(default)]
    value: Value,
    #[serde(default)]
    spent_tx_id: Option<String>,
    #[serde(default)]
    script_pub_key: RawScriptPubKey,
}

#[derive(Debug, Default, Deserialize)]
struct RawScriptPubKey {
    #[serde(default)]
    hex: String,
    #[serde(default)]
    asm: String,
    #[serde(default)]
    addresses: Vec<String>,
}

/// Explorers differ on whether amounts are JSON strings or numbers.
fn amount_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

impl From<RawOutput> for TransactionOutput {
    fn from(raw: RawOutput) -> Self {
        Self {
            value: amount_text(&raw.value),
            spent_tx_id: raw.spent_tx_id,
            script_hex: raw.script_pub_key.hex,
            script_asm: raw.script_pub_key.asm,
            addresses: raw.script_pub_key.addresses,
        }
    }
}

impl From<RawTransaction> for Transaction {
    fn from(raw: RawTransaction) -> Self {
        Self {
            txid: raw.txid,
            vout: raw.vout.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InsightExplorer {
    base_url: String,
    client: Client,
}

impl InsightExplorer {
    pub fn new(config: &ExplorerConfig) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            base_url: config.url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl TransactionSource for InsightExplorer {
    async fn fetch_page(
        &self,
        addresses: &[String],
        from: usize,
        to: usize,
    ) -> Result<TransactionPage, SourceError> {
        let url = format!("{}/addrs/txs", self.base_url);
        let request = AddrsTxsRequest {
            addrs: addresses.join(","),
            from,
            to,
        };

        tracing::trace!(%url, from, to, "Requesting address transactions");
        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let page: AddrsTxsResponse = serde_json::from_str(&body)?;
        Ok(TransactionPage {
            total: page.total_items,
            items: page.items.into_iter().map(Into::into).collect(),
        })
    }
}
