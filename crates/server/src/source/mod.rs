// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Transaction sources the registry scans.

pub mod insight;

pub use insight::InsightExplorer;

use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Explorer request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Explorer returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Explorer response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Transaction source unavailable: {0}")]
    Unavailable(String),
}

/// One transaction output as reported by the explorer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutput {
    /// Decimal amount exactly as the explorer formatted it.
    pub value: String,
    /// Id of the transaction spending this output, if any.
    pub spent_tx_id: Option<String>,
    pub script_hex: String,
    pub script_asm: String,
    /// Destination addresses; the first one controls the output.
    pub addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Transaction {
    pub txid: String,
    pub vout: Vec<TransactionOutput>,
}

/// A window of an address set's history.
#[derive(Debug, Clone, Default)]
pub struct TransactionPage {
    pub items: Vec<Transaction>,
    /// Total number of transactions in the history, across all pages.
    pub total: usize,
}

/// Anything able to list the transactions touching a set of addresses.
///
/// Implementations must report a stable `total` so that paging terminates.
pub trait TransactionSource: Send + Sync {
    /// Fetch transactions `from..to` of the history of `addresses`.
    fn fetch_page(
        &self,
        addresses: &[String],
        from: usize,
        to: usize,
    ) -> impl Future<Output = Result<TransactionPage, SourceError>> + Send;

    /// Fetch the whole history of `addresses`.
    ///
    /// The default drains [`TransactionSource::fetch_page`] page by page.
    fn fetch_all(
        &self,
        addresses: &[String],
    ) -> impl Future<Output = Result<Vec<Transaction>, SourceError>> + Send {
        async move { crate::pager::drain(self, addresses).await }
    }
}

impl<T: TransactionSource> TransactionSource for Arc<T> {
    fn fetch_page(
        &self,
        addresses: &[String],
        from: usize,
        to: usize,
    ) -> impl Future<Output = Result<TransactionPage, SourceError>> + Send {
        self.as_ref().fetch_page(addresses, from, to)
    }

    fn fetch_all(
        &self,
        addresses: &[String],
    ) -> impl Future<Output = Result<Vec<Transaction>, SourceError>> + Send {
        self.as_ref().fetch_all(addresses)
    }
}
