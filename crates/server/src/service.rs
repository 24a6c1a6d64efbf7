// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Registry operations over one protocol and one transaction source.

use crate::aggregate::{
    Aggregate, AppListBuilder, CategoriesBuilder, LatestBuilder, ScanReport,
};
use crate::pager::TransactionPager;
use crate::protocol::{OpClass, RegistryProtocol, ScanMode};
use crate::source::{SourceError, TransactionSource};
use crate::types::AppRecord;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Transaction source failed: {0}")]
    Source(#[from] SourceError),

    #[error("Protocol '{protocol}' does not support {operation}")]
    Unsupported {
        protocol: &'static str,
        operation: &'static str,
    },

    #[error("{0}")]
    InvalidRequest(String),
}

/// Registry queries for protocol `P`, backed by `S`.
#[derive(Debug, Clone)]
pub struct AppRegistry<P, S> {
    protocol: P,
    source: S,
}

impl<P: RegistryProtocol, S: TransactionSource> AppRegistry<P, S> {
    pub fn new(protocol: P, source: S) -> Self {
        Self { protocol, source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Apps published under `repo` whose name matches `name`, in scan order.
    ///
    /// The name filter only applies to protocols that carry the name in the
    /// clear ahead of the payload.
    pub async fn get_apps(
        &self,
        repo: &str,
        name: &str,
    ) -> Result<ScanReport<Vec<AppRecord>>, RegistryError> {
        let addresses = single_address(repo)?;
        let builder = AppListBuilder::new(&self.protocol, name);
        self.scan(&addresses, ScanMode::Paged, builder).await
    }

    /// Merged meta and description records keyed by address.
    pub async fn get_latest(
        &self,
        addresses: &[String],
    ) -> Result<ScanReport<BTreeMap<String, AppRecord>>, RegistryError> {
        let addresses = normalize_addresses(addresses)?;
        let builder = LatestBuilder::new(&self.protocol);
        self.scan(&addresses, self.protocol.latest_scan(), builder)
            .await
    }

    /// Category list most recently announced by `repo`.
    pub async fn get_categories(
        &self,
        repo: &str,
    ) -> Result<ScanReport<Vec<Value>>, RegistryError> {
        if !self.protocol.supports(OpClass::Categories) {
            return Err(RegistryError::Unsupported {
                protocol: P::TAG,
                operation: "categories",
            });
        }
        let addresses = single_address(repo)?;
        let builder = CategoriesBuilder::new(&self.protocol);
        self.scan(&addresses, ScanMode::OneShot, builder).await
    }

    async fn scan<A: Aggregate>(
        &self,
        addresses: &[String],
        mode: ScanMode,
        mut builder: A,
    ) -> Result<ScanReport<A::Output>, RegistryError> {
        match mode {
            ScanMode::Paged => {
                let mut pager = TransactionPager::new(&self.source, addresses);
                while let Some(items) = pager.next_page().await? {
                    items.iter().for_each(|tx| builder.observe(tx));
                }
                builder.stats_mut().pages = pager.pages_fetched();
            }
            ScanMode::OneShot => {
                let transactions = self.source.fetch_all(addresses).await?;
                transactions.iter().for_each(|tx| builder.observe(tx));
            }
        }

        let report = builder.finish();
        tracing::debug!(
            protocol = P::TAG,
            addresses = addresses.len(),
            transactions = report.stats.transactions,
            extracted = report.stats.extracted,
            skipped = report.stats.skipped,
            "Registry scan finished"
        );
        Ok(report)
    }
}

fn single_address(repo: &str) -> Result<Vec<String>, RegistryError> {
    let repo = repo.trim();
    if repo.is_empty() {
        return Err(RegistryError::InvalidRequest(
            "Repository address must not be empty".to_string(),
        ));
    }
    Ok(vec![repo.to_string()])
}

fn normalize_addresses(addresses: &[String]) -> Result<Vec<String>, RegistryError> {
    let addresses: Vec<String> = addresses
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect();
    if addresses.is_empty() {
        return Err(RegistryError::InvalidRequest(
            "At least one address is required".to_string(),
        ));
    }
    Ok(addresses)
}
