// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cursor-based walk over an address set's transaction history.

use crate::consts::ADDR_TX_PAGE_SIZE;
use crate::metrics::registry::PAGES_FETCHED;
use crate::source::{SourceError, Transaction, TransactionSource};

/// Requests `[from, to)` windows of [`ADDR_TX_PAGE_SIZE`] transactions until
/// the source reports a total below the end of the current window.
///
/// For a stable total the walk issues at most `ceil(total / page_size) + 1`
/// requests. One request is outstanding at a time.
pub struct TransactionPager<'a, S: ?Sized> {
    source: &'a S,
    addresses: &'a [String],
    from: usize,
    to: usize,
    page_size: usize,
    done: bool,
    pages_fetched: usize,
}

impl<'a, S: TransactionSource + ?Sized> TransactionPager<'a, S> {
    pub fn new(source: &'a S, addresses: &'a [String]) -> Self {
        Self {
            source,
            addresses,
            from: 0,
            to: ADDR_TX_PAGE_SIZE,
            page_size: ADDR_TX_PAGE_SIZE,
            done: false,
            pages_fetched: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Fetch the next page, or `None` once the history is exhausted.
    ///
    /// A source error ends the walk.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Transaction>>, SourceError> {
        if self.done {
            return Ok(None);
        }

        let page = match self
            .source
            .fetch_page(self.addresses, self.from, self.to)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                self.done = true;
                return Err(e);
            }
        };
        self.pages_fetched += 1;
        PAGES_FETCHED.inc();

        tracing::debug!(
            from = self.from,
            to = self.to,
            total = page.total,
            items = page.items.len(),
            "Fetched transaction page"
        );

        if self.to > page.total {
            self.done = true;
        } else {
            self.from = self.to;
            self.to += self.page_size;
        }

        Ok(Some(page.items))
    }
}

/// Collect the whole history of `addresses` in source order.
pub async fn drain<S: TransactionSource + ?Sized>(
    source: &S,
    addresses: &[String],
) -> Result<Vec<Transaction>, SourceError> {
    let mut pager = TransactionPager::new(source, addresses);
    let mut transactions = Vec::new();
    while let Some(items) = pager.next_page().await? {
        transactions.extend(items);
    }
    Ok(transactions)
}
