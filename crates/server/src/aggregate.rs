// Copyright (C) 2026 App Registry Contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Turning a stream of transactions into registry records.
//!
//! A transaction is a registry candidate when its second output is unspent
//! and carries one of the protocol's op values. The first output's script
//! holds the data; the second output's first address keys the record.
//!
//! Candidates that fail to decode are skipped and counted; they never abort
//! the scan.

use crate::metrics::registry::{OUTPUTS_SKIPPED, RECORDS_EXTRACTED};
use crate::protocol::{ExtractError, OpClass, RegistryProtocol};
use crate::source::Transaction;
use crate::types::{AppRecord, FIELD_ADDRESS};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// What happened to the transactions seen by one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    /// Pages fetched by a paged scan. One-shot scans leave this at zero, even
    /// when the source pages internally to serve the whole history.
    pub pages: usize,
    pub transactions: usize,
    /// Candidates of the op classes the scan is interested in.
    pub candidates: usize,
    pub extracted: usize,
    /// Well-formed candidates rejected by the name filter.
    pub filtered: usize,
    /// Malformed candidates.
    pub skipped: usize,
}

/// Result of one scan together with its statistics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport<T> {
    pub result: T,
    pub stats: ScanStats,
}

/// A transaction qualifying as a registry annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    pub class: OpClass,
    pub script_hex: &'a str,
    pub address: Option<&'a str>,
}

/// Apply the qualification rule to `tx`.
pub fn classify<'a, P: RegistryProtocol>(protocol: &P, tx: &'a Transaction) -> Option<Candidate<'a>> {
    let [data, tagged, ..] = tx.vout.as_slice() else {
        return None;
    };
    if tagged.spent_tx_id.is_some() {
        return None;
    }
    let class = protocol.classify_amount(&tagged.value)?;
    Some(Candidate {
        class,
        script_hex: &data.script_hex,
        address: tagged.addresses.first().map(String::as_str),
    })
}

/// Consumer of a scan's transactions, in source order.
pub trait Aggregate {
    type Output;

    fn observe(&mut self, tx: &Transaction);

    fn stats_mut(&mut self) -> &mut ScanStats;

    fn finish(self) -> ScanReport<Self::Output>;
}

/// Bookkeeping shared by the builders.
struct Tally<'p, P> {
    protocol: &'p P,
    stats: ScanStats,
}

impl<'p, P: RegistryProtocol> Tally<'p, P> {
    fn new(protocol: &'p P) -> Self {
        Self {
            protocol,
            stats: ScanStats::default(),
        }
    }

    fn candidate<'t>(
        &mut self,
        tx: &'t Transaction,
        wanted: impl Fn(OpClass) -> bool,
    ) -> Option<Candidate<'t>> {
        self.stats.transactions += 1;
        let candidate = classify(self.protocol, tx).filter(|c| wanted(c.class))?;
        self.stats.candidates += 1;
        Some(candidate)
    }

    fn extracted(&mut self, class: OpClass) {
        self.stats.extracted += 1;
        let op = class.to_string();
        RECORDS_EXTRACTED
            .with_label_values(&[P::TAG, op.as_str()])
            .inc();
    }

    fn skipped(&mut self, tx: &Transaction, class: OpClass, error: &ExtractError) {
        self.stats.skipped += 1;
        let op = class.to_string();
        OUTPUTS_SKIPPED
            .with_label_values(&[P::TAG, op.as_str()])
            .inc();
        tracing::debug!(
            protocol = P::TAG,
            txid = %tx.txid,
            op = %class,
            error = %error,
            "Skipping malformed registry output"
        );
    }
}

/// Builds the list of published apps whose name matches a filter.
pub struct AppListBuilder<'p, P> {
    tally: Tally<'p, P>,
    name_filter: String,
    apps: Vec<AppRecord>,
}

impl<'p, P: RegistryProtocol> AppListBuilder<'p, P> {
    pub fn new(protocol: &'p P, name_filter: &str) -> Self {
        Self {
            tally: Tally::new(protocol),
            name_filter: name_filter.to_string(),
            apps: Vec::new(),
        }
    }

    fn extract(&self, candidate: &Candidate<'_>) -> Result<Option<AppRecord>, ExtractError> {
        let address = candidate.address.ok_or(ExtractError::MissingAddress)?;
        let record = self
            .tally
            .protocol
            .extract_publish(candidate.script_hex, &self.name_filter)?;
        Ok(record.map(|r| r.with(FIELD_ADDRESS, address)))
    }
}

impl<P: RegistryProtocol> Aggregate for AppListBuilder<'_, P> {
    type Output = Vec<AppRecord>;

    fn observe(&mut self, tx: &Transaction) {
        let Some(candidate) = self.tally.candidate(tx, |c| c == OpClass::Publish) else {
            return;
        };
        match self.extract(&candidate) {
            Ok(Some(app)) => {
                self.apps.push(app);
                self.tally.extracted(candidate.class);
            }
            Ok(None) => self.tally.stats.filtered += 1,
            Err(e) => self.tally.skipped(tx, candidate.class, &e),
        }
    }

    fn stats_mut(&mut self) -> &mut ScanStats {
        &mut self.tally.stats
    }

    fn finish(self) -> ScanReport<Vec<AppRecord>> {
        ScanReport {
            result: self.apps,
            stats: self.tally.stats,
        }
    }
}

/// Accumulates meta and description updates into one record per address.
///
/// Each update overwrites only the fields it supplies, so the latest output
/// in scan order wins field by field.
pub struct LatestBuilder<'p, P> {
    tally: Tally<'p, P>,
    records: BTreeMap<String, AppRecord>,
}

impl<'p, P: RegistryProtocol> LatestBuilder<'p, P> {
    pub fn new(protocol: &'p P) -> Self {
        Self {
            tally: Tally::new(protocol),
            records: BTreeMap::new(),
        }
    }

    fn extract(&self, candidate: &Candidate<'_>) -> Result<Option<(String, AppRecord)>, ExtractError> {
        let address = candidate.address.ok_or(ExtractError::MissingAddress)?;
        let update = self
            .tally
            .protocol
            .extract_update(candidate.class, candidate.script_hex)?;
        Ok(update.map(|u| (address.to_string(), u)))
    }
}

impl<P: RegistryProtocol> Aggregate for LatestBuilder<'_, P> {
    type Output = BTreeMap<String, AppRecord>;

    fn observe(&mut self, tx: &Transaction) {
        let Some(candidate) = self
            .tally
            .candidate(tx, |c| matches!(c, OpClass::Meta | OpClass::Description))
        else {
            return;
        };
        match self.extract(&candidate) {
            Ok(Some((address, update))) => {
                self.records.entry(address).or_default().merge(update);
                self.tally.extracted(candidate.class);
            }
            Ok(None) => {}
            Err(e) => self.tally.skipped(tx, candidate.class, &e),
        }
    }

    fn stats_mut(&mut self) -> &mut ScanStats {
        &mut self.tally.stats
    }

    fn finish(self) -> ScanReport<BTreeMap<String, AppRecord>> {
        ScanReport {
            result: self.records,
            stats: self.tally.stats,
        }
    }
}

/// Keeps the categories array of the last well-formed categories output.
pub struct CategoriesBuilder<'p, P> {
    tally: Tally<'p, P>,
    categories: Vec<Value>,
}

impl<'p, P: RegistryProtocol> CategoriesBuilder<'p, P> {
    pub fn new(protocol: &'p P) -> Self {
        Self {
            tally: Tally::new(protocol),
            categories: Vec::new(),
        }
    }
}

impl<P: RegistryProtocol> Aggregate for CategoriesBuilder<'_, P> {
    type Output = Vec<Value>;

    fn observe(&mut self, tx: &Transaction) {
        let Some(candidate) = self.tally.candidate(tx, |c| c == OpClass::Categories) else {
            return;
        };
        match self.tally.protocol.extract_categories(candidate.script_hex) {
            Ok(categories) => {
                self.categories = categories;
                self.tally.extracted(candidate.class);
            }
            Err(e) => self.tally.skipped(tx, candidate.class, &e),
        }
    }

    fn stats_mut(&mut self) -> &mut ScanStats {
        &mut self.tally.stats
    }

    fn finish(self) -> ScanReport<Vec<Value>> {
        ScanReport {
            result: self.categories,
            stats: self.tally.stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::LzStringDecompressor;
    use crate::protocol::{CompressedProtocol, PositionalProtocol};
    use crate::test_fixtures::{
        CATEGORIES, DESCRIPTION, META, PUBLISH, categories_script, compressed_publish_script,
        positional_script, registry_tx, spent_registry_tx,
    };
    use serde_json::json;

    fn feed<A: Aggregate>(mut builder: A, txs: &[Transaction]) -> ScanReport<A::Output> {
        for tx in txs {
            builder.observe(tx);
        }
        builder.finish()
    }

    fn compressed() -> CompressedProtocol<LzStringDecompressor> {
        CompressedProtocol::default()
    }

    #[test]
    fn classify_requires_two_outputs() {
        let mut tx = registry_tx("t", "6a", PUBLISH, "addr");
        tx.vout.truncate(1);
        assert_eq!(classify(&PositionalProtocol, &tx), None);
    }

    #[test]
    fn classify_reads_second_output() {
        let tx = registry_tx("t", "6aff", META, "addr");
        assert_eq!(
            classify(&PositionalProtocol, &tx),
            Some(Candidate {
                class: OpClass::Meta,
                script_hex: "6aff",
                address: Some("addr"),
            })
        );
    }

    #[test]
    fn lists_matching_apps_in_order() {
        let txs = vec![
            registry_tx(
                "t1",
                &compressed_publish_script("MyApp", r#"{"d":"first","i":"icon","s":"short"}"#),
                PUBLISH,
                "addr1",
            ),
            registry_tx(
                "t2",
                &compressed_publish_script("Other", r#"{"d":"other"}"#),
                PUBLISH,
                "addr2",
            ),
            registry_tx(
                "t3",
                &compressed_publish_script("myapp pro", r#"{"d":"third"}"#),
                PUBLISH,
                "addr3",
            ),
        ];
        let protocol = compressed();
        let report = feed(AppListBuilder::new(&protocol, "myapp"), &txs);

        assert_eq!(
            serde_json::to_value(&report.result).unwrap(),
            json!([
                {"d": "first", "i": "icon", "s": "short", "n": "MyApp", "a": "addr1"},
                {"d": "third", "n": "myapp pro", "a": "addr3"}
            ])
        );
        assert_eq!(report.stats.candidates, 3);
        assert_eq!(report.stats.extracted, 2);
        assert_eq!(report.stats.filtered, 1);
        assert_eq!(report.stats.skipped, 0);
    }

    #[test]
    fn positional_publish_records() {
        let txs = vec![registry_tx(
            "t1",
            &positional_script(&["Notes", "On-chain notes"]),
            PUBLISH,
            "addr1",
        )];
        let report = feed(AppListBuilder::new(&PositionalProtocol, "unrelated"), &txs);
        assert_eq!(
            serde_json::to_value(&report.result).unwrap(),
            json!([{"n": "Notes", "d": "On-chain notes", "a": "addr1"}])
        );
    }

    #[test]
    fn non_qualifying_transactions_are_ignored() {
        let script = compressed_publish_script("MyApp", r#"{"d":"x"}"#);
        let mut single_output = registry_tx("t3", &script, PUBLISH, "a");
        single_output.vout.truncate(1);
        let txs = vec![
            registry_tx("t1", &script, "0.00013", "a"),
            spent_registry_tx("t2", &script, PUBLISH, "a"),
            single_output,
            registry_tx("t4", &script, META, "a"),
        ];
        let protocol = compressed();
        let report = feed(AppListBuilder::new(&protocol, ""), &txs);

        assert!(report.result.is_empty());
        assert_eq!(report.stats.transactions, 4);
        assert_eq!(report.stats.candidates, 0);
    }

    #[test]
    fn malformed_outputs_are_skipped_without_stopping() {
        let good = compressed_publish_script("Good", r#"{"d":"ok"}"#);
        let mut no_address = registry_tx("t4", &good, PUBLISH, "x");
        no_address.vout[1].addresses.clear();
        let txs = vec![
            registry_tx("t1", "6a23626123zz", PUBLISH, "a"),
            registry_tx("t2", "6a0102", PUBLISH, "a"),
            registry_tx("t3", &good, PUBLISH, "b"),
            no_address,
        ];
        let protocol = compressed();
        let report = feed(AppListBuilder::new(&protocol, ""), &txs);

        assert_eq!(report.result.len(), 1);
        assert_eq!(report.result[0].get_str("a"), Some("b"));
        assert_eq!(report.stats.skipped, 3);
    }

    #[test]
    fn latest_merges_meta_and_description_per_address() {
        let txs = vec![
            registry_tx("t1", &positional_script(&["1.0", "h1"]), META, "addr1"),
            registry_tx("t2", &positional_script(&["About app one"]), DESCRIPTION, "addr1"),
            registry_tx("t3", &positional_script(&["About app two"]), DESCRIPTION, "addr2"),
            registry_tx("t4", &positional_script(&["Ignored", "publish"]), PUBLISH, "addr1"),
        ];
        let report = feed(LatestBuilder::new(&PositionalProtocol), &txs);

        assert_eq!(
            serde_json::to_value(&report.result).unwrap(),
            json!({
                "addr1": {"v": "1.0", "h": "h1", "s": "About app one"},
                "addr2": {"s": "About app two"}
            })
        );
        assert_eq!(report.stats.candidates, 3);
    }

    #[test]
    fn latest_last_writer_wins_per_field() {
        let txs = vec![
            registry_tx("t1", &positional_script(&["1.0", "old"]), META, "addr"),
            registry_tx("t2", &positional_script(&["Desc"]), DESCRIPTION, "addr"),
            registry_tx("t3", &positional_script(&["1.1", "new"]), META, "addr"),
        ];
        let report = feed(LatestBuilder::new(&PositionalProtocol), &txs);
        let record = &report.result["addr"];

        assert_eq!(record.get_str("h"), Some("new"));
        assert_eq!(record.get_str("v"), Some("1.1"));
        assert_eq!(record.get_str("s"), Some("Desc"));
    }

    #[test]
    fn latest_meta_is_idempotent() {
        let meta = registry_tx("t1", &positional_script(&["2.0", "abc"]), META, "addr");
        let once = feed(LatestBuilder::new(&PositionalProtocol), &[meta.clone()]);
        let twice = feed(LatestBuilder::new(&PositionalProtocol), &[meta.clone(), meta]);

        assert_eq!(once.result, twice.result);
    }

    #[test]
    fn latest_skips_malformed_update_and_keeps_previous_fields() {
        let txs = vec![
            registry_tx("t1", &positional_script(&["1.0", "h1"]), META, "addr"),
            registry_tx("t2", &positional_script(&["no-delimiter"]), META, "addr"),
        ];
        let report = feed(LatestBuilder::new(&PositionalProtocol), &txs);

        assert_eq!(report.result["addr"].get_str("h"), Some("h1"));
        assert_eq!(report.stats.skipped, 1);
    }

    #[test]
    fn categories_last_output_replaces_earlier() {
        let txs = vec![
            registry_tx("t1", &categories_script(r#"["a","b","c"]"#), CATEGORIES, "repo"),
            registry_tx("t2", &categories_script(r#"["x"]"#), CATEGORIES, "repo"),
            registry_tx("t3", &categories_script("not json"), CATEGORIES, "repo"),
        ];
        let report = feed(CategoriesBuilder::new(&PositionalProtocol), &txs);

        assert_eq!(report.result, vec![json!("x")]);
        assert_eq!(report.stats.extracted, 2);
        assert_eq!(report.stats.skipped, 1);
    }
}
