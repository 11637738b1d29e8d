//! Pattern aggregation across companies.
//!
//! [`PatternAggregator`] owns the append-only collection of company records
//! for a run. [`PatternAggregator::generate_report`] is a pure fold over that
//! collection: the same records always produce the same report, byte for byte
//! once serialized.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::error::{Error, Result};
use crate::result::{CandidateLink, CompanyRecord, DocumentLink};

/// Occurrence counts keyed by rule id or location tag.
///
/// Keys remember the order in which they were first seen; ranking sorts by
/// descending count and falls back to that order for ties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more occurrence of `key`.
    pub fn increment(&mut self, key: &str) {
        self.add(key, 1);
    }

    fn add(&mut self, key: &str, count: usize) {
        if let Some(&i) = self.index.get(key) {
            self.entries[i].1 += count;
        } else {
            self.index.insert(key.to_string(), self.entries.len());
            self.entries.push((key.to_string(), count));
        }
    }

    /// Count for `key`, zero if never seen.
    #[must_use]
    pub fn get(&self, key: &str) -> usize {
        self.index.get(key).map_or(0, |&i| self.entries[i].1)
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    /// Entries in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), *c))
    }

    /// Entries by descending count; ties keep first-seen order.
    #[must_use]
    pub fn ranked(&self) -> Vec<(&str, usize)> {
        let mut ranked: Vec<(&str, usize)> = self.iter().collect();
        // sort_by is stable
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The `n` highest-ranked entries as a new table in ranked order.
    #[must_use]
    pub fn top(&self, n: usize) -> Self {
        self.ranked().into_iter().take(n).collect()
    }

    /// The whole table re-ordered by rank.
    #[must_use]
    pub fn into_ranked(self) -> Self {
        let n = self.len();
        self.top(n)
    }
}

impl<'a> FromIterator<(&'a str, usize)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (&'a str, usize)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, count) in iter {
            table.add(key, count);
        }
        table
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(key, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FrequencyTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = FrequencyTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of keys to occurrence counts")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> std::result::Result<Self::Value, M::Error> {
                let mut table = FrequencyTable::new();
                while let Some((key, count)) = access.next_entry::<String, usize>()? {
                    table.add(&key, count);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Frequency summary of one kind of classified link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSummary {
    /// Number of links summarised.
    pub total: usize,
    /// Top-N rule ids, ranked.
    pub pattern_frequency: FrequencyTable,
    /// All location tags, ranked.
    pub location_frequency: FrequencyTable,
}

impl PatternSummary {
    fn from_links<'a>(links: impl Iterator<Item = &'a CandidateLink>, top_n: usize) -> Self {
        let mut total = 0;
        let mut patterns = FrequencyTable::new();
        let mut locations = FrequencyTable::new();

        for link in links {
            total += 1;
            if let Some(pattern) = &link.pattern {
                patterns.increment(pattern);
            }
            locations.increment(link.tag_location.as_str());
        }

        Self {
            total,
            pattern_frequency: patterns.top(top_n),
            location_frequency: locations.into_ranked(),
        }
    }
}

/// How often report-page document links share an embedding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonStructures {
    pub has_image: usize,
    pub in_list: usize,
    pub in_table: usize,
}

impl CommonStructures {
    fn tally<'a>(documents: impl Iterator<Item = &'a DocumentLink>) -> Self {
        documents.fold(Self::default(), |mut acc, doc| {
            let s = &doc.link_structure;
            acc.has_image += usize::from(s.has_image);
            acc.in_list += usize::from(s.in_list);
            acc.in_table += usize::from(s.in_table);
            acc
        })
    }
}

/// Learned statistics over a set of companies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateReport {
    pub total_companies: usize,
    pub ir_page_patterns: PatternSummary,
    pub pdf_patterns: PatternSummary,
    pub common_structures: CommonStructures,
}

impl AggregateReport {
    /// Pretty-printed JSON, UTF-8 kept as-is.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a report previously written with [`AggregateReport::save`].
    ///
    /// A missing file is reported as [`Error::PatternFileMissing`].
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::PatternFileMissing(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&content).map_err(|e| Error::PatternFileInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Write the report as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }
}

/// Owned aggregation context for one run.
///
/// Records are only ever appended; there is no removal or in-place edit.
#[derive(Debug, Clone, Default)]
pub struct PatternAggregator {
    records: Vec<CompanyRecord>,
}

impl PatternAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from previously collected records, e.g. a checkpoint.
    #[must_use]
    pub fn from_records(records: Vec<CompanyRecord>) -> Self {
        Self { records }
    }

    pub fn push(&mut self, record: CompanyRecord) {
        self.records.push(record);
    }

    #[must_use]
    pub fn records(&self) -> &[CompanyRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<CompanyRecord> {
        self.records
    }

    /// Fold the whole collection into a report.
    ///
    /// Companies without an IR page analysis contribute only their home-page
    /// IR links (possibly none).
    #[must_use]
    pub fn generate_report(&self, top_n: usize) -> AggregateReport {
        debug!(companies = self.records.len(), "generating aggregate report");

        AggregateReport {
            total_companies: self.records.len(),
            ir_page_patterns: PatternSummary::from_links(
                self.records.iter().flat_map(|r| r.ir_links.iter()),
                top_n,
            ),
            pdf_patterns: PatternSummary::from_links(
                self.records
                    .iter()
                    .flat_map(|r| r.report_links())
                    .map(|d| &d.link),
                top_n,
            ),
            common_structures: CommonStructures::tally(
                self.records.iter().flat_map(|r| r.document_links()),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranking_is_descending_and_stable() {
        let mut table = FrequencyTable::new();
        for key in ["b", "a", "c", "a", "d", "c"] {
            table.increment(key);
        }
        // a:2, c:2 tie (a first seen before c); b:1, d:1 tie (b before d)
        assert_eq!(table.ranked(), vec![("a", 2), ("c", 2), ("b", 1), ("d", 1)]);
        assert_eq!(table.top(3).iter().collect::<Vec<_>>(), vec![("a", 2), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn counts_and_totals() {
        let table: FrequencyTable = [("x", 3), ("y", 1), ("x", 2)].into_iter().collect();
        assert_eq!(table.get("x"), 5);
        assert_eq!(table.get("missing"), 0);
        assert_eq!(table.len(), 2);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn serializes_in_stored_order() {
        let table: FrequencyTable = [("z", 5), ("a", 1)].into_iter().collect();
        assert_eq!(serde_json::to_string(&table).unwrap(), r#"{"z":5,"a":1}"#);

        let back: FrequencyTable = serde_json::from_str(r#"{"z":5,"a":1}"#).unwrap();
        assert_eq!(back.iter().collect::<Vec<_>>(), vec![("z", 5), ("a", 1)]);
    }

    #[test]
    fn empty_aggregator_report() {
        let report = PatternAggregator::new().generate_report(10);
        assert_eq!(report.total_companies, 0);
        assert_eq!(report.ir_page_patterns.total, 0);
        assert!(report.pdf_patterns.pattern_frequency.is_empty());
        assert_eq!(report.common_structures, CommonStructures::default());
    }

    #[test]
    fn load_missing_pattern_file() {
        let err = AggregateReport::load(Path::new("/nonexistent/ir_pattern_analysis.json")).unwrap_err();
        assert!(matches!(err, Error::PatternFileMissing(_)));
    }
}
