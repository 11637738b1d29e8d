//! Learned-order lookup.
//!
//! A [`PatternRankedLookup`] is built from a previously written aggregate
//! report. It re-orders the rule catalogue so that the rules that matched
//! most often across the analysed companies are tried first, and stops at
//! the first link any rule accepts.
//!
//! Each individual rule keeps its usual meaning: URL rules look at the href,
//! text rules at the visible text, keyword rules at text followed by href.

use std::path::Path;

use tracing::{debug, warn};
use url::Url;

use crate::aggregate::{AggregateReport, FrequencyTable};
use crate::dom::Document;
use crate::error::Result;
use crate::extractor::{extract_links, RawLink};
use crate::report_links::classify_document;
use crate::result::{CandidateLink, DocumentLink};
use crate::rules::{Rule, RuleBook};
use crate::url_utils::has_document_extension;

/// Rule order learned from an aggregate report.
#[derive(Debug, Clone)]
pub struct PatternRankedLookup {
    report: AggregateReport,
    ir_rules: Vec<Rule>,
    report_rules: Vec<Rule>,
}

impl PatternRankedLookup {
    /// Load the pattern file at `path`.
    ///
    /// Fails with [`crate::Error::PatternFileMissing`] when the file does not
    /// exist; no lookup is possible without it.
    pub fn from_file(path: &Path, rules: &RuleBook) -> Result<Self> {
        let report = AggregateReport::load(path)?;
        debug!(path = %path.display(), companies = report.total_companies, "loaded pattern file");
        Ok(Self::from_report(report, rules))
    }

    /// Build the learned order from an in-memory report.
    #[must_use]
    pub fn from_report(report: AggregateReport, rules: &RuleBook) -> Self {
        let ir_rules = rank_rules(
            &report.ir_page_patterns.pattern_frequency,
            |id| rules.ir_rule(id),
            rules.ir_url.iter().chain(&rules.ir_text),
        );
        let report_rules = rank_rules(
            &report.pdf_patterns.pattern_frequency,
            |id| rules.report_rule(id),
            rules.report_keywords.iter(),
        );
        Self {
            report,
            ir_rules,
            report_rules,
        }
    }

    /// The report the order was learned from.
    #[must_use]
    pub fn report(&self) -> &AggregateReport {
        &self.report
    }

    /// IR rules, most productive first.
    #[must_use]
    pub fn ranked_ir_rules(&self) -> &[Rule] {
        &self.ir_rules
    }

    /// Report keyword rules, most productive first.
    #[must_use]
    pub fn ranked_report_rules(&self) -> &[Rule] {
        &self.report_rules
    }

    /// The first IR link found by trying rules in learned order.
    #[must_use]
    pub fn find_ir_link(&self, links: &[RawLink<'_>]) -> Option<CandidateLink> {
        self.ir_rules.iter().find_map(|rule| {
            links
                .iter()
                .find(|link| rule.matches(&link.href, &link.text))
                .map(|link| link.to_candidate(Some(rule)))
        })
    }

    /// [`Self::find_ir_link`] over a parsed home page.
    #[must_use]
    pub fn find_ir_link_in_page(&self, doc: &Document, page_url: &Url) -> Option<CandidateLink> {
        self.find_ir_link(&extract_links(doc, page_url))
    }

    /// The first report document found by trying keyword rules in learned
    /// order.
    #[must_use]
    pub fn find_report_link(&self, links: &[RawLink<'_>], extensions: &[String]) -> Option<DocumentLink> {
        let documents: Vec<&RawLink<'_>> = links
            .iter()
            .filter(|link| has_document_extension(&link.href, extensions))
            .collect();

        self.report_rules.iter().find_map(|rule| {
            documents
                .iter()
                .find(|link| rule.matches(&link.href, &link.text))
                .map(|link| classify_document(link, std::slice::from_ref(rule)))
        })
    }

    /// [`Self::find_report_link`] over a parsed IR page.
    #[must_use]
    pub fn find_report_link_in_page(
        &self,
        doc: &Document,
        page_url: &Url,
        extensions: &[String],
    ) -> Option<DocumentLink> {
        self.find_report_link(&extract_links(doc, page_url), extensions)
    }
}

/// Learned rules by descending frequency, then the rest of the catalogue in
/// declared order. Ids the catalogue does not know are skipped.
fn rank_rules<'r>(
    learned: &FrequencyTable,
    resolve: impl Fn(&str) -> Option<&'r Rule>,
    catalogue: impl Iterator<Item = &'r Rule>,
) -> Vec<Rule> {
    let mut ranked: Vec<Rule> = Vec::new();

    for (id, count) in learned.ranked() {
        match resolve(id) {
            Some(rule) if !ranked.contains(rule) => ranked.push(rule.clone()),
            Some(_) => {}
            None => warn!(rule = id, count, "learned rule not in catalogue; skipping"),
        }
    }

    for rule in catalogue {
        if !ranked.contains(rule) {
            ranked.push(rule.clone());
        }
    }

    ranked
}
