//! Driving one company at a time through a page source.
//!
//! [`IrPatternAnalyzer`] owns the aggregation context of a run. Each call to
//! [`IrPatternAnalyzer::analyze_company`] fetches the home page, classifies
//! its IR links, analyses the page behind the first of them and appends the
//! resulting record. Failures are stored on the record; the run goes on.

use tracing::{debug, info, warn};
use url::Url;

use crate::aggregate::{AggregateReport, PatternAggregator};
use crate::encoding::decode_page;
use crate::error::{Error, Result};
use crate::options::Options;
use crate::page::{analyze_home_page, analyze_ir_page, parse_page};
use crate::result::{CompanyInput, CompanyRecord, IrPageAnalysis};
use crate::url_utils::parse_base_url;

/// Raw page as delivered by a [`PageSource`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchedPage {
    pub body: Vec<u8>,
    /// HTTP `Content-Type`, when the source knows it.
    pub content_type: Option<String>,
}

impl FetchedPage {
    /// A UTF-8 page without content-type information.
    #[must_use]
    pub fn from_html(html: &str) -> Self {
        Self {
            body: html.as_bytes().to_vec(),
            content_type: None,
        }
    }

    /// Body decoded to UTF-8.
    #[must_use]
    pub fn decode(&self) -> String {
        decode_page(&self.body, self.content_type.as_deref())
    }
}

/// Where pages come from.
///
/// Network clients, politeness delays and timeouts live behind this trait.
pub trait PageSource {
    /// Retrieve the page at `url`.
    ///
    /// # Errors
    ///
    /// [`Error::Fetch`] when the page cannot be delivered.
    fn fetch_page(&self, url: &Url) -> Result<FetchedPage>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
        (**self).fetch_page(url)
    }
}

/// Run state for a batch of companies.
#[derive(Debug, Clone, Default)]
pub struct IrPatternAnalyzer {
    options: Options,
    aggregator: PatternAggregator,
}

impl IrPatternAnalyzer {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self {
            options,
            aggregator: PatternAggregator::new(),
        }
    }

    /// Continue a run from previously collected records.
    #[must_use]
    pub fn resume(options: Options, records: Vec<CompanyRecord>) -> Self {
        Self {
            options,
            aggregator: PatternAggregator::from_records(records),
        }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub fn records(&self) -> &[CompanyRecord] {
        self.aggregator.records()
    }

    #[must_use]
    pub fn into_records(self) -> Vec<CompanyRecord> {
        self.aggregator.into_records()
    }

    /// Whether the driver should write a checkpoint now.
    #[must_use]
    pub fn checkpoint_due(&self) -> bool {
        self.options.checkpoint_due(self.aggregator.len())
    }

    /// Aggregate report over every record so far.
    #[must_use]
    pub fn generate_report(&self) -> AggregateReport {
        self.aggregator.generate_report(self.options.top_patterns)
    }

    /// Analyse one company and append its record.
    ///
    /// Only the first IR link found on the home page is followed. Any
    /// failure ends the analysis of this company and is kept in
    /// [`CompanyRecord::error`] together with whatever was found before it.
    pub fn analyze_company<S: PageSource>(&mut self, input: &CompanyInput, source: &S) -> &CompanyRecord {
        info!(ticker = %input.ticker, name = %input.name, "analyzing company");

        let mut record = CompanyRecord::new(input);
        if let Err(e) = self.analyze_into(&mut record, source) {
            warn!(ticker = %input.ticker, error = %e, "analysis stopped early");
            record.error = Some(e.to_string());
        }

        debug!(
            ticker = %record.ticker,
            ir_links = record.ir_links.len(),
            reports = record.report_links().count(),
            "company done"
        );

        let index = self.aggregator.len();
        self.aggregator.push(record);
        &self.aggregator.records()[index]
    }

    fn analyze_into<S: PageSource>(&self, record: &mut CompanyRecord, source: &S) -> Result<()> {
        let home_url = parse_base_url(&record.url)?;
        let home = source.fetch_page(&home_url)?.decode();
        let doc = parse_page(&home)?;
        record.ir_links = analyze_home_page(&doc, &home_url, &self.options);

        if let Some(first) = record.ir_links.first() {
            let ir_url = Url::parse(&first.url).map_err(|_| Error::InvalidUrl(first.url.clone()))?;
            record.ir_page = Some(self.analyze_ir_url(&ir_url, source)?);
        }
        Ok(())
    }

    fn analyze_ir_url<S: PageSource>(&self, ir_url: &Url, source: &S) -> Result<IrPageAnalysis> {
        debug!(url = %ir_url, "analyzing IR page");
        let html = source.fetch_page(ir_url)?.decode();
        let doc = parse_page(&html)?;
        Ok(analyze_ir_page(&doc, ir_url, &self.options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapSource(HashMap<String, String>);

    impl PageSource for MapSource {
        fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
            self.0
                .get(url.as_str())
                .map(|html| FetchedPage::from_html(html))
                .ok_or_else(|| Error::Fetch {
                    url: url.to_string(),
                    reason: "404".to_string(),
                })
        }
    }

    fn input(url: &str) -> CompanyInput {
        CompanyInput {
            ticker: "7203".to_string(),
            name: "Example".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn follows_first_ir_link_only() {
        let source = MapSource(HashMap::from([
            (
                "https://www.example.co.jp/".to_string(),
                r#"<a href="/ir/">IR</a><a href="/investors/">Investors</a>"#.to_string(),
            ),
            (
                "https://www.example.co.jp/ir/".to_string(),
                r#"<a href="ar2023.pdf">統合報告書 2023</a>"#.to_string(),
            ),
        ]));
        let mut analyzer = IrPatternAnalyzer::default();
        let record = analyzer.analyze_company(&input("https://www.example.co.jp/"), &source);

        assert_eq!(record.ir_links.len(), 2);
        assert_eq!(record.error, None);
        let page = record.ir_page.as_ref().unwrap();
        assert_eq!(page.url, "https://www.example.co.jp/ir/");
        assert_eq!(record.report_links().count(), 1);
    }

    #[test]
    fn fetch_failure_is_recorded() {
        let source = MapSource(HashMap::from([(
            "https://www.example.co.jp/".to_string(),
            r#"<a href="/ir/">IR</a>"#.to_string(),
        )]));
        let mut analyzer = IrPatternAnalyzer::default();
        let record = analyzer.analyze_company(&input("https://www.example.co.jp/"), &source);

        assert_eq!(record.ir_links.len(), 1);
        assert!(record.ir_page.is_none());
        assert!(record.error.as_deref().unwrap().contains("/ir/"));
        assert_eq!(analyzer.records().len(), 1);
    }

    #[test]
    fn invalid_home_url_is_recorded() {
        let mut analyzer = IrPatternAnalyzer::default();
        let record = analyzer.analyze_company(&input("not a url"), &MapSource(HashMap::new()));
        assert!(record.error.is_some());
        assert!(record.ir_links.is_empty());
    }

    #[test]
    fn checkpoint_cadence_follows_record_count() {
        let options = Options {
            checkpoint_interval: 2,
            ..Options::default()
        };
        let mut analyzer = IrPatternAnalyzer::new(options);
        let source = MapSource(HashMap::new());
        analyzer.analyze_company(&input("https://a.example/"), &source);
        assert!(!analyzer.checkpoint_due());
        analyzer.analyze_company(&input("https://b.example/"), &source);
        assert!(analyzer.checkpoint_due());
    }
}
