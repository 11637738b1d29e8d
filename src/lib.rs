//! # ir-patterns
//!
//! Learns where Japanese listed companies put their investor-relations pages
//! and report PDFs, and uses what it learned to find them faster.
//!
//! Home pages are scanned for links that look like IR entry points; the first
//! IR page found is scanned for document links, which are classified as
//! reports (integrated report, annual report) or not. Every classified link
//! carries the rule that matched it and where it sits in the page layout.
//! Across many companies these observations fold into an aggregate report of
//! rule and location frequencies, which in turn drives a ranked lookup.
//!
//! ## Quick Start
//!
//! ```rust
//! use ir_patterns::find_ir_links;
//!
//! let html = r#"<html><body><header>
//!     <a href="/ir/">IR情報</a>
//! </header></body></html>"#;
//!
//! let links = find_ir_links(html, "https://www.example.co.jp/")?;
//! assert_eq!(links[0].url, "https://www.example.co.jp/ir/");
//! assert_eq!(links[0].pattern.as_deref(), Some("/ir/?"));
//! # Ok::<(), ir_patterns::Error>(())
//! ```
//!
//! ## Features
//!
//! - **IR link classification**: ordered URL and text rules, first match wins
//! - **Report classification**: keyword rules over document links, fiscal year extraction
//! - **Layout inspection**: header/footer/sidebar/navigation placement and link embedding
//! - **Aggregation**: ranked, deterministic frequency reports across companies
//! - **Ranked lookup**: tries the most productive rules first
//!
//! Fetching is left to the caller through [`PageSource`].

mod error;
mod options;
mod patterns;
mod result;

/// DOM adapter and the `ElementNode` abstraction used for ancestor walks.
pub mod dom;

/// Ordered classification rules.
pub mod rules;

/// Anchor extraction with URL resolution.
pub mod extractor;

/// Coarse structural placement of a node.
pub mod location;

/// Embedding profile of a link.
pub mod structure;

/// IR link classification on home pages.
pub mod ir_links;

/// Report link classification on IR pages.
pub mod report_links;

/// Page-level analysis.
pub mod page;

/// Cross-company aggregation.
pub mod aggregate;

/// Lookup driven by learned rule frequencies.
pub mod lookup;

/// Per-company driver and the page source seam.
pub mod analyzer;

/// Recovery snapshots.
pub mod checkpoint;

/// CSV input and detail output.
pub mod export;

/// URL utilities for validation and resolution.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

// Public API - re-exports
pub use aggregate::{AggregateReport, FrequencyTable, PatternAggregator};
pub use analyzer::{FetchedPage, IrPatternAnalyzer, PageSource};
pub use error::{Error, Result};
pub use location::LocationTag;
pub use lookup::PatternRankedLookup;
pub use options::Options;
pub use result::{
    CandidateLink, CompanyInput, CompanyRecord, DocumentLink, IrPageAnalysis, NavigationSummary,
    StructuralProfile,
};
pub use rules::{PatternType, Rule, RuleBook};

/// Finds IR links in a home page using the built-in rules.
///
/// `page_url` is the address the page was fetched from; relative hrefs are
/// resolved against it (or against the page's `<base href>`).
///
/// # Example
///
/// ```rust
/// use ir_patterns::{find_ir_links, LocationTag};
///
/// let html = r#"<footer><a href="/kabunushi/">株主・投資家の皆様へ</a></footer>"#;
/// let links = find_ir_links(html, "https://www.example.co.jp/")?;
/// assert_eq!(links[0].tag_location, LocationTag::Footer);
/// # Ok::<(), ir_patterns::Error>(())
/// ```
pub fn find_ir_links(html: &str, page_url: &str) -> Result<Vec<CandidateLink>> {
    find_ir_links_with_options(html, page_url, &Options::default())
}

/// Finds IR links in a home page with custom options.
pub fn find_ir_links_with_options(html: &str, page_url: &str, options: &Options) -> Result<Vec<CandidateLink>> {
    let url = url_utils::parse_base_url(page_url)?;
    let doc = page::parse_page(html)?;
    Ok(page::analyze_home_page(&doc, &url, options))
}

/// Analyses an IR page using the built-in rules.
///
/// # Example
///
/// ```rust
/// use ir_patterns::analyze_ir_page;
///
/// let html = r#"<ul><li><a href="ir_2023.pdf">2023年 統合報告書</a></li></ul>"#;
/// let analysis = analyze_ir_page(html, "https://www.example.co.jp/ir/")?;
/// let report = analysis.reports().next().unwrap();
/// assert_eq!(report.year.as_deref(), Some("2023"));
/// assert!(report.link_structure.in_list);
/// # Ok::<(), ir_patterns::Error>(())
/// ```
pub fn analyze_ir_page(html: &str, page_url: &str) -> Result<IrPageAnalysis> {
    analyze_ir_page_with_options(html, page_url, &Options::default())
}

/// Analyses an IR page with custom options.
pub fn analyze_ir_page_with_options(html: &str, page_url: &str, options: &Options) -> Result<IrPageAnalysis> {
    let url = url_utils::parse_base_url(page_url)?;
    let doc = page::parse_page(html)?;
    Ok(page::analyze_ir_page(&doc, &url, options))
}

/// Analyses IR page bytes, detecting the character encoding first.
///
/// See [`encoding::detect_encoding`] for the precedence of encoding sources.
pub fn analyze_ir_page_bytes(html: &[u8], content_type: Option<&str>, page_url: &str) -> Result<IrPageAnalysis> {
    let html = encoding::decode_page(html, content_type);
    analyze_ir_page(&html, page_url)
}
