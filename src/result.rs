//! Record types produced by the classifiers.
//!
//! Every record has a fixed set of fields; optional data is `Option`, never a
//! missing key.

use serde::{Deserialize, Serialize};

use crate::location::LocationTag;
use crate::rules::PatternType;

/// One input row: a company and the URL of its home page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyInput {
    #[serde(alias = "Ticker")]
    pub ticker: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "URL", alias = "Url")]
    pub url: String,
}

/// A link found on a page, with the rule that matched it (if any) and where
/// it sits in the page layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateLink {
    /// Absolute URL after resolution against the page base.
    pub url: String,

    /// The href exactly as written in the page.
    pub href: String,

    /// Trimmed visible text.
    pub text: String,

    /// Id of the matched rule.
    pub pattern: Option<String>,

    /// How the matched rule recognised the link.
    pub pattern_type: Option<PatternType>,

    /// Coarse structural placement.
    pub tag_location: LocationTag,
}

/// Immediate embedding context of a document link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralProfile {
    pub has_image: bool,
    pub has_icon: bool,
    pub in_list: bool,
    pub in_table: bool,
    /// Child nodes of the link's container, the link itself included.
    pub siblings_count: usize,
}

/// A document-extension link on an IR page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentLink {
    #[serde(flatten)]
    pub link: CandidateLink,

    /// Whether a report keyword rule matched.
    pub is_report: bool,

    /// Fiscal-year token, kept only for reports.
    pub year: Option<String>,

    /// Tag name of the link's parent element.
    pub parent_tag: String,

    /// Class tokens of the link's parent element.
    pub container_class: Vec<String>,

    pub link_structure: StructuralProfile,
}

/// Navigation and menu containers found on an IR page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSummary {
    pub count: usize,
    pub locations: Vec<LocationTag>,
}

/// Detailed analysis of one investor-relations page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrPageAnalysis {
    pub url: String,
    pub title: Option<String>,
    pub navigation: NavigationSummary,
    /// Every document link on the page, reports and non-reports alike.
    pub documents: Vec<DocumentLink>,
}

impl IrPageAnalysis {
    /// Document links classified as reports.
    pub fn reports(&self) -> impl Iterator<Item = &DocumentLink> {
        self.documents.iter().filter(|d| d.is_report)
    }
}

/// Everything learned about one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub ticker: String,
    pub name: String,
    pub url: String,

    /// IR links found on the home page, in document order.
    pub ir_links: Vec<CandidateLink>,

    /// Analysis of the first IR link's page.
    pub ir_page: Option<IrPageAnalysis>,

    /// Why analysis stopped early, if it did.
    pub error: Option<String>,
}

impl CompanyRecord {
    /// A fresh record with no findings yet.
    #[must_use]
    pub fn new(input: &CompanyInput) -> Self {
        Self {
            ticker: input.ticker.clone(),
            name: input.name.clone(),
            url: input.url.clone(),
            ir_links: Vec::new(),
            ir_page: None,
            error: None,
        }
    }

    /// Report links of the analysed IR page; empty when there is none.
    pub fn report_links(&self) -> impl Iterator<Item = &DocumentLink> {
        self.ir_page.iter().flat_map(|page| page.reports())
    }

    /// All document links of the analysed IR page.
    pub fn document_links(&self) -> impl Iterator<Item = &DocumentLink> {
        self.ir_page.iter().flat_map(|page| page.documents.iter())
    }
}
