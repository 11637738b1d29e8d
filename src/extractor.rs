//! Link extraction.
//!
//! Collects every anchor with a non-empty href from a parsed page. No
//! classification happens here; [`crate::ir_links`] and
//! [`crate::report_links`] decide what the links are.

use url::Url;

use crate::dom::{self, Document, NodeRef};
use crate::location::resolve_location;
use crate::patterns::ANCHOR_SELECTOR;
use crate::result::CandidateLink;
use crate::rules::Rule;
use crate::url_utils::{effective_base, resolve_href};

/// An anchor found on a page, still attached to its element.
#[derive(Clone)]
pub struct RawLink<'a> {
    /// The anchor element.
    pub node: NodeRef<'a>,
    /// The href as written.
    pub href: String,
    /// Absolute URL.
    pub url: String,
    /// Trimmed visible text.
    pub text: String,
}

impl RawLink<'_> {
    /// Freeze into a candidate link tagged with `rule` (if any).
    ///
    /// The structural location is resolved here, once.
    #[must_use]
    pub fn to_candidate(&self, rule: Option<&Rule>) -> CandidateLink {
        CandidateLink {
            url: self.url.clone(),
            href: self.href.clone(),
            text: self.text.clone(),
            pattern: rule.map(|r| r.id().to_string()),
            pattern_type: rule.map(|r| r.category().pattern_type()),
            tag_location: resolve_location(&self.node),
        }
    }
}

/// Extract all anchors with a non-empty href, in document order.
///
/// Relative hrefs are resolved against the page's effective base URL.
#[must_use]
pub fn extract_links<'a>(doc: &'a Document, page_url: &Url) -> Vec<RawLink<'a>> {
    let base = effective_base(doc, page_url);
    let anchors = doc.select(ANCHOR_SELECTOR);

    anchors
        .nodes()
        .iter()
        .filter_map(|node| {
            let href = node.attr("href")?.trim().to_string();
            if href.is_empty() {
                return None;
            }
            Some(RawLink {
                node: *node,
                url: resolve_href(&href, &base),
                text: dom::visible_text(node),
                href,
            })
        })
        .collect()
}
