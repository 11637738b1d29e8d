//! Report link classification on an investor-relations page.
//!
//! Only links whose href carries a document extension are considered. Their
//! text followed by their href is searched with the report keyword rules in
//! declared order; a hit marks the link as a report. The fiscal year is the
//! first `20xx` token of that same text-then-href string and is kept for
//! reports only.

use crate::extractor::RawLink;
use crate::patterns::YEAR_TOKEN;
use crate::result::DocumentLink;
use crate::rules::{first_match, Rule};
use crate::structure::{container_of, profile_link};
use crate::url_utils::has_document_extension;

/// First `20xx` token in `text` followed by `href`.
#[must_use]
pub fn extract_year(text: &str, href: &str) -> Option<String> {
    YEAR_TOKEN
        .find(&format!("{text}{href}"))
        .map(|m| m.as_str().to_string())
}

/// Classify a single document link.
#[must_use]
pub fn classify_document(link: &RawLink<'_>, keyword_rules: &[Rule]) -> DocumentLink {
    let rule = first_match(keyword_rules, &link.href, &link.text);
    let year = extract_year(&link.text, &link.href);
    let (parent_tag, container_class) = container_of(&link.node);

    DocumentLink {
        link: link.to_candidate(rule),
        is_report: rule.is_some(),
        year: year.filter(|_| rule.is_some()),
        parent_tag,
        container_class,
        link_structure: profile_link(&link.node),
    }
}

/// Classify every document-extension link among `links`, in document order.
///
/// Non-report documents are kept with `is_report == false` so the page's
/// document layout can be profiled as a whole.
#[must_use]
pub fn find_document_links(
    links: &[RawLink<'_>],
    extensions: &[String],
    keyword_rules: &[Rule],
) -> Vec<DocumentLink> {
    links
        .iter()
        .filter(|link| has_document_extension(&link.href, extensions))
        .map(|link| classify_document(link, keyword_rules))
        .collect()
}
