//! Investor-relations link classification.
//!
//! Each link is tested against the URL rules first, then the text rules, in
//! declared order. The first rule that matches tags the link and no other
//! rule is consulted, so a link carries at most one rule id. Links matching
//! nothing are dropped.

use url::Url;

use crate::dom::Document;
use crate::extractor::{extract_links, RawLink};
use crate::result::CandidateLink;
use crate::rules::{first_match, Rule};

/// The rule that classifies a link as an IR link, if any.
#[must_use]
pub fn classify_ir_link<'r>(
    href: &str,
    text: &str,
    url_rules: &'r [Rule],
    text_rules: &'r [Rule],
) -> Option<&'r Rule> {
    first_match(url_rules, href, text).or_else(|| first_match(text_rules, href, text))
}

/// Keep the IR links among `links`, tagged with their matching rule.
#[must_use]
pub fn find_ir_links(links: &[RawLink<'_>], url_rules: &[Rule], text_rules: &[Rule]) -> Vec<CandidateLink> {
    links
        .iter()
        .filter_map(|link| {
            classify_ir_link(&link.href, &link.text, url_rules, text_rules)
                .map(|rule| link.to_candidate(Some(rule)))
        })
        .collect()
}

/// Extract and classify the IR links of a parsed page.
#[must_use]
pub fn find_ir_links_in_page(
    doc: &Document,
    page_url: &Url,
    url_rules: &[Rule],
    text_rules: &[Rule],
) -> Vec<CandidateLink> {
    find_ir_links(&extract_links(doc, page_url), url_rules, text_rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use crate::location::LocationTag;
    use crate::rules::{PatternType, RuleBook};

    fn classify(html: &str) -> Vec<CandidateLink> {
        let doc = dom::parse(html);
        let url = Url::parse("https://www.example.co.jp/").unwrap();
        let rules = RuleBook::default();
        find_ir_links_in_page(&doc, &url, &rules.ir_url, &rules.ir_text)
    }

    #[test]
    fn url_rule_in_navigation_header() {
        let links = classify(r#"<nav><ul><li><a href="/ir/index.html">IR情報</a></li></ul></nav>"#);
        assert_eq!(links.len(), 1);
        let link = &links[0];
        assert_eq!(link.url, "https://www.example.co.jp/ir/index.html");
        assert_eq!(link.pattern.as_deref(), Some("/ir/?"));
        assert_eq!(link.pattern_type, Some(PatternType::Url));
        assert_eq!(link.tag_location, LocationTag::Header);
    }

    #[test]
    fn url_match_suppresses_text_match() {
        // Both a URL rule and a text rule would match; only the URL rule is recorded.
        let links = classify(r#"<a href="/investors/">Investor Relations</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].pattern.as_deref(), Some("/investor/?"));
        assert_eq!(links[0].pattern_type, Some(PatternType::Url));
    }

    #[test]
    fn anchor_text_split_across_elements_is_joined() {
        let links = classify("<header><a href=\"/stock/\"><span>IR</span>\n<span>情報</span></a></header>");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].text, "IR情報");
        assert_eq!(links[0].pattern.as_deref(), Some("IR情報?"));
        assert_eq!(links[0].pattern_type, Some(PatternType::Text));
        assert_eq!(links[0].tag_location, LocationTag::Header);
    }

    #[test]
    fn text_rule_when_no_url_rule_matches() {
        let links = classify(r#"<main><a href="/stock/index.html">株主・投資家の皆様へ</a></main>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].pattern.as_deref(), Some("株主.*投資家"));
        assert_eq!(links[0].pattern_type, Some(PatternType::Text));
        assert_eq!(links[0].tag_location, LocationTag::MainContent);
    }

    #[test]
    fn text_rules_respect_declared_order() {
        // "IR情報?" precedes "IR\s*Information" in the text rules.
        let links = classify(r#"<a href="/en/stock.html">IR Information</a>"#);
        assert_eq!(links[0].pattern.as_deref(), Some(r"IR\s*Information"));

        let links = classify(r#"<a href="/en/stock.html">IR情報</a>"#);
        assert_eq!(links[0].pattern.as_deref(), Some("IR情報?"));
    }

    #[test]
    fn unmatched_links_are_absent() {
        let links = classify(r#"<a href="/about">会社概要</a><a href="/news/">ニュース</a>"#);
        assert!(links.is_empty());
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let links = classify(r#"<a href="https://www.example.co.jp/JP/Investor-Relations/top.html">top</a>"#);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].pattern.as_deref(), Some("/investor/?"));
    }

    #[test]
    fn duplicates_across_page_regions_are_all_kept() {
        let links = classify(
            r#"<header><a href="/ir/">IR</a></header><footer><a href="/ir/">IR</a></footer>"#,
        );
        let locations: Vec<LocationTag> = links.iter().map(|l| l.tag_location).collect();
        assert_eq!(locations, vec![LocationTag::Header, LocationTag::Footer]);
    }

    #[test]
    fn classify_ir_link_without_rules_is_none() {
        assert!(classify_ir_link("/ir/", "IR", &[], &[]).is_none());
    }
}
