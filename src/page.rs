//! Page-level analysis: home pages and investor-relations pages.

use url::Url;

use crate::dom::{self, Document, ElementNode};
use crate::error::{Error, Result};
use crate::extractor::extract_links;
use crate::ir_links::find_ir_links;
use crate::location::resolve_location;
use crate::options::Options;
use crate::patterns::{NAV_CONTAINER_SELECTOR, NAV_MENU_CLASS};
use crate::report_links::find_document_links;
use crate::result::{CandidateLink, IrPageAnalysis, NavigationSummary};

/// Parse page markup, rejecting empty input.
pub fn parse_page(html: &str) -> Result<Document> {
    if html.trim().is_empty() {
        return Err(Error::Parse("empty document".to_string()));
    }
    Ok(dom::parse(html))
}

/// IR links on a company home page.
#[must_use]
pub fn analyze_home_page(doc: &Document, page_url: &Url, options: &Options) -> Vec<CandidateLink> {
    let links = extract_links(doc, page_url);
    find_ir_links(&links, &options.rules.ir_url, &options.rules.ir_text)
}

/// Title, navigation layout and document links of an IR page.
#[must_use]
pub fn analyze_ir_page(doc: &Document, page_url: &Url, options: &Options) -> IrPageAnalysis {
    let links = extract_links(doc, page_url);
    IrPageAnalysis {
        url: page_url.to_string(),
        title: dom::title(doc),
        navigation: navigation_summary(doc),
        documents: find_document_links(
            &links,
            &options.document_extensions,
            &options.rules.report_keywords,
        ),
    }
}

/// Count `nav`/`ul`/`div` containers whose class mentions nav or menu.
#[must_use]
pub fn navigation_summary(doc: &Document) -> NavigationSummary {
    let containers = doc.select(NAV_CONTAINER_SELECTOR);
    let locations: Vec<_> = containers
        .nodes()
        .iter()
        .filter(|node| {
            node.attribute("class")
                .is_some_and(|class| NAV_MENU_CLASS.is_match(&class))
        })
        .map(resolve_location)
        .collect();

    NavigationSummary {
        count: locations.len(),
        locations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::LocationTag;

    const IR_PAGE: &str = r#"<html><head><title>IRライブラリ | Example</title></head><body>
        <header><ul class="gnav"><li><a href="/ir/">IR</a></li></ul></header>
        <div class="menu-wrap"><a href="/ir/news/">News</a></div>
        <div class="content">
            <ul class="report-list">
                <li><a href="report_2023.pdf">2023年 統合報告書</a></li>
                <li><a href="tanshin.pdf">決算短信</a></li>
            </ul>
        </div>
        <footer><div class="footer-nav"><a href="/sitemap/">Sitemap</a></div></footer>
    </body></html>"#;

    fn url() -> Url {
        Url::parse("https://www.example.co.jp/ir/library/").unwrap()
    }

    #[test]
    fn parse_page_rejects_blank_markup() {
        assert!(matches!(parse_page(" \n "), Err(Error::Parse(_))));
        assert!(parse_page("<p>x</p>").is_ok());
    }

    #[test]
    fn ir_page_analysis_collects_everything() {
        let doc = parse_page(IR_PAGE).unwrap();
        let analysis = analyze_ir_page(&doc, &url(), &Options::default());

        assert_eq!(analysis.url, "https://www.example.co.jp/ir/library/");
        assert_eq!(analysis.title.as_deref(), Some("IRライブラリ | Example"));
        assert_eq!(analysis.documents.len(), 2);
        assert_eq!(analysis.reports().count(), 1);
        assert_eq!(
            analysis.documents[0].link.url,
            "https://www.example.co.jp/ir/library/report_2023.pdf"
        );
    }

    #[test]
    fn navigation_summary_locates_containers() {
        let doc = parse_page(IR_PAGE).unwrap();
        let nav = navigation_summary(&doc);
        assert_eq!(nav.count, 3);
        assert_eq!(
            nav.locations,
            vec![LocationTag::Header, LocationTag::MainContent, LocationTag::Footer]
        );
    }

    #[test]
    fn home_page_uses_option_rules() {
        let doc = parse_page(r#"<a href="/kabunushi/">株主・投資家情報</a>"#).unwrap();
        let home = Url::parse("https://www.example.co.jp/").unwrap();
        let links = analyze_home_page(&doc, &home, &Options::default());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].pattern.as_deref(), Some("投資家.*情報"));
    }
}
