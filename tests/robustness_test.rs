use ir_patterns::{analyze_ir_page, find_ir_links, Error, LocationTag};
use std::time::{Duration, Instant};

const HOME: &str = "https://www.example.co.jp/";

#[test]
fn unclosed_tags_still_yield_links() {
    let html = r#"<header><ul><li><a href="/ir/">IR情報<li><a href="/about">会社概要"#;
    let links = find_ir_links(html, HOME).unwrap();
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].tag_location, LocationTag::Header);
}

#[test]
fn invalid_nesting_does_not_panic() {
    let html = r#"<p><div></p><a href="/investors/">Investors</div></a>"#;
    let links = find_ir_links(html, HOME).unwrap();
    assert!(links.iter().all(|l| l.pattern.as_deref() == Some("/investor/?")));
}

#[test]
fn broken_attributes_do_not_panic() {
    let html = r#"<a href="/ir/ class=broken>IR</a><a href=>x</a><a>no href</a>"#;
    assert!(find_ir_links(html, HOME).is_ok());
}

#[test]
fn empty_and_blank_markup_is_a_parse_error() {
    assert!(matches!(find_ir_links("", HOME), Err(Error::Parse(_))));
    assert!(matches!(analyze_ir_page("  \n\t", HOME), Err(Error::Parse(_))));
}

#[test]
fn bad_page_url_is_rejected() {
    assert!(matches!(find_ir_links("<a href='/ir/'>IR</a>", "/relative"), Err(Error::InvalidUrl(_))));
}

#[test]
fn unusual_hrefs_are_kept_verbatim() {
    let html = r#"
        <a href="javascript:openIR()">IR情報</a>
        <a href="mailto:ir@example.co.jp">IR情報</a>
        <a href="http://[broken">IR情報</a>
        <a href="   ">IR情報</a>"#;
    let links = find_ir_links(html, HOME).unwrap();
    let urls: Vec<&str> = links.iter().map(|l| l.url.as_str()).collect();
    assert_eq!(urls, vec!["javascript:openIR()", "mailto:ir@example.co.jp", "http://[broken"]);
}

#[test]
fn text_only_document_has_no_links() {
    let links = find_ir_links("IR情報 統合報告書 2023", HOME).unwrap();
    assert!(links.is_empty());
    let analysis = analyze_ir_page("IR情報 統合報告書 2023", HOME).unwrap();
    assert!(analysis.documents.is_empty());
    assert_eq!(analysis.navigation.count, 0);
}

#[test]
fn deep_nesting_completes() {
    let depth = 500;
    let html = format!(
        "{}<a href=\"/ir/report_2023.pdf\">統合報告書</a>{}",
        "<div>".repeat(depth),
        "</div>".repeat(depth)
    );
    let analysis = analyze_ir_page(&html, HOME).unwrap();
    assert_eq!(analysis.reports().count(), 1);
}

#[test]
fn deeply_nested_link_container_completes() {
    let html = format!(
        "<div><a href=\"/ir/report_2023.pdf\">統合報告書</a>{}",
        "<span>".repeat(20_000)
    );
    let analysis = analyze_ir_page(&html, HOME).unwrap();
    let reports: Vec<_> = analysis.reports().collect();
    assert_eq!(reports.len(), 1);
    assert!(!reports[0].link_structure.has_image);
}

#[test]
fn large_link_list_is_fast() {
    let mut html = String::from("<ul>");
    for i in 0..5000 {
        html.push_str(&format!("<li><a href=\"/news/{i}.html\">お知らせ {i}</a></li>"));
    }
    html.push_str("</ul><footer><a href=\"/ir/\">IR</a></footer>");

    let start = Instant::now();
    let links = find_ir_links(&html, HOME).unwrap();
    assert_eq!(links.len(), 1);
    assert!(start.elapsed() < Duration::from_secs(10));
}
