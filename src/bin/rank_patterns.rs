//! Print the learned rule order from a pattern file, optionally trying it on
//! a saved page.
//!
//! Usage: `rank_patterns <ir_pattern_analysis.json> [<page.html> <page_url>]`

use std::env;
use std::path::Path;

use ir_patterns::encoding::decode_page;
use ir_patterns::page::parse_page;
use ir_patterns::url_utils::parse_base_url;
use ir_patterns::{Options, PatternRankedLookup, Result};
use tracing_subscriber::EnvFilter;

fn try_page(lookup: &PatternRankedLookup, html_path: &Path, page_url: &str, options: &Options) -> Result<()> {
    let url = parse_base_url(page_url)?;
    let html = decode_page(&std::fs::read(html_path)?, None);
    let doc = parse_page(&html)?;

    match lookup.find_ir_link_in_page(&doc, &url) {
        Some(link) => println!(
            "IR link: {} (rule {}, {})",
            link.url,
            link.pattern.unwrap_or_default(),
            link.tag_location
        ),
        None => println!("IR link: none"),
    }
    match lookup.find_report_link_in_page(&doc, &url, &options.document_extensions) {
        Some(report) => println!(
            "Report: {} (rule {}, year {})",
            report.link.url,
            report.link.pattern.unwrap_or_default(),
            report.year.as_deref().unwrap_or("-")
        ),
        None => println!("Report: none"),
    }
    Ok(())
}

fn run(args: &[String]) -> Result<()> {
    let options = Options::default();
    let lookup = PatternRankedLookup::from_file(Path::new(&args[0]), &options.rules)?;

    println!("Learned from {} companies", lookup.report().total_companies);
    println!("IR rules:");
    for (i, rule) in lookup.ranked_ir_rules().iter().enumerate() {
        let count = lookup.report().ir_page_patterns.pattern_frequency.get(rule.id());
        println!("  {:>2}. {} ({count})", i + 1, rule.id());
    }
    println!("Report rules:");
    for (i, rule) in lookup.ranked_report_rules().iter().enumerate() {
        let count = lookup.report().pdf_patterns.pattern_frequency.get(rule.id());
        println!("  {:>2}. {} ({count})", i + 1, rule.id());
    }

    if let [_, html, url, ..] = args {
        try_page(&lookup, Path::new(html), url, &options)?;
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        eprintln!("Usage: rank_patterns <ir_pattern_analysis.json> [<page.html> <page_url>]");
        std::process::exit(2);
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
