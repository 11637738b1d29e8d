//! Batch analysis over a directory of saved pages.
//!
//! Usage: `analyze_saved <companies.csv> <html_dir> [out_dir]`
//!
//! Pages are looked up as `<html_dir>/<host>/<path>`; a path ending in `/`
//! maps to `index.html`. Writes `ir_pattern_analysis.json` and
//! `ir_pattern_details.csv` into `out_dir` (default: current directory) and
//! checkpoints there while running. An existing checkpoint is resumed.

use std::collections::HashSet;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

use ir_patterns::checkpoint::Checkpoint;
use ir_patterns::export::{read_company_inputs, write_detail_rows};
use ir_patterns::{Error, FetchedPage, IrPatternAnalyzer, Options, PageSource, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use url::Url;

const REPORT_FILENAME: &str = "ir_pattern_analysis.json";
const DETAILS_FILENAME: &str = "ir_pattern_details.csv";

/// Pages mirrored on disk by host and path.
struct SavedPages {
    root: PathBuf,
}

impl SavedPages {
    fn candidates(&self, url: &Url) -> Vec<PathBuf> {
        let host = url.host_str().unwrap_or_default();
        let path = url.path().trim_start_matches('/');
        let base = self.root.join(host);

        if path.is_empty() || path.ends_with('/') {
            vec![base.join(path).join("index.html")]
        } else {
            vec![base.join(path), base.join(path).join("index.html")]
        }
    }
}

impl PageSource for SavedPages {
    fn fetch_page(&self, url: &Url) -> Result<FetchedPage> {
        let path = self
            .candidates(url)
            .into_iter()
            .find(|p| p.is_file())
            .ok_or_else(|| Error::Fetch {
                url: url.to_string(),
                reason: "no saved page".to_string(),
            })?;

        let body = std::fs::read(&path).map_err(|e| Error::Fetch {
            url: url.to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;
        Ok(FetchedPage {
            body,
            content_type: None,
        })
    }
}

fn run(companies: &Path, html_dir: &Path, out_dir: &Path) -> Result<()> {
    let inputs = read_company_inputs(File::open(companies)?)?;
    info!(companies = inputs.len(), "loaded company list");

    let options = Options::default();
    let mut analyzer = if Checkpoint::exists(out_dir) {
        let checkpoint = Checkpoint::load(out_dir)?;
        info!(records = checkpoint.records.len(), created_at = %checkpoint.created_at, "resuming from checkpoint");
        IrPatternAnalyzer::resume(options, checkpoint.records)
    } else {
        IrPatternAnalyzer::new(options)
    };

    let done: HashSet<String> = analyzer.records().iter().map(|r| r.ticker.clone()).collect();
    let source = SavedPages {
        root: html_dir.to_path_buf(),
    };

    for input in inputs.iter().filter(|i| !done.contains(&i.ticker)) {
        analyzer.analyze_company(input, &source);
        if analyzer.checkpoint_due() {
            Checkpoint::new(analyzer.records().to_vec()).save(out_dir)?;
        }
    }

    let report = analyzer.generate_report();
    report.save(&out_dir.join(REPORT_FILENAME))?;
    write_detail_rows(analyzer.records(), File::create(out_dir.join(DETAILS_FILENAME))?)?;
    Checkpoint::delete(out_dir)?;

    println!("Companies analyzed: {}", report.total_companies);
    println!("IR page patterns:");
    for (pattern, count) in report.ir_page_patterns.pattern_frequency.iter() {
        println!("  {pattern}: {count}");
    }
    println!("Report patterns:");
    for (pattern, count) in report.pdf_patterns.pattern_frequency.iter() {
        println!("  {pattern}: {count}");
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        eprintln!("Usage: analyze_saved <companies.csv> <html_dir> [out_dir]");
        std::process::exit(2);
    }
    let out_dir = args.get(2).map_or_else(|| PathBuf::from("."), PathBuf::from);

    if let Err(e) = run(Path::new(&args[0]), Path::new(&args[1]), &out_dir) {
        warn!(error = %e, "run failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
