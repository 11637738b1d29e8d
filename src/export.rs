//! CSV input and output for batch runs.
//!
//! Input is one row per company (`Ticker,Name,URL`). Detailed results are
//! one flat row per company; the nested link lists travel as JSON strings so
//! the file stays a plain table.

use std::io::{Read, Write};

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::result::{CompanyInput, CompanyRecord};

/// One CSV row of detailed results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailRow {
    pub ticker: String,
    pub name: String,
    pub url: String,
    pub ir_link_count: usize,
    /// URL of the analysed IR page, empty when none was reached.
    pub ir_page_url: String,
    pub ir_page_title: String,
    pub document_count: usize,
    pub report_count: usize,
    /// IR links as a JSON array.
    pub ir_links: String,
    /// Report links as a JSON array.
    pub report_links: String,
    pub error: String,
}

impl DetailRow {
    pub fn from_record(record: &CompanyRecord) -> Result<Self> {
        let reports: Vec<_> = record.report_links().collect();
        let page = record.ir_page.as_ref();

        Ok(Self {
            ticker: record.ticker.clone(),
            name: record.name.clone(),
            url: record.url.clone(),
            ir_link_count: record.ir_links.len(),
            ir_page_url: page.map(|p| p.url.clone()).unwrap_or_default(),
            ir_page_title: page.and_then(|p| p.title.clone()).unwrap_or_default(),
            document_count: record.document_links().count(),
            report_count: reports.len(),
            ir_links: serde_json::to_string(&record.ir_links)?,
            report_links: serde_json::to_string(&reports)?,
            error: record.error.clone().unwrap_or_default(),
        })
    }
}

/// Write one detail row per record, with a header line.
pub fn write_detail_rows<W: Write>(records: &[CompanyRecord], writer: W) -> Result<()> {
    debug!(rows = records.len(), "writing detail rows");
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(DetailRow::from_record(record)?)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read company rows. Headers are matched by name, case-sensitively, with
/// `Ticker`/`ticker`, `Name`/`name` and `URL`/`Url`/`url` accepted; extra
/// columns are ignored and cells are trimmed.
pub fn read_company_inputs<R: Read>(reader: R) -> Result<Vec<CompanyInput>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let inputs = rdr.deserialize().collect::<std::result::Result<Vec<CompanyInput>, _>>()?;
    debug!(companies = inputs.len(), "read company inputs");
    Ok(inputs)
}
