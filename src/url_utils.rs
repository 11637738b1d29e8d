//! URL helpers: base URL validation, href resolution and document markers.

use url::Url;

use crate::dom::{Document, ElementNode};
use crate::error::{Error, Result};
use crate::patterns::BASE_SELECTOR;

/// Parse a company base URL.
///
/// Only absolute `http`/`https` URLs with a host are accepted.
pub fn parse_base_url(s: &str) -> Result<Url> {
    let s = s.trim();
    let url = Url::parse(s).map_err(|e| Error::InvalidUrl(format!("{s}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(Error::InvalidUrl(s.to_string()));
    }
    Ok(url)
}

/// Resolve an href against a base URL.
///
/// Non-navigational schemes (`javascript:`, `mailto:`, `tel:`, `data:`) are
/// returned unchanged, as are hrefs that fail to resolve.
#[must_use]
pub fn resolve_href(href: &str, base: &Url) -> String {
    let href = href.trim();

    if href.starts_with("data:")
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return href.to_string();
    }

    match base.join(href) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// The URL relative links of `doc` resolve against.
///
/// A `<base href>` element takes precedence over the URL the page was
/// fetched from.
#[must_use]
pub fn effective_base(doc: &Document, page_url: &Url) -> Url {
    doc.select(BASE_SELECTOR)
        .nodes()
        .first()
        .and_then(|node| node.attribute("href"))
        .and_then(|href| page_url.join(href.trim()).ok())
        .unwrap_or_else(|| page_url.clone())
}

/// Whether an href carries one of the document extension markers.
///
/// Matches `.{ext}` anywhere in the href, case-insensitively, so
/// `report.PDF?v=2` and `/pdf.php?file=a.pdf` both count.
#[must_use]
pub fn has_document_extension(href: &str, extensions: &[String]) -> bool {
    let lower = href.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.contains(&format!(".{}", ext.trim_start_matches('.').to_lowercase())))
}
