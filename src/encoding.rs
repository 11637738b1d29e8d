//! Character decoding of fetched pages.
//!
//! Many corporate sites in Japan still serve Shift_JIS or EUC-JP. Page
//! sources hand over raw bytes plus the HTTP `Content-Type` (when known);
//! this module turns them into UTF-8 before parsing.
//!
//! Precedence: byte order mark, then the `charset` parameter of the
//! `Content-Type` header, then a `<meta>` declaration in the first 2 KiB,
//! then UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// How far into the document `<meta>` declarations are searched.
const META_SNIFF_LEN: usize = 2048;

/// `charset=` inside any `<meta>` tag, covering both `<meta charset>` and
/// `<meta http-equiv="Content-Type" content="...; charset=...">`.
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s;/>]+)"#).expect("valid regex")
});

#[allow(clippy::expect_used)]
static HEADER_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).expect("valid regex")
});

/// Pick the encoding of a page.
#[must_use]
pub fn detect_encoding(bytes: &[u8], content_type: Option<&str>) -> &'static Encoding {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let from_header = content_type
        .and_then(|ct| HEADER_CHARSET_RE.captures(ct))
        .and_then(|c| Encoding::for_label(c[1].as_bytes()));
    if let Some(encoding) = from_header {
        return encoding;
    }

    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(META_SNIFF_LEN)]);
    META_CHARSET_RE
        .captures(&head)
        .and_then(|c| Encoding::for_label(c[1].as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode page bytes to UTF-8.
///
/// Malformed sequences become U+FFFD; decoding never fails.
#[must_use]
pub fn decode_page(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = detect_encoding(bytes, content_type);
    let (decoded, _, _) = encoding.decode(bytes);
    decoded.into_owned()
}
