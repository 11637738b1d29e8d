//! Compiled regex patterns and CSS selectors shared by the classifiers.
//!
//! All patterns are compiled once at first use via `LazyLock`. The ordered
//! classification rules themselves live in [`crate::rules`]; this module only
//! holds the fixed helpers around them.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Report Patterns
// =============================================================================

/// A fiscal-year token: "20" followed by two digits, anywhere in the string.
///
/// Deliberately unanchored so that `report_2023.pdf` and `FY2023` both yield
/// `2023`.
pub static YEAR_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"20\d{2}").expect("YEAR_TOKEN regex"));

// =============================================================================
// Structure Patterns
// =============================================================================

/// Class names marking navigation or menu containers on an IR page.
pub static NAV_MENU_CLASS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)nav|menu").expect("NAV_MENU_CLASS regex"));

// =============================================================================
// CSS Selectors
// =============================================================================

/// Anchors carrying an href attribute.
pub const ANCHOR_SELECTOR: &str = "a[href]";

/// Document base element.
pub const BASE_SELECTOR: &str = "base[href]";

/// Candidate navigation containers on an IR page.
pub const NAV_CONTAINER_SELECTOR: &str = "nav[class], ul[class], div[class]";

/// Tags that count as header containers for location purposes.
pub const HEADER_TAGS: &[&str] = &["header", "nav"];

/// Tags that count as footer containers.
pub const FOOTER_TAGS: &[&str] = &["footer"];

/// Tags that count as sidebar containers.
pub const SIDEBAR_TAGS: &[&str] = &["aside", "sidebar"];

/// Tags that mark an icon inside a link container.
pub const ICON_TAGS: &[&str] = &["i", "svg"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_token_finds_first_twenty_prefixed_year() {
        let m = YEAR_TOKEN.find("FY2023 report_2022.pdf").map(|m| m.as_str());
        assert_eq!(m, Some("2023"));
        assert!(YEAR_TOKEN.find("report_1999.pdf").is_none());
    }

    #[test]
    fn nav_menu_class_is_case_insensitive() {
        assert!(NAV_MENU_CLASS.is_match("GlobalNav"));
        assert!(NAV_MENU_CLASS.is_match("side-menu"));
        assert!(!NAV_MENU_CLASS.is_match("content"));
    }
}
