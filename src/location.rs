//! Structural placement of a link within a page.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dom::ElementNode;
use crate::patterns::{FOOTER_TAGS, HEADER_TAGS, SIDEBAR_TAGS};

/// Coarse location of an element in the page layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationTag {
    Header,
    Footer,
    Sidebar,
    Navigation,
    #[default]
    MainContent,
}

impl LocationTag {
    /// Every tag, in resolution precedence order.
    pub const ALL: [Self; 5] = [
        Self::Header,
        Self::Footer,
        Self::Sidebar,
        Self::Navigation,
        Self::MainContent,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Sidebar => "sidebar",
            Self::Navigation => "navigation",
            Self::MainContent => "main_content",
        }
    }
}

impl fmt::Display for LocationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify where `node` sits by walking its ancestors.
///
/// Semantic containers dominate class-name heuristics: a `header`/`nav`
/// ancestor anywhere in the chain wins over a `footer` one, which wins over
/// `aside`, which wins over a class containing `nav`.
#[must_use]
pub fn resolve_location<N: ElementNode>(node: &N) -> LocationTag {
    let ancestors = node.element_ancestors();
    let names: Vec<String> = ancestors.iter().filter_map(|a| a.element_name()).collect();
    let any_named = |tags: &[&str]| names.iter().any(|n| tags.contains(&n.as_str()));

    if any_named(HEADER_TAGS) {
        LocationTag::Header
    } else if any_named(FOOTER_TAGS) {
        LocationTag::Footer
    } else if any_named(SIDEBAR_TAGS) {
        LocationTag::Sidebar
    } else if ancestors
        .iter()
        .any(|a| a.attribute("class").is_some_and(|c| c.contains("nav")))
    {
        LocationTag::Navigation
    } else {
        LocationTag::MainContent
    }
}
