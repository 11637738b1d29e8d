//! Ordered classification rules.
//!
//! A [`Rule`] is a case-insensitive regular expression with a category and
//! the field of a link it inspects. Rules are always held in an ordered
//! `Vec<Rule>` and evaluated front to back; the first hit wins and no further
//! rule of that list is consulted.

use std::fmt;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Built-in URL rules for investor-relations links, in evaluation order.
pub const IR_URL_PATTERNS: &[&str] = &[
    r"/ir/?",
    r"/investor/?",
    r"/investors/?",
    r"/IR/?",
    r"/investor[-_]?relations/?",
    r"/株主.*投資家",
    r"/投資家情報/?",
];

/// Built-in text rules for investor-relations links, in evaluation order.
pub const IR_TEXT_PATTERNS: &[&str] = &[
    r"IR情報?",
    r"投資家.*情報",
    r"株主.*投資家",
    r"Investor\s*Relations?",
    r"IR\s*Information",
    r"投資家の皆様へ",
];

/// Built-in report keyword rules (Japanese and English), in evaluation order.
pub const REPORT_KEYWORD_PATTERNS: &[&str] = &[
    r"統合報告書",
    r"統合レポート",
    r"integrated\s*report",
    r"annual\s*report",
    r"アニュアルレポート",
];

#[allow(clippy::expect_used)]
static BUILTIN: LazyLock<RuleBook> = LazyLock::new(|| {
    RuleBook::from_patterns(IR_URL_PATTERNS, IR_TEXT_PATTERNS, REPORT_KEYWORD_PATTERNS)
        .expect("built-in rule patterns compile")
});

/// What a rule is used to decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleCategory {
    /// Investor-relations link recognised by its href.
    IrUrl,
    /// Investor-relations link recognised by its visible text.
    IrText,
    /// Report document recognised by keywords in text and href.
    ReportKeyword,
}

impl RuleCategory {
    /// The part of a link this category inspects.
    #[must_use]
    pub const fn field(self) -> RuleField {
        match self {
            Self::IrUrl => RuleField::Href,
            Self::IrText => RuleField::Text,
            Self::ReportKeyword => RuleField::TextThenHref,
        }
    }

    /// Pattern type recorded on links tagged by a rule of this category.
    #[must_use]
    pub const fn pattern_type(self) -> PatternType {
        match self {
            Self::IrUrl => PatternType::Url,
            Self::IrText => PatternType::Text,
            Self::ReportKeyword => PatternType::Keyword,
        }
    }
}

impl fmt::Display for RuleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::IrUrl => "ir-url",
            Self::IrText => "ir-text",
            Self::ReportKeyword => "report-keyword",
        })
    }
}

/// Link field a rule is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleField {
    /// The raw href attribute as written in the page.
    Href,
    /// Trimmed visible text.
    Text,
    /// Visible text immediately followed by the raw href.
    TextThenHref,
}

/// How a link was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    Url,
    Text,
    Keyword,
}

/// A single ordered heuristic.
///
/// The rule id is the pattern source, which is also the key used in
/// aggregate reports.
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    category: RuleCategory,
    regex: Regex,
}

impl Rule {
    /// Compiles a case-insensitive rule.
    pub fn new(pattern: &str, category: RuleCategory) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|source| Error::InvalidRule {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            id: pattern.to_string(),
            category,
            regex,
        })
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn category(&self) -> RuleCategory {
        self.category
    }

    /// Tests the rule against a link's raw href and visible text.
    #[must_use]
    pub fn matches(&self, href: &str, text: &str) -> bool {
        match self.category.field() {
            RuleField::Href => self.regex.is_match(href),
            RuleField::Text => self.regex.is_match(text),
            RuleField::TextThenHref => self.regex.is_match(&format!("{text}{href}")),
        }
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.category == other.category
    }
}

/// Returns the first rule in `rules` that matches, in declared order.
#[must_use]
pub fn first_match<'r>(rules: &'r [Rule], href: &str, text: &str) -> Option<&'r Rule> {
    rules.iter().find(|rule| rule.matches(href, text))
}

/// The three ordered rule lists used by the classifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleBook {
    /// URL rules, tried first for IR links.
    pub ir_url: Vec<Rule>,
    /// Text rules, tried for IR links when no URL rule matched.
    pub ir_text: Vec<Rule>,
    /// Report keyword rules for document links on an IR page.
    pub report_keywords: Vec<Rule>,
}

impl Default for RuleBook {
    fn default() -> Self {
        BUILTIN.clone()
    }
}

impl RuleBook {
    /// Compiles a rule book from pattern lists, preserving their order.
    pub fn from_patterns(ir_url: &[&str], ir_text: &[&str], report_keywords: &[&str]) -> Result<Self> {
        let compile = |patterns: &[&str], category| {
            patterns
                .iter()
                .map(|p| Rule::new(p, category))
                .collect::<Result<Vec<_>>>()
        };
        Ok(Self {
            ir_url: compile(ir_url, RuleCategory::IrUrl)?,
            ir_text: compile(ir_text, RuleCategory::IrText)?,
            report_keywords: compile(report_keywords, RuleCategory::ReportKeyword)?,
        })
    }

    /// Looks up an IR rule by id, URL rules before text rules.
    #[must_use]
    pub fn ir_rule(&self, id: &str) -> Option<&Rule> {
        self.ir_url
            .iter()
            .chain(&self.ir_text)
            .find(|rule| rule.id() == id)
    }

    /// Looks up a report keyword rule by id.
    #[must_use]
    pub fn report_rule(&self, id: &str) -> Option<&Rule> {
        self.report_keywords.iter().find(|rule| rule.id() == id)
    }
}
