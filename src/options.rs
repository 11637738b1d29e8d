//! Configuration options for analysis and aggregation.
//!
//! The `Options` struct holds the rule book and the few knobs that shape the
//! aggregate report and the checkpoint cadence of a run.

use crate::rules::RuleBook;

/// Configuration options for an analysis run.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use ir_patterns::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     top_patterns: 5,
///     document_extensions: vec!["pdf".to_string(), "xlsx".to_string()],
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Number of entries kept in each report's `pattern_frequency`.
    ///
    /// `location_frequency` is never truncated.
    ///
    /// Default: `10`
    pub top_patterns: usize,

    /// File extensions marking document links on an IR page.
    ///
    /// Matched as `.{ext}` anywhere in the href, case-insensitively.
    ///
    /// Default: `["pdf"]`
    pub document_extensions: Vec<String>,

    /// Number of company records between checkpoint writes.
    ///
    /// Checkpoints are a recovery measure for the driver; `0` disables them.
    ///
    /// Default: `10`
    pub checkpoint_interval: usize,

    /// Ordered classification rules.
    ///
    /// Default: the built-in Japanese/English rule set.
    pub rules: RuleBook,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            top_patterns: 10,
            document_extensions: vec!["pdf".to_string()],
            checkpoint_interval: 10,
            rules: RuleBook::default(),
        }
    }
}

impl Options {
    /// Whether a checkpoint is due after `processed` records.
    #[must_use]
    pub fn checkpoint_due(&self, processed: usize) -> bool {
        self.checkpoint_interval > 0 && processed > 0 && processed % self.checkpoint_interval == 0
    }
}
