//! Error types for ir-patterns.
//!
//! Classification itself never fails: a link that matches no rule is simply
//! absent from the output. The variants below cover the collaborators around
//! the engine (page sources, pattern files, checkpoints, exports).

use std::path::PathBuf;

/// Error type for analysis, lookup and persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A page could not be retrieved by the page source.
    #[error("Failed to fetch {url}: {reason}")]
    Fetch {
        /// URL that was requested.
        url: String,
        /// Human-readable failure reason from the source.
        reason: String,
    },

    /// Markup was empty or unusable.
    #[error("HTML parsing failed: {0}")]
    Parse(String),

    /// The pattern file consumed by ranked lookup does not exist.
    #[error("Pattern file not found: {}", .0.display())]
    PatternFileMissing(PathBuf),

    /// The pattern file exists but is not a valid aggregate report.
    #[error("Pattern file {} is invalid: {reason}", path.display())]
    PatternFileInvalid {
        /// Path of the offending file.
        path: PathBuf,
        /// Deserialization error message.
        reason: String,
    },

    /// A URL could not be parsed or resolved.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A rule pattern is not a valid regular expression.
    #[error("Invalid rule pattern {pattern:?}: {source}")]
    InvalidRule {
        /// Pattern source text.
        pattern: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// Checkpoint file has an incompatible format version.
    #[error("Incompatible checkpoint version {found} (expected {expected})")]
    CheckpointVersion {
        /// Version found in the file.
        found: u32,
        /// Version this build writes.
        expected: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// Result type alias for ir-patterns operations.
pub type Result<T> = std::result::Result<T, Error>;
