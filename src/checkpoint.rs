//! Recovery snapshots of an in-progress run.
//!
//! A checkpoint holds the company records collected so far. It is written
//! atomically (temporary file, then rename) so an interrupted write never
//! leaves a truncated snapshot behind. Checkpoints are not inputs to
//! aggregation; they only let a driver resume.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::result::CompanyRecord;

/// Checkpoint file name inside the output directory.
pub const CHECKPOINT_FILENAME: &str = "ir_analysis_intermediate.json";

/// Format version; bump on incompatible changes.
pub const CHECKPOINT_VERSION: u32 = 1;

/// Snapshot of collected company records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub version: u32,
    pub created_at: DateTime<Utc>,
    pub records: Vec<CompanyRecord>,
}

impl Checkpoint {
    #[must_use]
    pub fn new(records: Vec<CompanyRecord>) -> Self {
        Self {
            version: CHECKPOINT_VERSION,
            created_at: Utc::now(),
            records,
        }
    }

    #[must_use]
    pub fn path_in(output_dir: &Path) -> PathBuf {
        output_dir.join(CHECKPOINT_FILENAME)
    }

    #[must_use]
    pub fn exists(output_dir: &Path) -> bool {
        Self::path_in(output_dir).exists()
    }

    /// Load the checkpoint in `output_dir`.
    ///
    /// A file written by an incompatible version is rejected with
    /// [`Error::CheckpointVersion`].
    pub fn load(output_dir: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(Self::path_in(output_dir))?;
        let checkpoint: Self = serde_json::from_str(&content)?;
        if checkpoint.version != CHECKPOINT_VERSION {
            return Err(Error::CheckpointVersion {
                found: checkpoint.version,
                expected: CHECKPOINT_VERSION,
            });
        }
        debug!(records = checkpoint.records.len(), "loaded checkpoint");
        Ok(checkpoint)
    }

    /// Write the checkpoint into `output_dir`, replacing any previous one.
    pub fn save(&self, output_dir: &Path) -> Result<()> {
        let path = Self::path_in(output_dir);
        let temp_path = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(self)?;

        {
            let mut file = std::fs::File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&temp_path, &path)?;

        debug!(records = self.records.len(), path = %path.display(), "checkpoint written");
        Ok(())
    }

    /// Remove the checkpoint after a completed run. Missing files are fine.
    pub fn delete(output_dir: &Path) -> Result<()> {
        let path = Self::path_in(output_dir);
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }
}
