//! Index run results.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use mirrorcheck_core::IndexWarning;

/// Summary of one completed `index_sector` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexReport {
    /// Path of the index file that was written.
    pub index_path: PathBuf,

    /// Number of directory lines written.
    pub dirs: u64,

    /// Number of non-directory lines written.
    pub files: u64,

    /// Duration of the traversal.
    pub duration: Duration,

    /// Non-fatal problems encountered while traversing.
    pub warnings: Vec<IndexWarning>,
}

impl IndexReport {
    /// Total number of lines in the index.
    pub fn entries(&self) -> u64 {
        self.dirs + self.files
    }

    /// Check whether any subtree could not be fully listed.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
