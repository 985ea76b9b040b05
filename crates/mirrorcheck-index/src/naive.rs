//! The naive sector indexer.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use derive_builder::Builder;
use tracing::{info, warn};

use mirrorcheck_core::{IndexError, IndexLayout, IndexWarning};

use crate::checker::ConsistencyChecker;
use crate::report::IndexReport;

/// Name of the index artifact inside a sector's index directory.
pub const INDEX_FILE: &str = "index";

/// Configuration for the naive indexer.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct IndexerConfig {
    /// Configuration root under which index directories live.
    pub root: PathBuf,

    /// Name of the index file written inside each index directory.
    #[builder(default = "INDEX_FILE.to_string()")]
    pub index_file: String,
}

impl IndexerConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl IndexerConfig {
    /// Create a new indexer config builder.
    pub fn builder() -> IndexerConfigBuilder {
        IndexerConfigBuilder::default()
    }

    /// Create a simple config for the given configuration root.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index_file: INDEX_FILE.to_string(),
        }
    }
}

/// Indexer that materializes a line-per-entry listing of a sector's
/// full file tree.
///
/// The traversal is depth-first over an explicit LIFO work list, never
/// the call stack, so memory use stays bounded and predictable on very
/// deep trees. A directory's own line always precedes the lines of its
/// descendants; no further linear order is guaranteed.
pub struct NaiveChecker {
    layout: IndexLayout,
    index_file: String,
}

impl NaiveChecker {
    /// Create a checker for the given configuration.
    pub fn new(config: IndexerConfig) -> Self {
        Self {
            layout: IndexLayout::new(config.root),
            index_file: config.index_file,
        }
    }

    /// The index layout this checker resolves locations with.
    pub fn layout(&self) -> &IndexLayout {
        &self.layout
    }

    /// Ensure the index directory exists, refusing to touch the
    /// filesystem when the location is occupied by a non-directory.
    fn ensure_index_dir(&self, dir: &Path) -> Result<(), IndexError> {
        if dir.is_dir() {
            return Ok(());
        }
        if dir.exists() {
            return Err(IndexError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        fs::create_dir_all(dir).map_err(|source| IndexError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })
    }
}

impl ConsistencyChecker for NaiveChecker {
    fn index_sector(
        &self,
        library: &str,
        sector_name: &str,
        sector_path: &Path,
    ) -> Result<IndexReport, IndexError> {
        let start = Instant::now();

        let index_dir = self.layout.index_dir(library, sector_name, sector_path);
        self.ensure_index_dir(&index_dir)?;

        let index_path = index_dir.join(&self.index_file);
        let file = File::create(&index_path).map_err(|e| IndexError::io(&index_path, e))?;
        let mut out = BufWriter::new(file);

        let mut warnings = Vec::new();
        let mut dirs = 0u64;
        let mut files = 0u64;

        // Explicit LIFO work list; recursion would grow the call stack
        // on deep trees. Subdirectories are expanded after the rest of
        // their parent's entries have been written.
        let mut work = vec![sector_path.to_path_buf()];
        while let Some(dir) = work.pop() {
            write_line(&mut out, &index_path, &dir)?;
            dirs += 1;

            let entries = match fs::read_dir(&dir) {
                Ok(entries) => entries,
                Err(e) => {
                    // One unreadable subtree never aborts the rest of
                    // the sector.
                    warn!("cannot list {}: {e}", dir.display());
                    warnings.push(IndexWarning::read_error(&dir, &e));
                    continue;
                }
            };

            for entry in entries {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("cannot read an entry under {}: {e}", dir.display());
                        warnings.push(IndexWarning::read_error(&dir, &e));
                        continue;
                    }
                };
                let path = entry.path();
                let file_type = match entry.file_type() {
                    Ok(t) => t,
                    Err(e) => {
                        warnings.push(IndexWarning::metadata_error(&path, &e));
                        continue;
                    }
                };

                // Symlinks are not followed; they are listed as leaves.
                if file_type.is_dir() {
                    work.push(path);
                } else {
                    write_line(&mut out, &index_path, &path)?;
                    files += 1;
                }
            }
        }

        out.flush().map_err(|e| IndexError::io(&index_path, e))?;

        info!(
            library,
            sector = sector_name,
            entries = dirs + files,
            warnings = warnings.len(),
            "wrote {}",
            index_path.display()
        );

        Ok(IndexReport {
            index_path,
            dirs,
            files,
            duration: start.elapsed(),
            warnings,
        })
    }
}

/// Write one absolute path as one index line.
fn write_line(out: &mut impl Write, index_path: &Path, entry: &Path) -> Result<(), IndexError> {
    writeln!(out, "{}", entry.display()).map_err(|e| IndexError::io(index_path, e))
}
