//! The pluggable consistency-checker capability.

use std::path::Path;

use mirrorcheck_core::IndexError;

use crate::report::IndexReport;

/// Capability for checking the consistency of libraries across sectors.
///
/// Exactly one production implementation exists today; callers depend
/// only on this trait so that alternate strategies (for example a
/// content-hash checker) can be substituted without touching call
/// sites. Sector paths are expected to be absolute.
pub trait ConsistencyChecker {
    /// Create an index of every filesystem entry reachable from
    /// `sector_path`, stored under the configuration root for the
    /// (library, sector) pair.
    fn index_sector(
        &self,
        library: &str,
        sector_name: &str,
        sector_path: &Path,
    ) -> Result<IndexReport, IndexError>;
}
