//! Error and warning types for catalog and index operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading, saving, or mutating the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The config file does not exist.
    #[error("config file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// The config file is not a valid catalog document.
    #[error("invalid config at {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Asked to create a library whose name is already taken.
    #[error("library already exists: {name}")]
    DuplicateLibrary { name: String },

    /// The named library is not in the catalog.
    #[error("no such library: {name}")]
    UnknownLibrary { name: String },

    /// Asked to register a sector whose name is already taken.
    #[error("sector {sector} already registered in library {library}")]
    DuplicateSector { library: String, sector: String },

    /// A sector name that cannot participate in the index layout.
    #[error("invalid sector name {name}: {reason}")]
    InvalidSectorName { name: String, reason: String },

    /// A sector path that cannot participate in the index layout.
    #[error("invalid sector path {path}: {reason}")]
    InvalidSectorPath { path: PathBuf, reason: String },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort an `index_sector` call.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The resolved index location is occupied by a non-directory.
    #[error("index location exists but is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The index directory could not be created.
    #[error("cannot create index directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Permission denied for a path.
    #[error("permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl IndexError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of traversal warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error listing a directory.
    ReadError,
    /// Error reading entry metadata.
    MetadataError,
}

/// Non-fatal problem encountered while traversing a sector.
///
/// One unreadable subtree must never abort indexing of the rest of the
/// sector, so these are accumulated in the report instead of returned
/// as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl IndexWarning {
    /// Create a new warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning from a failed directory listing.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let kind = if error.kind() == std::io::ErrorKind::PermissionDenied {
            WarningKind::PermissionDenied
        } else {
            WarningKind::ReadError
        };
        Self::new(path, format!("read error: {error}"), kind)
    }

    /// Create a warning from a failed metadata lookup.
    pub fn metadata_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(
            path,
            format!("metadata error: {error}"),
            WarningKind::MetadataError,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_error_io_kinds() {
        let err = IndexError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, IndexError::PermissionDenied { .. }));

        let err = IndexError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(err, IndexError::NotFound { .. }));
    }

    #[test]
    fn test_warning_from_permission_error() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let warning = IndexWarning::read_error("/test/path", &io);
        assert_eq!(warning.kind, WarningKind::PermissionDenied);
        assert!(warning.message.contains("denied"));
    }

    #[test]
    fn test_warning_from_generic_error() {
        let io = std::io::Error::other("boom");
        let warning = IndexWarning::read_error("/test/path", &io);
        assert_eq!(warning.kind, WarningKind::ReadError);
    }
}
