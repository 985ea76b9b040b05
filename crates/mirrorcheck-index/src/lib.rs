//! Sector indexing engine for mirrorcheck.
//!
//! This crate walks a sector's file tree and writes a durable,
//! line-per-entry index of everything it finds, plus the command
//! dispatch layer that routes named operations to a checker.
//!
//! # Overview
//!
//! - [`ConsistencyChecker`] is the pluggable capability boundary;
//!   alternate checking strategies implement it.
//! - [`NaiveChecker`] is the one production implementation: an
//!   iterative, single-threaded traversal with an explicit work list.
//! - [`dispatch`] turns a `(command name, positional args)` pair into a
//!   capability call.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use mirrorcheck_index::{ConsistencyChecker, IndexerConfig, NaiveChecker};
//!
//! let checker = NaiveChecker::new(IndexerConfig::new("/home/user/.mirrorcheck"));
//! let report = checker
//!     .index_sector("photos", "local", Path::new("/srv/photos"))
//!     .unwrap();
//!
//! println!("{} entries indexed", report.entries());
//! ```

mod checker;
mod dispatch;
mod naive;
mod report;

pub use checker::ConsistencyChecker;
pub use dispatch::{Command, DispatchError, Outcome, dispatch};
pub use naive::{INDEX_FILE, IndexerConfig, IndexerConfigBuilder, NaiveChecker};
pub use report::IndexReport;

// Re-export core types for convenience
pub use mirrorcheck_core::{IndexError, IndexLayout, IndexWarning, WarningKind};
