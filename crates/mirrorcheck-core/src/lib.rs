//! Core types for mirrorcheck.
//!
//! This crate provides the catalog value objects (libraries and their
//! sectors), the on-disk catalog store, index location resolution, and
//! the error types shared across the workspace.

mod catalog;
mod config;
mod error;
mod layout;

pub use catalog::{Catalog, Library, LibraryMapping, Sector};
pub use config::{CatalogStore, CONFIG_FILE, VERSION};
pub use error::{CatalogError, IndexError, IndexWarning, WarningKind};
pub use layout::{IndexLayout, SEPARATOR_REPLACEMENT};
