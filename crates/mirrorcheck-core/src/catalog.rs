//! Catalog value objects: sectors, libraries, and the library mapping.

use std::path::PathBuf;

use compact_str::CompactString;
use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CatalogError;

/// A named directory subtree within a library, indexed independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sector {
    /// Sector name, unique within its library.
    #[serde(rename = "sectorName")]
    pub name: CompactString,

    /// Absolute path of the sector's root. Need not exist yet.
    #[serde(rename = "sectorPath")]
    pub path: PathBuf,
}

impl Sector {
    /// Create a new sector.
    pub fn new(name: impl Into<CompactString>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// A named collection of sectors sharing a comparison strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    /// Library name, unique within the catalog.
    pub name: CompactString,

    /// Comparison strategy identifier. Opaque to the indexing core and
    /// preserved verbatim.
    pub comparator: CompactString,

    /// Sectors registered under this library, in registration order.
    #[serde(default)]
    pub sectors: Vec<Sector>,
}

impl Library {
    /// Create a library with no sectors.
    pub fn new(name: impl Into<CompactString>, comparator: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            comparator: comparator.into(),
            sectors: Vec::new(),
        }
    }

    /// Look up a sector by name.
    pub fn sector(&self, name: &str) -> Option<&Sector> {
        self.sectors.iter().find(|s| s.name == name)
    }

    /// Whether a sector with the given name is registered.
    pub fn has_sector(&self, name: &str) -> bool {
        self.sector(name).is_some()
    }
}

/// Insertion-ordered mapping from library name to library.
///
/// Keys are unique; inserting a second library under an existing name
/// is an error rather than a silent replacement. Serialized as the
/// plain array of libraries from the config document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryMapping {
    entries: IndexMap<CompactString, Library>,
}

impl LibraryMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a library under its own name.
    pub fn insert(&mut self, library: Library) -> Result<(), CatalogError> {
        if self.entries.contains_key(&library.name) {
            return Err(CatalogError::DuplicateLibrary {
                name: library.name.to_string(),
            });
        }
        self.entries.insert(library.name.clone(), library);
        Ok(())
    }

    /// Look up a library by name.
    pub fn get(&self, name: &str) -> Option<&Library> {
        self.entries.get(name)
    }

    /// Look up a library by name, mutably.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Library> {
        self.entries.get_mut(name)
    }

    /// Remove a library, preserving the order of the rest.
    pub fn remove(&mut self, name: &str) -> Option<Library> {
        self.entries.shift_remove(name)
    }

    /// Whether a library with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Iterate over library names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// Iterate over libraries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Library> {
        self.entries.values()
    }

    /// Number of libraries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for LibraryMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}

impl<'de> Deserialize<'de> for LibraryMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let libraries = Vec::<Library>::deserialize(deserializer)?;
        let mut mapping = LibraryMapping::new();
        for library in libraries {
            mapping
                .insert(library)
                .map_err(|e| D::Error::custom(e.to_string()))?;
        }
        Ok(mapping)
    }
}

/// The full catalog document: a version stamp plus the library mapping.
///
/// Read-only to the indexing core; only the catalog store mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Version of the tool that wrote this catalog.
    #[serde(default)]
    pub version: String,

    /// All registered libraries.
    #[serde(default)]
    pub libraries: LibraryMapping,
}

impl Catalog {
    /// Create an empty catalog stamped with the given version.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            libraries: LibraryMapping::new(),
        }
    }

    /// Look up a library by name.
    pub fn library(&self, name: &str) -> Option<&Library> {
        self.libraries.get(name)
    }
}
