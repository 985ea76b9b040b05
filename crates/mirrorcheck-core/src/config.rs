//! On-disk catalog store.
//!
//! Owns `config.json` inside the configuration root directory. The
//! indexing core only ever reads the catalog this store produces; all
//! mutation happens through the operations here.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf, is_separator};

use tracing::{info, warn};

use crate::catalog::{Catalog, Library, Sector};
use crate::error::CatalogError;
use crate::layout::SEPARATOR_REPLACEMENT;

/// Name of the catalog file inside the configuration root.
pub const CONFIG_FILE: &str = "config.json";

/// Version stamped into newly created catalogs.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Reads and rewrites the catalog file under a configuration root.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    root: PathBuf,
}

impl CatalogStore {
    /// Create a store rooted at the given configuration directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Store rooted at `~/.mirrorcheck`, or `None` when the home
    /// directory cannot be determined.
    pub fn default_root() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(".mirrorcheck")))
    }

    /// The configuration root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the catalog file.
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Load and validate the catalog.
    ///
    /// Warns when the stored version is missing or differs from the
    /// running version; neither is fatal.
    pub fn load(&self) -> Result<Catalog, CatalogError> {
        let path = self.config_path();
        let raw = fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => CatalogError::ConfigNotFound { path: path.clone() },
            _ => CatalogError::Io {
                path: path.clone(),
                source,
            },
        })?;
        let catalog: Catalog =
            serde_json::from_str(&raw).map_err(|source| CatalogError::InvalidConfig {
                path: path.clone(),
                source,
            })?;

        if catalog.version.is_empty() {
            warn!("config does not specify a version");
        } else if catalog.version != VERSION {
            warn!(
                stored = %catalog.version,
                running = VERSION,
                "loading a config written by another version"
            );
        }

        Ok(catalog)
    }

    /// Rewrite the catalog file, creating the root directory if needed.
    pub fn save(&self, catalog: &Catalog) -> Result<(), CatalogError> {
        fs::create_dir_all(&self.root).map_err(|source| CatalogError::Io {
            path: self.root.clone(),
            source,
        })?;
        let path = self.config_path();
        let raw = serde_json::to_string_pretty(catalog).map_err(|source| {
            CatalogError::InvalidConfig {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, raw).map_err(|source| CatalogError::Io { path, source })
    }

    /// Create a new, empty library.
    ///
    /// A missing config file starts a fresh catalog. A corrupt config
    /// file is an error unless `force` is set, in which case it is
    /// recreated from scratch.
    pub fn create_library(
        &self,
        name: &str,
        comparator: &str,
        force: bool,
    ) -> Result<(), CatalogError> {
        let mut catalog = match self.load() {
            Ok(catalog) => catalog,
            Err(CatalogError::ConfigNotFound { .. }) => Catalog::new(VERSION),
            Err(CatalogError::InvalidConfig { path, .. }) if force => {
                warn!("recreating corrupt config at {}", path.display());
                Catalog::new(VERSION)
            }
            Err(e) => return Err(e),
        };

        catalog.libraries.insert(Library::new(name, comparator))?;
        self.save(&catalog)?;
        info!("created library {name}");
        Ok(())
    }

    /// Delete a library from the catalog.
    pub fn delete_library(&self, name: &str) -> Result<(), CatalogError> {
        let mut catalog = self.load()?;
        if catalog.libraries.remove(name).is_none() {
            return Err(CatalogError::UnknownLibrary {
                name: name.to_string(),
            });
        }
        self.save(&catalog)?;
        info!("deleted library {name}");
        Ok(())
    }

    /// Names of all registered libraries, in registration order.
    pub fn library_names(&self) -> Result<Vec<String>, CatalogError> {
        let catalog = self.load()?;
        Ok(catalog.libraries.names().map(str::to_string).collect())
    }

    /// Register a sector under an existing library.
    ///
    /// The sector name must not contain a path separator and the path
    /// must be absolute and free of the sanitizer's replacement
    /// character; either would break the collision-free index layout.
    pub fn register_sector(
        &self,
        library: &str,
        sector_name: &str,
        sector_path: &Path,
    ) -> Result<(), CatalogError> {
        if sector_name.chars().any(is_separator) {
            return Err(CatalogError::InvalidSectorName {
                name: sector_name.to_string(),
                reason: "must not contain a path separator".to_string(),
            });
        }
        if !sector_path.is_absolute() {
            return Err(CatalogError::InvalidSectorPath {
                path: sector_path.to_path_buf(),
                reason: "must be absolute".to_string(),
            });
        }
        if sector_path.to_string_lossy().contains(SEPARATOR_REPLACEMENT) {
            return Err(CatalogError::InvalidSectorPath {
                path: sector_path.to_path_buf(),
                reason: format!("must not contain the {SEPARATOR_REPLACEMENT:?} character"),
            });
        }

        let mut catalog = self.load()?;
        let entry =
            catalog
                .libraries
                .get_mut(library)
                .ok_or_else(|| CatalogError::UnknownLibrary {
                    name: library.to_string(),
                })?;
        if entry.has_sector(sector_name) {
            return Err(CatalogError::DuplicateSector {
                library: library.to_string(),
                sector: sector_name.to_string(),
            });
        }
        entry.sectors.push(Sector::new(sector_name, sector_path));
        self.save(&catalog)?;
        info!("registered sector {sector_name} for library {library}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, CatalogStore) {
        let temp = TempDir::new().unwrap();
        let store = CatalogStore::new(temp.path().join("cfg"));
        (temp, store)
    }

    #[test]
    fn test_create_and_load_library() {
        let (_temp, store) = store();
        store.create_library("photos", "filename", false).unwrap();

        let catalog = store.load().unwrap();
        assert_eq!(catalog.version, VERSION);
        let library = catalog.library("photos").unwrap();
        assert_eq!(library.comparator, "filename");
        assert!(library.sectors.is_empty());
    }

    #[test]
    fn test_create_duplicate_library_fails() {
        let (_temp, store) = store();
        store.create_library("photos", "filename", false).unwrap();

        let err = store.create_library("photos", "filename", false).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateLibrary { .. }));
    }

    #[test]
    fn test_corrupt_config_requires_force() {
        let (_temp, store) = store();
        fs::create_dir_all(store.root()).unwrap();
        fs::write(store.config_path(), "not json").unwrap();

        let err = store.create_library("photos", "filename", false).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidConfig { .. }));

        store.create_library("photos", "filename", true).unwrap();
        assert!(store.load().unwrap().libraries.contains("photos"));
    }

    #[test]
    fn test_delete_library() {
        let (_temp, store) = store();
        store.create_library("photos", "filename", false).unwrap();
        store.delete_library("photos").unwrap();

        assert!(store.library_names().unwrap().is_empty());

        let err = store.delete_library("photos").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownLibrary { .. }));
    }

    #[test]
    fn test_register_sector() {
        let (_temp, store) = store();
        store.create_library("photos", "filename", false).unwrap();
        store
            .register_sector("photos", "local", Path::new("/srv/photos"))
            .unwrap();

        let catalog = store.load().unwrap();
        let sector = catalog.library("photos").unwrap().sector("local").unwrap();
        assert_eq!(sector.path, PathBuf::from("/srv/photos"));
    }

    #[test]
    fn test_register_sector_guards() {
        let (_temp, store) = store();
        store.create_library("photos", "filename", false).unwrap();

        let err = store
            .register_sector("photos", "bad/name", Path::new("/srv/photos"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSectorName { .. }));

        let err = store
            .register_sector("photos", "local", Path::new("relative/path"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSectorPath { .. }));

        let err = store
            .register_sector("photos", "local", Path::new("/srv/my-photos"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidSectorPath { .. }));

        let err = store
            .register_sector("music", "local", Path::new("/srv/music"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownLibrary { .. }));

        store
            .register_sector("photos", "local", Path::new("/srv/photos"))
            .unwrap();
        let err = store
            .register_sector("photos", "local", Path::new("/srv/other"))
            .unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateSector { .. }));
    }
}
