//! Index location resolution.

use std::path::{Path, PathBuf, is_separator};

/// Character substituted for path separators in sector identifiers.
pub const SEPARATOR_REPLACEMENT: char = '-';

/// Resolves where a (library, sector) pair's index artifact lives.
///
/// Pure path computation: nothing here touches the filesystem, and
/// directory creation is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexLayout {
    root: PathBuf,
}

impl IndexLayout {
    /// Create a layout rooted at the configuration directory.
    ///
    /// The root is normalized once here (trailing separators stripped);
    /// all downstream composition goes through [`Path::join`], which is
    /// separator-safe regardless of how the root was spelled.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root: PathBuf = root.into();
        let trimmed = root.to_str().and_then(|s| {
            let t = s.trim_end_matches(is_separator);
            if t.is_empty() || t.len() == s.len() {
                None
            } else {
                Some(PathBuf::from(t))
            }
        });
        Self {
            root: trimmed.unwrap_or(root),
        }
    }

    /// The normalized configuration root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collision-free identifier for a (sector name, sector path) pair.
    ///
    /// Two sectors sharing a name but not a path, or a path but not a
    /// name, map to different identifiers. Sanitizing the path keeps
    /// the identifier from nesting into subdirectories.
    pub fn sector_id(sector_name: &str, sector_path: &Path) -> String {
        format!(
            "{sector_name}{SEPARATOR_REPLACEMENT}{}",
            sanitize(sector_path)
        )
    }

    /// Directory that must hold the sector's index file.
    pub fn index_dir(&self, library: &str, sector_name: &str, sector_path: &Path) -> PathBuf {
        self.root
            .join(library)
            .join(Self::sector_id(sector_name, sector_path))
    }
}

/// Replace every path-separator character in the sector path.
fn sanitize(path: &Path) -> String {
    path.to_string_lossy()
        .chars()
        .map(|c| if is_separator(c) { SEPARATOR_REPLACEMENT } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sector_id_sanitizes_separators() {
        let id = IndexLayout::sector_id("s1", Path::new("/tmp/sec"));
        assert_eq!(id, "s1--tmp-sec");
        assert!(!id.contains('/'));
    }

    #[test]
    fn test_index_dir_composition() {
        let layout = IndexLayout::new("/cfg");
        let dir = layout.index_dir("lib1", "s1", Path::new("/tmp/sec"));
        assert_eq!(dir, PathBuf::from("/cfg/lib1/s1--tmp-sec"));
    }

    #[test]
    fn test_root_trailing_separator_normalized() {
        let with = IndexLayout::new("/cfg/");
        let without = IndexLayout::new("/cfg");
        assert_eq!(with, without);
        assert_eq!(with.root(), Path::new("/cfg"));
    }

    #[test]
    fn test_same_name_different_paths_do_not_collide() {
        let layout = IndexLayout::new("/cfg");
        let a = layout.index_dir("lib", "music", Path::new("/mnt/a"));
        let b = layout.index_dir("lib", "music", Path::new("/mnt/b"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_path_different_names_do_not_collide() {
        let layout = IndexLayout::new("/cfg");
        let a = layout.index_dir("lib", "first", Path::new("/mnt/a"));
        let b = layout.index_dir("lib", "second", Path::new("/mnt/a"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_bare_root_survives_normalization() {
        let layout = IndexLayout::new("/");
        assert_eq!(layout.root(), Path::new("/"));
    }
}
