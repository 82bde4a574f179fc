//! Explicit allow-list entries.

use crate::ArcpruneError;
use crate::Result;
use crate::types::RelativePath;
use std::path::Path;
use std::path::PathBuf;

/// A file emitted after the walk regardless of exclusion patterns.
///
/// This is how a directory can be pruned from recursion while one named
/// file inside it is still archived.
///
/// # Examples
///
/// ```
/// use arcprune_core::walker::AllowEntry;
/// use std::path::Path;
///
/// let entry = AllowEntry::under_root(Path::new("/project"), ".vscode/extensions.json")?;
/// assert_eq!(entry.archive_path.as_str(), ".vscode/extensions.json");
/// assert_eq!(entry.source, Path::new("/project/.vscode/extensions.json"));
/// # Ok::<(), arcprune_core::ArcpruneError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowEntry {
    /// File to read.
    pub source: PathBuf,
    /// Name inside the archive.
    pub archive_path: RelativePath,
}

impl AllowEntry {
    /// Pairs an arbitrary source file with an archive path.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, archive_path: RelativePath) -> Self {
        Self {
            source: source.into(),
            archive_path,
        }
    }

    /// Resolves a root-relative path string against `root`.
    ///
    /// # Errors
    ///
    /// Returns `ArcpruneError::InvalidAllowEntry` if `raw` is empty, absolute
    /// or escapes the root.
    pub fn under_root(root: &Path, raw: &str) -> Result<Self> {
        let archive_path = RelativePath::new(raw).map_err(|e| ArcpruneError::InvalidAllowEntry {
            path: raw.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            source: archive_path.to_path(root),
            archive_path,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_under_root_normalizes() {
        let entry = AllowEntry::under_root(Path::new("/r"), "./a//b.txt").unwrap();
        assert_eq!(entry.archive_path.as_str(), "a/b.txt");
        assert_eq!(entry.source, Path::new("/r/a/b.txt"));
    }

    #[test]
    fn test_under_root_rejects_escape() {
        let err = AllowEntry::under_root(Path::new("/r"), "../secret").unwrap_err();
        assert!(matches!(err, ArcpruneError::InvalidAllowEntry { .. }));
        assert!(err.is_config());
    }

    #[test]
    fn test_under_root_rejects_absolute() {
        assert!(AllowEntry::under_root(Path::new("/r"), "/etc/passwd").is_err());
    }
}
