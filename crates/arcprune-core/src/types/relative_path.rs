//! Root-relative archive path type.

use crate::ArcpruneError;
use crate::Result;
use std::fmt;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// A path relative to the source root, using `/` as separator.
///
/// `RelativePath` is the single representation shared by pattern matching
/// and the archive sink: the string matched against exclusion patterns is
/// exactly the name the entry gets inside the archive.
///
/// # Invariants
///
/// - Never empty
/// - No leading `/` and no leading `./`
/// - No `.`, `..` or empty components
///
/// # Examples
///
/// ```
/// use arcprune_core::types::RelativePath;
///
/// let path = RelativePath::new("./src/main.rs")?;
/// assert_eq!(path.as_str(), "src/main.rs");
/// assert_eq!(path.basename(), "main.rs");
///
/// assert!(RelativePath::new("/etc/passwd").is_err());
/// assert!(RelativePath::new("../outside").is_err());
/// # Ok::<(), arcprune_core::ArcpruneError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Parses a user-supplied root-relative path.
    ///
    /// Backslashes are accepted as separators, leading `./` and trailing `/`
    /// are dropped, and repeated separators are collapsed.
    ///
    /// # Errors
    ///
    /// Returns `ArcpruneError::InvalidRelativePath` if the path is absolute,
    /// contains a `..` component, or is empty after normalization.
    pub fn new(raw: &str) -> Result<Self> {
        let unified = raw.replace('\\', "/");
        if unified.starts_with('/') {
            return Err(invalid(raw, "absolute path"));
        }

        let mut parts: Vec<&str> = Vec::new();
        for part in unified.split('/') {
            match part {
                "" | "." => {}
                ".." => return Err(invalid(raw, "parent directory component")),
                name => parts.push(name),
            }
        }

        if parts.is_empty() {
            return Err(invalid(raw, "empty path"));
        }
        Ok(Self(parts.join("/")))
    }

    /// Builds a relative path from a filesystem path that is already relative
    /// to the root (for example the result of `Path::strip_prefix`).
    ///
    /// Non-UTF-8 names are converted lossily.
    ///
    /// # Errors
    ///
    /// Returns `ArcpruneError::InvalidRelativePath` if the path has a root,
    /// prefix or `..` component, or has no normal components at all.
    pub fn from_path(path: &Path) -> Result<Self> {
        let mut parts: Vec<String> = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(name) => parts.push(name.to_string_lossy().into_owned()),
                Component::CurDir => {}
                Component::ParentDir => {
                    return Err(invalid(
                        &path.to_string_lossy(),
                        "parent directory component",
                    ));
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid(&path.to_string_lossy(), "absolute path"));
                }
            }
        }

        if parts.is_empty() {
            return Err(invalid(&path.to_string_lossy(), "empty path"));
        }
        Ok(Self(parts.join("/")))
    }

    /// Returns the path of a direct child of the root.
    ///
    /// `name` is a single directory entry name as returned by a directory
    /// listing, so it never contains a separator.
    #[must_use]
    pub fn top_level(name: &str) -> Self {
        Self(name.to_string())
    }

    /// Returns the path of a direct child of this path.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcprune_core::types::RelativePath;
    ///
    /// let dir = RelativePath::new("node_modules")?;
    /// assert_eq!(dir.child("pkg").as_str(), "node_modules/pkg");
    /// # Ok::<(), arcprune_core::ArcpruneError>(())
    /// ```
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut joined = String::with_capacity(self.0.len() + 1 + name.len());
        joined.push_str(&self.0);
        joined.push('/');
        joined.push_str(name);
        Self(joined)
    }

    /// Returns the path as a `/`-separated string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the final component.
    #[must_use]
    pub fn basename(&self) -> &str {
        self.0.rsplit_once('/').map_or(self.0.as_str(), |(_, name)| name)
    }

    /// Resolves this path against a root directory.
    #[must_use]
    pub fn to_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        path.extend(self.0.split('/'));
        path
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn invalid(raw: &str, reason: &'static str) -> ArcpruneError {
    ArcpruneError::InvalidRelativePath {
        path: raw.to_string(),
        reason,
    }
}
