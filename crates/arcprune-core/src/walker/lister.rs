//! Directory listing.

use crate::ArcpruneError;
use crate::Result;
use std::fs::Metadata;
use std::path::Path;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Type of a listed directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file.
    File,
    /// Directory.
    Directory,
    /// Symbolic link that is not being followed, or whose target is gone.
    Symlink,
    /// Socket, FIFO, device or anything else.
    Special,
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// File name, lossily converted to UTF-8.
    pub name: String,
    /// Absolute (or root-joined) filesystem path.
    pub path: PathBuf,
    /// Entry type after symlink resolution, if any.
    pub kind: EntryKind,
    /// Size in bytes; 0 for anything that is not a file.
    pub size: u64,
    /// Whether the entry was reached through a symbolic link.
    pub via_symlink: bool,
}

impl ListedEntry {
    /// Creates a regular file entry.
    #[must_use]
    pub fn file(name: &str, path: impl Into<PathBuf>, size: u64) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            kind: EntryKind::File,
            size,
            via_symlink: false,
        }
    }

    /// Creates a directory entry.
    #[must_use]
    pub fn directory(name: &str, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            path: path.into(),
            kind: EntryKind::Directory,
            size: 0,
            via_symlink: false,
        }
    }
}

/// Lists the immediate children of a directory.
///
/// The walker calls this exactly once per directory it enters and never for
/// a pruned directory, so implementations can be used as probes in tests.
pub trait DirLister {
    /// Returns the children of `dir`, in any order.
    ///
    /// # Errors
    ///
    /// Returns `ArcpruneError::Io` carrying the unreadable path.
    fn list(&mut self, dir: &Path) -> Result<Vec<ListedEntry>>;
}

impl<L: DirLister + ?Sized> DirLister for &mut L {
    fn list(&mut self, dir: &Path) -> Result<Vec<ListedEntry>> {
        (**self).list(dir)
    }
}

/// Filesystem lister backed by `walkdir`, one level deep.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsLister {
    follow_symlinks: bool,
}

impl FsLister {
    /// Creates a lister; `follow_symlinks` resolves links to their targets.
    #[must_use]
    pub const fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }
}

impl DirLister for FsLister {
    fn list(&mut self, dir: &Path) -> Result<Vec<ListedEntry>> {
        let mut entries = Vec::new();

        // Links are resolved by hand so a dangling link is skipped instead of
        // failing the whole listing.
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
            let entry = entry.map_err(|e| walkdir_error(dir, e))?;
            let path = entry.path().to_path_buf();
            let name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type();

            let (kind, size, via_symlink) = if file_type.is_symlink() {
                if self.follow_symlinks {
                    match std::fs::metadata(&path) {
                        Ok(target) => {
                            let (kind, size) = classify(&target);
                            (kind, size, true)
                        }
                        Err(e) => {
                            tracing::debug!("dangling symlink {}: {e}", path.display());
                            (EntryKind::Symlink, 0, true)
                        }
                    }
                } else {
                    (EntryKind::Symlink, 0, true)
                }
            } else {
                let metadata = entry.metadata().map_err(|e| walkdir_error(&path, e))?;
                let (kind, size) = classify(&metadata);
                (kind, size, false)
            };

            entries.push(ListedEntry {
                name,
                path,
                kind,
                size,
                via_symlink,
            });
        }

        Ok(entries)
    }
}

fn classify(metadata: &Metadata) -> (EntryKind, u64) {
    if metadata.is_dir() {
        (EntryKind::Directory, 0)
    } else if metadata.is_file() {
        (EntryKind::File, metadata.len())
    } else {
        (EntryKind::Special, 0)
    }
}

fn walkdir_error(fallback: &Path, err: walkdir::Error) -> ArcpruneError {
    let path = err
        .path()
        .map_or_else(|| fallback.to_path_buf(), Path::to_path_buf);
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
    ArcpruneError::io(path, source)
}
