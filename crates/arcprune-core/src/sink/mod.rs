//! Archive sinks.
//!
//! A sink receives `(source path, archive path)` pairs from the walker and is
//! responsible for reading the source file and writing it into an archive.
//! The walker never retries a failed `emit`; the error aborts the walk.

pub mod tar;
pub mod zip;

pub use self::tar::TarSink;
pub use self::zip::ZipSink;

use crate::Result;
use crate::types::RelativePath;
use std::path::Path;
use std::path::PathBuf;

/// Destination for included files.
pub trait ArchiveSink {
    /// Writes one file into the archive under `archive_path`.
    ///
    /// # Errors
    ///
    /// Returns `ArcpruneError::Io` if the source cannot be read and
    /// `ArcpruneError::Sink` if the archive rejects the entry.
    fn emit(&mut self, source: &Path, archive_path: &RelativePath) -> Result<()>;
}

impl<S: ArchiveSink + ?Sized> ArchiveSink for &mut S {
    fn emit(&mut self, source: &Path, archive_path: &RelativePath) -> Result<()> {
        (**self).emit(source, archive_path)
    }
}

/// Sink that records emitted pairs in memory without reading any file.
///
/// Used for dry runs and for inspecting walk decisions.
///
/// # Examples
///
/// ```
/// use arcprune_core::sink::ArchiveSink;
/// use arcprune_core::sink::CollectingSink;
/// use arcprune_core::types::RelativePath;
/// use std::path::Path;
///
/// let mut sink = CollectingSink::new();
/// sink.emit(Path::new("/src/a.txt"), &RelativePath::new("a.txt")?)?;
/// assert_eq!(sink.archive_paths(), vec!["a.txt"]);
/// # Ok::<(), arcprune_core::ArcpruneError>(())
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CollectingSink {
    entries: Vec<(PathBuf, RelativePath)>,
}

impl CollectingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded pairs in emission order.
    #[must_use]
    pub fn entries(&self) -> &[(PathBuf, RelativePath)] {
        &self.entries
    }

    /// Returns the recorded archive paths in emission order.
    #[must_use]
    pub fn archive_paths(&self) -> Vec<&str> {
        self.entries.iter().map(|(_, rel)| rel.as_str()).collect()
    }

    /// Consumes the sink and returns the recorded pairs.
    #[must_use]
    pub fn into_entries(self) -> Vec<(PathBuf, RelativePath)> {
        self.entries
    }
}

impl ArchiveSink for CollectingSink {
    fn emit(&mut self, source: &Path, archive_path: &RelativePath) -> Result<()> {
        self.entries
            .push((source.to_path_buf(), archive_path.clone()));
        Ok(())
    }
}
