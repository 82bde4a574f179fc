//! Error types for archive building operations.

use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArcpruneError`.
pub type Result<T> = std::result::Result<T, ArcpruneError>;

/// Errors that can occur while building a pattern set, walking a source tree,
/// or writing entries into an archive.
#[derive(Error, Debug)]
pub enum ArcpruneError {
    /// Ignore file or other pattern source could not be used.
    ///
    /// When raised while loading the ignore file this error is logged and the
    /// ignore file is treated as empty; it only escapes to the caller from
    /// the explicit loading functions.
    #[error("configuration error in {path}: {reason}")]
    Config {
        /// The offending configuration source.
        path: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// Filesystem access failed for a specific path.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// The path being read or listed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The archive writer rejected an entry or could not be finalized.
    #[error("archive write failed for {path}: {reason}")]
    Sink {
        /// The source file being written, or the archive itself on finalize.
        path: PathBuf,
        /// Reason reported by the writer.
        reason: String,
    },

    /// Source root does not exist.
    #[error("source not found: {path}")]
    SourceNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// Source root exists but is not a directory.
    #[error("source is not a directory: {path}")]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// Output archive format could not be determined.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat {
        /// The output path whose extension was not recognized.
        path: PathBuf,
    },

    /// Compression level outside 1-9.
    #[error("invalid compression level {level}, must be 1-9")]
    InvalidCompressionLevel {
        /// The rejected level.
        level: u8,
    },

    /// Output archive already exists and overwriting was not requested.
    #[error("output file already exists: {path}")]
    OutputExists {
        /// The existing output path.
        path: PathBuf,
    },

    /// A string could not be turned into a root-relative archive path.
    #[error("invalid relative path '{path}': {reason}")]
    InvalidRelativePath {
        /// The rejected input.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// An allow-list entry does not name a regular file under the root.
    #[error("invalid allow-list entry '{path}': {reason}")]
    InvalidAllowEntry {
        /// The allow-list entry as configured.
        path: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl ArcpruneError {
    /// Wraps an I/O error with the path that produced it.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Builds a sink error from anything displayable.
    pub fn sink(path: impl AsRef<Path>, reason: impl std::fmt::Display) -> Self {
        Self::Sink {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for filesystem access failures.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns `true` for archive writer failures.
    #[must_use]
    pub const fn is_sink(&self) -> bool {
        matches!(self, Self::Sink { .. })
    }

    /// Returns `true` for configuration problems.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcprune_core::ArcpruneError;
    ///
    /// let err = ArcpruneError::InvalidCompressionLevel { level: 0 };
    /// assert!(err.is_config());
    /// ```
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::Config { .. }
                | Self::InvalidCompressionLevel { .. }
                | Self::InvalidAllowEntry { .. }
                | Self::InvalidRelativePath { .. }
        )
    }

    /// Returns the filesystem path this error is about, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Config { path, .. }
            | Self::Io { path, .. }
            | Self::Sink { path, .. }
            | Self::SourceNotFound { path }
            | Self::NotADirectory { path }
            | Self::UnsupportedFormat { path }
            | Self::OutputExists { path } => Some(path),
            _ => None,
        }
    }
}
