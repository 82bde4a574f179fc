//! Error conversion utilities for CLI.
//!
//! Converts arcprune-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use arcprune_core::ArcpruneError;
use std::path::Path;

/// Converts `ArcpruneError` to a user-friendly anyhow error with context.
pub fn convert_archive_error(err: ArcpruneError, output: &Path) -> anyhow::Error {
    match err {
        ArcpruneError::Io { path, source } => {
            anyhow!(
                "Cannot read '{}': {}\n\
                 HINT: Fix the permissions or add a pattern with --exclude to skip it.",
                path.display(),
                source
            )
        }
        ArcpruneError::Sink { path, reason } => {
            anyhow!(
                "Failed writing '{}' while adding '{}': {}\n\
                 HINT: The archive may be incomplete; check free disk space and retry.",
                output.display(),
                path.display(),
                reason
            )
        }
        ArcpruneError::SourceNotFound { path } => {
            anyhow!("Source directory not found: {}", path.display())
        }
        ArcpruneError::NotADirectory { path } => {
            anyhow!(
                "Source is not a directory: {}\n\
                 HINT: Pass the directory that contains the file instead.",
                path.display()
            )
        }
        ArcpruneError::UnsupportedFormat { path } => {
            anyhow!(
                "Cannot determine archive format for '{}'\n\
                 HINT: Use a .zip, .tar, .tar.gz, .tar.bz2, .tar.xz or .tar.zst extension, or pass --format.",
                path.display()
            )
        }
        ArcpruneError::OutputExists { path } => {
            anyhow!(
                "Output file already exists: {}\n\
                 HINT: Use --force to overwrite it.",
                path.display()
            )
        }
        ArcpruneError::InvalidAllowEntry { path, reason } => {
            anyhow!(
                "Invalid --include entry '{path}': {reason}\n\
                 HINT: Includes must name an existing file, relative to the source directory."
            )
        }
        _ => anyhow::Error::from(err).context(format!(
            "Error building archive '{}'",
            output.display()
        )),
    }
}

/// Adds archive context to a core result.
pub fn add_archive_context<T>(
    result: Result<T, ArcpruneError>,
    output: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, output))
}
