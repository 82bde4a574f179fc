//! Per-entry progress notifications for a walk.

use crate::report::WalkResult;
use crate::types::RelativePath;
use std::fmt;

/// Why an entry that passed the exclusion patterns was still not emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Symbolic link while symlinks are not followed.
    Symlink,
    /// Followed symlink leads back into one of its own ancestors.
    SymlinkLoop,
    /// File exceeds the configured size limit.
    TooLarge {
        /// File size in bytes.
        size: u64,
        /// Configured limit in bytes.
        max: u64,
    },
    /// Socket, FIFO, device or other non-regular file.
    Special,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symlink => write!(f, "symlink not followed"),
            Self::SymlinkLoop => write!(f, "symlink loop"),
            Self::TooLarge { size, max } => write!(f, "too large ({size} > {max} bytes)"),
            Self::Special => write!(f, "not a regular file"),
        }
    }
}

/// Callbacks invoked by the walker as it decides on each entry.
///
/// All methods default to doing nothing so implementors only override what
/// they render.
///
/// # Examples
///
/// ```
/// use arcprune_core::WalkObserver;
/// use arcprune_core::types::RelativePath;
///
/// #[derive(Default)]
/// struct Printer {
///     added: usize,
/// }
///
/// impl WalkObserver for Printer {
///     fn on_emitted(&mut self, path: &RelativePath) {
///         self.added += 1;
///         println!("Added: {path}");
///     }
///
///     fn on_excluded(&mut self, path: &RelativePath, _is_dir: bool) {
///         println!("Excluded: {path}");
///     }
/// }
/// ```
pub trait WalkObserver {
    /// Called after a file has been handed to the sink.
    fn on_emitted(&mut self, _path: &RelativePath) {}

    /// Called for an excluded file, or a pruned directory.
    fn on_excluded(&mut self, _path: &RelativePath, _is_dir: bool) {}

    /// Called for an entry skipped for a reason other than a pattern.
    fn on_skipped(&mut self, _path: &RelativePath, _reason: SkipReason) {}

    /// Called once after the walk and allow-list injection finished.
    fn on_complete(&mut self, _result: &WalkResult) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl WalkObserver for NoopObserver {}
