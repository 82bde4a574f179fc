//! Walk result reporting.

use std::time::Duration;

/// Diagnostic counters from one walk.
///
/// Nothing in here is needed for correctness; the archive content is fully
/// determined by the sink calls.
///
/// # Examples
///
/// ```
/// use arcprune_core::WalkResult;
///
/// let mut result = WalkResult::new();
/// result.files_emitted = 10;
/// result.allow_listed = 1;
/// result.files_excluded = 4;
/// result.dirs_pruned = 2;
///
/// assert_eq!(result.total_emitted(), 11);
/// assert_eq!(result.total_excluded(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkResult {
    /// Files emitted by the traversal.
    pub files_emitted: usize,

    /// Files emitted through the allow-list after the traversal.
    pub allow_listed: usize,

    /// Files rejected by a pattern.
    pub files_excluded: usize,

    /// Directories rejected by a pattern and never entered.
    pub dirs_pruned: usize,

    /// Directories that were listed.
    pub dirs_visited: usize,

    /// Entries that passed the patterns but were still not emitted:
    /// symlinks, oversized or special files, and directories reached
    /// through a symlink loop.
    pub entries_skipped: usize,

    /// Sum of the sizes of all emitted files, in bytes.
    pub bytes_emitted: u64,

    /// Wall-clock duration of the walk.
    pub duration: Duration,

    /// Warnings generated during the walk.
    pub warnings: Vec<String>,
}

impl WalkResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Files handed to the sink, from traversal and allow-list together.
    #[must_use]
    pub fn total_emitted(&self) -> usize {
        self.files_emitted + self.allow_listed
    }

    /// Files and directories rejected by patterns.
    #[must_use]
    pub fn total_excluded(&self) -> usize {
        self.files_excluded + self.dirs_pruned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_result_default() {
        let result = WalkResult::default();
        assert_eq!(result.files_emitted, 0);
        assert_eq!(result.allow_listed, 0);
        assert_eq!(result.files_excluded, 0);
        assert_eq!(result.dirs_pruned, 0);
        assert_eq!(result.dirs_visited, 0);
        assert_eq!(result.entries_skipped, 0);
        assert_eq!(result.bytes_emitted, 0);
        assert_eq!(result.duration, Duration::default());
        assert!(!result.has_warnings());
    }

    #[test]
    fn test_walk_result_warnings() {
        let mut result = WalkResult::new();
        result.add_warning("Skipped symlink: a");
        result.add_warning(String::from("Skipped symlink: b"));
        assert!(result.has_warnings());
        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.warnings[1], "Skipped symlink: b");
    }

    #[test]
    fn test_walk_result_totals() {
        let result = WalkResult {
            files_emitted: 3,
            allow_listed: 2,
            files_excluded: 7,
            dirs_pruned: 1,
            ..WalkResult::default()
        };
        assert_eq!(result.total_emitted(), 5);
        assert_eq!(result.total_excluded(), 8);
    }
}
