//! Pruning tree walker.
//!
//! The walker visits the source tree depth-first, top-down. At each directory
//! it lists the immediate children, drops excluded child directories before
//! they are ever listed, hands every surviving file to the sink and then
//! descends into the surviving directories. Children are visited in byte
//! order of their names, so two walks over the same tree with the same
//! patterns emit the same sequence.
//!
//! After the traversal the allow-list is injected: each entry is emitted
//! unless the traversal already emitted the same archive path.

mod allow;
mod lister;

pub use allow::AllowEntry;
pub use lister::DirLister;
pub use lister::EntryKind;
pub use lister::FsLister;
pub use lister::ListedEntry;

use crate::ArcpruneError;
use crate::Result;
use crate::pattern::PatternSet;
use crate::progress::NoopObserver;
use crate::progress::SkipReason;
use crate::progress::WalkObserver;
use crate::report::WalkResult;
use crate::sink::ArchiveSink;
use crate::types::RelativePath;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

/// Walks `root` with `patterns` into `sink`, then injects `allow_list`.
///
/// Shorthand for [`TreeWalker`] with the filesystem lister and default
/// options.
///
/// # Errors
///
/// Returns `ArcpruneError::Io` for an unreadable directory or file and
/// `ArcpruneError::Sink` when the sink fails. The walk stops at the first
/// error; whatever the sink received so far stays there.
///
/// # Examples
///
/// ```no_run
/// use arcprune_core::PatternSet;
/// use arcprune_core::sink::CollectingSink;
/// use arcprune_core::walker::walk;
/// use std::path::Path;
///
/// let patterns = PatternSet::build([".git/", "*.log"], Vec::<String>::new());
/// let mut sink = CollectingSink::new();
/// let result = walk(Path::new("."), &patterns, &mut sink, Vec::new())?;
/// println!("{} files", result.files_emitted);
/// # Ok::<(), arcprune_core::ArcpruneError>(())
/// ```
pub fn walk<S: ArchiveSink + ?Sized>(
    root: &Path,
    patterns: &PatternSet,
    sink: &mut S,
    allow_list: Vec<AllowEntry>,
) -> Result<WalkResult> {
    TreeWalker::new(root, patterns)
        .with_allow_list(allow_list)
        .walk(sink)
}

struct Frame {
    dir: PathBuf,
    rel: Option<RelativePath>,
    /// Directories from the root down to and including `dir`.
    chain: Vec<PathBuf>,
}

/// Depth-first pruning walker over a source root.
///
/// `L` decides how directories are listed; [`FsLister`] reads the real
/// filesystem, tests substitute probing listers.
pub struct TreeWalker<'a, L = FsLister> {
    root: &'a Path,
    patterns: &'a PatternSet,
    lister: L,
    allow_list: Vec<AllowEntry>,
    max_file_size: Option<u64>,
}

impl<'a> TreeWalker<'a, FsLister> {
    /// Creates a walker over the filesystem that does not follow symlinks.
    #[must_use]
    pub fn new(root: &'a Path, patterns: &'a PatternSet) -> Self {
        Self {
            root,
            patterns,
            lister: FsLister::new(false),
            allow_list: Vec::new(),
            max_file_size: None,
        }
    }

    /// Sets whether symbolic links are followed.
    ///
    /// Unfollowed links are skipped and counted. Followed links that lead
    /// back into one of their own ancestors are skipped as loops.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.lister = FsLister::new(follow);
        self
    }
}

impl<'a, L: DirLister> TreeWalker<'a, L> {
    /// Replaces the directory lister.
    #[must_use]
    pub fn with_lister<M: DirLister>(self, lister: M) -> TreeWalker<'a, M> {
        TreeWalker {
            root: self.root,
            patterns: self.patterns,
            lister,
            allow_list: self.allow_list,
            max_file_size: self.max_file_size,
        }
    }

    /// Sets the files injected after the traversal.
    #[must_use]
    pub fn with_allow_list(mut self, entries: impl IntoIterator<Item = AllowEntry>) -> Self {
        self.allow_list = entries.into_iter().collect();
        self
    }

    /// Skips files larger than `max` bytes during traversal.
    ///
    /// Allow-listed files are not subject to the limit.
    #[must_use]
    pub fn with_max_file_size(mut self, max: Option<u64>) -> Self {
        self.max_file_size = max;
        self
    }

    /// Returns the lister.
    pub fn lister(&self) -> &L {
        &self.lister
    }

    /// Consumes the walker and returns the lister.
    pub fn into_lister(self) -> L {
        self.lister
    }

    /// Walks the tree into `sink`.
    ///
    /// # Errors
    ///
    /// See [`walk`].
    pub fn walk<S: ArchiveSink + ?Sized>(&mut self, sink: &mut S) -> Result<WalkResult> {
        self.walk_with_observer(sink, &mut NoopObserver)
    }

    /// Walks the tree into `sink`, reporting each decision to `observer`.
    ///
    /// # Errors
    ///
    /// See [`walk`].
    pub fn walk_with_observer<S: ArchiveSink + ?Sized>(
        &mut self,
        sink: &mut S,
        observer: &mut dyn WalkObserver,
    ) -> Result<WalkResult> {
        let start = Instant::now();
        let mut result = WalkResult::new();

        let wanted: HashSet<&RelativePath> =
            self.allow_list.iter().map(|e| &e.archive_path).collect();
        let mut emitted: HashSet<RelativePath> = HashSet::new();

        let mut stack = vec![Frame {
            dir: self.root.to_path_buf(),
            rel: None,
            chain: vec![self.root.to_path_buf()],
        }];

        while let Some(frame) = stack.pop() {
            let mut entries = self.lister.list(&frame.dir)?;
            result.dirs_visited += 1;
            entries.sort_by(|a, b| a.name.cmp(&b.name));

            let mut subdirs = Vec::new();
            for entry in entries {
                let rel = match &frame.rel {
                    Some(parent) => parent.child(&entry.name),
                    None => RelativePath::top_level(&entry.name),
                };

                if entry.kind == EntryKind::Directory {
                    if let Some(pattern) =
                        self.patterns
                            .first_match(rel.as_str(), rel.basename(), true)
                    {
                        tracing::debug!("pruned {rel}/ (pattern '{}')", pattern.source());
                        result.dirs_pruned += 1;
                        observer.on_excluded(&rel, true);
                        continue;
                    }

                    if entry.via_symlink && leads_to_ancestor(&entry.path, &frame.chain) {
                        tracing::warn!("skipping symlink loop at {rel}");
                        result.entries_skipped += 1;
                        result.add_warning(format!("Skipped symlink loop: {rel}"));
                        observer.on_skipped(&rel, SkipReason::SymlinkLoop);
                        continue;
                    }

                    let mut chain = frame.chain.clone();
                    chain.push(entry.path.clone());
                    subdirs.push(Frame {
                        dir: entry.path,
                        rel: Some(rel),
                        chain,
                    });
                    continue;
                }

                if let Some(pattern) = self
                    .patterns
                    .first_match(rel.as_str(), rel.basename(), false)
                {
                    tracing::debug!("excluded {rel} (pattern '{}')", pattern.source());
                    result.files_excluded += 1;
                    observer.on_excluded(&rel, false);
                    continue;
                }

                let skip = match entry.kind {
                    EntryKind::Symlink => Some(SkipReason::Symlink),
                    EntryKind::Special => Some(SkipReason::Special),
                    _ => self
                        .max_file_size
                        .filter(|max| entry.size > *max)
                        .map(|max| SkipReason::TooLarge {
                            size: entry.size,
                            max,
                        }),
                };
                if let Some(reason) = skip {
                    tracing::debug!("skipped {rel}: {reason}");
                    result.entries_skipped += 1;
                    result.add_warning(format!("Skipped {rel}: {reason}"));
                    observer.on_skipped(&rel, reason);
                    continue;
                }

                sink.emit(&entry.path, &rel)?;
                tracing::debug!("added {rel}");
                result.files_emitted += 1;
                result.bytes_emitted += entry.size;
                observer.on_emitted(&rel);
                if wanted.contains(&rel) {
                    emitted.insert(rel);
                }
            }

            stack.extend(subdirs.into_iter().rev());
        }

        for entry in &self.allow_list {
            if emitted.contains(&entry.archive_path) {
                tracing::debug!("allow-listed {} already emitted", entry.archive_path);
                continue;
            }

            let metadata = std::fs::metadata(&entry.source)
                .map_err(|e| ArcpruneError::io(&entry.source, e))?;
            if !metadata.is_file() {
                return Err(ArcpruneError::InvalidAllowEntry {
                    path: entry.archive_path.to_string(),
                    reason: format!("{} is not a regular file", entry.source.display()),
                });
            }

            sink.emit(&entry.source, &entry.archive_path)?;
            tracing::debug!("added {} (allow-list)", entry.archive_path);
            result.allow_listed += 1;
            result.bytes_emitted += metadata.len();
            observer.on_emitted(&entry.archive_path);
            emitted.insert(entry.archive_path.clone());
        }

        result.duration = start.elapsed();
        tracing::info!(
            "walked {} directories: {} files added, {} allow-listed, {} excluded, {} directories pruned",
            result.dirs_visited,
            result.files_emitted,
            result.allow_listed,
            result.files_excluded,
            result.dirs_pruned
        );
        observer.on_complete(&result);

        Ok(result)
    }
}

/// Returns `true` if `dir` resolves to the same place as one of `chain`.
///
/// Paths that cannot be resolved are never treated as loops.
fn leads_to_ancestor(dir: &Path, chain: &[PathBuf]) -> bool {
    let Ok(target) = dir.canonicalize() else {
        return false;
    };
    chain
        .iter()
        .filter_map(|ancestor| ancestor.canonicalize().ok())
        .any(|ancestor| ancestor == target)
}
