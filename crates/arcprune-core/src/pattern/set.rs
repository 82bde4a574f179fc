//! Immutable set of exclusion patterns.

use super::ignore_file;
use super::rule::Pattern;
use std::collections::HashSet;

/// Exclusion patterns built once per archive build.
///
/// Explicit patterns come first, followed by ignore-file patterns. Duplicates
/// are dropped, keeping the first occurrence. There is no negation, so every
/// match is equivalent and the first one found wins.
///
/// The set is never mutated after construction and is `Send + Sync`.
///
/// # Examples
///
/// ```
/// use arcprune_core::pattern::PatternSet;
///
/// let set = PatternSet::build(["*.log", ".git/"], ["# build output", "", "dist/"]);
/// assert_eq!(set.len(), 3);
///
/// assert!(set.matches("logs/app.log", "app.log", false));
/// assert!(set.matches(".git", ".git", true));
/// assert!(set.matches("dist", "dist", true));
/// assert!(!set.matches("src/main.rs", "main.rs", false));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Builds a set from explicit patterns and raw ignore-file lines.
    ///
    /// Ignore-file lines go through [`ignore_file::active_lines`] (comments,
    /// blanks and negations removed). Every token is trimmed and tokens that
    /// are empty after trimming are dropped. This never fails.
    pub fn build<E, L>(explicit: E, ignore_lines: L) -> Self
    where
        E: IntoIterator,
        E::Item: AsRef<str>,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        let from_file = ignore_file::active_lines(ignore_lines);
        let tokens = explicit
            .into_iter()
            .map(|s| s.as_ref().to_string())
            .chain(from_file);

        let mut patterns: Vec<Pattern> = Vec::new();
        for token in tokens {
            let Some(pattern) = Pattern::parse(&token) else {
                continue;
            };
            if patterns.iter().any(|p| p.dedup_key() == pattern.dedup_key()) {
                continue;
            }
            patterns.push(pattern);
        }

        tracing::debug!("built pattern set with {} patterns", patterns.len());
        Self { patterns }
    }

    /// Creates an empty set that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decides whether an entry is excluded.
    ///
    /// Literal patterns are checked first, then glob patterns. Both are
    /// compared against `relative_path` and against `basename`, and
    /// directory-only patterns are skipped when `is_dir` is false.
    #[must_use]
    pub fn matches(&self, relative_path: &str, basename: &str, is_dir: bool) -> bool {
        self.first_match(relative_path, basename, is_dir).is_some()
    }

    /// Returns the first pattern that excludes the entry, if any.
    #[must_use]
    pub fn first_match(&self, relative_path: &str, basename: &str, is_dir: bool) -> Option<&Pattern> {
        let literal = self
            .patterns
            .iter()
            .filter(|p| !p.kind().is_glob())
            .find(|p| p.is_match(relative_path, basename, is_dir));

        literal.or_else(|| {
            self.patterns
                .iter()
                .filter(|p| p.kind().is_glob())
                .find(|p| p.is_match(relative_path, basename, is_dir))
        })
    }

    /// Returns the patterns in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Returns the distinct source strings of all patterns.
    #[must_use]
    pub fn sources(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.patterns
            .iter()
            .map(Pattern::source)
            .filter(|s| seen.insert(*s))
            .collect()
    }

    /// Returns the number of patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` if the set holds no patterns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
