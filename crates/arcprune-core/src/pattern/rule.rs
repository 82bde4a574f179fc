//! Single exclusion pattern parsing and matching.

use globset::GlobBuilder;
use globset::GlobMatcher;
use std::fmt;

/// Classification of a pattern by wildcard use and directory restriction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Exact name or path, applies to files and directories.
    LiteralFile,
    /// Exact name or path with trailing `/`, applies to directories only.
    LiteralDir,
    /// Wildcard pattern, applies to files and directories.
    GlobFile,
    /// Wildcard pattern with trailing `/`, applies to directories only.
    GlobDir,
}

impl PatternKind {
    /// Returns `true` for `*`/`?` patterns.
    #[must_use]
    pub const fn is_glob(self) -> bool {
        matches!(self, Self::GlobFile | Self::GlobDir)
    }

    /// Returns `true` for patterns written with a trailing `/`.
    #[must_use]
    pub const fn is_dir_only(self) -> bool {
        matches!(self, Self::LiteralDir | Self::GlobDir)
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LiteralFile => "literal",
            Self::LiteralDir => "literal, directories only",
            Self::GlobFile => "glob",
            Self::GlobDir => "glob, directories only",
        })
    }
}

/// One exclusion rule.
///
/// A pattern is matched against both the root-relative path of an entry and
/// its basename, so `node_modules` excludes that name at any depth while
/// `docs/internal` only excludes one specific path. A leading `/` anchors the
/// pattern to the root: it is then compared with the relative path only.
///
/// # Examples
///
/// ```
/// use arcprune_core::pattern::Pattern;
/// use arcprune_core::pattern::PatternKind;
///
/// let pattern = Pattern::parse("build/").unwrap();
/// assert_eq!(pattern.kind(), PatternKind::LiteralDir);
/// assert!(pattern.is_match("build", "build", true));
/// assert!(!pattern.is_match("build", "build", false));
///
/// let glob = Pattern::parse("*.pyc").unwrap();
/// assert!(glob.is_match("pkg/mod.pyc", "mod.pyc", false));
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    text: String,
    kind: PatternKind,
    anchored: bool,
    glob: Option<GlobMatcher>,
}

impl Pattern {
    /// Parses a pattern token.
    ///
    /// Surrounding whitespace is trimmed. Returns `None` when nothing is left
    /// to match (empty input, or only separators).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let source = raw.trim();
        let dir_only = source.ends_with('/');
        let mut text = source.trim_end_matches('/');

        let anchored = text.starts_with('/');
        text = text.trim_start_matches('/');
        while let Some(rest) = text.strip_prefix("./") {
            text = rest;
        }

        if text.is_empty() || text == "." {
            return None;
        }

        let mut kind = match (text.contains(['*', '?']), dir_only) {
            (false, false) => PatternKind::LiteralFile,
            (false, true) => PatternKind::LiteralDir,
            (true, false) => PatternKind::GlobFile,
            (true, true) => PatternKind::GlobDir,
        };

        let glob = if kind.is_glob() {
            match compile_glob(text) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    tracing::warn!("invalid glob pattern '{}', matching literally: {}", source, e);
                    kind = if dir_only {
                        PatternKind::LiteralDir
                    } else {
                        PatternKind::LiteralFile
                    };
                    None
                }
            }
        } else {
            None
        };

        Some(Self {
            source: source.to_string(),
            text: text.to_string(),
            kind,
            anchored,
            glob,
        })
    }

    /// Returns the pattern as it was written (trimmed).
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the normalized match text (no trailing `/`, no anchor).
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the pattern classification.
    #[must_use]
    pub const fn kind(&self) -> PatternKind {
        self.kind
    }

    /// Returns `true` if the pattern was written with a leading `/`.
    #[must_use]
    pub const fn is_anchored(&self) -> bool {
        self.anchored
    }

    /// Checks an entry against this pattern.
    ///
    /// `relative_path` is the root-relative `/`-separated path and
    /// `basename` its last component.
    #[must_use]
    pub fn is_match(&self, relative_path: &str, basename: &str, is_dir: bool) -> bool {
        if self.kind.is_dir_only() && !is_dir {
            return false;
        }

        match &self.glob {
            Some(glob) => {
                glob.is_match(relative_path) || (!self.anchored && glob.is_match(basename))
            }
            None => relative_path == self.text || (!self.anchored && basename == self.text),
        }
    }

    /// Key under which two patterns are considered duplicates.
    pub(crate) fn dedup_key(&self) -> (&str, PatternKind, bool) {
        (&self.text, self.kind, self.anchored)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Compiles a `*`/`?` pattern where wildcards never cross `/`.
///
/// Brackets and braces are escaped so that only `*` and `?` are special.
/// Runs of `*` collapse to one, so `**` is an ordinary star.
fn compile_glob(text: &str) -> Result<GlobMatcher, globset::Error> {
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '*' if escaped.ends_with('*') => {}
            '[' => escaped.push_str("[[]"),
            ']' => escaped.push_str("[]]"),
            '{' => escaped.push_str("[{]"),
            '}' => escaped.push_str("[}]"),
            _ => escaped.push(ch),
        }
    }

    let glob = GlobBuilder::new(&escaped)
        .literal_separator(true)
        .backslash_escape(false)
        .build()?;
    Ok(glob.compile_matcher())
}
