//! Configuration for building an archive.

use crate::ArcpruneError;
use crate::Result;
use crate::formats::ArchiveFormat;
use crate::pattern::ignore_file::DEFAULT_IGNORE_FILE;
use crate::types::RelativePath;

/// Options for one archive build.
///
/// # Examples
///
/// ```
/// use arcprune_core::ArchiveConfig;
///
/// let config = ArchiveConfig::default()
///     .with_exclude_patterns(vec![".git/".into(), ".vscode/".into(), "*.log".into()])
///     .with_allow_list(vec![".vscode/extensions.json".into()])
///     .with_compression_level(9);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Patterns excluded in addition to the ignore file.
    ///
    /// Default: `[".git/"]`
    pub exclude_patterns: Vec<String>,

    /// Ignore file name, looked up in the source root.
    ///
    /// A missing file is not an error. `None` disables the lookup.
    ///
    /// Default: `Some(".gitignore")`
    pub ignore_file: Option<String>,

    /// Root-relative files emitted after the walk even if excluded.
    ///
    /// Default: empty
    pub allow_list: Vec<String>,

    /// Follow symbolic links instead of skipping them.
    ///
    /// Default: `false`
    pub follow_symlinks: bool,

    /// Skip files larger than this many bytes.
    ///
    /// Default: `None` (no limit)
    pub max_file_size: Option<u64>,

    /// Compression level 1-9.
    ///
    /// Default: `Some(6)`
    pub compression_level: Option<u8>,

    /// Store unix permissions (and for tar, owner and mtime).
    ///
    /// Default: `true`
    pub preserve_permissions: bool,

    /// Output format; `None` detects it from the output file extension.
    ///
    /// Default: `None`
    pub format: Option<ArchiveFormat>,

    /// Replace an existing output file.
    ///
    /// Default: `false`
    pub overwrite: bool,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            exclude_patterns: vec![".git/".to_string()],
            ignore_file: Some(DEFAULT_IGNORE_FILE.to_string()),
            allow_list: Vec::new(),
            follow_symlinks: false,
            max_file_size: None,
            compression_level: Some(6),
            preserve_permissions: true,
            format: None,
            overwrite: false,
        }
    }
}

impl ArchiveConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the explicit exclusion patterns.
    #[must_use]
    pub fn with_exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.exclude_patterns = patterns;
        self
    }

    /// Sets the ignore file name; `None` disables it.
    #[must_use]
    pub fn with_ignore_file(mut self, name: Option<String>) -> Self {
        self.ignore_file = name;
        self
    }

    /// Replaces the allow-list.
    #[must_use]
    pub fn with_allow_list(mut self, paths: Vec<String>) -> Self {
        self.allow_list = paths;
        self
    }

    /// Sets whether symbolic links are followed.
    #[must_use]
    pub fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets the maximum file size.
    #[must_use]
    pub fn with_max_file_size(mut self, max_size: Option<u64>) -> Self {
        self.max_file_size = max_size;
        self
    }

    /// Sets the compression level. Out-of-range values fail [`validate`].
    ///
    /// [`validate`]: Self::validate
    #[must_use]
    pub fn with_compression_level(mut self, level: u8) -> Self {
        self.compression_level = Some(level);
        self
    }

    /// Sets whether permissions are stored.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Forces an output format.
    #[must_use]
    pub fn with_format(mut self, format: Option<ArchiveFormat>) -> Self {
        self.format = format;
        self
    }

    /// Sets whether an existing output file is replaced.
    #[must_use]
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ArcpruneError::InvalidCompressionLevel` for a level outside
    /// 1-9 and `ArcpruneError::InvalidAllowEntry` for an allow-list entry
    /// that is not a root-relative path.
    pub fn validate(&self) -> Result<()> {
        if let Some(level) = self.compression_level
            && !(1..=9).contains(&level)
        {
            return Err(ArcpruneError::InvalidCompressionLevel { level });
        }

        for raw in &self.allow_list {
            RelativePath::new(raw).map_err(|e| ArcpruneError::InvalidAllowEntry {
                path: raw.clone(),
                reason: e.to_string(),
            })?;
        }

        Ok(())
    }
}
