//! Ignore-file reading.
//!
//! An ignore file holds one pattern per line. Blank lines and lines starting
//! with `#` are skipped. Negated lines (`!pattern`) are not supported and are
//! skipped with a warning instead of being treated as literal names.

use crate::ArcpruneError;
use crate::Result;
use std::path::Path;

/// Default ignore file name looked up at the source root.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

/// Filters raw ignore-file lines down to active pattern lines.
///
/// # Examples
///
/// ```
/// use arcprune_core::pattern::ignore_file::active_lines;
///
/// let lines = active_lines(["# comment", "", "dist/"]);
/// assert_eq!(lines, vec!["dist/".to_string()]);
/// ```
pub fn active_lines<I>(lines: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut active = Vec::new();
    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('!') {
            tracing::warn!("negated ignore pattern '{}' is not supported, skipping", line);
            continue;
        }
        active.push(line.to_string());
    }
    active
}

/// Reads an ignore file into raw lines.
///
/// Returns `Ok(None)` if the file does not exist.
///
/// # Errors
///
/// Returns `ArcpruneError::Config` if the file exists but cannot be read or
/// is not valid UTF-8.
pub fn read_ignore_file(path: &Path) -> Result<Option<Vec<String>>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(ArcpruneError::Config {
                path: path.to_path_buf(),
                reason: format!("cannot read ignore file: {e}"),
            });
        }
    };

    let text = String::from_utf8(bytes).map_err(|e| ArcpruneError::Config {
        path: path.to_path_buf(),
        reason: format!("ignore file is not valid UTF-8: {e}"),
    })?;

    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(Some(text.lines().map(str::to_string).collect()))
}

/// Loads ignore-file lines, treating any problem as "no extra patterns".
///
/// A missing file is expected and logged at debug level; an unreadable or
/// malformed file is logged as a warning.
pub fn load_ignore_lines(path: &Path) -> Vec<String> {
    match read_ignore_file(path) {
        Ok(Some(lines)) => {
            tracing::debug!("loaded {} lines from {}", lines.len(), path.display());
            lines
        }
        Ok(None) => {
            tracing::debug!("no ignore file at {}", path.display());
            Vec::new()
        }
        Err(e) => {
            tracing::warn!("ignoring ignore file: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_active_lines_skips_comments_and_blanks() {
        let lines = active_lines(["# comment", "", "   ", "dist/", "  *.log  ", "#dist"]);
        assert_eq!(lines, vec!["dist/".to_string(), "*.log".to_string()]);
    }

    #[test]
    fn test_active_lines_skips_negation() {
        let lines = active_lines(["build/", "!build/keep.txt"]);
        assert_eq!(lines, vec!["build/".to_string()]);
    }

    #[test]
    fn test_read_missing_file_is_none() {
        let temp = TempDir::new().unwrap();
        let result = read_ignore_file(&temp.path().join(".gitignore")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_read_ignore_file_lines() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        fs::write(&path, "\u{feff}# comment\r\n\r\ndist/\r\n").unwrap();

        let lines = read_ignore_file(&path).unwrap().unwrap();
        assert_eq!(lines, vec!["# comment", "", "dist/"]);
        assert_eq!(active_lines(&lines), vec!["dist/".to_string()]);
    }

    #[test]
    fn test_read_invalid_utf8_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        fs::write(&path, [0xff, 0xfe, 0x00, b'\n']).unwrap();

        let err = read_ignore_file(&path).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    fn test_load_falls_back_to_empty() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        fs::write(&path, [0xc3, 0x28]).unwrap();
        assert!(load_ignore_lines(&path).is_empty());

        assert!(load_ignore_lines(&temp.path().join("missing")).is_empty());
    }

    #[test]
    fn test_directory_in_place_of_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        fs::create_dir(&path).unwrap();

        let err = read_ignore_file(&path).unwrap_err();
        assert!(err.is_config());
        assert!(load_ignore_lines(&path).is_empty());
    }
}
