//! Output archive format detection.

use crate::ArcpruneError;
use crate::Result;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Archive formats that can be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    /// ZIP archive with deflate compression.
    Zip,
    /// Uncompressed tar archive.
    Tar,
    /// Gzip-compressed tar archive.
    TarGz,
    /// Bzip2-compressed tar archive.
    TarBz2,
    /// XZ-compressed tar archive.
    TarXz,
    /// Zstd-compressed tar archive.
    TarZst,
}

impl ArchiveFormat {
    /// All formats, in the order they are listed in help output.
    pub const ALL: [Self; 6] = [
        Self::Zip,
        Self::Tar,
        Self::TarGz,
        Self::TarBz2,
        Self::TarXz,
        Self::TarZst,
    ];

    /// Canonical file extension, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Tar => "tar",
            Self::TarGz => "tar.gz",
            Self::TarBz2 => "tar.bz2",
            Self::TarXz => "tar.xz",
            Self::TarZst => "tar.zst",
        }
    }

    /// Detects the format from an output file name.
    ///
    /// Matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `ArcpruneError::UnsupportedFormat` if the extension is not
    /// recognized.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcprune_core::ArchiveFormat;
    /// use std::path::Path;
    ///
    /// assert_eq!(ArchiveFormat::detect(Path::new("out.zip"))?, ArchiveFormat::Zip);
    /// assert_eq!(ArchiveFormat::detect(Path::new("out.TGZ"))?, ArchiveFormat::TarGz);
    /// assert!(ArchiveFormat::detect(Path::new("out.rar")).is_err());
    /// # Ok::<(), arcprune_core::ArcpruneError>(())
    /// ```
    pub fn detect(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| unsupported(path))?;

        match extension.to_ascii_lowercase().as_str() {
            "zip" => Ok(Self::Zip),
            "tar" => Ok(Self::Tar),
            "gz" | "tgz" => Ok(Self::TarGz),
            "bz2" | "tbz" | "tbz2" => Ok(Self::TarBz2),
            "xz" | "txz" => Ok(Self::TarXz),
            "zst" | "tzst" => Ok(Self::TarZst),
            _ => Err(unsupported(path)),
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ArchiveFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let name = s.trim().trim_start_matches('.').to_ascii_lowercase();
        match name.as_str() {
            "zip" => Ok(Self::Zip),
            "tar" => Ok(Self::Tar),
            "tar.gz" | "tgz" | "gz" => Ok(Self::TarGz),
            "tar.bz2" | "tbz2" | "bz2" => Ok(Self::TarBz2),
            "tar.xz" | "txz" | "xz" => Ok(Self::TarXz),
            "tar.zst" | "tzst" | "zst" => Ok(Self::TarZst),
            _ => Err(format!(
                "unknown archive format '{s}' (expected one of: {})",
                Self::ALL
                    .iter()
                    .map(|f| f.extension())
                    .collect::<Vec<_>>()
                    .join(", ")
            )),
        }
    }
}

fn unsupported(path: &Path) -> ArcpruneError {
    ArcpruneError::UnsupportedFormat {
        path: path.to_path_buf(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_detect_zip() {
        let path = PathBuf::from("project-20250101-120000.zip");
        assert_eq!(ArchiveFormat::detect(&path).unwrap(), ArchiveFormat::Zip);
    }

    #[test]
    fn test_detect_tar_variants() {
        let cases = [
            ("a.tar", ArchiveFormat::Tar),
            ("a.tar.gz", ArchiveFormat::TarGz),
            ("a.tgz", ArchiveFormat::TarGz),
            ("a.tar.bz2", ArchiveFormat::TarBz2),
            ("a.tbz2", ArchiveFormat::TarBz2),
            ("a.tar.xz", ArchiveFormat::TarXz),
            ("a.txz", ArchiveFormat::TarXz),
            ("a.tar.zst", ArchiveFormat::TarZst),
            ("a.tzst", ArchiveFormat::TarZst),
        ];
        for (name, expected) in cases {
            assert_eq!(ArchiveFormat::detect(Path::new(name)).unwrap(), expected, "{name}");
        }
    }

    #[test]
    fn test_detect_case_insensitive() {
        assert_eq!(
            ArchiveFormat::detect(Path::new("BACKUP.ZIP")).unwrap(),
            ArchiveFormat::Zip
        );
    }

    #[test]
    fn test_detect_unsupported() {
        let err = ArchiveFormat::detect(Path::new("archive.rar")).unwrap_err();
        assert!(matches!(err, ArcpruneError::UnsupportedFormat { .. }));

        let err = ArchiveFormat::detect(Path::new("no_extension")).unwrap_err();
        assert!(matches!(err, ArcpruneError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("zip".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::Zip);
        assert_eq!(".tar.gz".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::TarGz);
        assert_eq!("ZST".parse::<ArchiveFormat>().unwrap(), ArchiveFormat::TarZst);
        let err = "rar".parse::<ArchiveFormat>().unwrap_err();
        assert!(err.contains("tar.gz"));
    }

    #[test]
    fn test_display_is_extension() {
        for format in ArchiveFormat::ALL {
            assert_eq!(format.to_string(), format.extension());
        }
    }
}
