//! ZIP archive sink.

use super::ArchiveSink;
use crate::ArcpruneError;
use crate::Result;
use crate::compression::level_to_zip;
use crate::types::RelativePath;
use std::fs::File;
use std::io::Read;
use std::io::Seek;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes emitted files into a ZIP archive with deflate compression.
///
/// Call [`finish`](Self::finish) to write the central directory. A sink that
/// is dropped without `finish` (for example when the walk fails) still has
/// its writer closed by `ZipWriter`'s own `Drop`, leaving a partial archive.
///
/// # Examples
///
/// ```no_run
/// use arcprune_core::sink::ArchiveSink;
/// use arcprune_core::sink::ZipSink;
/// use arcprune_core::types::RelativePath;
/// use std::fs::File;
/// use std::path::Path;
///
/// let file = File::create("out.zip")?;
/// let mut sink = ZipSink::new(file).with_compression_level(Some(9));
/// sink.emit(Path::new("README.md"), &RelativePath::new("README.md")?)?;
/// sink.finish()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct ZipSink<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    preserve_permissions: bool,
    label: PathBuf,
    buffer: Vec<u8>,
}

impl<W: Write + Seek> ZipSink<W> {
    /// Creates a sink writing to `writer` with default compression.
    pub fn new(writer: W) -> Self {
        Self {
            zip: ZipWriter::new(writer),
            options: deflate_options(None),
            preserve_permissions: true,
            label: PathBuf::from("<zip>"),
            buffer: vec![0u8; 64 * 1024],
        }
    }

    /// Sets the compression level (1-9, `None` for the default).
    #[must_use]
    pub fn with_compression_level(mut self, level: Option<u8>) -> Self {
        self.options = deflate_options(level);
        self
    }

    /// Sets whether unix permission bits are stored.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }

    /// Sets the name used for this archive in error messages.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<PathBuf>) -> Self {
        self.label = label.into();
        self
    }

    /// Writes the central directory and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns `ArcpruneError::Sink` if the archive cannot be finalized.
    pub fn finish(self) -> Result<W> {
        let label = self.label;
        self.zip
            .finish()
            .map_err(|e| ArcpruneError::sink(&label, format!("failed to finish ZIP archive: {e}")))
    }
}

impl<W: Write + Seek> ArchiveSink for ZipSink<W> {
    fn emit(&mut self, source: &Path, archive_path: &RelativePath) -> Result<()> {
        let mut file = File::open(source).map_err(|e| ArcpruneError::io(source, e))?;
        let metadata = file.metadata().map_err(|e| ArcpruneError::io(source, e))?;

        let mut options = self
            .options
            .large_file(metadata.len() >= u64::from(u32::MAX));
        if self.preserve_permissions {
            options = with_permissions(options, &metadata);
        }

        self.zip
            .start_file(archive_path.as_str(), options)
            .map_err(|e| ArcpruneError::sink(source, format!("failed to start ZIP entry: {e}")))?;

        loop {
            let read = file
                .read(&mut self.buffer)
                .map_err(|e| ArcpruneError::io(source, e))?;
            if read == 0 {
                break;
            }
            self.zip
                .write_all(&self.buffer[..read])
                .map_err(|e| ArcpruneError::sink(source, e))?;
        }

        Ok(())
    }
}

fn deflate_options(level: Option<u8>) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(level_to_zip(level)))
}

#[cfg(unix)]
fn with_permissions(options: SimpleFileOptions, metadata: &std::fs::Metadata) -> SimpleFileOptions {
    use std::os::unix::fs::PermissionsExt;
    options.unix_permissions(metadata.permissions().mode())
}

#[cfg(not(unix))]
fn with_permissions(options: SimpleFileOptions, _metadata: &std::fs::Metadata) -> SimpleFileOptions {
    options
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn rel(s: &str) -> RelativePath {
        RelativePath::new(s).unwrap()
    }

    #[test]
    fn test_zip_sink_roundtrip() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "alpha").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub/b.txt"), "beta").unwrap();

        let mut sink = ZipSink::new(Cursor::new(Vec::new()));
        sink.emit(&temp.path().join("a.txt"), &rel("a.txt")).unwrap();
        sink.emit(&temp.path().join("sub/b.txt"), &rel("sub/b.txt"))
            .unwrap();
        let bytes = sink.finish().unwrap().into_inner();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        archive
            .by_name("sub/b.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "beta");
    }

    #[test]
    fn test_zip_sink_missing_source_is_io_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("gone.txt");

        let mut sink = ZipSink::new(Cursor::new(Vec::new()));
        let err = sink.emit(&missing, &rel("gone.txt")).unwrap_err();
        assert!(err.is_io());
        assert_eq!(err.path(), Some(missing.as_path()));
    }

    #[cfg(unix)]
    #[test]
    fn test_zip_sink_preserves_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let script = temp.path().join("run.sh");
        fs::write(&script, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let mut sink = ZipSink::new(Cursor::new(Vec::new()));
        sink.emit(&script, &rel("run.sh")).unwrap();
        let bytes = sink.finish().unwrap().into_inner();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let entry = archive.by_name("run.sh").unwrap();
        assert_eq!(entry.unix_mode().unwrap() & 0o777, 0o755);
    }
}
