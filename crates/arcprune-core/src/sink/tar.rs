//! TAR archive sink.

use super::ArchiveSink;
use crate::ArcpruneError;
use crate::Result;
use crate::types::RelativePath;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use tar::Builder;
use tar::Header;

/// Writes emitted files into a tar stream.
///
/// The writer may be a plain file or any compressing encoder; the caller
/// finishes the encoder with the writer returned by [`finish`](Self::finish).
pub struct TarSink<W: Write> {
    builder: Builder<W>,
    preserve_permissions: bool,
    label: PathBuf,
}

impl<W: Write> TarSink<W> {
    /// Creates a sink writing a tar stream to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            builder: Builder::new(writer),
            preserve_permissions: true,
            label: PathBuf::from("<tar>"),
        }
    }

    /// Sets whether mode, owner and mtime are copied into headers.
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

    /// Writes the end-of-archive marker and returns the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns `ArcpruneError::Sink` if the trailer cannot be written.
    pub fn finish(self) -> Result<W> {
        let label = self.label;
        self.builder
            .into_inner()
            .map_err(|e| ArcpruneError::sink(&label, format!("failed to finish TAR archive: {e}")))
    }
}

impl<W: Write> ArchiveSink for TarSink<W> {
    fn emit(&mut self, source: &Path, archive_path: &RelativePath) -> Result<()> {
        let mut file = File::open(source).map_err(|e| ArcpruneError::io(source, e))?;
        let metadata = file.metadata().map_err(|e| ArcpruneError::io(source, e))?;
        let size = metadata.len();

        let mut header = Header::new_gnu();
        header.set_size(size);
        if self.preserve_permissions {
            set_permissions(&mut header, &metadata);
        } else {
            header.set_mode(0o644);
        }
        header.set_cksum();

        self.builder
            .append_data(&mut header, archive_path.as_str(), &mut file)
            .map_err(|e| ArcpruneError::sink(source, e))?;
        Ok(())
    }
}

#[cfg(unix)]
fn set_permissions(header: &mut Header, metadata: &std::fs::Metadata) {
    use std::os::unix::fs::MetadataExt;
    header.set_mode(metadata.mode());
    header.set_uid(u64::from(metadata.uid()));
    header.set_gid(u64::from(metadata.gid()));
    // pre-epoch mtimes clamp to 0
    #[allow(clippy::cast_sign_loss)]
    header.set_mtime(metadata.mtime().max(0) as u64);
}

#[cfg(not(unix))]
fn set_permissions(header: &mut Header, metadata: &std::fs::Metadata) {
    header.set_mode(if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    });
    if let Some(secs) = metadata
        .modified()
        .ok()
        .and_then(|m| m.duration_since(std::time::UNIX_EPOCH).ok())
    {
        header.set_mtime(secs.as_secs());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use tempfile::TempDir;

    fn entry_names(bytes: &[u8]) -> Vec<String> {
        let mut archive = tar::Archive::new(bytes);
        archive
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_tar_sink_roundtrip() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/main.rs"), "fn main() {}").unwrap();

        let mut sink = TarSink::new(Vec::new());
        sink.emit(
            &temp.path().join("src/main.rs"),
            &RelativePath::new("src/main.rs").unwrap(),
        )
        .unwrap();
        let bytes = sink.finish().unwrap();

        assert_eq!(entry_names(&bytes), vec!["src/main.rs"]);

        let mut archive = tar::Archive::new(bytes.as_slice());
        let mut entry = archive.entries().unwrap().next().unwrap().unwrap();
        let mut content = String::new();
        entry.read_to_string(&mut content).unwrap();
        assert_eq!(content, "fn main() {}");
    }

    #[test]
    fn test_tar_sink_long_path() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("f.txt"), "x").unwrap();
        let long = format!("{}/f.txt", "d".repeat(150));

        let mut sink = TarSink::new(Vec::new());
        sink.emit(&temp.path().join("f.txt"), &RelativePath::new(&long).unwrap())
            .unwrap();
        let bytes = sink.finish().unwrap();

        assert_eq!(entry_names(&bytes), vec![long]);
    }

    #[test]
    fn test_tar_sink_missing_source_is_io_error() {
        let temp = TempDir::new().unwrap();
        let mut sink = TarSink::new(Vec::new());
        let err = sink
            .emit(
                &temp.path().join("nope"),
                &RelativePath::new("nope").unwrap(),
            )
            .unwrap_err();
        assert!(err.is_io());
    }

    #[cfg(unix)]
    #[test]
    fn test_tar_sink_without_permissions_uses_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let path = temp.path().join("run.sh");
        fs::write(&path, "#!/bin/sh").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let mut sink = TarSink::new(Vec::new()).with_preserve_permissions(false);
        sink.emit(&path, &RelativePath::new("run.sh").unwrap())
            .unwrap();
        let bytes = sink.finish().unwrap();

        let mut archive = tar::Archive::new(bytes.as_slice());
        let entry = archive.entries().unwrap().next().unwrap().unwrap();
        assert_eq!(entry.header().mode().unwrap() & 0o777, 0o644);
    }
}
