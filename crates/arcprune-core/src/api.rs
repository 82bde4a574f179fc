//! High-level API for building archives.

use crate::ArchiveConfig;
use crate::ArcpruneError;
use crate::Result;
use crate::WalkResult;
use crate::compression::level_to_bzip2;
use crate::compression::level_to_flate2;
use crate::compression::level_to_xz;
use crate::compression::level_to_zstd;
use crate::formats::ArchiveFormat;
use crate::pattern::PatternSet;
use crate::pattern::ignore_file::load_ignore_lines;
use crate::progress::NoopObserver;
use crate::progress::WalkObserver;
use crate::sink::ArchiveSink;
use crate::sink::CollectingSink;
use crate::sink::TarSink;
use crate::sink::ZipSink;
use crate::types::RelativePath;
use crate::walker::AllowEntry;
use crate::walker::TreeWalker;
use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;

/// Builds the pattern set for `root`: explicit patterns from `config`
/// followed by the lines of the ignore file in `root`, if any.
///
/// Problems with the ignore file are logged and treated as an empty file.
///
/// # Examples
///
/// ```no_run
/// use arcprune_core::ArchiveConfig;
/// use arcprune_core::load_pattern_set;
/// use std::path::Path;
///
/// let patterns = load_pattern_set(Path::new("."), &ArchiveConfig::default());
/// println!("{} patterns", patterns.len());
/// ```
#[must_use]
pub fn load_pattern_set(root: &Path, config: &ArchiveConfig) -> PatternSet {
    build_patterns(root, config, None)
}

fn build_patterns(root: &Path, config: &ArchiveConfig, extra: Option<String>) -> PatternSet {
    let ignore_lines = config
        .ignore_file
        .as_deref()
        .map(|name| load_ignore_lines(&root.join(name)))
        .unwrap_or_default();
    let explicit = config.exclude_patterns.iter().cloned().chain(extra);
    PatternSet::build(explicit, ignore_lines)
}

/// Walks `root` without writing anything and returns what would be archived.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the root is not a
/// readable directory, or an allow-listed file is missing.
///
/// # Examples
///
/// ```no_run
/// use arcprune_core::ArchiveConfig;
/// use arcprune_core::plan_archive;
///
/// let (sink, result) = plan_archive(".", &ArchiveConfig::default())?;
/// for path in sink.archive_paths() {
///     println!("{path}");
/// }
/// println!("{} files", result.total_emitted());
/// # Ok::<(), arcprune_core::ArcpruneError>(())
/// ```
pub fn plan_archive<P: AsRef<Path>>(
    root: P,
    config: &ArchiveConfig,
) -> Result<(CollectingSink, WalkResult)> {
    plan_archive_with_observer(root, config, &mut NoopObserver)
}

/// Same as [`plan_archive`], reporting each decision to `observer`.
///
/// # Errors
///
/// See [`plan_archive`].
pub fn plan_archive_with_observer<P: AsRef<Path>>(
    root: P,
    config: &ArchiveConfig,
    observer: &mut dyn WalkObserver,
) -> Result<(CollectingSink, WalkResult)> {
    plan(root.as_ref(), config, None, observer)
}

/// Plans the walk [`create_archive`] would perform for `output`.
///
/// The pattern set is the one the real build uses, so an `output` inside
/// `root` is left out of the plan. Nothing is written and `output` does not
/// need to exist.
///
/// # Errors
///
/// See [`plan_archive`].
pub fn plan_archive_for_output<P: AsRef<Path>, Q: AsRef<Path>>(
    root: P,
    output: Q,
    config: &ArchiveConfig,
    observer: &mut dyn WalkObserver,
) -> Result<(CollectingSink, WalkResult)> {
    let root = root.as_ref();
    plan(root, config, self_exclusion(root, output.as_ref()), observer)
}

fn plan(
    root: &Path,
    config: &ArchiveConfig,
    extra: Option<String>,
    observer: &mut dyn WalkObserver,
) -> Result<(CollectingSink, WalkResult)> {
    config.validate()?;
    check_source(root)?;

    let patterns = build_patterns(root, config, extra);
    let mut sink = CollectingSink::new();
    let result = run_walk(root, &patterns, config, &mut sink, observer)?;
    Ok((sink, result))
}

/// Archives `root` into `output`.
///
/// The format comes from `config.format` or the output extension. When
/// `output` lies inside `root` it is excluded from the walk.
///
/// # Errors
///
/// Returns an error if:
/// - The configuration is invalid
/// - The source does not exist or is not a directory
/// - The output format cannot be determined
/// - The output exists and `config.overwrite` is false
/// - A directory or file cannot be read (`ArcpruneError::Io`)
/// - The archive cannot be written (`ArcpruneError::Sink`)
///
/// A failed build may leave a partial archive at `output`.
///
/// # Examples
///
/// ```no_run
/// use arcprune_core::ArchiveConfig;
/// use arcprune_core::create_archive;
///
/// let config = ArchiveConfig::default().with_exclude_patterns(vec![
///     ".git/".into(),
///     "node_modules/".into(),
///     "*.log".into(),
/// ]);
/// let result = create_archive("my-project", "my-project.zip", &config)?;
/// println!("Archived {} files", result.total_emitted());
/// # Ok::<(), arcprune_core::ArcpruneError>(())
/// ```
pub fn create_archive<P: AsRef<Path>, Q: AsRef<Path>>(
    root: P,
    output: Q,
    config: &ArchiveConfig,
) -> Result<WalkResult> {
    create_archive_with_observer(root, output, config, &mut NoopObserver)
}

/// Same as [`create_archive`], reporting each decision to `observer`.
///
/// # Errors
///
/// See [`create_archive`].
pub fn create_archive_with_observer<P: AsRef<Path>, Q: AsRef<Path>>(
    root: P,
    output: Q,
    config: &ArchiveConfig,
    observer: &mut dyn WalkObserver,
) -> Result<WalkResult> {
    let root = root.as_ref();
    let output = output.as_ref();

    config.validate()?;
    check_source(root)?;

    let format = match config.format {
        Some(format) => format,
        None => ArchiveFormat::detect(output)?,
    };

    if output.exists() && !config.overwrite {
        return Err(ArcpruneError::OutputExists {
            path: output.to_path_buf(),
        });
    }

    let patterns = build_patterns(root, config, self_exclusion(root, output));

    let file = File::create(output).map_err(|e| ArcpruneError::io(output, e))?;
    let writer = BufWriter::new(file);
    let level = config.compression_level;

    let result = match format {
        ArchiveFormat::Zip => {
            let mut sink = ZipSink::new(writer)
                .with_compression_level(level)
                .with_preserve_permissions(config.preserve_permissions)
                .with_label(output);
            let result = run_walk(root, &patterns, config, &mut sink, observer)?;
            let writer = sink.finish()?;
            flush(writer, output)?;
            result
        }
        ArchiveFormat::Tar => {
            let (result, writer) = write_tar(writer, root, output, &patterns, config, observer)?;
            flush(writer, output)?;
            result
        }
        ArchiveFormat::TarGz => {
            let encoder = flate2::write::GzEncoder::new(writer, level_to_flate2(level));
            let (result, encoder) = write_tar(encoder, root, output, &patterns, config, observer)?;
            let writer = encoder
                .finish()
                .map_err(|e| ArcpruneError::sink(output, e))?;
            flush(writer, output)?;
            result
        }
        ArchiveFormat::TarBz2 => {
            let encoder = bzip2::write::BzEncoder::new(writer, level_to_bzip2(level));
            let (result, encoder) = write_tar(encoder, root, output, &patterns, config, observer)?;
            let writer = encoder
                .finish()
                .map_err(|e| ArcpruneError::sink(output, e))?;
            flush(writer, output)?;
            result
        }
        ArchiveFormat::TarXz => {
            let encoder = xz2::write::XzEncoder::new(writer, level_to_xz(level));
            let (result, encoder) = write_tar(encoder, root, output, &patterns, config, observer)?;
            let writer = encoder
                .finish()
                .map_err(|e| ArcpruneError::sink(output, e))?;
            flush(writer, output)?;
            result
        }
        ArchiveFormat::TarZst => {
            let mut encoder = zstd::Encoder::new(writer, level_to_zstd(level))
                .map_err(|e| ArcpruneError::sink(output, e))?;
            encoder
                .include_checksum(true)
                .map_err(|e| ArcpruneError::sink(output, e))?;
            let (result, encoder) = write_tar(encoder, root, output, &patterns, config, observer)?;
            let writer = encoder
                .finish()
                .map_err(|e| ArcpruneError::sink(output, e))?;
            flush(writer, output)?;
            result
        }
    };

    tracing::info!("wrote {} ({format})", output.display());
    Ok(result)
}

fn write_tar<W: Write>(
    writer: W,
    root: &Path,
    output: &Path,
    patterns: &PatternSet,
    config: &ArchiveConfig,
    observer: &mut dyn WalkObserver,
) -> Result<(WalkResult, W)> {
    let mut sink = TarSink::new(writer)
        .with_preserve_permissions(config.preserve_permissions)
        .with_label(output);
    let result = run_walk(root, patterns, config, &mut sink, observer)?;
    let writer = sink.finish()?;
    Ok((result, writer))
}

fn run_walk<S: ArchiveSink + ?Sized>(
    root: &Path,
    patterns: &PatternSet,
    config: &ArchiveConfig,
    sink: &mut S,
    observer: &mut dyn WalkObserver,
) -> Result<WalkResult> {
    let allow_list = config
        .allow_list
        .iter()
        .map(|raw| AllowEntry::under_root(root, raw))
        .collect::<Result<Vec<_>>>()?;

    TreeWalker::new(root, patterns)
        .with_follow_symlinks(config.follow_symlinks)
        .with_max_file_size(config.max_file_size)
        .with_allow_list(allow_list)
        .walk_with_observer(sink, observer)
}

fn flush<W: Write>(mut writer: W, output: &Path) -> Result<()> {
    writer.flush().map_err(|e| ArcpruneError::sink(output, e))
}

fn check_source(root: &Path) -> Result<()> {
    if !root.exists() {
        return Err(ArcpruneError::SourceNotFound {
            path: root.to_path_buf(),
        });
    }
    if !root.is_dir() {
        return Err(ArcpruneError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    Ok(())
}

/// Anchored pattern excluding `output` when a walk of `root` would reach it.
fn self_exclusion(root: &Path, output: &Path) -> Option<String> {
    output_inside_root(root, output).map(|rel| {
        tracing::debug!("excluding output archive {rel} from the walk");
        format!("/{rel}")
    })
}

/// Returns the archive path of `output` if it would be visited by a walk
/// of `root`.
fn output_inside_root(root: &Path, output: &Path) -> Option<RelativePath> {
    let root = root.canonicalize().ok()?;
    let name = output.file_name()?;
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.canonicalize().ok()?,
        _ => std::env::current_dir().ok()?,
    };
    let relative = parent.join(name);
    let relative = relative.strip_prefix(&root).ok()?;
    RelativePath::from_path(relative).ok()
}
