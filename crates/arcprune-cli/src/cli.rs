//! CLI argument parsing using clap.

use arcprune_core::ArchiveFormat;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcprune")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Print every added and excluded path, and info-level logs
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Archive a directory, skipping excluded paths
    Create(CreateArgs),
    /// Show the effective exclusion patterns for a directory
    Patterns(PatternsArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Options shared by every command that builds a pattern set.
#[derive(clap::Args)]
pub struct PatternArgs {
    /// Exclude pattern (literal or glob, trailing '/' for directories only; repeatable)
    #[arg(long = "exclude", short = 'x', value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Do not add the default '.git/' exclusion
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Ignore file to read from the source directory
    #[arg(long, value_name = "NAME", default_value = ".gitignore")]
    pub ignore_file: String,

    /// Do not read any ignore file
    #[arg(long, conflicts_with = "ignore_file")]
    pub no_ignore_file: bool,
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Directory to archive
    #[arg(value_name = "SOURCE", default_value = ".")]
    pub source: PathBuf,

    /// Output archive path (default: <source-name>-<timestamp>.zip)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub patterns: PatternArgs,

    /// Include this file even if it or its directory is excluded (repeatable)
    #[arg(long = "include", short = 'i', value_name = "PATH")]
    pub include: Vec<String>,

    /// Archive format (default: detected from the output extension)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<ArchiveFormat>,

    /// Compression level (1-9)
    #[arg(short = 'l', long, value_parser = clap::value_parser!(u8).range(1..=9))]
    pub compression_level: Option<u8>,

    /// Follow symbolic links
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Skip files larger than this size (e.g. 500K, 10M)
    #[arg(long, value_parser = parse_byte_size)]
    pub max_file_size: Option<u64>,

    /// Do not store file permissions
    #[arg(long)]
    pub no_permissions: bool,

    /// Overwrite output file if exists
    #[arg(short = 'f', long)]
    pub force: bool,

    /// List what would be archived without writing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,
}

#[derive(clap::Args)]
pub struct PatternsArgs {
    /// Directory whose ignore file is read
    #[arg(value_name = "SOURCE", default_value = ".")]
    pub source: PathBuf,

    #[command(flatten)]
    pub patterns: PatternArgs,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse byte size with optional suffix (K, M, G, T)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('T') {
        (stripped, 1024_u64.pow(4))
    } else if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}
