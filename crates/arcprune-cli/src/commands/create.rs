//! Create command implementation.

use crate::cli::CreateArgs;
use crate::commands::apply_pattern_args;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::progress::CliProgress;
use anyhow::Context;
use anyhow::Result;
use arcprune_core::ArchiveConfig;
use arcprune_core::create_archive_with_observer;
use arcprune_core::plan_archive_for_output;
use chrono::Local;
use std::path::Path;
use std::path::PathBuf;

/// How the command renders while walking.
#[derive(Debug, Clone, Copy)]
pub struct DisplayMode {
    pub verbose: bool,
    pub quiet: bool,
    pub json: bool,
}

pub fn execute(args: &CreateArgs, formatter: &dyn OutputFormatter, display: DisplayMode) -> Result<()> {
    let mut config = apply_pattern_args(ArchiveConfig::default(), &args.patterns)
        .with_allow_list(args.include.clone())
        .with_follow_symlinks(args.follow_symlinks)
        .with_max_file_size(args.max_file_size)
        .with_preserve_permissions(!args.no_permissions)
        .with_format(args.format)
        .with_overwrite(args.force);
    if let Some(level) = args.compression_level {
        config = config.with_compression_level(level);
    }

    let show_spinner = !display.quiet && !display.json && CliProgress::should_show();
    let verbose_lines = display.verbose && !display.json;

    let output = match &args.output {
        Some(output) => output.clone(),
        None => {
            let (output, previous) = default_output(&args.source)?;
            // Earlier timestamped archives of the same tree
            config.exclude_patterns.push(previous);
            output
        }
    };

    if args.dry_run {
        let mut progress = CliProgress::new("Scanning", show_spinner, verbose_lines);
        let (sink, result) = add_archive_context(
            plan_archive_for_output(&args.source, &output, &config, &mut progress),
            &args.source,
        )?;
        drop(progress);

        let paths: Vec<_> = sink.entries().iter().map(|(_, rel)| rel).collect();
        return formatter.format_plan(&paths, &result);
    }

    let mut progress = CliProgress::new("Archiving", show_spinner, verbose_lines);
    let result = add_archive_context(
        create_archive_with_observer(&args.source, &output, &config, &mut progress),
        &output,
    )?;
    drop(progress);

    formatter.format_archive_result(&output, &result)
}

/// Returns `<name>-<YYYYmmdd-HHMMSS>.zip` in the current directory, plus a
/// glob matching any archive named that way.
fn default_output(source: &Path) -> Result<(PathBuf, String)> {
    let name = archive_stem(source)?;
    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    Ok((
        PathBuf::from(format!("{name}-{timestamp}.zip")),
        format!("{name}-*.zip"),
    ))
}

fn archive_stem(source: &Path) -> Result<String> {
    let resolved = source
        .canonicalize()
        .with_context(|| format!("Source directory not found: {}", source.display()))?;
    Ok(resolved
        .file_name()
        .map_or_else(|| "archive".to_string(), |n| n.to_string_lossy().into_owned()))
}
