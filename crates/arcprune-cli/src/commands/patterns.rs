//! Patterns command implementation.

use crate::cli::PatternsArgs;
use crate::commands::apply_pattern_args;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use arcprune_core::ArchiveConfig;
use arcprune_core::load_pattern_set;

pub fn execute(args: &PatternsArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    if !args.source.is_dir() {
        bail!("Source directory not found: {}", args.source.display());
    }

    let config = apply_pattern_args(ArchiveConfig::default(), &args.patterns);
    let patterns = load_pattern_set(&args.source, &config);
    formatter.format_patterns(&args.source, &patterns)
}
