//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use arcprune_core::PatternSet;
use arcprune_core::WalkResult;
use arcprune_core::types::RelativePath;
use console::Term;
use console::style;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn heading(&self, text: &str) {
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {text}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(text);
        }
    }

    fn summary(&self, result: &WalkResult) {
        let _ = self.term.write_line(&format!(
            "  Files added:      {}",
            Self::format_number(result.files_emitted)
        ));
        if result.allow_listed > 0 {
            let _ = self.term.write_line(&format!(
                "  Included:         {}",
                Self::format_number(result.allow_listed)
            ));
        }
        let _ = self.term.write_line(&format!(
            "  Files excluded:   {}",
            Self::format_number(result.files_excluded)
        ));
        let _ = self.term.write_line(&format!(
            "  Dirs pruned:      {}",
            Self::format_number(result.dirs_pruned)
        ));
        let _ = self.term.write_line(&format!(
            "  Total size:       {}",
            Self::format_size(result.bytes_emitted)
        ));

        if result.entries_skipped > 0 {
            let _ = self
                .term
                .write_line(&format!("  Skipped:          {}", result.entries_skipped));
        }

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Dirs visited:     {}", result.dirs_visited));
            let _ = self
                .term
                .write_line(&format!("  Duration:         {:?}", result.duration));
        }

        if result.has_warnings() {
            let _ = self.term.write_line("");
            if self.use_colors {
                let _ = self
                    .term
                    .write_line(&format!("{}", style("Warnings:").yellow().bold()));
            } else {
                let _ = self.term.write_line("Warnings:");
            }
            for warning in &result.warnings {
                let _ = self.term.write_line(&format!("  - {warning}"));
            }
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_archive_result(&self, output: &Path, result: &WalkResult) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.heading(&format!("Archive created: {}", output.display()));
        let _ = self.term.write_line("");
        self.summary(result);

        Ok(())
    }

    fn format_plan(&self, paths: &[&RelativePath], result: &WalkResult) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        // Verbose mode already printed every path while walking.
        if !self.verbose {
            for path in paths {
                let _ = self.term.write_line(path.as_str());
            }
            let _ = self.term.write_line("");
        }

        self.heading(&format!(
            "Dry run: {} files would be archived",
            Self::format_number(result.total_emitted())
        ));
        self.summary(result);

        Ok(())
    }

    fn format_patterns(&self, source: &Path, patterns: &PatternSet) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self.term.write_line(&format!(
            "Exclusion patterns for {} ({}):",
            source.display(),
            patterns.len()
        ));
        let width = patterns.iter().map(|p| p.source().len()).max().unwrap_or(0);
        for pattern in patterns.iter() {
            let kind = if self.use_colors {
                style(pattern.kind().to_string()).dim().to_string()
            } else {
                pattern.kind().to_string()
            };
            let _ = self
                .term
                .write_line(&format!("  {:<width$}  {kind}", pattern.source()));
        }

        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
