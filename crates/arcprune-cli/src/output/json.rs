//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use arcprune_core::PatternSet;
use arcprune_core::WalkResult;
use arcprune_core::types::RelativePath;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct Counts {
    files_added: usize,
    files_included: usize,
    files_excluded: usize,
    dirs_pruned: usize,
    dirs_visited: usize,
    entries_skipped: usize,
    bytes_added: u64,
    duration_ms: u128,
    warnings: Vec<String>,
}

impl From<&WalkResult> for Counts {
    fn from(result: &WalkResult) -> Self {
        Self {
            files_added: result.files_emitted,
            files_included: result.allow_listed,
            files_excluded: result.files_excluded,
            dirs_pruned: result.dirs_pruned,
            dirs_visited: result.dirs_visited,
            entries_skipped: result.entries_skipped,
            bytes_added: result.bytes_emitted,
            duration_ms: result.duration.as_millis(),
            warnings: result.warnings.clone(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_archive_result(&self, output: &Path, result: &WalkResult) -> Result<()> {
        #[derive(Serialize)]
        struct CreateOutput {
            output_path: String,
            #[serde(flatten)]
            counts: Counts,
        }

        let data = CreateOutput {
            output_path: output.display().to_string(),
            counts: Counts::from(result),
        };
        Self::output(&JsonOutput::success("create", data))
    }

    fn format_plan(&self, paths: &[&RelativePath], result: &WalkResult) -> Result<()> {
        #[derive(Serialize)]
        struct PlanOutput<'a> {
            entries: Vec<&'a str>,
            #[serde(flatten)]
            counts: Counts,
        }

        let data = PlanOutput {
            entries: paths.iter().map(|p| p.as_str()).collect(),
            counts: Counts::from(result),
        };
        Self::output(&JsonOutput::success("plan", data))
    }

    fn format_patterns(&self, source: &Path, patterns: &PatternSet) -> Result<()> {
        #[derive(Serialize)]
        struct PatternEntry<'a> {
            pattern: &'a str,
            glob: bool,
            directories_only: bool,
            anchored: bool,
        }

        #[derive(Serialize)]
        struct PatternsOutput<'a> {
            source: String,
            patterns: Vec<PatternEntry<'a>>,
        }

        let data = PatternsOutput {
            source: source.display().to_string(),
            patterns: patterns
                .iter()
                .map(|p| PatternEntry {
                    pattern: p.source(),
                    glob: p.kind().is_glob(),
                    directories_only: p.kind().is_dir_only(),
                    anchored: p.is_anchored(),
                })
                .collect(),
        };
        Self::output(&JsonOutput::success("patterns", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("error", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_from_walk_result() {
        let result = WalkResult {
            files_emitted: 3,
            allow_listed: 1,
            files_excluded: 2,
            ..WalkResult::default()
        };

        let json = serde_json::to_value(Counts::from(&result)).unwrap();
        assert_eq!(json["files_added"], 3);
        assert_eq!(json["files_included"], 1);
        assert_eq!(json["files_excluded"], 2);
        assert_eq!(json["warnings"], serde_json::json!([]));
    }

    #[test]
    fn test_error_output_structure() {
        let output = JsonOutput::<()>::error("create", "boom");
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "boom");
        assert!(json.get("data").is_none());
    }
}
