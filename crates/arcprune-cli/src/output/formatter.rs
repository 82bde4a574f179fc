//! Output formatter trait for CLI results.

use anyhow::Result;
use arcprune_core::PatternSet;
use arcprune_core::WalkResult;
use arcprune_core::types::RelativePath;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the result of writing an archive
    fn format_archive_result(&self, output: &Path, result: &WalkResult) -> Result<()>;

    /// Format a dry run: the paths that would be archived
    fn format_plan(&self, paths: &[&RelativePath], result: &WalkResult) -> Result<()>;

    /// Format the effective pattern set of a directory
    fn format_patterns(&self, source: &Path, patterns: &PatternSet) -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> JsonOutput<()> {
        JsonOutput {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
