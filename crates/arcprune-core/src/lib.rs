//! Path-exclusion engine for building archives of a source tree.
//!
//! `arcprune-core` decides which files under a root directory go into an
//! archive. A [`PatternSet`] built from explicit patterns and an ignore file
//! says what is excluded; a [`TreeWalker`] visits the tree depth-first,
//! never entering excluded directories, and hands each surviving file to an
//! [`ArchiveSink`](sink::ArchiveSink). Files inside pruned directories can
//! still be archived through an explicit allow-list.
//!
//! # Examples
//!
//! ```no_run
//! use arcprune_core::ArchiveConfig;
//! use arcprune_core::create_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ArchiveConfig::default()
//!     .with_exclude_patterns(vec![".git/".into(), ".vscode/".into(), "*.log".into()])
//!     .with_allow_list(vec![".vscode/extensions.json".into()]);
//! let result = create_archive("my-project", "my-project.zip", &config)?;
//! println!("Archived {} files", result.total_emitted());
//! # Ok(())
//! # }
//! ```
//!
//! Lower-level pieces can be combined directly:
//!
//! ```no_run
//! use arcprune_core::PatternSet;
//! use arcprune_core::TreeWalker;
//! use arcprune_core::sink::CollectingSink;
//! use std::path::Path;
//!
//! let patterns = PatternSet::build(["node_modules/", "*.pyc"], Vec::<String>::new());
//! let mut sink = CollectingSink::new();
//! TreeWalker::new(Path::new("."), &patterns).walk(&mut sink)?;
//! # Ok::<(), arcprune_core::ArcpruneError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod compression;
pub mod config;
pub mod error;
pub mod formats;
pub mod pattern;
pub mod progress;
pub mod report;
pub mod sink;
pub mod types;
pub mod walker;

pub use api::create_archive;
pub use api::create_archive_with_observer;
pub use api::load_pattern_set;
pub use api::plan_archive;
pub use api::plan_archive_for_output;
pub use api::plan_archive_with_observer;
pub use config::ArchiveConfig;
pub use error::ArcpruneError;
pub use error::Result;
pub use formats::ArchiveFormat;
pub use pattern::PatternSet;
pub use progress::SkipReason;
pub use progress::WalkObserver;
pub use report::WalkResult;
pub use types::RelativePath;
pub use walker::AllowEntry;
pub use walker::TreeWalker;
