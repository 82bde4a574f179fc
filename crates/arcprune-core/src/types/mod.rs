//! Path types shared by pattern matching and archive writing.

pub mod relative_path;

pub use relative_path::RelativePath;
