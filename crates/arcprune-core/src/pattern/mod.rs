//! Exclusion patterns.
//!
//! Patterns come from two sources: an explicit list supplied by the caller
//! and the ignore file at the source root. Both are merged into one
//! [`PatternSet`] whose [`matches`](PatternSet::matches) function is the only
//! place exclusion is decided.

pub mod ignore_file;
pub mod rule;
pub mod set;

pub use rule::Pattern;
pub use rule::PatternKind;
pub use set::PatternSet;
