//! Command implementations.

pub mod completion;
pub mod create;
pub mod patterns;

use crate::cli::PatternArgs;
use arcprune_core::ArchiveConfig;

/// Applies the shared pattern flags to a configuration.
pub fn apply_pattern_args(config: ArchiveConfig, args: &PatternArgs) -> ArchiveConfig {
    let mut excludes = if args.no_default_excludes {
        Vec::new()
    } else {
        config.exclude_patterns.clone()
    };
    excludes.extend(args.exclude.iter().cloned());

    let ignore_file = (!args.no_ignore_file).then(|| args.ignore_file.clone());

    config
        .with_exclude_patterns(excludes)
        .with_ignore_file(ignore_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(exclude: &[&str], no_default: bool, no_ignore: bool) -> PatternArgs {
        PatternArgs {
            exclude: exclude.iter().map(ToString::to_string).collect(),
            no_default_excludes: no_default,
            ignore_file: ".gitignore".to_string(),
            no_ignore_file: no_ignore,
        }
    }

    #[test]
    fn test_apply_pattern_args_appends_to_defaults() {
        let config = apply_pattern_args(ArchiveConfig::default(), &args(&["*.log"], false, false));
        assert_eq!(config.exclude_patterns, vec![".git/", "*.log"]);
        assert_eq!(config.ignore_file.as_deref(), Some(".gitignore"));
    }

    #[test]
    fn test_apply_pattern_args_without_defaults() {
        let config = apply_pattern_args(ArchiveConfig::default(), &args(&["dist/"], true, true));
        assert_eq!(config.exclude_patterns, vec!["dist/"]);
        assert_eq!(config.ignore_file, None);
    }
}
