//! Example: previewing what would be archived
//!
//! Run with: `cargo run --example plan_archive -- <dir>`

use arcprune_core::ArchiveConfig;
use arcprune_core::plan_archive;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let root = std::env::args().nth(1).unwrap_or_else(|| ".".to_string());

    let config = ArchiveConfig::default()
        .with_exclude_patterns(vec![
            ".git/".into(),
            "node_modules/".into(),
            ".vscode/".into(),
            "__pycache__/".into(),
            "*.pyc".into(),
        ])
        .with_allow_list(vec![".vscode/extensions.json".into()]);

    // The allow-listed file must exist for the plan to succeed.
    let config = if std::path::Path::new(&root)
        .join(".vscode/extensions.json")
        .is_file()
    {
        config
    } else {
        config.with_allow_list(Vec::new())
    };

    let (sink, result) = plan_archive(&root, &config)?;
    for path in sink.archive_paths() {
        println!("{path}");
    }
    println!(
        "\n{} files, {} excluded, {} directories pruned",
        result.total_emitted(),
        result.files_excluded,
        result.dirs_pruned
    );

    Ok(())
}
