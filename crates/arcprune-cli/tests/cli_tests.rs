//! Integration tests for arcprune-cli.
//!
//! Note: Tests use `unwrap`/`expect` which is acceptable in test code.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn arcprune_cmd() -> Command {
    cargo_bin_cmd!("arcprune")
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Source tree with the usual suspects.
fn project() -> TempDir {
    let temp = TempDir::new().expect("failed to create temp dir");
    write(temp.path(), "a.txt", "a");
    write(temp.path(), "b.log", "b");
    write(temp.path(), ".git/HEAD", "ref: refs/heads/main");
    write(temp.path(), "node_modules/pkg/index.js", "");
    write(temp.path(), ".vscode/settings.json", "{}");
    write(temp.path(), ".vscode/extensions.json", "{}");
    write(temp.path(), "src/main.rs", "fn main() {}");
    temp
}

fn zip_names(path: &Path) -> Vec<String> {
    let archive = zip::ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
    let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
    names.sort();
    names
}

#[test]
fn test_version_flag() {
    arcprune_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("arcprune"));
}

#[test]
fn test_create_help() {
    arcprune_cmd()
        .arg("create")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--exclude"))
        .stdout(predicate::str::contains("--include"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_create_zip_with_exclusions() {
    let src = project();
    let out = TempDir::new().unwrap();
    let output = out.path().join("project.zip");

    arcprune_cmd()
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(&output)
        .args(["-x", "node_modules/", "-x", "*.log", "-x", ".vscode/"])
        .args(["--include", ".vscode/extensions.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Archive created"));

    assert_eq!(
        zip_names(&output),
        vec![".vscode/extensions.json", "a.txt", "src/main.rs"]
    );
}

#[test]
fn test_create_reads_gitignore() {
    let src = project();
    write(src.path(), ".gitignore", "node_modules/\n*.log\n");
    let out = TempDir::new().unwrap();
    let output = out.path().join("project.zip");

    arcprune_cmd()
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let names = zip_names(&output);
    assert!(names.contains(&"a.txt".to_string()));
    assert!(!names.iter().any(|n| n.starts_with("node_modules/")));
    assert!(!names.iter().any(|n| n.starts_with(".git/")));
    assert!(!names.contains(&"b.log".to_string()));
}

#[test]
fn test_create_no_ignore_file() {
    let src = project();
    write(src.path(), ".gitignore", "*.log\n");
    let out = TempDir::new().unwrap();
    let output = out.path().join("project.zip");

    arcprune_cmd()
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(&output)
        .arg("--no-ignore-file")
        .assert()
        .success();

    assert!(zip_names(&output).contains(&"b.log".to_string()));
}

#[test]
fn test_create_verbose_lists_decisions() {
    let src = project();
    let out = TempDir::new().unwrap();

    arcprune_cmd()
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(out.path().join("project.tar.gz"))
        .args(["-x", "*.log"])
        .arg("--verbose")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added: a.txt"))
        .stdout(predicate::str::contains("Excluded: b.log"))
        .stdout(predicate::str::contains("Excluded: .git/"));
}

#[test]
fn test_create_dry_run_writes_nothing() {
    let src = project();
    let out = TempDir::new().unwrap();
    let output = out.path().join("project.zip");

    arcprune_cmd()
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(&output)
        .args(["-x", "node_modules/", "-x", ".vscode/"])
        .arg("--dry-run")
        .assert()
        .success()
        .stdout(predicate::str::contains("src/main.rs"))
        .stdout(predicate::str::contains("node_modules").not())
        .stdout(predicate::str::contains("Dry run"));

    assert!(!output.exists());
}

#[test]
fn test_create_json_output() {
    let src = project();
    let out = TempDir::new().unwrap();
    let output = out.path().join("project.zip");

    let assert = arcprune_cmd()
        .arg("--json")
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(&output)
        .args(["-x", "node_modules/", "-x", ".vscode/", "-x", "*.log"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["operation"], "create");
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["files_added"], 2);
    assert_eq!(json["data"]["dirs_pruned"], 3);
    assert_eq!(json["data"]["files_excluded"], 1);
}

#[test]
fn test_create_refuses_existing_output() {
    let src = project();
    let out = TempDir::new().unwrap();
    let output = out.path().join("project.zip");
    fs::write(&output, "old").unwrap();

    arcprune_cmd()
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--force"));

    arcprune_cmd()
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(&output)
        .arg("--force")
        .assert()
        .success();
}

#[test]
fn test_create_missing_include_fails() {
    let src = project();
    let out = TempDir::new().unwrap();

    arcprune_cmd()
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(out.path().join("project.zip"))
        .args(["--include", "does/not/exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does/not/exist.txt"));
}

#[test]
fn test_create_nonexistent_source() {
    let out = TempDir::new().unwrap();

    arcprune_cmd()
        .arg("create")
        .arg(out.path().join("nope"))
        .arg("-o")
        .arg(out.path().join("x.zip"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_create_unknown_format() {
    let src = project();
    let out = TempDir::new().unwrap();

    arcprune_cmd()
        .arg("create")
        .arg(src.path())
        .arg("-o")
        .arg(out.path().join("project.rar"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("--format"));
}

#[test]
fn test_create_default_output_name() {
    let src = project();

    arcprune_cmd()
        .current_dir(src.path())
        .arg("create")
        .assert()
        .success();

    let archives: Vec<_> = fs::read_dir(src.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".zip"))
        .collect();
    assert_eq!(archives.len(), 1);

    // The archive lives inside the source tree but never contains itself.
    let names = zip_names(&src.path().join(&archives[0]));
    assert!(!names.iter().any(|n| n.ends_with(".zip")));
    assert!(names.contains(&"a.txt".to_string()));
}

#[test]
fn test_dry_run_plans_what_create_writes() {
    let temp = TempDir::new().unwrap();
    let proj = temp.path().join("proj");
    write(&proj, "a.txt", "a");
    write(&proj, "proj-20250101-000000.zip", "older build");

    let assert = arcprune_cmd()
        .current_dir(&proj)
        .args(["--json", "create", "--dry-run"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let plan: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(plan["data"]["entries"], serde_json::json!(["a.txt"]));
    assert_eq!(plan["data"]["files_added"], 1);

    arcprune_cmd()
        .current_dir(&proj)
        .arg("create")
        .assert()
        .success();

    let created: Vec<_> = fs::read_dir(&proj)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".zip") && n != "proj-20250101-000000.zip")
        .collect();
    assert_eq!(created.len(), 1);
    assert_eq!(zip_names(&proj.join(&created[0])), vec!["a.txt"]);
}

#[test]
fn test_patterns_command() {
    let src = project();
    write(src.path(), ".gitignore", "# deps\nnode_modules/\n*.pyc\n");

    arcprune_cmd()
        .arg("patterns")
        .arg(src.path())
        .args(["-x", "dist"])
        .assert()
        .success()
        .stdout(predicate::str::contains(".git/"))
        .stdout(predicate::str::contains("node_modules/"))
        .stdout(predicate::str::contains("*.pyc"))
        .stdout(predicate::str::contains("dist"))
        .stdout(predicate::str::contains("# deps").not());
}

#[test]
fn test_patterns_json() {
    let src = project();

    let assert = arcprune_cmd()
        .args(["--json", "patterns"])
        .arg(src.path())
        .args(["-x", "*.log"])
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let patterns = json["data"]["patterns"].as_array().unwrap();
    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns[1]["pattern"], "*.log");
    assert_eq!(patterns[1]["glob"], true);
    assert_eq!(patterns[0]["directories_only"], true);
}

#[test]
fn test_completion_bash() {
    arcprune_cmd()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("arcprune"));
}
