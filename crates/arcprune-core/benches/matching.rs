//! Benchmarks for pattern matching and tree walking.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use arcprune_core::PatternSet;
use arcprune_core::TreeWalker;
use arcprune_core::sink::CollectingSink;
use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use tempfile::TempDir;

const PATTERNS: &[&str] = &[
    ".git/",
    "node_modules/",
    "__pycache__/",
    ".vscode/",
    "target/",
    "*.pyc",
    "*.log",
    "*.tmp",
    ".DS_Store",
    "dist/",
];

fn sample_paths() -> Vec<(String, String, bool)> {
    let mut paths = Vec::new();
    for dir in ["src", "src/core", "tests", "docs/guide", "node_modules/pkg"] {
        for file in ["main.rs", "lib.py", "app.pyc", "debug.log", "README.md"] {
            paths.push((format!("{dir}/{file}"), file.to_string(), false));
        }
        let basename = dir.rsplit('/').next().unwrap().to_string();
        paths.push((dir.to_string(), basename, true));
    }
    paths
}

/// Creates `width` directories of `files` files, plus a pruned
/// `node_modules` subtree of the same size.
fn create_tree(root: &Path, width: usize, files: usize) {
    for top in ["src", "node_modules"] {
        for d in 0..width {
            let dir = root.join(top).join(format!("dir_{d:03}"));
            fs::create_dir_all(&dir).unwrap();
            for f in 0..files {
                fs::write(dir.join(format!("file_{f:03}.txt")), "x").unwrap();
            }
        }
    }
}

fn bench_matches(c: &mut Criterion) {
    let set = PatternSet::build(PATTERNS, Vec::<String>::new());
    let paths = sample_paths();

    c.bench_function("pattern_set_matches", |b| {
        b.iter(|| {
            paths
                .iter()
                .filter(|(rel, base, is_dir)| set.matches(black_box(rel), base, *is_dir))
                .count()
        });
    });
}

fn bench_build(c: &mut Criterion) {
    let lines: Vec<String> = (0..200).map(|i| format!("generated_{i}/*.out")).collect();

    c.bench_function("pattern_set_build_200_lines", |b| {
        b.iter(|| PatternSet::build(PATTERNS, black_box(&lines)));
    });
}

fn bench_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("walk");
    let set = PatternSet::build(PATTERNS, Vec::<String>::new());

    for width in [10, 50] {
        let temp = TempDir::new().unwrap();
        create_tree(temp.path(), width, 20);

        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, _| {
            b.iter(|| {
                let mut sink = CollectingSink::new();
                TreeWalker::new(temp.path(), &set).walk(&mut sink).unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_matches, bench_build, bench_walk);
criterion_main!(benches);
