use std::fs;
use std::path::PathBuf;

use foldertree_core::{TreeItem, parse};
use foldertree_ops::{ItemErrorKind, MaterializeResult, materialize, materialize_text, start_materialize};
use foldertree_scan::{ScanConfig, TreeScanner};
use tempfile::TempDir;

const SAMPLE: &str = "\
proj/
├── src/
│   └── main.rs
└── README.md
";

/// Every (name, is_dir, path) triple in a diagram, sorted.
fn triples(items: &[TreeItem]) -> Vec<(String, bool, PathBuf)> {
    let mut out: Vec<_> = items
        .iter()
        .skip(1)
        .map(|i| (i.name.to_string(), i.is_dir, i.full_path.clone()))
        .collect();
    out.sort();
    out
}

#[test]
fn test_materialize_sample() {
    let temp = TempDir::new().unwrap();
    let report = materialize_text(SAMPLE, temp.path()).unwrap();

    assert_eq!(report.root_path, temp.path().join("proj"));
    assert_eq!(report.folders_created, 2);
    assert_eq!(report.files_created, 2);
    assert!(report.is_success());

    let root = temp.path().join("proj");
    assert!(root.join("src").is_dir());
    assert_eq!(fs::metadata(root.join("src/main.rs")).unwrap().len(), 0);
    assert_eq!(fs::metadata(root.join("README.md")).unwrap().len(), 0);
}

#[test]
fn test_materialize_twice_creates_nothing_new() {
    let temp = TempDir::new().unwrap();
    materialize_text(SAMPLE, temp.path()).unwrap();
    fs::write(temp.path().join("proj/README.md"), "hello").unwrap();

    let report = materialize_text(SAMPLE, temp.path()).unwrap();
    assert_eq!(report.folders_created, 0);
    assert_eq!(report.files_created, 0);
    assert_eq!(report.already_present, 3);
    assert!(report.is_success());
    assert_eq!(
        fs::read_to_string(temp.path().join("proj/README.md")).unwrap(),
        "hello"
    );
}

#[test]
fn test_missing_base_is_created() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("deep/out");

    let report = materialize_text(SAMPLE, &base).unwrap();
    assert!(report.is_success());
    assert!(base.join("proj/src/main.rs").is_file());
}

#[test]
fn test_conflict_does_not_stop_other_items() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("proj")).unwrap();
    fs::write(temp.path().join("proj/src"), "not a dir").unwrap();

    let report = materialize_text(SAMPLE, temp.path()).unwrap();

    // src/ conflicts, main.rs then cannot get a parent directory.
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].kind, ItemErrorKind::Conflict);
    assert_eq!(report.errors[0].name, "src");
    assert_eq!(report.files_created, 1);
    assert!(temp.path().join("proj/README.md").is_file());
}

#[test]
fn test_scan_parse_materialize_roundtrip() {
    let source = TempDir::new().unwrap();
    let root = source.path().join("app");
    fs::create_dir_all(root.join("src/bin")).unwrap();
    fs::create_dir_all(root.join("assets/empty")).unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();
    fs::write(root.join("src/bin/cli.rs"), "fn main() {}").unwrap();
    fs::write(root.join("src/lib.rs"), "").unwrap();
    fs::write(root.join("docs/guide.md"), "# Guide").unwrap();
    fs::write(root.join("Cargo.toml"), "").unwrap();

    let scanner = TreeScanner::new();
    let original = scanner.scan(&ScanConfig::new(&root)).unwrap();
    let items = parse(&original.text).unwrap();
    assert_eq!(items.len() as u64, original.item_count + 1);

    let target = TempDir::new().unwrap();
    let report = materialize(&items, target.path()).unwrap();
    assert!(report.is_success());
    assert_eq!(report.folders_created as u64, original.stats.total_dirs + 1);
    assert_eq!(report.files_created as u64, original.stats.total_files);

    let rebuilt = scanner
        .scan(&ScanConfig::new(target.path().join("app")))
        .unwrap();
    assert_eq!(rebuilt.text, original.text);
    assert_eq!(triples(&parse(&rebuilt.text).unwrap()), triples(&items));
}

#[tokio::test]
async fn test_start_materialize_sample() {
    let temp = TempDir::new().unwrap();
    let items = parse(SAMPLE).unwrap();

    let mut rx = start_materialize(items, temp.path().to_path_buf());
    let mut last_progress = None;
    let mut report = None;

    while let Some(msg) = rx.recv().await {
        match msg {
            MaterializeResult::Progress(p) => last_progress = Some(p),
            MaterializeResult::Complete(result) => report = Some(result.unwrap()),
        }
    }

    let progress = last_progress.unwrap();
    assert_eq!(progress.items_completed, progress.items_total);
    assert_eq!(progress.percentage(), 100.0);

    let report = report.unwrap();
    assert_eq!(report.folders_created, 2);
    assert_eq!(report.files_created, 2);
}

#[test]
fn test_roundtrip_keeps_directory_named_like_placeholder() {
    let source = TempDir::new().unwrap();
    let root = source.path().join("app");
    fs::create_dir_all(root.join("[read error]")).unwrap();
    fs::create_dir_all(root.join("a")).unwrap();
    fs::write(root.join("[read error]/inner.txt"), "").unwrap();

    let original = TreeScanner::new().scan(&ScanConfig::new(&root)).unwrap();
    let items = parse(&original.text).unwrap();
    assert_eq!(items.len() as u64, original.item_count + 1);

    let target = TempDir::new().unwrap();
    let report = materialize(&items, target.path()).unwrap();
    assert!(report.is_success());
    assert!(target.path().join("app/[read error]/inner.txt").is_file());
    assert!(!target.path().join("app/inner.txt").exists());
}
