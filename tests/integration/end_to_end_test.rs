//! Whole-tree scans checked against the expected package layout

use goscan::{Settings, Walker};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn test_single_package_with_test_and_vendor_files() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "pkg/a.go", "package pkg\n\n// doc\nfunc F() {}\n");
    write(root, "pkg/a_test.go", "package pkg\n\nfunc TestF() {}\n");
    write(root, "pkg/vendor/b.go", "package b\n\n// hidden\nfunc B() {}\n");

    let result = goscan::scan(root, &[], true).unwrap();

    assert_eq!(result.len(), 1);
    let (key, package) = result.iter().next().unwrap();
    assert!(key.ends_with("pkg"), "unexpected key {}", key);
    assert_eq!(package.name, "pkg");
    assert_eq!(package.len(), 1);

    let file = package.files.values().next().unwrap();
    assert_eq!(file.file_name(), "a.go");
    assert!(file.path.is_absolute());
    assert!(package.contains(&file.path));

    let comments = file.comments.as_ref().unwrap();
    let texts: Vec<_> = comments.get("F").unwrap().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["// doc"]);
    assert_eq!(comments.declarations().count(), 1);
}

#[test]
fn test_module_layout() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "go.mod", "module example.com/m\n");
    write(root, "main.go", "package main\n\n// main starts the program.\nfunc main() {}\n");
    write(root, "internal/store/store.go", "package store\n\n// Store keeps things.\ntype Store struct{}\n");
    write(
        root,
        "internal/store/get.go",
        "package store\n\n// Get returns a thing.\nfunc (s *Store) Get() {}\n",
    );
    write(root, "README.md", "# m\n");

    let report = Walker::new(Settings {
        scan_path: root.to_path_buf(),
        ..Settings::default()
    })
    .scan_report()
    .unwrap();

    let packages = &report.packages;
    assert_eq!(packages.len(), 2);
    assert_eq!(packages.file_count(), 3);
    assert!(!report.has_errors());
    assert_eq!(report.summary.files_parsed, 3);
    assert_eq!(report.summary.files_skipped, 2);

    let store = packages
        .iter()
        .find(|(key, _)| key.ends_with("internal/store"))
        .map(|(_, package)| package)
        .unwrap();
    assert_eq!(store.name, "store");

    // Files inside a package come back in path order
    let names: Vec<_> = store.files.values().map(|f| f.file_name()).collect();
    assert_eq!(names, vec!["get.go", "store.go"]);

    let get = &store.files.values().next().unwrap();
    let comments = get.comments.as_ref().unwrap();
    assert!(comments.get("(s *Store) Get").is_some());
}

#[test]
fn test_report_serializes_to_json() {
    let dir = tempdir().unwrap();
    write(dir.path(), "pkg/a.go", "package pkg\n\n// doc\nfunc F() {}\n");

    let report = Walker::new(Settings {
        scan_path: dir.path().to_path_buf(),
        ..Settings::default()
    })
    .scan_report()
    .unwrap();

    let value: serde_json::Value = serde_json::to_value(&report).unwrap();
    let packages = value["packages"].as_object().unwrap();
    assert_eq!(packages.len(), 1);

    let (_, package) = packages.iter().next().unwrap();
    assert_eq!(package["name"], "pkg");

    let (_, file) = package["files"].as_object().unwrap().iter().next().unwrap();
    assert_eq!(file["package_name"], "pkg");
    assert_eq!(file["comments"]["F"][0]["text"], "// doc");
    assert_eq!(file["comments"]["F"][0]["position"]["line"], 3);
    assert_eq!(value["summary"]["files_parsed"], 1);
}

#[test]
fn test_empty_tree() {
    let dir = tempdir().unwrap();
    write(dir.path(), "docs/notes.txt", "nothing to see\n");

    let result = goscan::scan(dir.path(), &[], true).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.file_count(), 0);
}
