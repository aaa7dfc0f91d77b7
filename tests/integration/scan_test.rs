//! Traversal, exclusion and grouping behavior of a scan

use goscan::{scan, ScanError, ScanResult, Settings, Walker};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn all_paths(result: &ScanResult) -> Vec<PathBuf> {
    result.files().map(|f| f.path.clone()).collect()
}

fn abs(path: PathBuf) -> PathBuf {
    std::path::absolute(path).unwrap()
}

#[test]
fn test_every_accepted_file_appears_exactly_once() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "main.go", "package main\n");
    write(root, "util/strings.go", "package util\n");
    write(root, "util/numbers.go", "package util\n");
    write(root, "util/deep/inner.go", "package deep\n");

    let result = scan(root, &[], false).unwrap();
    let mut paths = all_paths(&result);
    paths.sort();

    let mut expected = vec![
        abs(root.join("main.go")),
        abs(root.join("util/deep/inner.go")),
        abs(root.join("util/numbers.go")),
        abs(root.join("util/strings.go")),
    ];
    expected.sort();

    assert_eq!(paths, expected);
    assert_eq!(result.len(), 3);
}

#[test]
fn test_scan_is_idempotent() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.go", "package a\n\n// F does things.\nfunc F() {}\n");
    write(root, "b/b.go", "package b\n\n// V is a value.\nvar V = 1\n");

    let first = scan(root, &[], true).unwrap();
    let second = scan(root, &[], true).unwrap();

    let keys: Vec<_> = first.package_paths().collect();
    assert_eq!(keys, second.package_paths().collect::<Vec<_>>());
    assert_eq!(all_paths(&first), all_paths(&second));

    for (a, b) in first.files().zip(second.files()) {
        assert_eq!(a.package_name, b.package_name);
        assert_eq!(a.comments, b.comments);
    }
}

#[test]
fn test_vendor_directories_are_skipped_at_any_depth() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.go", "package a\n");
    write(root, "vendor/dep/dep.go", "package dep\n");
    write(root, "sub/vendor/x.go", "package x\n");
    write(root, "sub/s.go", "package sub\n");

    let result = scan(root, &[], false).unwrap();

    assert_eq!(result.file_count(), 2);
    assert!(all_paths(&result)
        .iter()
        .all(|p| !p.components().any(|c| c.as_os_str() == "vendor")));
}

#[test]
fn test_hidden_directories_are_skipped() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.go", "package a\n");
    write(root, ".git/hooks/h.go", "package hooks\n");
    write(root, ".cache/c.go", "package c\n");

    let result = scan(root, &[], false).unwrap();
    assert_eq!(result.file_count(), 1);
}

#[test]
fn test_exclusion_is_exact_relative_path() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a/b/skipped.go", "package b\n");
    write(root, "a/b/c/also_skipped.go", "package c\n");
    write(root, "a/kept.go", "package a\n");
    write(root, "x/a/b/kept.go", "package b\n");

    let result = scan(root, &["a/b".to_string()], false).unwrap();

    let mut names: Vec<String> = result.files().map(|f| f.file_name()).collect();
    names.sort();
    assert_eq!(names, vec!["kept.go", "kept.go"]);
    assert_eq!(result.file_count(), 2);
}

#[test]
fn test_test_files_are_skipped_case_insensitively() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "x_TEST.go", "package p\n");
    write(root, "y_Test.go", "package p\n");
    write(root, "z_test.go", "package p\n");
    write(root, "testing.go", "package p\n");

    let result = scan(root, &[], false).unwrap();

    let names: Vec<String> = result.files().map(|f| f.file_name()).collect();
    assert_eq!(names, vec!["testing.go"]);
}

#[test]
fn test_scanning_twice_into_one_result_keeps_first_parse() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.go", "package first\n");

    let walker = Walker::new(Settings {
        scan_path: root.to_path_buf(),
        ..Settings::default()
    });
    let mut result = ScanResult::new();
    walker.scan_into(&mut result).unwrap();

    // Same path, different content: the earlier parse stays
    write(root, "a.go", "package second\n");
    walker.scan_into(&mut result).unwrap();

    assert_eq!(result.file_count(), 1);
    let file = result.files().next().unwrap();
    assert_eq!(file.package_name, "first");
}

#[test]
fn test_package_name_comes_from_first_file() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a.go", "package alpha\n");
    write(root, "b.go", "package beta\n");

    let result = scan(root, &[], false).unwrap();

    assert_eq!(result.len(), 1);
    let (_, package) = result.iter().next().unwrap();
    assert_eq!(package.name, "alpha");
    assert_eq!(package.len(), 2);
}

#[test]
fn test_package_keys_are_lexically_cleaned() {
    let dir = tempdir().unwrap();
    write(dir.path(), "pkg/a.go", "package pkg\n");

    // Same root spelled with `.` and `..` components
    let parent = dir.path().parent().unwrap();
    let name = dir.path().file_name().unwrap();
    let spelled = Path::new(".").join(name).join("pkg").join("..");

    let settings = Settings {
        scan_path: parent.join(&spelled),
        ..Settings::default()
    };
    let result = Walker::new(settings).scan().unwrap();

    let expected = format!("{}/pkg", dir.path().to_string_lossy().replace('\\', "/"));
    let keys: Vec<_> = result.package_paths().collect();
    assert_eq!(keys, vec![expected.as_str()]);
}

#[test]
fn test_unparsable_file_aborts_scan() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "good.go", "package p\n");
    write(root, "sub/bad.go", "package p\n\nfunc (\n");

    let err = scan(root, &[], true).unwrap_err();
    match err {
        ScanError::Syntax { path, .. } => assert!(path.ends_with("sub/bad.go")),
        other => panic!("Expected Syntax error, got {:?}", other),
    }
}

#[test]
fn test_keep_going_returns_partial_report() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "good.go", "package p\n");
    write(root, "sub/bad.go", "not go at all\n");
    write(root, "sub/fine.go", "package sub\n");

    let walker = Walker::new(Settings {
        scan_path: root.to_path_buf(),
        keep_going: true,
        ..Settings::default()
    });
    let report = walker.scan_report().unwrap();

    assert_eq!(report.packages.file_count(), 2);
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].path.ends_with("sub/bad.go"));
}

#[test]
fn test_missing_root() {
    let dir = tempdir().unwrap();
    let err = scan(dir.path().join("missing"), &[], false).unwrap_err();
    assert!(matches!(err, ScanError::InvalidPath { .. }));
}

#[cfg(unix)]
#[test]
fn test_symlink_loop_is_skipped_when_following_links() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "a/a.go", "package a\n");
    std::os::unix::fs::symlink(root.join("a"), root.join("a/loop")).unwrap();

    let walker = Walker::new(Settings {
        scan_path: root.to_path_buf(),
        follow_links: true,
        ..Settings::default()
    });
    let result = walker.scan().unwrap();

    assert_eq!(result.file_count(), 1);
}
