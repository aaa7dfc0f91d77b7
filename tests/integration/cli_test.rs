//! Runs the goscan binary and checks its output and exit codes

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Run goscan in `cwd` with a clean home and environment
fn goscan(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_goscan"))
        .args(args)
        .current_dir(cwd)
        .env("HOME", cwd)
        .env("XDG_CONFIG_HOME", cwd.join(".config"))
        .env_remove("RUST_LOG")
        .env_remove("GOSCAN_PATH")
        .env_remove("GOSCAN_EXCLUDE")
        .env_remove("GOSCAN_CAPTURE_COMMENTS")
        .env_remove("GOSCAN_OUTPUT_FORMAT")
        .env_remove("GOSCAN_KEEP_GOING")
        .output()
        .unwrap()
}

#[test]
fn test_json_output() {
    let dir = tempdir().unwrap();
    write(dir.path(), "src/a.go", "package src\n\n// doc\nfunc F() {}\n");

    let output = goscan(dir.path(), &["--output", "json", "--no-progress", "--no-colors"]);
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let packages = value["packages"].as_object().unwrap();
    assert_eq!(packages.len(), 1);
    let (key, package) = packages.iter().next().unwrap();
    assert_eq!(key, "src");
    assert_eq!(package["name"], "src");
}

#[test]
fn test_csv_output_without_comments_has_only_header() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.go", "package p\n\n// doc\nfunc F() {}\n");

    let output = goscan(dir.path(), &["--output", "csv", "--no-comments", "--no-progress"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("Package Dir,Package Name,File,Declaration"));
}

#[test]
fn test_csv_output_lists_comments() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.go", "package p\n\n// doc\nfunc F() {}\n");

    let output = goscan(dir.path(), &["--output", "csv", "--no-progress"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let row = stdout.lines().nth(1).unwrap();
    assert!(row.starts_with(".,p,"));
    assert!(row.ends_with(",F,3,1,// doc"));
}

#[test]
fn test_output_file() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.go", "package p\n");

    let output = goscan(
        dir.path(),
        &["--output", "json", "--output-file", "report.json", "--no-progress"],
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());

    let content = fs::read_to_string(dir.path().join("report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["summary"]["files_parsed"], 1);
}

#[test]
fn test_syntax_error_exits_with_one() {
    let dir = tempdir().unwrap();
    write(dir.path(), "bad.go", "package p\n\nfunc (\n");

    let output = goscan(dir.path(), &["--no-progress"]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("bad.go"), "stderr: {}", stderr);
}

#[test]
fn test_keep_going_reports_errors_and_exits_with_one() {
    let dir = tempdir().unwrap();
    write(dir.path(), "bad.go", "package p\n\nfunc (\n");
    write(dir.path(), "good/good.go", "package good\n");

    let output = goscan(dir.path(), &["--keep-going", "--output", "json", "--no-progress"]);
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["errors"].as_array().unwrap().len(), 1);
    assert_eq!(value["summary"]["files_parsed"], 1);
}

#[test]
fn test_bad_config_exits_with_two() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.go", "package p\n");
    write(dir.path(), "broken.toml", "exclude_dirs = [\n");

    let output = goscan(dir.path(), &["--config", "broken.toml", "--no-progress"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_missing_path_exits_with_one() {
    let dir = tempdir().unwrap();

    let output = goscan(dir.path(), &["--path", "nowhere", "--no-progress"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_init_creates_config_once() {
    let dir = tempdir().unwrap();

    let output = goscan(dir.path(), &["--init"]);
    assert_eq!(output.status.code(), Some(0));
    let config = dir.path().join(".goscan.toml");
    assert!(config.is_file());

    // A second run leaves the existing file alone
    fs::write(&config, "capture_comments = false\n").unwrap();
    let output = goscan(dir.path(), &["--init"]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(fs::read_to_string(&config).unwrap(), "capture_comments = false\n");
}

#[test]
fn test_default_config_file_is_picked_up() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.go", "package p\n");
    write(dir.path(), "gen/g.go", "package gen\n");
    write(dir.path(), ".goscan.toml", "exclude_dirs = [\"gen\"]\n");

    let output = goscan(dir.path(), &["--output", "json", "--no-progress"]);
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["packages"].as_object().unwrap().len(), 1);
}
