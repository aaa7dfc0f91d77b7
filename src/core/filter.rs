//! Entry exclusion rules applied during traversal

use std::path::Path;

/// Name of the vendored dependency directory
pub const VENDOR_DIR: &str = "vendor";

/// Extension of the source files that get parsed
pub const SOURCE_EXTENSION: &str = "go";

/// Suffix of test files, compared case-insensitively
pub const TEST_SUFFIX: &str = "_test.go";

/// What the walker should do with one entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipDecision {
    /// Do not descend into this directory
    SkipSubtree,
    /// Ignore this file
    SkipEntry,
    /// Descend (directory) or parse (file)
    Accept,
}

/// Decide whether `entry_path` takes part in the scan.
///
/// `root` is the scan root and is always accepted. Exclusion entries match
/// the directory path relative to `root`, written with forward slashes, by
/// exact string equality.
pub fn should_skip(
    root: &Path,
    entry_path: &Path,
    is_dir: bool,
    entry_name: &str,
    exclude_dirs: &[String],
) -> SkipDecision {
    if is_dir {
        if entry_path == root {
            return SkipDecision::Accept;
        }
        if entry_name == VENDOR_DIR || (entry_name.starts_with('.') && entry_name.len() > 1) {
            return SkipDecision::SkipSubtree;
        }
        if let Some(rel) = relative_slash_path(root, entry_path) {
            if exclude_dirs.iter().any(|dir| *dir == rel) {
                return SkipDecision::SkipSubtree;
            }
        }
        return SkipDecision::Accept;
    }

    let is_source = Path::new(entry_name)
        .extension()
        .is_some_and(|ext| ext == SOURCE_EXTENSION);
    if !is_source || entry_name.to_lowercase().ends_with(TEST_SUFFIX) {
        return SkipDecision::SkipEntry;
    }

    SkipDecision::Accept
}

/// `path` relative to `root`, components joined with `/`
pub fn relative_slash_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect();
    Some(parts.join("/"))
}
