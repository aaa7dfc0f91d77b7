//! Directory walking functionality
//!
//! This module walks a source tree depth-first, parses every accepted Go file
//! and groups the results by containing directory.

use crate::core::filter::{should_skip, SkipDecision};
use crate::error::{handle_error, Result, ResultExt, ScanError};
use crate::models::{
    config::Settings,
    package::{ScanReport, ScanResult},
    parsed_file::ParsedFile,
};
use crate::parsers::{associate, GoParser};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Main walker for directory traversal and parsing
pub struct Walker {
    settings: Settings,
}

impl Walker {
    /// Create a new walker with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Scan the configured directory into a fresh result
    pub fn scan(&self) -> Result<ScanResult> {
        let mut result = ScanResult::new();
        self.scan_into(&mut result)?;
        Ok(result)
    }

    /// Scan the configured directory, adding files to `result`.
    ///
    /// Files whose absolute path is already present in `result` are left
    /// untouched. Errors collected in keep-going mode are logged and dropped;
    /// use [`Walker::scan_report`] to get them back.
    pub fn scan_into(&self, result: &mut ScanResult) -> Result<()> {
        let mut report = ScanReport::new(&self.settings.scan_path);
        std::mem::swap(&mut report.packages, result);
        let outcome = self.walk(&mut report, &mut |_| {});
        std::mem::swap(&mut report.packages, result);
        outcome
    }

    /// Scan and return the full report with summary counters
    pub fn scan_report(&self) -> Result<ScanReport> {
        self.scan_with_progress(|_| {})
    }

    /// Like [`Walker::scan_report`], calling `on_file` before each file is parsed
    pub fn scan_with_progress<F>(&self, mut on_file: F) -> Result<ScanReport>
    where
        F: FnMut(&Path),
    {
        let mut report = ScanReport::new(&self.settings.scan_path);
        self.walk(&mut report, &mut on_file)?;
        Ok(report)
    }

    fn walk(&self, report: &mut ScanReport, on_file: &mut dyn FnMut(&Path)) -> Result<()> {
        let start_time = Instant::now();
        let root = self.settings.scan_path.as_path();

        if !root.exists() {
            return Err(ScanError::invalid_path(root));
        }

        info!(
            root = %root.display(),
            capture_comments = self.settings.capture_comments,
            keep_going = self.settings.keep_going,
            "scanning"
        );

        let mut parser = GoParser::new()?;
        let mut entries = WalkDir::new(root)
            .follow_links(self.settings.follow_links)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = entries.next() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if let Some(ancestor) = err.loop_ancestor() {
                        warn!(
                            path = ?err.path(),
                            ancestor = %ancestor.display(),
                            "skipping symlink loop"
                        );
                        report.summary.directories_skipped += 1;
                        continue;
                    }
                    self.fail(report, ScanError::walk_error(root, err))?;
                    continue;
                }
            };

            let path = entry.path();
            let is_dir = entry.file_type().is_dir();
            let name = entry.file_name().to_string_lossy();

            match should_skip(root, path, is_dir, &name, &self.settings.exclude_dirs) {
                SkipDecision::SkipSubtree => {
                    debug!(path = %path.display(), "skipping directory");
                    report.summary.directories_skipped += 1;
                    entries.skip_current_dir();
                    continue;
                }
                SkipDecision::SkipEntry => {
                    report.summary.files_skipped += 1;
                    continue;
                }
                SkipDecision::Accept if is_dir => {
                    report.summary.directories_visited += 1;
                    continue;
                }
                SkipDecision::Accept => {}
            }

            on_file(path);
            match self.parse_entry(&mut parser, path) {
                Ok(file) => {
                    debug!(path = %file.path.display(), package = %file.package_path, "parsed");
                    report.summary.files_parsed += 1;
                    if !report.packages.insert(file) {
                        debug!(path = %path.display(), "already scanned, keeping first parse");
                        report.summary.duplicates_ignored += 1;
                    }
                }
                Err(err) => self.fail(report, err)?,
            }
        }

        report.set_scan_duration(start_time.elapsed());
        report.summary.scanned_at = Some(chrono::Utc::now());

        info!(
            packages = report.packages.len(),
            files = report.summary.files_parsed,
            errors = report.summary.errors_encountered,
            "scan finished"
        );

        Ok(())
    }

    /// Abort with `err`, or record it and carry on in keep-going mode
    fn fail(&self, report: &mut ScanReport, err: ScanError) -> Result<()> {
        if !self.settings.keep_going {
            return Err(err);
        }

        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.settings.scan_path.clone());
        report.add_error(path, &err);

        match handle_error(err) {
            Some(critical) => Err(critical),
            None => Ok(()),
        }
    }

    fn parse_entry(&self, parser: &mut GoParser, path: &Path) -> Result<ParsedFile> {
        let package_path = package_key(path);
        let unit = parser.parse_file(path)?;

        let comments = self
            .settings
            .capture_comments
            .then(|| associate(&unit.tree, &unit.source));

        let absolute = std::path::absolute(path).with_file_context(path)?;

        Ok(ParsedFile::new(
            absolute,
            package_path,
            unit.package_name,
            unit.tree,
            unit.source,
            comments,
        ))
    }
}

/// Scan `root` with default settings: all-or-nothing, symlinks not followed
pub fn scan(root: impl AsRef<Path>, exclude_dirs: &[String], capture_comments: bool) -> Result<ScanResult> {
    let settings = Settings {
        scan_path: root.as_ref().to_path_buf(),
        exclude_dirs: exclude_dirs.to_vec(),
        capture_comments,
        ..Settings::default()
    };
    Walker::new(settings).scan()
}

/// Package key of a file: its cleaned parent directory with forward slashes
pub fn package_key(file_path: &Path) -> String {
    let cleaned = clean_path(file_path);
    let dir = match cleaned.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    dir.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/")
}

/// Lexically normalize `path`: drop `.` components and resolve `..` against
/// preceding names. The filesystem is not consulted.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        PathBuf::from(".")
    } else {
        parts.iter().collect()
    }
}
