//! Package grouping and scan results

use super::parsed_file::ParsedFile;
use crate::error::{ErrorSeverity, ScanError};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::{self, BTreeMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// All parsed files sharing one containing directory
#[derive(Debug, Clone, Serialize)]
pub struct Package {
    /// Package name declared by the first file inserted into the group
    pub name: String,
    /// Parsed files keyed by absolute path
    pub files: BTreeMap<PathBuf, ParsedFile>,
}

impl Package {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            files: BTreeMap::new(),
        }
    }

    pub fn get(&self, path: &Path) -> Option<&ParsedFile> {
        self.files.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Package directory -> package. The sole output of a scan.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct ScanResult {
    packages: BTreeMap<String, Package>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a parsed file under its package key.
    ///
    /// The first file seen for a key names the package. A file whose absolute
    /// path is already present is dropped and `false` is returned.
    pub fn insert(&mut self, file: ParsedFile) -> bool {
        let package = self
            .packages
            .entry(file.package_path.clone())
            .or_insert_with(|| Package::new(file.package_name.clone()));

        match package.files.entry(file.path.clone()) {
            btree_map::Entry::Occupied(_) => false,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(file);
                true
            }
        }
    }

    pub fn get(&self, package_path: &str) -> Option<&Package> {
        self.packages.get(package_path)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Package)> {
        self.packages.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn package_paths(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Every parsed file across all packages
    pub fn files(&self) -> impl Iterator<Item = &ParsedFile> {
        self.packages.values().flat_map(|p| p.files.values())
    }

    pub fn file_count(&self) -> usize {
        self.packages.values().map(Package::len).sum()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }

    pub fn into_inner(self) -> BTreeMap<String, Package> {
        self.packages
    }
}

impl<'a> IntoIterator for &'a ScanResult {
    type Item = (&'a String, &'a Package);
    type IntoIter = btree_map::Iter<'a, String, Package>;

    fn into_iter(self) -> Self::IntoIter {
        self.packages.iter()
    }
}

/// A per-file failure recorded when the scan keeps going past errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileError {
    pub path: PathBuf,
    pub error: String,
    pub severity: ErrorSeverity,
}

impl FileError {
    pub fn from_error(path: impl Into<PathBuf>, error: &ScanError) -> Self {
        Self {
            path: error.path().map(Path::to_path_buf).unwrap_or_else(|| path.into()),
            error: error.user_message(),
            severity: error.severity(),
        }
    }
}

/// Counters collected while walking
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    pub directories_visited: usize,
    pub directories_skipped: usize,
    pub files_parsed: usize,
    pub files_skipped: usize,
    pub duplicates_ignored: usize,
    pub errors_encountered: usize,
    #[serde(with = "duration_millis")]
    pub scan_duration: Duration,
    pub scanned_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Scan result plus everything the CLI reports about the run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub packages: ScanResult,
    pub errors: Vec<FileError>,
    pub summary: ScanSummary,
}

impl ScanReport {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Record a non-fatal error
    pub fn add_error(&mut self, path: impl Into<PathBuf>, error: &ScanError) {
        self.summary.errors_encountered += 1;
        self.errors.push(FileError::from_error(path, error));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn set_scan_duration(&mut self, duration: Duration) {
        self.summary.scan_duration = duration;
    }
}

mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        Ok(Duration::from_millis(u64::deserialize(deserializer)?))
    }
}
