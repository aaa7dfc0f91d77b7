//! Validation of fully merged settings

use std::path::Path;

use super::parser::check_exclude_entry;
use crate::error::{Result, ScanError};
use crate::models::config::Settings;

/// Settings validator for ensuring configuration is valid
pub struct SettingsValidator;

impl SettingsValidator {
    /// Validate settings and return errors if invalid
    pub fn validate(settings: &Settings) -> Result<()> {
        if !settings.scan_path.is_dir() {
            return Err(ScanError::invalid_path(&settings.scan_path));
        }

        for entry in &settings.exclude_dirs {
            check_exclude_entry(entry).map_err(|reason| {
                ScanError::config_error(format!("Invalid exclude directory '{}': {}", entry, reason))
            })?;
        }

        if settings.quiet && settings.verbose {
            return Err(ScanError::config_error("--quiet and --verbose cannot be combined"));
        }

        if let Some(path) = &settings.output_file {
            Self::validate_output_path(path)?;
        }

        Ok(())
    }

    /// Validate that an output path's directory exists and is writable
    fn validate_output_path(path: &Path) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => return Ok(()),
        };

        if !parent.exists() {
            return Err(ScanError::OutputDirectoryNotFound {
                path: parent.to_path_buf(),
                #[cfg(not(tarpaulin_include))]
                backtrace: std::backtrace::Backtrace::capture(),
            });
        }

        let metadata = std::fs::metadata(parent).map_err(ScanError::io_error)?;
        if metadata.permissions().readonly() {
            return Err(ScanError::permission_denied(parent));
        }

        Ok(())
    }
}
