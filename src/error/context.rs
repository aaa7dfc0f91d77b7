//! Error context utilities for goscan
//!
//! This module provides utilities for adding context to errors and handling
//! errors in a consistent way throughout the application.

use crate::error::{ErrorSeverity, Result, ScanError};
use std::path::Path;

/// Extension trait for Result to add path context to errors
pub trait ResultExt<T, E> {
    /// Attach the path that was being resolved when the error occurred
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + 'static,
{
    fn with_file_context<P: AsRef<Path>>(self, path: P) -> Result<T> {
        self.map_err(|err| {
            let as_dyn: &(dyn std::error::Error + 'static) = &err;
            if let Some(io_err) = as_dyn.downcast_ref::<std::io::Error>() {
                if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                    return ScanError::permission_denied(path.as_ref());
                }
            }

            ScanError::path_resolution_error(path.as_ref(), err.to_string())
        })
    }
}

/// Handle an error based on its severity
///
/// - Warning: Log the error and return None
/// - Error: Log the error and return None
/// - Critical: Log the error and return Some(error)
pub fn handle_error(err: ScanError) -> Option<ScanError> {
    let message = err.user_message();

    match err.severity() {
        ErrorSeverity::Warning => {
            tracing::warn!("{}", message);
            None
        }
        ErrorSeverity::Error => {
            tracing::warn!("skipping after error: {}", message);
            None
        }
        ErrorSeverity::Critical => {
            tracing::error!("{}", message);
            Some(err)
        }
    }
}

/// Extension trait for Option to convert to Result with a custom error
pub trait OptionExt<T> {
    /// Convert Option to Result with a custom error
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> ScanError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_error<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> ScanError,
    {
        self.ok_or_else(err_fn)
    }
}
