//! Error handling for goscan
//!
//! This module provides the error taxonomy for scans, result aliases, and
//! error context utilities.

pub mod context;
pub mod types;

pub use context::{handle_error, OptionExt, ResultExt};
pub use types::{ErrorSeverity, Result, ScanError};
