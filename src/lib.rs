//! goscan - A Go source tree scanner
//!
//! This library walks a directory tree, parses every Go source file it finds,
//! groups the parsed files by containing directory ("package"), and can map
//! each declaration to the comments attached to it.

#![feature(error_generic_member_access)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod parsers;

// Re-export commonly used types
pub use crate::core::walker::{scan, Walker};
pub use error::{handle_error, ErrorSeverity, OptionExt, Result, ResultExt, ScanError};
pub use models::{
    comment::{CommentAssociation, CommentToken, Position},
    config::Settings,
    package::{FileError, Package, ScanReport, ScanResult, ScanSummary},
    parsed_file::ParsedFile,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
