//! Data models and structures for goscan

pub mod comment;
pub mod config;
pub mod package;
pub mod parsed_file;

pub use comment::{CommentAssociation, CommentToken, Position};
pub use config::{OutputFormat, PartialSettings, Settings};
pub use package::{FileError, Package, ScanReport, ScanResult, ScanSummary};
pub use parsed_file::ParsedFile;
