//! Parsing functionality for Go source files
//!
//! This module wraps the tree-sitter Go grammar and builds the
//! declaration-to-comments mapping on top of the syntax tree.

pub mod comments;
pub mod declaration;
pub mod go_parser;

pub use comments::associate;
pub use declaration::{Declaration, Receiver};
pub use go_parser::{GoParser, SourceUnit};
