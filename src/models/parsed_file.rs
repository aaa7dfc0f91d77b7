//! A single parsed Go source file

use super::comment::CommentAssociation;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tree_sitter::{Node, Tree};

/// One successfully parsed source file.
///
/// The syntax tree is kept together with the source text it was parsed from,
/// since tree-sitter nodes only carry byte ranges.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedFile {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Directory key of the package this file belongs to
    pub package_path: String,
    /// Package name from the file's `package` clause
    pub package_name: String,
    /// Declaration comments, present when comment capture was requested
    pub comments: Option<CommentAssociation>,
    #[serde(skip)]
    tree: Tree,
    #[serde(skip)]
    source: String,
}

impl ParsedFile {
    pub fn new(
        path: PathBuf,
        package_path: String,
        package_name: String,
        tree: Tree,
        source: String,
        comments: Option<CommentAssociation>,
    ) -> Self {
        Self {
            path,
            package_path,
            package_name,
            comments,
            tree,
            source,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Source text spanned by `node`
    pub fn node_text(&self, node: &Node<'_>) -> &str {
        node.utf8_text(self.source.as_bytes()).unwrap_or("")
    }

    /// File name without its directory, for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
