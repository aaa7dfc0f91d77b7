//! Go parser wrapper using tree-sitter

use crate::error::{OptionExt, Result, ScanError};
use std::fs;
use std::path::Path;
use tree_sitter::{Language, Node, Parser, Tree};

/// A parsed source file before it is placed into a package
#[derive(Debug, Clone)]
pub struct SourceUnit {
    pub tree: Tree,
    pub source: String,
    /// Name from the `package` clause
    pub package_name: String,
}

/// Go parser using tree-sitter-go
pub struct GoParser {
    parser: Parser,
}

impl GoParser {
    /// Create a new Go parser
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_go::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| ScanError::parser_setup_error(e.to_string()))?;

        Ok(Self { parser })
    }

    /// Read and parse a Go source file
    pub fn parse_file(&mut self, path: &Path) -> Result<SourceUnit> {
        let source = fs::read_to_string(path).map_err(|e| ScanError::read_error(path, e))?;
        self.parse_source(path, source)
    }

    /// Parse Go source text. `path` is only used for error reporting.
    ///
    /// Fails on the first syntax error, or when the file has no `package`
    /// clause.
    pub fn parse_source(&mut self, path: &Path, source: String) -> Result<SourceUnit> {
        let tree = self
            .parser
            .parse(&source, None)
            .ok_or_error(|| ScanError::syntax_error(path, 1, 1, "parser returned no tree"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(syntax_error_at(path, root, &source));
        }

        let package_name = package_name(root, source.as_bytes())
            .ok_or_error(|| ScanError::syntax_error(path, 1, 1, "expected 'package' clause"))?;

        Ok(SourceUnit {
            tree,
            source,
            package_name,
        })
    }
}

/// Name declared by the file's `package` clause
pub fn package_name(root: Node<'_>, source: &[u8]) -> Option<String> {
    let mut cursor = root.walk();
    let clause = root
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_clause")?;

    let mut cursor = clause.walk();
    let ident = clause
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_identifier")?;

    ident.utf8_text(source).ok().map(str::to_string)
}

fn syntax_error_at(path: &Path, root: Node<'_>, source: &str) -> ScanError {
    let node = first_error(root).unwrap_or(root);
    let point = node.start_position();

    let message = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        let text = node.utf8_text(source.as_bytes()).unwrap_or("");
        let snippet: String = text.lines().next().unwrap_or("").chars().take(32).collect();
        if snippet.is_empty() {
            "syntax error".to_string()
        } else {
            format!("unexpected `{}`", snippet.trim())
        }
    };

    ScanError::syntax_error(path, point.row + 1, point.column + 1, message)
}

/// First ERROR or MISSING node in source order
fn first_error(root: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            return Some(node);
        }
        // Only descend into subtrees that contain the error
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return None;
            }
        }
    }
}
