//! Comment tokens and the declaration-to-comments mapping

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Location of a token in its source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Byte offset from the start of the file
    pub offset: usize,
    /// 1-based line number
    pub line: usize,
    /// 1-based column, counted in bytes
    pub column: usize,
}

impl Position {
    pub(crate) fn from_point(offset: usize, point: tree_sitter::Point) -> Self {
        Self {
            offset,
            line: point.row + 1,
            column: point.column + 1,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A single `//` or `/* */` comment, text kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentToken {
    pub text: String,
    pub position: Position,
}

/// Declaration key -> comments attached to that declaration, in source order.
///
/// Comments that belong to no named declaration are kept under the empty key;
/// see [`CommentAssociation::unassociated`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentAssociation {
    entries: BTreeMap<String, Vec<CommentToken>>,
}

impl CommentAssociation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append comments under `key`, keeping the list in source order and
    /// ignoring comments already present.
    pub fn extend<I>(&mut self, key: impl Into<String>, comments: I)
    where
        I: IntoIterator<Item = CommentToken>,
    {
        let list = self.entries.entry(key.into()).or_default();
        for comment in comments {
            if !list.iter().any(|c| c.position.offset == comment.position.offset) {
                list.push(comment);
            }
        }
        list.sort_by_key(|c| c.position.offset);
    }

    pub fn get(&self, key: &str) -> Option<&[CommentToken]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Comments that could not be tied to a declaration name
    pub fn unassociated(&self) -> &[CommentToken] {
        self.get("").unwrap_or(&[])
    }

    /// Iterate over named declarations only, skipping the empty key
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &[CommentToken])> {
        self.entries
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .map(|(key, comments)| (key.as_str(), comments.as_slice()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, offset: usize, line: usize) -> CommentToken {
        CommentToken {
            text: text.to_string(),
            position: Position { offset, line, column: 1 },
        }
    }

    #[test]
    fn test_extend_keeps_source_order_and_skips_duplicates() {
        let mut assoc = CommentAssociation::new();
        assoc.extend("F", vec![token("// b", 20, 3)]);
        assoc.extend("F", vec![token("// a", 0, 1), token("// b", 20, 3)]);

        let texts: Vec<_> = assoc.get("F").unwrap().iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["// a", "// b"]);
    }

    #[test]
    fn test_declarations_skip_empty_key() {
        let mut assoc = CommentAssociation::new();
        assoc.extend("", vec![token("// Package p", 0, 1)]);
        assoc.extend("F", vec![token("// doc", 30, 4)]);

        let keys: Vec<_> = assoc.declarations().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["F"]);
        assert_eq!(assoc.unassociated().len(), 1);
        assert_eq!(assoc.len(), 2);
    }
}
