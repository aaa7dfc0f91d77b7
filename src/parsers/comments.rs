//! Comment association
//!
//! tree-sitter keeps comments as ordinary `comment` nodes scattered through
//! the tree. To find out which declaration a comment documents, comments are
//! first grouped the way the Go scanner groups them, then each group is
//! assigned an owning node using the attachment rules of Go's `ast.CommentMap`:
//!
//! 1. a group starting on the line where the previous important node
//!    (file, field, declaration, spec or statement) ends, or on the next line
//!    when an empty line separates it from the following node, belongs to
//!    that important node;
//! 2. the same rule applied to the immediately preceding node, which also
//!    takes every group after the last node;
//! 3. otherwise the group belongs to the node that follows it.
//!
//! A declaration's comments are then all comments owned by it or by any node
//! inside it.

use super::declaration::Declaration;
use crate::models::comment::{CommentAssociation, CommentToken, Position};
use std::collections::BTreeMap;
use tree_sitter::{Node, Tree};

/// Adjacent comments treated as one unit when attaching
#[derive(Debug, Clone)]
pub struct CommentGroup {
    pub comments: Vec<CommentToken>,
    start: usize,
    end: usize,
    start_line: usize,
    end_line: usize,
    /// Starts on a line after code, like `x := 1 // note`
    trailing: bool,
}

#[derive(Debug, Clone, Copy)]
struct NodeSpan<'t> {
    node: Node<'t>,
    start: usize,
    end: usize,
    start_line: usize,
    end_line: usize,
    important: bool,
}

/// Kinds that play the role of Go's `*ast.File`, `*ast.Field`, `ast.Decl`,
/// `ast.Spec` and `ast.Stmt`.
fn is_important(kind: &str) -> bool {
    matches!(
        kind,
        "source_file"
            | "field_declaration"
            | "parameter_declaration"
            | "variadic_parameter_declaration"
            | "type_parameter_declaration"
            | "type_elem"
            | "method_elem"
            | "method_spec"
            | "function_declaration"
            | "method_declaration"
            | "const_declaration"
            | "var_declaration"
            | "type_declaration"
            | "import_declaration"
            | "import_spec"
            | "const_spec"
            | "var_spec"
            | "type_spec"
            | "type_alias"
            | "block"
            | "short_var_declaration"
            | "expression_case"
            | "default_case"
            | "type_case"
            | "communication_case"
    ) || kind.ends_with("_statement")
}

/// Map every declaration in `tree` to the comments attached to it
pub fn associate(tree: &Tree, source: &str) -> CommentAssociation {
    let root = tree.root_node();
    let groups = group_comments(root, source);
    let mut association = CommentAssociation::new();
    if groups.is_empty() {
        return association;
    }

    let nodes = collect_nodes(root);
    let owners = build_comment_map(&nodes, &groups);

    for &owner in owners.keys() {
        let owner_node = nodes[owner].node;
        let key = Declaration::from_node(owner_node, source.as_bytes()).key();

        let comments = owners
            .iter()
            .filter(|(&idx, _)| idx == owner || is_within(nodes[idx].node, owner_node))
            .flat_map(|(_, group_ids)| group_ids.iter())
            .flat_map(|&g| groups[g].comments.iter().cloned());

        association.extend(key, comments);
    }

    association
}

/// Group comment nodes the way the Go scanner does
pub fn group_comments(root: Node<'_>, source: &str) -> Vec<CommentGroup> {
    let mut groups: Vec<CommentGroup> = Vec::new();

    for node in preorder(root).filter(|n| n.kind() == "comment") {
        let start = node.start_byte();
        let end = node.end_byte();
        let start_line = node.start_position().row;
        let end_line = node.end_position().row;
        let token = CommentToken {
            text: node.utf8_text(source.as_bytes()).unwrap_or("").to_string(),
            position: Position::from_point(start, node.start_position()),
        };

        if let Some(group) = groups.last_mut() {
            let adjacent = source
                .get(group.end..start)
                .is_some_and(|between| between.trim().is_empty());
            let max_line = if group.trailing { group.end_line } else { group.end_line + 1 };
            if adjacent && start_line <= max_line {
                group.comments.push(token);
                group.end = end;
                group.end_line = end_line;
                continue;
            }
        }

        let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
        groups.push(CommentGroup {
            comments: vec![token],
            start,
            end,
            start_line,
            end_line,
            trailing: !source[line_start..start].trim().is_empty(),
        });
    }

    groups
}

/// Named, non-comment nodes in source order. The file node spans from its
/// `package` clause to the end of its last declaration, so leading and
/// trailing comments fall outside it.
fn collect_nodes(root: Node<'_>) -> Vec<NodeSpan<'_>> {
    let mut nodes: Vec<NodeSpan<'_>> = preorder(root)
        .filter(|n| n.is_named() && n.kind() != "comment")
        .map(|node| NodeSpan {
            node,
            start: node.start_byte(),
            end: node.end_byte(),
            start_line: node.start_position().row,
            end_line: node.end_position().row,
            important: is_important(node.kind()),
        })
        .collect();

    let mut cursor = root.walk();
    let children: Vec<Node<'_>> = root
        .named_children(&mut cursor)
        .filter(|n| n.kind() != "comment")
        .collect();
    let clause = children.iter().find(|n| n.kind() == "package_clause");
    if let (Some(file), Some(clause)) = (nodes.first_mut(), clause) {
        file.start = clause.start_byte();
        file.start_line = clause.start_position().row;
    }
    if let (Some(file), Some(last)) = (nodes.first_mut(), children.last()) {
        file.end = last.end_byte();
        file.end_line = last.end_position().row;
    }

    nodes
}

/// Owner node index -> indices of the comment groups it owns
fn build_comment_map(nodes: &[NodeSpan<'_>], groups: &[CommentGroup]) -> BTreeMap<usize, Vec<usize>> {
    let mut owners: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut next_group = 0;

    let mut prev: Option<usize> = None;
    let mut prev_important: Option<usize> = None;
    let mut stack: Vec<usize> = Vec::new();

    for q in 0..=nodes.len() {
        let at_end = q == nodes.len();
        let (q_offset, q_line) = if at_end {
            (usize::MAX, usize::MAX)
        } else {
            (nodes[q].start, nodes[q].start_line)
        };

        while next_group < groups.len() && groups[next_group].end <= q_offset {
            let group = &groups[next_group];
            if let Some(top) = pop_ended(&mut stack, nodes, group.start) {
                prev_important = Some(top);
            }

            let attaches_after = |idx: usize| {
                let end_line = nodes[idx].end_line;
                end_line == group.start_line
                    || (end_line + 1 == group.start_line && group.end_line + 1 < q_line)
            };

            let owner = match (prev_important, prev) {
                (Some(pg), _) if attaches_after(pg) => Some(pg),
                (_, Some(p)) if attaches_after(p) || at_end => Some(p),
                _ if !at_end => Some(q),
                _ => None,
            };

            if let Some(owner) = owner {
                owners.entry(owner).or_default().push(next_group);
            }
            next_group += 1;
        }

        if next_group == groups.len() || at_end {
            break;
        }

        prev = Some(q);
        if nodes[q].important {
            pop_ended(&mut stack, nodes, nodes[q].start);
            stack.push(q);
        }
    }

    owners
}

/// Pop every stacked node that ends at or before `pos`; returns the
/// outermost one popped.
fn pop_ended(stack: &mut Vec<usize>, nodes: &[NodeSpan<'_>], pos: usize) -> Option<usize> {
    let mut top = None;
    while let Some(&last) = stack.last() {
        if nodes[last].end > pos {
            break;
        }
        top = stack.pop();
    }
    top
}

fn is_within(node: Node<'_>, ancestor: Node<'_>) -> bool {
    let mut current = node.parent();
    while let Some(n) = current {
        if n.id() == ancestor.id() {
            return true;
        }
        current = n.parent();
    }
    false
}

/// Pre-order iterator over every node of the tree
fn preorder(root: Node<'_>) -> impl Iterator<Item = Node<'_>> {
    let mut cursor = root.walk();
    let mut done = false;

    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let node = cursor.node();
        if !cursor.goto_first_child() {
            loop {
                if cursor.goto_next_sibling() {
                    break;
                }
                if !cursor.goto_parent() {
                    done = true;
                    break;
                }
            }
        }
        Some(node)
    })
}
