//! Declaration naming
//!
//! Turns a syntax node into the key comments are filed under: the plain name
//! for top-level declarations and `(recv *T) Name` / `(recv T) Name` for
//! methods. Node kinds outside the fixed set below are [`Declaration::Unhandled`]
//! and produce the empty key.

use tree_sitter::Node;

/// Method receiver that resolved to a named type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receiver {
    /// Receiver variable, `r` in `func (r *T) M()`
    pub name: String,
    /// Receiver base type, `T` in `func (r *T) M()`
    pub type_name: String,
    pub pointer: bool,
}

/// The declaration kinds comments can be attached to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    /// Function or method. `receiver` is `None` for plain functions and for
    /// methods whose receiver is not a (pointer to a) simple named type.
    Function {
        name: String,
        receiver: Option<Receiver>,
    },
    /// `const` / `var` declaration, named after its first spec
    Group { first_name: String },
    /// A single `const` / `var` spec
    Spec { first_name: String },
    /// `type` declaration or a single type spec
    Type { name: String },
    /// Anything else: imports, statements, expressions, the file itself
    Unhandled { kind: &'static str },
}

impl Declaration {
    /// Classify `node`; `source` is the text the tree was parsed from
    pub fn from_node(node: Node<'_>, source: &[u8]) -> Self {
        let kind = node.kind();
        let named = match kind {
            "function_declaration" => field_text(node, "name", source).map(|name| Declaration::Function {
                name,
                receiver: None,
            }),
            "method_declaration" => field_text(node, "name", source).map(|name| Declaration::Function {
                name,
                receiver: method_receiver(node, source),
            }),
            "const_declaration" | "var_declaration" => first_spec(node, &["const_spec", "var_spec"])
                .and_then(|spec| field_text(spec, "name", source))
                .map(|first_name| Declaration::Group { first_name }),
            "const_spec" | "var_spec" => {
                field_text(node, "name", source).map(|first_name| Declaration::Spec { first_name })
            }
            "type_declaration" => first_spec(node, &["type_spec", "type_alias"])
                .and_then(|spec| field_text(spec, "name", source))
                .map(|name| Declaration::Type { name }),
            "type_spec" | "type_alias" => field_text(node, "name", source).map(|name| Declaration::Type { name }),
            _ => None,
        };

        named.unwrap_or(Declaration::Unhandled { kind })
    }

    /// Key used in a comment association; empty for unhandled nodes
    pub fn key(&self) -> String {
        match self {
            Declaration::Function {
                name,
                receiver: Some(recv),
            } => {
                let star = if recv.pointer { "*" } else { "" };
                format!("({} {}{}) {}", recv.name, star, recv.type_name, name)
            }
            Declaration::Function { name, receiver: None } => name.clone(),
            Declaration::Group { first_name } | Declaration::Spec { first_name } => first_name.clone(),
            Declaration::Type { name } => name.clone(),
            Declaration::Unhandled { .. } => String::new(),
        }
    }
}

fn field_text(node: Node<'_>, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)?
        .utf8_text(source)
        .ok()
        .map(str::to_string)
}

/// First spec of a declaration, looking through an optional spec list wrapper
fn first_spec<'t>(decl: Node<'t>, kinds: &[&str]) -> Option<Node<'t>> {
    let mut cursor = decl.walk();
    for child in decl.named_children(&mut cursor) {
        if kinds.contains(&child.kind()) {
            return Some(child);
        }
        if child.kind().ends_with("_spec_list") {
            let mut inner = child.walk();
            let found = child
                .named_children(&mut inner)
                .find(|n| kinds.contains(&n.kind()));
            if found.is_some() {
                return found;
            }
        }
    }
    None
}

fn method_receiver(method: Node<'_>, source: &[u8]) -> Option<Receiver> {
    let list = method.child_by_field_name("receiver")?;
    let mut cursor = list.walk();
    let param = list
        .named_children(&mut cursor)
        .find(|n| n.kind() == "parameter_declaration")?;

    // `func (T) M()` has no receiver variable to print
    let name = field_text(param, "name", source)?;
    let ty = param.child_by_field_name("type")?;

    let (type_node, pointer) = match ty.kind() {
        "type_identifier" => (ty, false),
        "pointer_type" => {
            let mut cursor = ty.walk();
            let inner = ty.named_children(&mut cursor).find(|n| n.kind() != "comment")?;
            if inner.kind() != "type_identifier" {
                return None;
            }
            (inner, true)
        }
        // generic, parenthesized and qualified receivers stay unprefixed
        _ => return None,
    };

    Some(Receiver {
        name,
        type_name: type_node.utf8_text(source).ok()?.to_string(),
        pointer,
    })
}
