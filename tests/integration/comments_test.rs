//! Declaration to comment mapping through the public scan entry point

use goscan::{scan, CommentAssociation};
use std::fs;
use tempfile::tempdir;

fn comments_for(source: &str) -> CommentAssociation {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.go"), source).unwrap();

    let result = scan(dir.path(), &[], true).unwrap();
    let file = result.files().next().unwrap();
    file.comments.clone().unwrap()
}

fn texts(assoc: &CommentAssociation, key: &str) -> Vec<String> {
    assoc
        .get(key)
        .unwrap_or(&[])
        .iter()
        .map(|c| c.text.clone())
        .collect()
}

#[test]
fn test_function_doc_comment() {
    let assoc = comments_for("package p\n\n// doc\nfunc F() {}\n");

    assert_eq!(texts(&assoc, "F"), vec!["// doc"]);
    assert_eq!(assoc.declarations().count(), 1);
}

#[test]
fn test_method_receiver_keys() {
    let source = "\
package shapes

type Square struct{ side int }

// Area of the square.
func (s *Square) Area() int { return s.side * s.side }

// Side length.
func (s Square) Side() int { return s.side }
";
    let assoc = comments_for(source);

    assert_eq!(texts(&assoc, "(s *Square) Area"), vec!["// Area of the square."]);
    assert_eq!(texts(&assoc, "(s Square) Side"), vec!["// Side length."]);
    assert!(assoc.get("Area").is_none());
}

#[test]
fn test_receiver_without_variable_uses_bare_name() {
    let assoc = comments_for("package p\n\ntype T int\n\n// M doc.\nfunc (T) M() {}\n");

    assert_eq!(texts(&assoc, "M"), vec!["// M doc."]);
}

#[test]
fn test_generic_receiver_uses_bare_name() {
    let source = "package p\n\ntype List[E any] []E\n\n// Len doc.\nfunc (l List[E]) Len() int { return len(l) }\n";
    let assoc = comments_for(source);

    assert_eq!(texts(&assoc, "Len"), vec!["// Len doc."]);
}

#[test]
fn test_var_const_and_type_keys() {
    let source = "\
package p

// Limit doc.
const Limit = 3

// Count doc.
var Count int

// Celsius doc.
type Celsius float64
";
    let assoc = comments_for(source);

    assert_eq!(texts(&assoc, "Limit"), vec!["// Limit doc."]);
    assert_eq!(texts(&assoc, "Count"), vec!["// Count doc."]);
    assert_eq!(texts(&assoc, "Celsius"), vec!["// Celsius doc."]);
}

#[test]
fn test_body_comments_belong_to_enclosing_function() {
    let source = "\
package p

// F doc.
func F() int {
	// step one
	x := 1
	return x // result
}
";
    let assoc = comments_for(source);

    assert_eq!(texts(&assoc, "F"), vec!["// F doc.", "// step one", "// result"]);
}

#[test]
fn test_positions_are_one_based() {
    let assoc = comments_for("package p\n\n// F doc.\nfunc F() {\n\t/* block */\n}\n");

    let comments = assoc.get("F").unwrap();
    assert_eq!(comments[1].text, "/* block */");
    assert_eq!(comments[1].position.line, 5);
    assert_eq!(comments[1].position.column, 2);
}

#[test]
fn test_body_comment_of_undocumented_function_is_unassociated() {
    let assoc = comments_for("package p\n\nfunc F() {\n\t// inside\n}\n");

    // Only nodes that own a comment group are named
    assert!(assoc.get("F").is_none());
    let loose: Vec<_> = assoc.unassociated().iter().map(|c| c.text.as_str()).collect();
    assert_eq!(loose, vec!["// inside"]);
}

#[test]
fn test_comments_disabled() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.go"), "package p\n\n// doc\nfunc F() {}\n").unwrap();

    let result = scan(dir.path(), &[], false).unwrap();
    assert!(result.files().all(|f| f.comments.is_none()));
}
