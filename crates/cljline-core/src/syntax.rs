//! Node-kind vocabulary and traversal helpers for the Clojure grammar

use tree_sitter::Node;

/// Node kinds that can be broken across lines: their interior is a sequence
/// of forms with delimiters on the outside.
pub const BREAKABLE_KINDS: &[&str] = &[
    "list_lit",
    "vec_lit",
    "map_lit",
    "set_lit",
    "anon_fn_lit",
    "read_cond_lit",
    "splicing_read_cond_lit",
];

/// Check whether a node kind is breakable
pub fn is_breakable(kind: &str) -> bool {
    BREAKABLE_KINDS.contains(&kind)
}

/// List-like kinds: a head symbol in the first position selects an indent rule
pub fn is_list_like(kind: &str) -> bool {
    matches!(kind, "list_lit" | "anon_fn_lit")
}

/// Check whether a node is a comment token
pub fn is_comment(node: &Node) -> bool {
    node.kind() == "comment"
}

/// Check whether a node is a discard form (`#_`)
pub fn is_discard(node: &Node) -> bool {
    node.kind() == "dis_expr"
}

/// Collect the named children of a node in source order.
/// Named children exclude punctuation tokens such as delimiters.
pub fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Get the source text of a node
pub fn node_text<'s>(node: &Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// The head symbol of a list-like node: the text of its first named child
/// when that child is a symbol token.
pub fn head_symbol<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    let first = node.named_child(0)?;
    if first.kind() == "sym_lit" {
        Some(node_text(&first, source))
    } else {
        None
    }
}

/// Character column of a node's start within its line.
///
/// tree-sitter reports byte columns; indentation must count characters so
/// that multibyte text earlier on the line does not shift alignment.
pub fn char_column(source: &str, node: &Node) -> usize {
    let start = node.start_byte().min(source.len());
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    source[line_start..start].chars().count()
}
