//! Indent-rule table and dispatch
//!
//! Every breakable form gets an effective rule describing its semantic role.
//! The rule decides how many children stay on the opening line, where broken
//! children are indented, and whether the tail is grouped in pairs. Rules are
//! data: a closed tag set plus a flat head-symbol lookup table that user
//! configuration merges over.

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

use crate::config::Config;
use crate::syntax;

/// Indent-rule tags. Absence of a rule means plain call / data literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndentRule {
    #[serde(rename = "defn")]
    Defn,
    #[serde(rename = "def")]
    Def,
    #[serde(rename = "fn")]
    Fn,
    #[serde(rename = "binding")]
    Binding,
    #[serde(rename = "if")]
    If,
    #[serde(rename = "case")]
    Case,
    #[serde(rename = "cond")]
    Cond,
    #[serde(rename = "condp")]
    Condp,
    #[serde(rename = "cond->")]
    CondArrow,
    #[serde(rename = "try")]
    Try,
    #[serde(rename = "do")]
    Do,
    /// Synthetic: map literals
    #[serde(rename = "map")]
    Map,
    /// Synthetic: the binding vector child of a `binding` form
    #[serde(rename = "binding-vector")]
    BindingVector,
}

impl IndentRule {
    /// How many named children stay on the opening-delimiter line.
    pub fn keep_count(self) -> usize {
        match self {
            // head + predicate + expression
            IndentRule::Condp => 3,
            // head + (name / args / test / bindings / first pair)
            IndentRule::Defn
            | IndentRule::Def
            | IndentRule::Fn
            | IndentRule::Binding
            | IndentRule::If
            | IndentRule::Case
            | IndentRule::CondArrow
            | IndentRule::Map
            | IndentRule::BindingVector => 2,
            // only the head
            IndentRule::Cond | IndentRule::Try | IndentRule::Do => 1,
        }
    }

    /// Whether the tail is consumed two children at a time, breaking only
    /// before the first element of each pair.
    pub fn groups_pairs(self) -> bool {
        matches!(
            self,
            IndentRule::Map
                | IndentRule::BindingVector
                | IndentRule::Cond
                | IndentRule::Condp
                | IndentRule::Case
                | IndentRule::CondArrow
        )
    }
}

/// Built-in head-symbol table. User configuration is consulted first and
/// merges over these entries.
pub fn builtin_indent(head: &str) -> Option<IndentRule> {
    let rule = match head {
        "defn" | "defn-" | "defmacro" | "defmethod" => IndentRule::Defn,
        "def" | "defonce" | "ns" => IndentRule::Def,
        "fn" => IndentRule::Fn,
        "let" | "loop" | "binding" | "letfn" | "doseq" | "dotimes" | "for" | "if-let"
        | "when-let" | "if-some" | "when-some" | "with-open" => IndentRule::Binding,
        "if" | "if-not" | "when" | "when-not" => IndentRule::If,
        "case" => IndentRule::Case,
        "cond" => IndentRule::Cond,
        "condp" => IndentRule::Condp,
        "cond->" | "cond->>" => IndentRule::CondArrow,
        "try" => IndentRule::Try,
        "do" | "doto" => IndentRule::Do,
        _ => return None,
    };
    Some(rule)
}

/// The rule a list-like node gets from its head symbol, if any.
fn head_rule(node: Node, source: &str, config: &Config) -> Option<IndentRule> {
    let head = syntax::head_symbol(node, source)?;
    config.resolve_indent(head)
}

/// Effective rule for a node.
///
/// A list-like node is keyed by its head symbol. Map literals are always
/// `map`. A vector is `binding-vector` exactly when it is the second named
/// child of a list-like form whose own rule is `binding`. Everything else
/// has no rule.
pub fn effective_rule(node: Node, source: &str, config: &Config) -> Option<IndentRule> {
    let kind = node.kind();
    if syntax::is_list_like(kind) {
        return head_rule(node, source, config);
    }
    if kind == "map_lit" {
        return Some(IndentRule::Map);
    }
    if kind == "vec_lit" {
        if let Some(parent) = node.parent() {
            if syntax::is_list_like(parent.kind())
                && head_rule(parent, source, config) == Some(IndentRule::Binding)
                && parent.named_child(1).map(|n| n.id()) == Some(node.id())
            {
                return Some(IndentRule::BindingVector);
            }
        }
    }
    None
}

/// Column (0-indexed, in characters) at which broken children are placed.
pub fn indent_column(source: &str, node: &Node, rule: Option<IndentRule>) -> usize {
    let c0 = syntax::char_column(source, node);
    match rule {
        // align to the first element inside the bracket
        Some(IndentRule::BindingVector) => c0 + 1,
        // body-form indent
        Some(_) => c0 + 2,
        // 1-space from the opening delimiter = align to the first element
        None => c0 + 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ClojureParser;

    fn parse(source: &str) -> crate::parser::ParseResult {
        ClojureParser::new().unwrap().parse(source).unwrap()
    }

    #[test]
    fn builtin_table_covers_core_forms() {
        assert_eq!(builtin_indent("defn"), Some(IndentRule::Defn));
        assert_eq!(builtin_indent("let"), Some(IndentRule::Binding));
        assert_eq!(builtin_indent("condp"), Some(IndentRule::Condp));
        assert_eq!(builtin_indent("cond->>"), Some(IndentRule::CondArrow));
        assert_eq!(builtin_indent("println"), None);
    }

    #[test]
    fn config_overrides_win_over_builtin() {
        let mut config = Config::default();
        config
            .indents
            .insert("my-let".to_string(), IndentRule::Binding);
        config.indents.insert("defn".to_string(), IndentRule::Do);

        assert_eq!(config.resolve_indent("my-let"), Some(IndentRule::Binding));
        assert_eq!(config.resolve_indent("defn"), Some(IndentRule::Do));
        assert_eq!(config.resolve_indent("let"), Some(IndentRule::Binding));
    }

    #[test]
    fn map_literal_gets_map_rule() {
        let result = parse("{:a 1}");
        let map = result.tree.root_node().named_child(0).unwrap();
        let config = Config::default();
        assert_eq!(
            effective_rule(map, &result.source, &config),
            Some(IndentRule::Map)
        );
    }

    #[test]
    fn binding_vector_is_second_child_of_binding_form() {
        let result = parse("(let [x 1] [y 2])");
        let config = Config::default();
        let list = result.tree.root_node().named_child(0).unwrap();
        let children = syntax::named_children(list);

        assert_eq!(
            effective_rule(children[1], &result.source, &config),
            Some(IndentRule::BindingVector)
        );
        // body vector is not the second named child
        assert_eq!(effective_rule(children[2], &result.source, &config), None);
    }

    #[test]
    fn plain_vector_has_no_rule() {
        let result = parse("[1 2 3]");
        let vec = result.tree.root_node().named_child(0).unwrap();
        let config = Config::default();
        assert_eq!(effective_rule(vec, &result.source, &config), None);
    }

    #[test]
    fn indent_columns_follow_rule_class() {
        let result = parse("(let [x 1] x)");
        let source = &result.source;
        let config = Config::default();
        let list = result.tree.root_node().named_child(0).unwrap();
        let vec = list.named_child(1).unwrap();

        let list_rule = effective_rule(list, source, &config);
        let vec_rule = effective_rule(vec, source, &config);
        assert_eq!(indent_column(source, &list, list_rule), 2);
        // vector opens at column 5; alignment lands inside the bracket
        assert_eq!(indent_column(source, &vec, vec_rule), 6);
    }

    #[test]
    fn keep_counts_match_rule_roles() {
        assert_eq!(IndentRule::Condp.keep_count(), 3);
        assert_eq!(IndentRule::Defn.keep_count(), 2);
        assert_eq!(IndentRule::Map.keep_count(), 2);
        assert_eq!(IndentRule::Cond.keep_count(), 1);
        assert!(IndentRule::Map.groups_pairs());
        assert!(!IndentRule::Defn.groups_pairs());
    }
}
