//! Break planner: candidate search and edit generation
//!
//! Given a violating line, the planner finds forms on that line that can
//! still be broken (outermost first) and turns the chosen form into a set of
//! byte-range edits that put its tail children on their own lines.

use tree_sitter::{Node, Tree};

use crate::config::Config;
use crate::edit::Edit;
use crate::ignore::IgnoredRegions;
use crate::rules::{self, IndentRule};
use crate::syntax;

/// Forms on `line` (1-indexed) that are still breakable, in pre-order so the
/// outermost candidate comes first.
pub fn breakable_forms<'t>(
    tree: &'t Tree,
    line: usize,
    ignored: &IgnoredRegions,
) -> Vec<Node<'t>> {
    let row = line.saturating_sub(1);
    let mut out = Vec::new();
    visit(tree.root_node(), row, ignored, &mut out);
    out
}

fn visit<'t>(node: Node<'t>, row: usize, ignored: &IgnoredRegions, out: &mut Vec<Node<'t>>) {
    if node.start_position().row > row || node.end_position().row < row {
        return;
    }
    if is_candidate(&node, row, ignored) {
        out.push(node);
    }
    for child in syntax::named_children(node) {
        visit(child, row, ignored, out);
    }
}

/// A candidate still has two adjacent named children starting on the target
/// row: a form already broken one-child-per-line is not re-broken.
fn is_candidate(node: &Node, row: usize, ignored: &IgnoredRegions) -> bool {
    if !syntax::is_breakable(node.kind()) {
        return false;
    }
    if ignored.contains_range(node.start_byte(), node.end_byte()) {
        return false;
    }
    let children = syntax::named_children(*node);
    children
        .windows(2)
        .any(|w| w[0].start_position().row == row && w[1].start_position().row == row)
}

/// Plan the edits that break `node` across lines.
///
/// The form's rule decides the keep-count, the indent column, and whether
/// the tail is grouped in pairs. Returns an empty set when there is nothing
/// after the kept children.
pub fn plan(node: Node, source: &str, config: &Config) -> Vec<Edit> {
    let rule = rules::effective_rule(node, source, config);
    let keep = rule.map_or(1, IndentRule::keep_count);
    let children = syntax::named_children(node);
    if children.len() <= keep {
        return Vec::new();
    }

    let indent = " ".repeat(rules::indent_column(source, &node, rule));
    let mut break_points: Vec<(Node, Node)> = Vec::new();

    if rule.is_some_and(IndentRule::groups_pairs) {
        let mut prev = children[keep - 1];
        for pair in children[keep..].chunks(2) {
            break_points.push((prev, pair[0]));
            prev = *pair.last().unwrap();
        }
    } else {
        for i in keep..children.len() {
            break_points.push((children[i - 1], children[i]));
        }
    }

    let mut edits = Vec::new();
    for (prev, next) in break_points {
        // an inline comment stays attached to the element it trails
        if syntax::is_comment(&next) && next.start_position().row == prev.end_position().row {
            continue;
        }
        // comment tokens carry their own trailing newline
        let replacement = if syntax::is_comment(&prev) {
            indent.clone()
        } else {
            format!("\n{indent}")
        };
        edits.push(Edit::new(prev.end_byte(), next.start_byte(), replacement));
    }
    edits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edit::apply_edits;
    use crate::ignore::collect_ignored;
    use crate::parser::ClojureParser;

    fn parse(source: &str) -> crate::parser::ParseResult {
        ClojureParser::new().unwrap().parse(source).unwrap()
    }

    fn plan_first(source: &str, config: &Config) -> String {
        let result = parse(source);
        let ignored = collect_ignored(&result.tree, source);
        let candidates = breakable_forms(&result.tree, 1, &ignored);
        let edits = plan(candidates[0], source, config);
        apply_edits(source, &edits).unwrap()
    }

    #[test]
    fn candidates_are_outermost_first() {
        let source = "(a (b c d e) f)";
        let result = parse(source);
        let candidates = breakable_forms(&result.tree, 1, &IgnoredRegions::default());

        assert_eq!(candidates.len(), 2);
        assert!(candidates[0].start_byte() < candidates[1].start_byte());
        assert_eq!(candidates[0].start_byte(), 0);
    }

    #[test]
    fn fully_broken_form_is_not_a_candidate() {
        let source = "(def x\n  y)";
        let result = parse(source);
        assert!(breakable_forms(&result.tree, 2, &IgnoredRegions::default()).is_empty());
    }

    #[test]
    fn ignored_form_is_excluded() {
        let source = "#_:cljline/ignore (foo bar baz qux)";
        let result = parse(source);
        let ignored = collect_ignored(&result.tree, source);
        assert!(breakable_forms(&result.tree, 1, &ignored).is_empty());
    }

    #[test]
    fn plain_call_breaks_every_element() {
        let out = plan_first("(println \"a\" \"b\" \"c\")", &Config::default());
        assert_eq!(out, "(println\n \"a\"\n \"b\"\n \"c\")");
    }

    #[test]
    fn definition_keeps_head_and_name() {
        let out = plan_first("(defn foo [x] (+ x 1))", &Config::default());
        assert_eq!(out, "(defn foo\n  [x]\n  (+ x 1))");
    }

    #[test]
    fn map_groups_pairs() {
        let out = plan_first("{:a 1 :b 2 :c 3}", &Config::default());
        assert_eq!(out, "{:a 1\n  :b 2\n  :c 3}");
    }

    #[test]
    fn condp_keeps_three_children() {
        let out = plan_first("(condp = x 1 :one 2 :two)", &Config::default());
        assert_eq!(out, "(condp = x\n  1 :one\n  2 :two)");
    }

    #[test]
    fn case_default_clause_gets_its_own_line() {
        let out = plan_first("(case x :a 1 :b 2 fallback)", &Config::default());
        assert_eq!(out, "(case x\n  :a 1\n  :b 2\n  fallback)");
    }

    #[test]
    fn nested_form_indents_from_its_own_column() {
        let source = "(a (b c d e) f)";
        let result = parse(source);
        let ignored = IgnoredRegions::default();
        let candidates = breakable_forms(&result.tree, 1, &ignored);
        let inner = candidates[1];

        let edits = plan(inner, source, &Config::default());
        let out = apply_edits(source, &edits).unwrap();
        assert_eq!(out, "(a (b\n    c\n    d\n    e) f)");
    }

    #[test]
    fn inline_comment_stays_attached() {
        let source = "(do x ; note\ny)";
        let result = parse(source);
        let list = result.tree.root_node().named_child(0).unwrap();
        let edits = plan(list, source, &Config::default());
        let out = apply_edits(source, &edits).unwrap();
        assert_eq!(out, "(do\n  x ; note\n  y)");
    }

    #[test]
    fn form_with_nothing_to_break_plans_no_edits() {
        let source = "(defn foo)";
        let result = parse(source);
        let list = result.tree.root_node().named_child(0).unwrap();
        assert!(plan(list, source, &Config::default()).is_empty());
    }
}
