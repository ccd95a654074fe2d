//! Structural ignore mechanism
//!
//! A discard form whose single named child is the `:cljline/ignore` keyword
//! marks its next named sibling as off-limits: the fixer will not touch any
//! form inside it, and the checker will not report its lines.

use tree_sitter::{Node, Tree};

use crate::syntax;

/// The ignore sentinel. The namespace is a build-time constant.
pub const IGNORE_SENTINEL: &str = ":cljline/ignore";

/// Byte and line ranges protected by ignore markers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoredRegions {
    /// Half-open byte ranges
    pub byte_ranges: Vec<(usize, usize)>,
    /// 1-indexed line ranges, inclusive on both ends
    pub line_ranges: Vec<(usize, usize)>,
}

impl IgnoredRegions {
    /// Whether a 1-indexed line falls inside any ignored line range
    pub fn covers_line(&self, line: usize) -> bool {
        self.line_ranges
            .iter()
            .any(|&(start, end)| start <= line && line <= end)
    }

    /// Whether a byte range is contained in any ignored byte range
    pub fn contains_range(&self, start: usize, end: usize) -> bool {
        self.byte_ranges
            .iter()
            .any(|&(b0, b1)| b0 <= start && end <= b1)
    }

    pub fn is_empty(&self) -> bool {
        self.byte_ranges.is_empty()
    }
}

/// Collect the regions protected by ignore markers in one traversal
pub fn collect_ignored(tree: &Tree, source: &str) -> IgnoredRegions {
    let mut regions = IgnoredRegions::default();
    collect_in(tree.root_node(), source, &mut regions);
    regions
}

/// Whether a node is an ignore marker: a discard whose single named child is
/// a keyword token spelling the sentinel.
fn is_ignore_marker(node: &Node, source: &str) -> bool {
    if !syntax::is_discard(node) || node.named_child_count() != 1 {
        return false;
    }
    let child = match node.named_child(0) {
        Some(child) => child,
        None => return false,
    };
    child.kind() == "kwd_lit" && syntax::node_text(&child, source) == IGNORE_SENTINEL
}

fn collect_in(node: Node, source: &str, regions: &mut IgnoredRegions) {
    let mut skip_next = false;
    for child in syntax::named_children(node) {
        // A marker that is itself the target of a preceding marker still
        // protects its own successor; the chain falls out of the
        // single-successor rule.
        if is_ignore_marker(&child, source) {
            if let Some(target) = child.next_named_sibling() {
                regions
                    .byte_ranges
                    .push((target.start_byte(), target.end_byte()));
                regions.line_ranges.push((
                    target.start_position().row + 1,
                    target.end_position().row + 1,
                ));
            }
            skip_next = true;
            continue;
        }
        if skip_next {
            skip_next = false;
            continue;
        }
        collect_in(child, source, regions);
    }
}
