//! Clojure parsing via tree-sitter

use tree_sitter::{Parser as TreeSitterParser, Tree, TreeCursor};

use crate::error::CljlineError;
use crate::Result;

/// Tree-sitter based Clojure parser.
///
/// The grammar is statically linked and process-wide; each parser instance
/// owns only the cursor state needed to produce trees.
pub struct ClojureParser {
    parser: TreeSitterParser,
}

/// Result of parsing Clojure source
#[derive(Debug)]
pub struct ParseResult {
    /// The parsed syntax tree
    pub tree: Tree,
    /// Syntax errors encountered during parsing
    pub errors: Vec<ParseError>,
    /// Source content that was parsed
    pub source: String,
}

/// Parse error information
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Error message
    pub message: String,
    /// Line number (0-based)
    pub line: usize,
    /// Column number (0-based)
    pub column: usize,
    /// Byte offset in source
    pub offset: usize,
    /// Length of the error span
    pub length: usize,
}

impl ClojureParser {
    /// Create a new parser with the Clojure grammar installed
    pub fn new() -> Result<Self> {
        let mut parser = TreeSitterParser::new();
        parser
            .set_language(&tree_sitter_clojure::LANGUAGE.into())
            .map_err(|e| {
                CljlineError::parse_error(format!("Failed to set Clojure language: {e}"))
            })?;
        Ok(Self { parser })
    }

    /// Parse source text into a tree.
    ///
    /// Trees containing error nodes are accepted; callers treat error nodes
    /// as opaque atoms. Only a grammar-level failure to produce any tree is
    /// an error.
    pub fn parse(&mut self, content: &str) -> Result<ParseResult> {
        let tree = self
            .parser
            .parse(content, None)
            .ok_or_else(|| CljlineError::parse_error("Failed to parse Clojure content"))?;

        let errors = Self::extract_errors(&tree);
        Ok(ParseResult {
            tree,
            errors,
            source: content.to_string(),
        })
    }

    /// Collect error and missing nodes from the syntax tree
    fn extract_errors(tree: &Tree) -> Vec<ParseError> {
        let mut errors = Vec::new();
        if tree.root_node().has_error() {
            let mut cursor = tree.walk();
            Self::collect_errors_recursive(&mut cursor, &mut errors);
        }
        errors
    }

    fn collect_errors_recursive(cursor: &mut TreeCursor, errors: &mut Vec<ParseError>) {
        let node = cursor.node();

        if node.is_error() || node.is_missing() {
            let start_byte = node.start_byte();
            let start_point = node.start_position();
            let message = if node.is_missing() {
                format!("Missing {}", node.kind())
            } else {
                format!("Syntax error: unexpected {}", node.kind())
            };

            errors.push(ParseError {
                message,
                line: start_point.row,
                column: start_point.column,
                offset: start_byte,
                length: node.end_byte().saturating_sub(start_byte),
            });
        }

        if cursor.goto_first_child() {
            loop {
                Self::collect_errors_recursive(cursor, errors);
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
            cursor.goto_parent();
        }
    }
}

impl ParseResult {
    /// Check if the parse result has any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The first parse error, if any
    pub fn first_error(&self) -> Option<&ParseError> {
        self.errors.first()
    }
}
