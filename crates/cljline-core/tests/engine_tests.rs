//! End-to-end tests for the reformatting engine

use cljline_core::syntax::named_children;
use cljline_core::{check_source, fix_source, ClojureParser, Config};

fn fix(source: &str, limit: usize) -> String {
    fix_source(source, &Config::with_line_length(limit)).unwrap()
}

#[test]
fn plain_call_breaks_at_one_space_indent() {
    let fixed = fix("(println \"Hello\" \"World\" \"from\" \"Clojure\")", 30);
    assert_eq!(fixed, "(println\n \"Hello\"\n \"World\"\n \"from\"\n \"Clojure\")");
}

#[test]
fn definition_keeps_its_name_on_the_opening_line() {
    let fixed = fix("(defn foo [x] (+ x 1))", 15);
    assert_eq!(fixed, "(defn foo\n  [x]\n  (+ x 1))");
}

#[test]
fn binding_vector_groups_pairs_aligned_inside_bracket() {
    let fixed = fix("(let [x 1 y 2 z 3] body)", 14);
    assert_eq!(fixed, "(let [x 1\n      y 2\n      z 3]\n  body)");
}

#[test]
fn map_literal_groups_pairs() {
    let fixed = fix("{:a 1 :b 2 :c 3}", 10);
    assert_eq!(fixed, "{:a 1\n  :b 2\n  :c 3}");
}

#[test]
fn nested_form_fits_after_outer_break() {
    let fixed = fix("(a (b c d e) f)", 10);
    assert_eq!(fixed, "(a\n (b c d e)\n f)");
}

#[test]
fn ignore_marker_protects_following_form() {
    let source = "#_:cljline/ignore (foo bar baz qux)";
    assert_eq!(fix(source, 10), source);
}

#[test]
fn unbreakable_atom_remains_and_is_reported() {
    let config = Config::with_line_length(10);
    let fixed = fix_source("(def x \"long-string-literal\")", &config).unwrap();
    assert_eq!(fixed, "(def x\n  \"long-string-literal\")");

    let violations = check_source(&fixed, &config).unwrap();
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].line, 2);
}

#[test]
fn multibyte_characters_survive_breaking() {
    let fixed = fix("(é b c)", 5);
    assert_eq!(fixed, "(é\n b\n c)");
}

// -- invariants ------------------------------------------------------------

const SAMPLES: &[(&str, usize)] = &[
    ("(println \"Hello\" \"World\" \"from\" \"Clojure\")", 30),
    ("(defn foo [x] (+ x 1))", 15),
    ("(let [x 1 y 2 z 3] body)", 14),
    ("{:a 1 :b 2 :c 3}", 10),
    ("(a (b c d e) f)", 10),
    ("(def x \"long-string-literal\")", 10),
    ("(é b c)", 5),
    ("(condp = value 1 :one 2 :two 3 :three)", 16),
    ("(cond (= a 1) :one (= a 2) :two :else :other)", 20),
    ("#{:alpha :beta :gamma :delta :epsilon}", 12),
];

#[test]
fn fix_is_idempotent() {
    for &(source, limit) in SAMPLES {
        let config = Config::with_line_length(limit);
        let once = fix_source(source, &config).unwrap();
        let twice = fix_source(&once, &config).unwrap();
        assert_eq!(once, twice, "source: {source}");
    }
}

#[test]
fn fix_preserves_every_token() {
    for &(source, limit) in SAMPLES {
        let fixed = fix(source, limit);
        for token in source.split_whitespace() {
            let bare = token.trim_matches(|c| "()[]{}#".contains(c));
            if !bare.is_empty() {
                assert!(fixed.contains(bare), "token {bare} lost from {source}");
            }
        }
    }
}

/// Flatten a tree to the (kind, text) sequence of its atoms
fn atom_sequence(source: &str) -> Vec<(String, String)> {
    let mut parser = ClojureParser::new().unwrap();
    let result = parser.parse(source).unwrap();
    let mut atoms = Vec::new();
    let mut stack = vec![result.tree.root_node()];
    while let Some(node) = stack.pop() {
        let children = named_children(node);
        if children.is_empty() {
            let text = &source[node.start_byte()..node.end_byte()];
            atoms.push((node.kind().to_string(), text.to_string()));
        } else {
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
    }
    atoms
}

#[test]
fn fix_preserves_parse_structure() {
    for &(source, limit) in SAMPLES {
        let fixed = fix(source, limit);
        assert_eq!(
            atom_sequence(source),
            atom_sequence(&fixed),
            "source: {source}"
        );
    }
}

#[test]
fn ignored_range_appears_verbatim_in_output() {
    let protected = "(foo    bar   baz)";
    let source = format!("(another form that is too long)\n#_:cljline/ignore {protected}");
    let fixed = fix(&source, 12);

    assert_ne!(fixed, source);
    assert!(fixed.contains(protected));
}

#[test]
fn fix_unwraps_deeply_nested_input_until_only_atoms_overflow() {
    let source = "(a (b (c (d (e long-token-here another-token)))))";
    let config = Config::with_line_length(16);
    let fixed = fix_source(source, &config).unwrap();

    assert_ne!(fixed, source);
    // remaining wide lines carry single long tokens; a second run is a no-op
    assert_eq!(fix_source(&fixed, &config).unwrap(), fixed);
    for violation in check_source(&fixed, &config).unwrap() {
        let line = fixed.lines().nth(violation.line - 1).unwrap();
        assert_eq!(line.trim_start_matches([' ', '(']).split_whitespace().count(), 1);
    }
}

#[test]
fn comment_on_broken_line_keeps_following_element_indented() {
    let fixed = fix("(do first-thing ; trailing note\n    second-thing third)", 20);
    let lines: Vec<&str> = fixed.lines().collect();
    assert_eq!(lines[0], "(do");
    assert_eq!(lines[1], "  first-thing ; trailing note");
    assert!(lines[2].starts_with("  "));
}
