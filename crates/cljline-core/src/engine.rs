//! Reformatting engine: the check driver and the fix loop

use tracing::{debug, trace, warn};

use crate::config::Config;
use crate::diagnostics::{scan_violations, Violation};
use crate::edit::apply_edits;
use crate::ignore::collect_ignored;
use crate::parser::ClojureParser;
use crate::planner::{breakable_forms, plan};
use crate::Result;

/// Upper bound on fix passes. A safety net: correct inputs converge well
/// below it because every successful pass replaces at least one intra-line
/// gap with a newline.
pub const MAX_ITERATIONS: usize = 100;

/// Reformatter owning a parser and a configuration.
///
/// One instance serves many sources; each `check` or `fix` call owns its
/// source and the trees parsed from it.
pub struct Reformatter {
    parser: ClojureParser,
    config: Config,
}

impl Reformatter {
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            parser: ClojureParser::new()?,
            config,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Report lines wider than the configured limit, excluding lines inside
    /// ignored ranges. Never mutates the source.
    pub fn check(&mut self, source: &str) -> Result<Vec<Violation>> {
        let violations = scan_violations(source, self.config.line_length);
        if violations.is_empty() {
            return Ok(violations);
        }

        let parsed = self.parser.parse(source)?;
        warn_on_parse_errors(&parsed);
        let ignored = collect_ignored(&parsed.tree, source);
        if ignored.is_empty() {
            return Ok(violations);
        }

        Ok(violations
            .into_iter()
            .filter(|v| !ignored.covers_line(v.line))
            .collect())
    }

    /// Repeatedly break the first violating line until the source fits, no
    /// candidate makes progress, or the iteration cap is reached. Returns
    /// the best-effort result; unbreakable violations are not an error.
    pub fn fix(&mut self, source: &str) -> Result<String> {
        let mut current = source.to_string();

        for iteration in 0..MAX_ITERATIONS {
            let violations = scan_violations(&current, self.config.line_length);
            let target = match violations.first() {
                Some(v) => v.line,
                None => return Ok(current),
            };
            trace!(iteration, target, "planning pass");

            let parsed = self.parser.parse(&current)?;
            if iteration == 0 {
                warn_on_parse_errors(&parsed);
            }
            let ignored = collect_ignored(&parsed.tree, &current);
            let candidates = breakable_forms(&parsed.tree, target, &ignored);

            let mut progressed = false;
            for candidate in candidates {
                let edits = plan(candidate, &current, &self.config);
                if edits.is_empty() {
                    continue;
                }
                let next = apply_edits(&current, &edits)?;
                if next != current {
                    current = next;
                    progressed = true;
                    break;
                }
            }

            if !progressed {
                debug!(target, "no candidate makes progress; stopping");
                return Ok(current);
            }
        }

        debug!("iteration cap reached");
        Ok(current)
    }
}

/// Trees with error nodes are processed best-effort; surface the first
/// error position so the user can tell why a region stayed untouched.
fn warn_on_parse_errors(parsed: &crate::parser::ParseResult) {
    if let Some(err) = parsed.first_error() {
        warn!(
            line = err.line + 1,
            column = err.column + 1,
            "{} (processing continues best-effort)",
            err.message
        );
    }
}

/// Check a source string against a configuration
pub fn check_source(source: &str, config: &Config) -> Result<Vec<Violation>> {
    Reformatter::new(config.clone())?.check(source)
}

/// Fix a source string against a configuration
pub fn fix_source(source: &str, config: &Config) -> Result<String> {
    Reformatter::new(config.clone())?.fix(source)
}
