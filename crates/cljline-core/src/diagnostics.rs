//! Violation types and the line-width scanner

use serde::{Deserialize, Serialize};

/// A line exceeding the configured width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Line number (1-based)
    pub line: usize,
    /// Width of the line in characters
    pub length: usize,
}

impl Violation {
    /// Characters beyond the limit
    pub fn excess(&self, limit: usize) -> usize {
        self.length.saturating_sub(limit)
    }
}

/// Scan source text for lines wider than `limit` characters.
///
/// Lines are 1-indexed. Width is the Unicode scalar count of the line
/// content; the `\r` of a CRLF terminator is not counted.
pub fn scan_violations(source: &str, limit: usize) -> Vec<Violation> {
    source
        .split('\n')
        .enumerate()
        .filter_map(|(idx, raw)| {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let length = line.chars().count();
            (length > limit).then_some(Violation {
                line: idx + 1,
                length,
            })
        })
        .collect()
}
