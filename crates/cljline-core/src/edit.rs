//! Byte-range edits and their application

use crate::error::CljlineError;
use crate::Result;

/// A single replacement of a byte range with new text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    /// Start byte offset (inclusive)
    pub start_byte: usize,
    /// End byte offset (exclusive)
    pub end_byte: usize,
    /// The replacement text
    pub replacement: String,
}

impl Edit {
    pub fn new(start_byte: usize, end_byte: usize, replacement: impl Into<String>) -> Self {
        Self {
            start_byte,
            end_byte,
            replacement: replacement.into(),
        }
    }
}

/// Apply a set of pairwise non-overlapping edits to `source`.
///
/// Edits are applied in descending start order so earlier offsets stay
/// valid. Overlap, inverted or out-of-bounds ranges, and offsets that fall
/// inside a UTF-8 sequence are internal errors: the planner only ever emits
/// ranges between sibling nodes.
pub fn apply_edits(source: &str, edits: &[Edit]) -> Result<String> {
    let mut sorted: Vec<&Edit> = edits.iter().collect();
    sorted.sort_by(|a, b| b.start_byte.cmp(&a.start_byte));

    let mut result = source.to_string();
    let mut applied_start = usize::MAX;

    for edit in sorted {
        if edit.start_byte > edit.end_byte {
            return Err(CljlineError::internal_error(format!(
                "inverted edit range {}..{}",
                edit.start_byte, edit.end_byte
            )));
        }
        if edit.end_byte > source.len() {
            return Err(CljlineError::internal_error(format!(
                "edit range {}..{} exceeds source length {}",
                edit.start_byte,
                edit.end_byte,
                source.len()
            )));
        }
        if edit.end_byte > applied_start {
            return Err(CljlineError::internal_error(format!(
                "overlapping edits at byte {}",
                edit.end_byte
            )));
        }
        if !source.is_char_boundary(edit.start_byte) || !source.is_char_boundary(edit.end_byte) {
            return Err(CljlineError::internal_error(format!(
                "edit range {}..{} splits a UTF-8 sequence",
                edit.start_byte, edit.end_byte
            )));
        }

        result.replace_range(edit.start_byte..edit.end_byte, &edit.replacement);
        applied_start = edit.start_byte;
    }

    Ok(result)
}
