//! Line-mapping resolution - abstract step markers to concrete source lines.
//!
//! A generator emits *abstract* line markers (small integers identifying
//! logical points in the algorithm). Each question maps those markers to the
//! concrete line numbers of its printed snippets, per language. Resolution is
//! a pure lookup: when the language table or the entry is absent the result
//! is `None` ("no highlight"), never a nearest-line guess — gaps in a
//! mapping table should be visible, not papered over.

use crate::question::{Language, QuestionDefinition};

/// Resolve an abstract line marker to a concrete snippet line.
///
/// Returns `None` when the question has no mapping table for `language` or
/// the table has no entry for `abstract_line`.
pub fn resolve_line(
    question: &QuestionDefinition,
    language: Language,
    abstract_line: u32,
) -> Option<u32> {
    question
        .line_mappings
        .get(&language)
        .and_then(|table| table.get(&abstract_line))
        .copied()
}
