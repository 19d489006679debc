//! Custom-input model and parsing.
//!
//! Raw input arrives as free-form text from the custom-input box. Each
//! generator parses it into the [`ProblemInput`] variant it consumes; parse
//! failures are [`Error::InvalidInput`] and must never disturb the trace
//! that is already playing.

use serde::Deserialize;

use algoviz_core::prelude::*;

/// Parsed input for one trace generation, tagged by shape.
#[derive(Debug, Clone, PartialEq)]
pub enum ProblemInput {
    /// A bare integer array, e.g. `[5,1,4,2,8]`
    Array(Vec<i64>),

    /// An integer array plus a target value, e.g. `[2,7,11,15], 9`
    ArrayTarget { values: Vec<i64>, target: i64 },

    /// Free text, for string problems
    Text(String),
}

impl ProblemInput {
    /// Number of values carried, used to enforce the configured input cap
    /// (trace length grows with this, quadratically for some generators).
    pub fn size(&self) -> usize {
        match self {
            ProblemInput::Array(values) => values.len(),
            ProblemInput::ArrayTarget { values, .. } => values.len(),
            ProblemInput::Text(text) => text.chars().count(),
        }
    }
}

/// Object form of an array+target input: `{"values": [2,7], "target": 9}`.
/// `nums` is accepted as an alias for `values`.
#[derive(Debug, Deserialize)]
struct ArrayTargetObject {
    #[serde(alias = "nums")]
    values: Vec<i64>,
    target: i64,
}

/// Parse a bare integer array: `[2, 7, 11, 15]`.
pub fn parse_int_array(raw: &str) -> Result<Vec<i64>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::invalid_input("expected an array like [2,7,11,15]"));
    }
    serde_json::from_str(raw)
        .map_err(|e| Error::invalid_input(format!("expected an array like [2,7,11,15]: {e}")))
}

/// Parse an array plus target.
///
/// Accepted forms:
/// - `[2,7,11,15], 9` (array, comma, target)
/// - `{"values": [2,7,11,15], "target": 9}` (`nums` aliases `values`)
pub fn parse_array_target(raw: &str) -> Result<(Vec<i64>, i64)> {
    let raw = raw.trim();
    if raw.starts_with('{') {
        let parsed: ArrayTargetObject = serde_json::from_str(raw)
            .map_err(|e| Error::invalid_input(format!("expected values and target: {e}")))?;
        return Ok((parsed.values, parsed.target));
    }

    let close = raw
        .rfind(']')
        .ok_or_else(|| Error::invalid_input("expected an array like [2,7,11,15], 9"))?;
    let values = parse_int_array(&raw[..=close])?;

    let rest = raw[close + 1..].trim_start().trim_start_matches(',').trim();
    if rest.is_empty() {
        return Err(Error::invalid_input(
            "missing target value after the array, e.g. [2,7,11,15], 9",
        ));
    }
    let target: i64 = rest
        .parse()
        .map_err(|_| Error::invalid_input(format!("target is not an integer: {rest:?}")))?;

    Ok((values, target))
}
