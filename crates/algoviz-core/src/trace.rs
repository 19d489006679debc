//! Validated step sequences.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::step::Step;

/// The full ordered sequence of steps produced for one input.
///
/// Invariants, guaranteed by construction (via
/// [`TraceRecorder`](crate::step::TraceRecorder)) or by validation (via
/// [`from_steps`](Self::from_steps)):
/// - non-empty;
/// - exactly one terminal step;
/// - the terminal step is last.
///
/// Index 0 is the initial state before any algorithmic work.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Trace {
    steps: Vec<Step>,
}

impl Trace {
    /// Construct without validation. Only the recorder uses this; it is the
    /// one place the invariants are upheld structurally.
    pub(crate) fn new_unchecked(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Validate an externally produced step sequence (e.g. deserialized).
    pub fn from_steps(steps: Vec<Step>) -> Result<Self> {
        if steps.is_empty() {
            return Err(Error::EmptyTrace);
        }
        let terminal_count = steps.iter().filter(|s| s.is_terminal()).count();
        if terminal_count != 1 {
            return Err(Error::malformed_trace(format!(
                "expected exactly 1 terminal step, found {terminal_count}"
            )));
        }
        if !steps[steps.len() - 1].is_terminal() {
            return Err(Error::malformed_trace(
                "terminal step is not the last step",
            ));
        }
        if let Some(bad) = steps.iter().position(|s| s.line == 0) {
            return Err(Error::malformed_trace(format!(
                "step {bad} has line marker 0 (markers start at 1)"
            )));
        }
        if let Some(bad) = steps.iter().position(|s| s.description.is_empty()) {
            return Err(Error::malformed_trace(format!(
                "step {bad} has an empty description"
            )));
        }
        Ok(Self { steps })
    }

    /// Number of steps. Always >= 1.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Index of the terminal step.
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// The step at `index`, if in range.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// All steps, in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The terminal step.
    pub fn terminal(&self) -> &Step {
        // Non-empty by invariant.
        &self.steps[self.steps.len() - 1]
    }
}

impl std::ops::Index<usize> for Trace {
    type Output = Step;

    fn index(&self, index: usize) -> &Step {
        &self.steps[index]
    }
}

impl<'de> Deserialize<'de> for Trace {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let steps = Vec::<Step>::deserialize(deserializer)?;
        Trace::from_steps(steps).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::{TraceRecorder, VarSnapshot};
    use serde_json::{json, Value};

    fn sample_trace() -> Trace {
        let mut rec = TraceRecorder::new();
        rec.step(1, "initialize", VarSnapshot::new());
        rec.step(2, "compare 2 + 15 = 17 with 9", VarSnapshot::new());
        rec.finish(3, "done", VarSnapshot::new(), json!([0, 1]))
    }

    #[test]
    fn test_from_steps_rejects_empty() {
        assert!(matches!(Trace::from_steps(vec![]), Err(Error::EmptyTrace)));
    }

    #[test]
    fn test_from_steps_rejects_missing_terminal() {
        let steps = vec![Step {
            line: 1,
            variables: VarSnapshot::new(),
            description: "only step".to_string(),
            result: None,
        }];
        assert!(matches!(
            Trace::from_steps(steps),
            Err(Error::MalformedTrace { .. })
        ));
    }

    #[test]
    fn test_from_steps_rejects_terminal_not_last() {
        let steps = vec![
            Step {
                line: 1,
                variables: VarSnapshot::new(),
                description: "terminal first".to_string(),
                result: Some(Value::Null),
            },
            Step {
                line: 2,
                variables: VarSnapshot::new(),
                description: "trailing".to_string(),
                result: None,
            },
        ];
        assert!(matches!(
            Trace::from_steps(steps),
            Err(Error::MalformedTrace { .. })
        ));
    }

    #[test]
    fn test_from_steps_rejects_zero_line_marker() {
        let steps = vec![Step {
            line: 0,
            variables: VarSnapshot::new(),
            description: "bad marker".to_string(),
            result: Some(Value::Null),
        }];
        assert!(matches!(
            Trace::from_steps(steps),
            Err(Error::MalformedTrace { .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let trace = sample_trace();
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.last_index(), 2);
        assert_eq!(trace.get(0).unwrap().line, 1);
        assert!(trace.get(3).is_none());
        assert_eq!(trace[1].line, 2);
        assert_eq!(trace.terminal().result, Some(json!([0, 1])));
    }

    #[test]
    fn test_serde_round_trip_revalidates() {
        let trace = sample_trace();
        let json = serde_json::to_string(&trace).unwrap();
        let back: Trace = serde_json::from_str(&json).unwrap();
        assert_eq!(back, trace);

        // A tampered payload with no terminal step fails to deserialize.
        let bad = r#"[{"line":1,"variables":{},"description":"x"}]"#;
        assert!(serde_json::from_str::<Trace>(bad).is_err());
    }
}
