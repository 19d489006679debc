//! The step model - one instant of an algorithm's execution.
//!
//! A [`Step`] is immutable once recorded. Every payload is owned (values are
//! deep-copied into the step when it is recorded), so no two steps can ever
//! be observed to change in tandem as playback advances.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::trace::Trace;

// ── VarSnapshot ──────────────────────────────────────────────────────────────

/// Insertion-ordered variable name/value pairs visible at one step.
///
/// Insertion order is display order in the variable panel. Setting an
/// existing name overwrites its value in place, keeping the original
/// position. Serializes as a JSON object with the same ordering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VarSnapshot {
    entries: Vec<(String, Value)>,
}

impl VarSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, preserving first-insertion order on overwrite.
    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, value);
        self
    }

    /// Look up a variable by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for VarSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VarSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SnapshotVisitor;

        impl<'de> Visitor<'de> for SnapshotVisitor {
            type Value = VarSnapshot;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of variable names to values")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut snapshot = VarSnapshot::new();
                while let Some((name, value)) = map.next_entry::<String, Value>()? {
                    snapshot.set(name, value);
                }
                Ok(snapshot)
            }
        }

        deserializer.deserialize_map(SnapshotVisitor)
    }
}

// ── Step ─────────────────────────────────────────────────────────────────────

/// One instant of an algorithm's execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Abstract step marker (not a literal source line). Always >= 1.
    pub line: u32,

    /// Variables visible at this instant, in display order.
    #[serde(default)]
    pub variables: VarSnapshot,

    /// Human-readable narration of what happened, stating concrete values.
    pub description: String,

    /// `Some` marks the terminal step and carries the final result.
    /// A vacuous result (degenerate input) is `Some(Value::Null)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
}

impl Step {
    /// Whether this is the trace's terminal step.
    pub fn is_terminal(&self) -> bool {
        self.result.is_some()
    }
}

// ── TraceRecorder ────────────────────────────────────────────────────────────

/// Builds a [`Trace`] one step at a time.
///
/// The recorder is how generators uphold the trace invariants by
/// construction: [`step`](Self::step) only appends non-terminal steps, and
/// the trace can only be obtained through [`finish`](Self::finish), which
/// appends the single terminal step last.
///
/// Line markers must be >= 1 and descriptions non-empty; violations are
/// programming errors in the calling generator and are caught by debug
/// assertions.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    steps: Vec<Step>,
}

impl TraceRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a non-terminal step.
    pub fn step(&mut self, line: u32, description: impl Into<String>, variables: VarSnapshot) {
        let description = description.into();
        debug_assert!(line >= 1, "abstract line markers start at 1");
        debug_assert!(!description.is_empty(), "step descriptions must be non-empty");
        self.steps.push(Step {
            line,
            variables,
            description,
            result: None,
        });
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append the terminal step and produce the finished trace.
    ///
    /// `result` is the algorithm's final value; pass `Value::Null` for the
    /// vacuous result of a degenerate input.
    pub fn finish(
        mut self,
        line: u32,
        description: impl Into<String>,
        variables: VarSnapshot,
        result: Value,
    ) -> Trace {
        let description = description.into();
        debug_assert!(line >= 1, "abstract line markers start at 1");
        debug_assert!(!description.is_empty(), "step descriptions must be non-empty");
        self.steps.push(Step {
            line,
            variables,
            description,
            result: Some(result),
        });
        Trace::new_unchecked(self.steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_preserves_insertion_order() {
        let snap = VarSnapshot::new()
            .with("right", json!(3))
            .with("left", json!(0))
            .with("sum", json!(17));

        let names: Vec<&str> = snap.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["right", "left", "sum"]);
    }

    #[test]
    fn test_snapshot_overwrite_keeps_position() {
        let mut snap = VarSnapshot::new();
        snap.set("left", json!(0));
        snap.set("right", json!(3));
        snap.set("left", json!(1));

        let names: Vec<&str> = snap.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["left", "right"]);
        assert_eq!(snap.get("left"), Some(&json!(1)));
        assert_eq!(snap.len(), 2);
    }

    #[test]
    fn test_snapshot_serializes_as_ordered_object() {
        let snap = VarSnapshot::new()
            .with("b", json!(2))
            .with("a", json!(1));
        let json = serde_json::to_string(&snap).unwrap();
        assert_eq!(json, r#"{"b":2,"a":1}"#);

        let back: VarSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);
    }

    #[test]
    fn test_recorder_marks_only_finish_terminal() {
        let mut rec = TraceRecorder::new();
        rec.step(1, "initialize left=0 and right=3", VarSnapshot::new());
        rec.step(2, "check left=0 < right=3", VarSnapshot::new());
        let trace = rec.finish(4, "found the answer", VarSnapshot::new(), json!([0, 1]));

        assert_eq!(trace.len(), 3);
        assert!(!trace.steps()[0].is_terminal());
        assert!(!trace.steps()[1].is_terminal());
        assert!(trace.steps()[2].is_terminal());
        assert_eq!(trace.terminal().result, Some(json!([0, 1])));
    }

    #[test]
    fn test_finish_alone_yields_single_step_trace() {
        let trace = TraceRecorder::new().finish(
            1,
            "array is empty, nothing to do",
            VarSnapshot::new(),
            Value::Null,
        );
        assert_eq!(trace.len(), 1);
        assert!(trace.steps()[0].is_terminal());
    }

    #[test]
    fn test_steps_do_not_alias() {
        // Mutating a local after recording must not be visible in the trace.
        let mut nums = vec![2, 7, 11, 15];
        let mut rec = TraceRecorder::new();
        rec.step(
            1,
            "initial array",
            VarSnapshot::new().with("nums", json!(nums)),
        );
        nums.swap(0, 3);
        let trace = rec.finish(
            2,
            "after swap",
            VarSnapshot::new().with("nums", json!(nums)),
            Value::Null,
        );

        assert_eq!(
            trace.steps()[0].variables.get("nums"),
            Some(&json!([2, 7, 11, 15]))
        );
        assert_eq!(
            trace.steps()[1].variables.get("nums"),
            Some(&json!([15, 7, 11, 2]))
        );
    }
}
