//! Binary search over a sorted array.
//!
//! Abstract line markers:
//! 1. initialize `low` / `high`
//! 2. loop condition check (`low <= high`)
//! 3. compute `mid`
//! 4. `nums[mid] == target`, found
//! 5. `nums[mid] < target`, search upper half
//! 6. `nums[mid] > target`, search lower half
//! 7. search space exhausted, not found

use serde_json::json;

use algoviz_core::prelude::*;
use algoviz_core::{QuestionId, Trace, TraceRecorder, VarSnapshot};

use crate::generator::TraceGenerator;
use crate::input::{parse_array_target, ProblemInput};

pub struct BinarySearch;

impl TraceGenerator for BinarySearch {
    fn question_id(&self) -> QuestionId {
        QuestionId(2)
    }

    fn parse_input(&self, raw: &str) -> Result<ProblemInput> {
        let (values, target) = parse_array_target(raw)?;
        Ok(ProblemInput::ArrayTarget { values, target })
    }

    fn generate(&self, input: &ProblemInput) -> Trace {
        let (nums, target) = match input {
            ProblemInput::ArrayTarget { values, target } => (values.as_slice(), *target),
            _ => {
                return TraceRecorder::new().finish(
                    1,
                    "Expected a sorted array and a target value.",
                    VarSnapshot::new(),
                    serde_json::Value::Null,
                );
            }
        };

        let mut rec = TraceRecorder::new();
        // i64 bounds so the empty-array case (high = -1) falls out of the
        // loop check naturally instead of underflowing.
        let mut low: i64 = 0;
        let mut high: i64 = nums.len() as i64 - 1;

        let vars = |low: i64, high: i64| {
            VarSnapshot::new()
                .with("nums", json!(nums))
                .with("target", json!(target))
                .with("low", json!(low))
                .with("high", json!(high))
        };

        rec.step(
            1,
            format!("Initialize low = 0 and high = {high}, covering the whole array."),
            vars(low, high),
        );

        while low <= high {
            rec.step(
                2,
                format!("Check low = {low} <= high = {high}: the search space is non-empty."),
                vars(low, high),
            );

            let mid = (low + high) / 2;
            let value = nums[mid as usize];
            rec.step(
                3,
                format!("mid = ({low} + {high}) / 2 = {mid}; nums[{mid}] = {value}."),
                vars(low, high).with("mid", json!(mid)),
            );

            match value.cmp(&target) {
                std::cmp::Ordering::Equal => {
                    return rec.finish(
                        4,
                        format!("nums[{mid}] = {value} equals {target}: found at index {mid}."),
                        vars(low, high).with("mid", json!(mid)),
                        json!(mid),
                    );
                }
                std::cmp::Ordering::Less => {
                    rec.step(
                        5,
                        format!(
                            "nums[{mid}] = {value} < {target}: search the upper half, low = {}.",
                            mid + 1
                        ),
                        vars(mid + 1, high).with("mid", json!(mid)),
                    );
                    low = mid + 1;
                }
                std::cmp::Ordering::Greater => {
                    rec.step(
                        6,
                        format!(
                            "nums[{mid}] = {value} > {target}: search the lower half, high = {}.",
                            mid - 1
                        ),
                        vars(low, mid - 1).with("mid", json!(mid)),
                    );
                    high = mid - 1;
                }
            }
        }

        rec.step(
            2,
            format!("Check low = {low} <= high = {high}: the search space is empty, stop."),
            vars(low, high),
        );
        rec.finish(
            7,
            format!("{target} is not present in the array."),
            vars(low, high),
            json!(-1),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(values: Vec<i64>, target: i64) -> Trace {
        BinarySearch.generate(&ProblemInput::ArrayTarget { values, target })
    }

    #[test]
    fn test_finds_target() {
        let trace = generate(vec![-4, 1, 3, 5, 9, 12], 9);
        assert_eq!(trace[0].line, 1);
        assert_eq!(trace.terminal().line, 4);
        assert_eq!(trace.terminal().result, Some(json!(4)));
        // mid = (0 + 5) / 2 = 2 on the first probe.
        let first_mid = trace.steps().iter().find(|s| s.line == 3).unwrap();
        assert!(first_mid.description.contains("mid = (0 + 5) / 2 = 2"));
        assert!(first_mid.description.contains("nums[2] = 3"));
    }

    #[test]
    fn test_target_absent() {
        let trace = generate(vec![1, 3, 5], 4);
        assert_eq!(trace.terminal().line, 7);
        assert_eq!(trace.terminal().result, Some(json!(-1)));
    }

    #[test]
    fn test_empty_array_exits_before_first_probe() {
        let trace = generate(vec![], 7);
        // init, failed loop check, terminal - and no mid computation.
        assert_eq!(trace.len(), 3);
        assert!(trace.steps().iter().all(|s| s.line != 3));
        assert_eq!(trace.terminal().result, Some(json!(-1)));
    }

    #[test]
    fn test_single_element() {
        let hit = generate(vec![7], 7);
        assert_eq!(hit.terminal().result, Some(json!(0)));

        let miss = generate(vec![7], 8);
        assert_eq!(miss.terminal().result, Some(json!(-1)));
    }

    #[test]
    fn test_decision_steps_state_halving() {
        let trace = generate(vec![1, 3, 5, 7, 9], 9);
        // 5 < 9 sends the search into the upper half first.
        let upper = trace.steps().iter().find(|s| s.line == 5).unwrap();
        assert!(upper.description.contains("upper half"));
        assert!(upper.description.contains("low = 3"));
    }
}
