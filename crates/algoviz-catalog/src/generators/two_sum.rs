//! Two Sum II - two-pointer scan over a sorted array.
//!
//! The reference generator: the worked example the other generators follow.
//!
//! Abstract line markers:
//! 1. initialize `left` / `right`
//! 2. loop condition check (`left < right`)
//! 3. compute `sum = nums[left] + nums[right]`
//! 4. pair found (`sum == target`)
//! 5. `sum < target`, advance `left`
//! 6. `sum > target`, retreat `right`
//! 7. pointers met without a match

use serde_json::{json, Value};

use algoviz_core::prelude::*;
use algoviz_core::{QuestionId, Trace, TraceRecorder, VarSnapshot};

use crate::generator::TraceGenerator;
use crate::input::{parse_array_target, ProblemInput};

pub struct TwoSumSorted;

impl TraceGenerator for TwoSumSorted {
    fn question_id(&self) -> QuestionId {
        QuestionId(1)
    }

    fn parse_input(&self, raw: &str) -> Result<ProblemInput> {
        let (values, target) = parse_array_target(raw)?;
        Ok(ProblemInput::ArrayTarget { values, target })
    }

    fn generate(&self, input: &ProblemInput) -> Trace {
        let (nums, target) = match input {
            ProblemInput::ArrayTarget { values, target } => (values.as_slice(), *target),
            other => return degenerate(other),
        };
        if nums.len() < 2 {
            return degenerate(input);
        }

        let mut rec = TraceRecorder::new();
        let mut left = 0usize;
        let mut right = nums.len() - 1;

        let vars = |left: usize, right: usize| {
            VarSnapshot::new()
                .with("nums", json!(nums))
                .with("target", json!(target))
                .with("left", json!(left))
                .with("right", json!(right))
        };

        rec.step(
            1,
            format!("Initialize left = 0 and right = {right}, the ends of the sorted array."),
            vars(left, right),
        );

        while left < right {
            rec.step(
                2,
                format!("Check left = {left} < right = {right}: keep scanning."),
                vars(left, right),
            );

            let sum = nums[left] + nums[right];
            rec.step(
                3,
                format!(
                    "sum = nums[{left}] + nums[{right}] = {} + {} = {sum}.",
                    nums[left], nums[right]
                ),
                vars(left, right).with("sum", json!(sum)),
            );

            match sum.cmp(&target) {
                std::cmp::Ordering::Equal => {
                    return rec.finish(
                        4,
                        format!(
                            "{} + {} = {target}: the pair is at indices [{left}, {right}].",
                            nums[left], nums[right]
                        ),
                        vars(left, right).with("sum", json!(sum)),
                        json!([left, right]),
                    );
                }
                std::cmp::Ordering::Less => {
                    rec.step(
                        5,
                        format!("{sum} < {target}: advance left from {left} to {}.", left + 1),
                        vars(left + 1, right).with("sum", json!(sum)),
                    );
                    left += 1;
                }
                std::cmp::Ordering::Greater => {
                    rec.step(
                        6,
                        format!(
                            "{sum} > {target}: move right from {right} to {}.",
                            right - 1
                        ),
                        vars(left, right - 1).with("sum", json!(sum)),
                    );
                    right -= 1;
                }
            }
        }

        rec.step(
            2,
            format!("Check left = {left} < right = {right}: pointers met, stop scanning."),
            vars(left, right),
        );
        rec.finish(
            7,
            format!("No two values in the array sum to {target}."),
            vars(left, right),
            json!([]),
        )
    }
}

fn degenerate(input: &ProblemInput) -> Trace {
    let description = match input {
        ProblemInput::ArrayTarget { values, .. } if values.is_empty() => {
            "The array is empty; no pair can exist.".to_string()
        }
        ProblemInput::ArrayTarget { values, .. } => format!(
            "The array has only {} value(s); a pair needs at least two.",
            values.len()
        ),
        _ => "Expected a sorted array and a target value.".to_string(),
    };
    TraceRecorder::new().finish(1, description, VarSnapshot::new(), Value::Null)
}
