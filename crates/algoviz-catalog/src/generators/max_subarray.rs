//! Maximum subarray sum (Kadane's algorithm).
//!
//! Abstract line markers:
//! 1. initialize `best` and `current` with the first value
//! 2. visit the next value
//! 3. extend the running sum or restart at this value
//! 4. record a new best
//! 5. done

use serde_json::{json, Value};

use algoviz_core::prelude::*;
use algoviz_core::{QuestionId, Trace, TraceRecorder, VarSnapshot};

use crate::generator::TraceGenerator;
use crate::input::{parse_int_array, ProblemInput};

pub struct MaxSubarray;

impl TraceGenerator for MaxSubarray {
    fn question_id(&self) -> QuestionId {
        QuestionId(4)
    }

    fn parse_input(&self, raw: &str) -> Result<ProblemInput> {
        Ok(ProblemInput::Array(parse_int_array(raw)?))
    }

    fn generate(&self, input: &ProblemInput) -> Trace {
        let nums = match input {
            ProblemInput::Array(values) if !values.is_empty() => values.as_slice(),
            ProblemInput::Array(_) => {
                return TraceRecorder::new().finish(
                    1,
                    "The array is empty; there is no subarray to sum.",
                    VarSnapshot::new(),
                    Value::Null,
                );
            }
            _ => {
                return TraceRecorder::new().finish(
                    1,
                    "Expected an array of integers.",
                    VarSnapshot::new(),
                    Value::Null,
                );
            }
        };

        let mut rec = TraceRecorder::new();
        let mut best = nums[0];
        let mut current = nums[0];

        let vars = |current: i64, best: i64| {
            VarSnapshot::new()
                .with("nums", json!(nums))
                .with("current", json!(current))
                .with("best", json!(best))
        };

        rec.step(
            1,
            format!("Start with the first value: current = best = {best}."),
            vars(current, best),
        );

        for (i, &value) in nums.iter().enumerate().skip(1) {
            rec.step(
                2,
                format!("Visit nums[{i}] = {value}."),
                vars(current, best).with("i", json!(i)),
            );

            let extended = current + value;
            if extended >= value {
                current = extended;
                rec.step(
                    3,
                    format!(
                        "Extend the run: current = {} + {value} = {current} (>= {value} alone).",
                        extended - value
                    ),
                    vars(current, best).with("i", json!(i)),
                );
            } else {
                current = value;
                rec.step(
                    3,
                    format!(
                        "Restart at {value}: extending would give {extended}, worse than {value} alone."
                    ),
                    vars(current, best).with("i", json!(i)),
                );
            }

            if current > best {
                best = current;
                rec.step(
                    4,
                    format!("New best: {best}."),
                    vars(current, best).with("i", json!(i)),
                );
            }
        }

        rec.finish(
            5,
            format!("The maximum subarray sum is {best}."),
            vars(current, best),
            json!(best),
        )
    }
}
