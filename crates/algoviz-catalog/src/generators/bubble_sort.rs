//! Bubble sort with early exit on a clean pass.
//!
//! Abstract line markers:
//! 1. start, copy the input
//! 2. begin a pass (the tail beyond `end` is already in place)
//! 3. compare a neighbouring pair
//! 4. swap the pair
//! 5. clean pass, stop early
//! 6. sorted, done
//!
//! Trace length is quadratic in the input, which is why the engine caps
//! custom input size before generation.

use serde_json::json;

use algoviz_core::prelude::*;
use algoviz_core::{QuestionId, Trace, TraceRecorder, VarSnapshot};

use crate::generator::TraceGenerator;
use crate::input::{parse_int_array, ProblemInput};

pub struct BubbleSort;

impl TraceGenerator for BubbleSort {
    fn question_id(&self) -> QuestionId {
        QuestionId(3)
    }

    fn parse_input(&self, raw: &str) -> Result<ProblemInput> {
        Ok(ProblemInput::Array(parse_int_array(raw)?))
    }

    fn generate(&self, input: &ProblemInput) -> Trace {
        let nums = match input {
            ProblemInput::Array(values) => values.as_slice(),
            _ => {
                return TraceRecorder::new().finish(
                    1,
                    "Expected an array of integers to sort.",
                    VarSnapshot::new(),
                    serde_json::Value::Null,
                );
            }
        };
        if nums.len() < 2 {
            return TraceRecorder::new().finish(
                6,
                format!(
                    "An array of {} value(s) is already sorted.",
                    nums.len()
                ),
                VarSnapshot::new().with("items", json!(nums)),
                json!(nums),
            );
        }

        let mut rec = TraceRecorder::new();
        let mut items = nums.to_vec();

        rec.step(
            1,
            format!("Copy the input {nums:?}; larger values will bubble to the end."),
            VarSnapshot::new().with("items", json!(items)),
        );

        for end in (1..items.len()).rev() {
            let mut swapped = false;
            rec.step(
                2,
                format!(
                    "Begin a pass over indices 0..={end}; positions beyond {end} hold their final values."
                ),
                VarSnapshot::new()
                    .with("items", json!(items))
                    .with("end", json!(end)),
            );

            for i in 0..end {
                let (a, b) = (items[i], items[i + 1]);
                rec.step(
                    3,
                    format!("Compare items[{i}] = {a} with items[{}] = {b}.", i + 1),
                    VarSnapshot::new()
                        .with("items", json!(items))
                        .with("end", json!(end))
                        .with("i", json!(i)),
                );
                if a > b {
                    items.swap(i, i + 1);
                    swapped = true;
                    rec.step(
                        4,
                        format!("{a} > {b}: swap them, giving {items:?}."),
                        VarSnapshot::new()
                            .with("items", json!(items))
                            .with("end", json!(end))
                            .with("i", json!(i)),
                    );
                }
            }

            if !swapped {
                rec.step(
                    5,
                    "No swaps in this pass: the array is already sorted, stop early.",
                    VarSnapshot::new()
                        .with("items", json!(items))
                        .with("end", json!(end)),
                );
                break;
            }
        }

        rec.finish(
            6,
            format!("The array is sorted: {items:?}."),
            VarSnapshot::new().with("items", json!(items)),
            json!(items),
        )
    }
}
