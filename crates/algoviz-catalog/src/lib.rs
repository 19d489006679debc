//! algoviz-catalog - Problem catalog and step-trace generators
//!
//! One pure [`TraceGenerator`] per algorithm, registered in a
//! [`GeneratorRegistry`] keyed by question id, plus the built-in
//! [`QuestionCatalog`] carrying each problem's source snippets, complete
//! line-mapping tables, default input, and explanation.
//!
//! Generators are deterministic and total: equal inputs yield deep-equal
//! traces, degenerate inputs yield well-formed degenerate traces, and
//! nothing here ever panics on a reachable input.

pub mod generator;
pub mod generators;
pub mod input;
pub mod questions;

// Re-export primary types
pub use generator::{GeneratorRegistry, TraceGenerator};
pub use input::ProblemInput;
pub use questions::QuestionCatalog;
