//! # algoviz-core - Core Domain Types
//!
//! Foundation crate for Algoviz. Provides the step/trace data model, the
//! question catalog types, the line-mapping resolver, error handling, and
//! the logging bootstrap.
//!
//! This crate has **zero internal dependencies** -- it only depends on
//! external crates (serde, thiserror, tracing).
//!
//! ## Public API
//!
//! ### Step Model (`step`)
//! - [`Step`] - One instant of an algorithm's execution: abstract line
//!   marker, variable snapshot, narration, optional terminal result
//! - [`VarSnapshot`] - Insertion-ordered variable name/value pairs
//! - [`TraceRecorder`] - Builder that makes trace invariants hold by
//!   construction (non-empty, exactly one terminal step, terminal last)
//!
//! ### Traces (`trace`)
//! - [`Trace`] - Validated, non-empty, terminal-terminated step sequence
//!
//! ### Questions (`question`)
//! - [`QuestionDefinition`] - Per-language sources, line mappings, default
//!   input, and explanation metadata for one problem
//! - [`QuestionId`], [`Language`], [`Difficulty`], [`Explanation`]
//!
//! ### Line Mapping (`linemap`)
//! - [`resolve_line()`] - (question, language, abstract line) -> concrete
//!   source line, or `None` when unmapped
//!
//! ### Error Handling (`error`)
//! - [`Error`] - Custom error enum with user-error classification
//! - [`Result`] - Type alias for `std::result::Result<T, Error>`
//! - [`ResultExt`] - Extension trait for adding error context
//!
//! ## Prelude
//!
//! Import commonly used types with:
//! ```rust
//! use algoviz_core::prelude::*;
//! ```

pub mod error;
pub mod linemap;
pub mod logging;
pub mod question;
pub mod step;
pub mod trace;

/// Prelude for common imports used throughout all Algoviz crates
pub mod prelude {
    pub use super::error::{Error, Result, ResultExt};
    pub use tracing::{debug, error, info, instrument, trace, warn};
}

// Re-export commonly used types at crate root for convenience
pub use error::{Error, Result, ResultExt};
pub use linemap::resolve_line;
pub use question::{Difficulty, Explanation, Language, QuestionDefinition, QuestionId};
pub use step::{Step, TraceRecorder, VarSnapshot};
pub use trace::Trace;
