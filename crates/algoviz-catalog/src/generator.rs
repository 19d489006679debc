//! The trace-generator capability and its registry.

use std::collections::HashMap;
use std::sync::Arc;

use algoviz_core::prelude::*;
use algoviz_core::{QuestionId, Trace};

use crate::generators;
use crate::input::ProblemInput;

/// One algorithm's hand-authored interpreter, as a pure function.
///
/// Implementations must be:
/// - **Deterministic**: equal inputs yield deep-equal traces.
/// - **Total**: any [`ProblemInput`] the UI can produce yields a well-formed
///   trace; precondition violations (empty array, wrong variant) produce a
///   degenerate trace whose first step names the problem and whose terminal
///   step carries the vacuous result. Never panic.
/// - **Stateless**: the whole trace is re-derived from scratch on every
///   call, which is what makes regenerating on every input edit safe.
///
/// Every observable decision point of the algorithm (loop check, comparison,
/// pointer move, value write) is its own step, described with the concrete
/// values involved.
pub trait TraceGenerator: Send + Sync {
    /// The catalog entry this generator animates.
    fn question_id(&self) -> QuestionId;

    /// Parse raw custom-input text into this generator's input shape.
    fn parse_input(&self, raw: &str) -> Result<ProblemInput>;

    /// Produce the full trace for one input.
    fn generate(&self, input: &ProblemInput) -> Trace;
}

/// Lookup of generators keyed by question id.
///
/// Generators are stored as `Arc` so an orchestrator can hold its own handle
/// to one while the registry stays shared.
#[derive(Clone, Default)]
pub struct GeneratorRegistry {
    generators: HashMap<QuestionId, Arc<dyn TraceGenerator>>,
}

impl GeneratorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry of all built-in generators.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(generators::two_sum::TwoSumSorted));
        registry.register(Arc::new(generators::binary_search::BinarySearch));
        registry.register(Arc::new(generators::bubble_sort::BubbleSort));
        registry.register(Arc::new(generators::max_subarray::MaxSubarray));
        registry
    }

    /// Register a generator, replacing any previous one for the same id.
    pub fn register(&mut self, generator: Arc<dyn TraceGenerator>) {
        let id = generator.question_id();
        if self.generators.insert(id, generator).is_some() {
            warn!("generator for question {id} replaced");
        }
    }

    /// Look up the generator for a question.
    pub fn get(&self, id: QuestionId) -> Result<Arc<dyn TraceGenerator>> {
        self.generators
            .get(&id)
            .cloned()
            .ok_or(Error::UnknownQuestion { id })
    }

    /// Whether a generator is registered for `id`.
    pub fn contains(&self, id: QuestionId) -> bool {
        self.generators.contains_key(&id)
    }

    /// Registered question ids, sorted.
    pub fn ids(&self) -> Vec<QuestionId> {
        let mut ids: Vec<QuestionId> = self.generators.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}
