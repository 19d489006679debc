//! Per-problem orchestration state.
//!
//! A [`Visualization`] owns everything one open problem needs: the question
//! definition, its generator, the current input, the trace generated from
//! it, the playback cursor, and the ticker generation counter. The TEA
//! `update` function mutates it; the engine loop drives the side effects.

use std::sync::Arc;

use algoviz_catalog::{GeneratorRegistry, ProblemInput, QuestionCatalog, TraceGenerator};
use algoviz_core::prelude::*;
use algoviz_core::{resolve_line, Language, QuestionDefinition, QuestionId, Step, Trace};

use crate::playback::{Playback, PlaybackState};
use crate::settings::Settings;

/// State for one open problem visualization.
pub struct Visualization {
    question: QuestionDefinition,
    generator: Arc<dyn TraceGenerator>,
    settings: Settings,
    language: Language,
    raw_input: String,
    input: ProblemInput,
    trace: Trace,
    pub(crate) playback: Playback,

    /// Generation of the currently armed ticker. Bumped whenever the ticker
    /// is (re)armed or stopped; `Tick` messages carrying an older generation
    /// are stale and ignored.
    ticker_generation: u64,

    /// Inline error from the last rejected custom input, for the UI.
    /// Cleared when an input is accepted.
    last_input_error: Option<String>,

    closed: bool,
}

impl Visualization {
    /// Open a problem: look up its definition and generator, parse the
    /// default input, and generate the initial trace.
    ///
    /// A default input that fails its own generator's parser is a catalog
    /// bug and surfaces as the parse error.
    pub fn open(
        catalog: &QuestionCatalog,
        generators: &GeneratorRegistry,
        settings: Settings,
        id: QuestionId,
    ) -> Result<Self> {
        let question = catalog.get(id)?.clone();
        let generator = generators.get(id)?;
        let input = generator
            .parse_input(&question.default_input)
            .with_context(|| format!("default input for question {id} failed to parse"))?;
        let trace = generator.generate(&input);
        let playback = Playback::new(trace.len(), settings.default_speed);

        let language = question
            .languages()
            .first()
            .copied()
            .unwrap_or(Language::Python);

        info!(
            "opened question {id} ({} steps at speed {})",
            trace.len(),
            settings.default_speed
        );

        Ok(Self {
            question,
            generator,
            settings,
            language,
            raw_input: String::new(),
            input,
            trace,
            playback,
            ticker_generation: 0,
            last_input_error: None,
            closed: false,
        })
    }

    /// Replace the custom input.
    ///
    /// On success the trace is regenerated wholesale and playback returns
    /// to step 0, paused, at the current speed. On any failure (parse
    /// error, input over the configured cap) the existing trace and
    /// playback are left untouched and the error is returned for inline
    /// display.
    pub fn set_custom_input(&mut self, raw: &str) -> Result<()> {
        let input = self.generator.parse_input(raw)?;
        let size = input.size();
        if size > self.settings.max_input_len {
            return Err(Error::input_too_large(size, self.settings.max_input_len));
        }

        let trace = self.generator.generate(&input);
        debug!(
            "custom input accepted for question {}: {} steps",
            self.question.id,
            trace.len()
        );

        self.raw_input = raw.to_string();
        self.input = input;
        self.playback.attach(trace.len());
        self.trace = trace;
        self.last_input_error = None;
        Ok(())
    }

    /// Switch the highlight language. Unavailable languages are refused.
    pub fn set_language(&mut self, language: Language) {
        if self.question.code(language).is_some() {
            self.language = language;
        } else {
            warn!(
                "question {} has no {language} snippet; keeping {}",
                self.question.id, self.language
            );
        }
    }

    /// The step under the playback cursor.
    pub fn current_step(&self) -> &Step {
        self.playback.current_step(&self.trace)
    }

    /// Concrete source line to highlight for the current step, or `None`.
    pub fn highlight_line(&self) -> Option<u32> {
        resolve_line(&self.question, self.language, self.current_step().line)
    }

    /// Bump and return the ticker generation. Any tick still in flight from
    /// the previous generation becomes stale.
    pub(crate) fn next_generation(&mut self) -> u64 {
        self.ticker_generation += 1;
        self.ticker_generation
    }

    pub fn ticker_generation(&self) -> u64 {
        self.ticker_generation
    }

    pub(crate) fn record_input_error(&mut self, message: String) {
        self.last_input_error = Some(message);
    }

    pub(crate) fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn question(&self) -> &QuestionDefinition {
        &self.question
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn input(&self) -> &ProblemInput {
        &self.input
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn last_input_error(&self) -> Option<&str> {
        self.last_input_error.as_deref()
    }

    /// Snapshot for the control registry.
    pub fn snapshot(&self) -> PlaybackState {
        self.playback.snapshot()
    }
}

impl std::fmt::Debug for Visualization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Visualization")
            .field("question", &self.question.id)
            .field("language", &self.language)
            .field("trace_len", &self.trace.len())
            .field("playback", &self.playback)
            .field("ticker_generation", &self.ticker_generation)
            .field("closed", &self.closed)
            .finish()
    }
}
