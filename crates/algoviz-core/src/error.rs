//! Application error types with rich context

use thiserror::Error;

use crate::question::QuestionId;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Custom Input Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Input has {len} values, the maximum is {max}")]
    InputTooLarge { len: usize, max: usize },

    // ─────────────────────────────────────────────────────────────
    // Catalog Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Unknown question: {id}")]
    UnknownQuestion { id: QuestionId },

    #[error("Unknown language: {name}")]
    UnknownLanguage { name: String },

    // ─────────────────────────────────────────────────────────────
    // Trace Contract Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Generator produced an empty trace")]
    EmptyTrace,

    #[error("Malformed trace: {message}")]
    MalformedTrace { message: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn input_too_large(len: usize, max: usize) -> Self {
        Self::InputTooLarge { len, max }
    }

    pub fn unknown_question(id: QuestionId) -> Self {
        Self::UnknownQuestion { id }
    }

    pub fn unknown_language(name: impl Into<String>) -> Self {
        Self::UnknownLanguage { name: name.into() }
    }

    pub fn malformed_trace(message: impl Into<String>) -> Self {
        Self::MalformedTrace {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error should be surfaced to the user inline.
    ///
    /// Only custom-input rejections qualify; everything else is either a
    /// programming error in a generator/catalog entry or an environment
    /// problem, and is logged rather than displayed.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput { .. }
                | Error::InputTooLarge { .. }
                | Error::UnknownLanguage { .. }
        )
    }

    /// Check if this error indicates a generator violated its own contract
    pub fn is_generator_bug(&self) -> bool {
        matches!(self, Error::EmptyTrace | Error::MalformedTrace { .. })
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
