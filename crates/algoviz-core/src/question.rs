//! Question catalog types - the read-only configuration the engines consume.
//!
//! A [`QuestionDefinition`] packages everything the visualization layer needs
//! to present one problem: the displayed source snippet per language, the
//! abstract-line -> concrete-line mapping tables used for highlighting, the
//! default input the trace is first generated from, and the prose
//! explanation. The core never mutates these.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifier of one problem in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u32);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Languages a question's source snippet can be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    Python,
    JavaScript,
    Rust,
}

impl Language {
    /// All supported languages, in display order.
    pub const ALL: [Language; 3] = [Language::Python, Language::JavaScript, Language::Rust];
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::Rust => "Rust",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "python" | "py" => Ok(Language::Python),
            "javascript" | "js" => Ok(Language::JavaScript),
            "rust" | "rs" => Ok(Language::Rust),
            _ => Err(Error::unknown_language(s)),
        }
    }
}

/// Problem difficulty tier, as shown in the problem list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        write!(f, "{name}")
    }
}

/// Prose explanation of a problem's approach, shown on the description tab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Explanation {
    /// One-paragraph summary of the approach
    pub approach: String,
    /// Ordered walkthrough bullets
    pub steps: Vec<String>,
    /// e.g. "O(n)"
    pub time_complexity: String,
    /// e.g. "O(1)"
    pub space_complexity: String,
}

/// Everything the visualization layer needs to present one problem.
///
/// Line mapping tables are keyed by [`Language`], then by abstract line
/// marker (the `line` field of a `Step`). Gaps are legal and mean "no
/// highlight" for that step in that language — resolution never guesses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionDefinition {
    pub id: QuestionId,
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,

    /// Displayed source snippet per language
    pub codes: HashMap<Language, String>,

    /// abstract line marker -> concrete snippet line, per language
    pub line_mappings: HashMap<Language, HashMap<u32, u32>>,

    /// Raw default input, parsed by the question's generator
    pub default_input: String,

    #[serde(default)]
    pub explanation: Explanation,
}

impl QuestionDefinition {
    /// The source snippet for a language, if the question provides one.
    pub fn code(&self, language: Language) -> Option<&str> {
        self.codes.get(&language).map(String::as_str)
    }

    /// Languages this question has snippets for, in [`Language::ALL`] order.
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|lang| self.codes.contains_key(lang))
            .collect()
    }
}
