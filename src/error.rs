//! Error types for conjugation and quiz composition.
//!
//! Every variant is a validation failure the caller can recover from. The bot
//! turns them into a hint for the user; nothing here is fatal.

use thiserror::Error;

use crate::conjugation::Tense;

/// Which input list of a quiz rejected an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Verb,
    Tense,
    Pronoun,
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ListKind::Verb => "verb",
            ListKind::Tense => "tense",
            ListKind::Pronoun => "pronoun",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConjugaError {
    /// The infinitive is in neither verb table, or has no -ar/-er/-ir ending.
    #[error("invalid verb: {0}")]
    InvalidVerb(String),

    #[error("invalid tense: {0}")]
    InvalidTense(String),

    #[error("invalid pronoun: {0}")]
    InvalidPronoun(String),

    /// The imperatives have no `yo` form.
    #[error("there is no first person singular form of the {0}")]
    NoFirstPersonImperative(Tense),

    /// Neither an override nor a regular rule produced a form.
    #[error("conjugation not found for {infinitive} in {tense}")]
    ConjugationNotFound { infinitive: String, tense: Tense },

    #[error("question must have 3 elements (verb, tense, pronoun), got {0}")]
    InvalidQuestionShape(usize),

    #[error("invalid answer: {0}")]
    InvalidAnswer(String),

    #[error("number of items must be between 1 and {max}, got {count}")]
    InvalidCount { count: usize, max: usize },

    #[error("{list} list contains an invalid element: {value}")]
    InvalidList { list: ListKind, value: String },
}

pub type Result<T> = std::result::Result<T, ConjugaError>;
