//! Spanish verb conjugation and conjugation quizzes.
//!
//! [`Conjugator`] resolves a form from stored irregular overrides, falling back
//! to the regular rules. [`Quiz`] samples verified question/answer pairs over
//! verb, tense and pronoun lists.

pub mod config;
pub mod conjugation;
pub mod error;
pub mod lexicon;
pub mod quiz;
pub mod verb;

pub use conjugation::{
    is_valid_pronoun, is_valid_tense, ConjugationTable, Conjugator, Pronoun, Tense,
};
pub use error::{ConjugaError, ListKind, Result};
pub use lexicon::{VerbLookup, VerbTable};
pub use quiz::{compose_quiz, Quiz, QuizItem, QuizOptions, QuizSession};
pub use verb::{Ending, Verb};
