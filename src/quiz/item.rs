use std::fmt;

use crate::conjugation::{Conjugator, Pronoun, Tense};
use crate::error::{ConjugaError, Result};
use crate::verb::Verb;

/// A question and its answer. The answer is checked against the conjugation
/// engine on construction, so an item can never carry a wrong answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    verb: Verb,
    tense: Tense,
    pronoun: Pronoun,
    answer: String,
}

impl QuizItem {
    pub fn new(
        conjugator: &Conjugator<'_>,
        question: (Verb, Tense, Pronoun),
        answer: impl Into<String>,
    ) -> Result<Self> {
        let (verb, tense, pronoun) = question;
        let answer = answer.into();
        let expected = conjugator.conjugate(&verb, tense, pronoun)?;
        if expected != answer {
            return Err(ConjugaError::InvalidAnswer(answer));
        }
        Ok(Self {
            verb,
            tense,
            pronoun,
            answer,
        })
    }

    /// Builds an item from an untyped `[verb, tense, pronoun]` question.
    pub fn from_parts<S: AsRef<str>>(
        conjugator: &Conjugator<'_>,
        question: &[S],
        answer: impl Into<String>,
    ) -> Result<Self> {
        let [verb, tense, pronoun] = question else {
            return Err(ConjugaError::InvalidQuestionShape(question.len()));
        };
        let verb = conjugator.verb(verb.as_ref())?;
        let tense = tense.as_ref().parse::<Tense>()?;
        let pronoun = pronoun.as_ref().parse::<Pronoun>()?;
        Self::new(conjugator, (verb, tense, pronoun), answer)
    }

    pub fn question_verb(&self) -> &Verb {
        &self.verb
    }

    pub fn question_tense(&self) -> Tense {
        self.tense
    }

    pub fn question_pronoun(&self) -> Pronoun {
        self.pronoun
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }
}

impl fmt::Display for QuizItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Question: {} {} ({})\nAnswer: {}",
            self.pronoun,
            self.verb.infinitive(),
            self.tense,
            self.answer
        )
    }
}
