//! The stored form of a running quiz: plain, serializable multiple-choice
//! questions that survive in the bot's dialogue storage.

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

use crate::conjugation::{Conjugator, Pronoun, Tense};
use crate::error::Result;
use crate::quiz::{Quiz, QuizItem};

/// Wrong choices offered next to the right one.
const DISTRACTORS: usize = 2;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct QuizSession {
    pub questions: Vec<Question>,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    pub fn from_quiz<R: Rng + ?Sized>(
        conjugator: &Conjugator<'_>,
        quiz: &Quiz,
        rng: &mut R,
    ) -> Self {
        Self::new(
            quiz.iter()
                .map(|item| Question::from_item(conjugator, item, rng))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    pub verb: String,
    pub tense: Tense,
    pub pronoun: Pronoun,
    pub answers: Vec<Answer>,
}

impl Question {
    /// Turns an item into a multiple-choice question. The wrong choices are
    /// the same verb and tense conjugated for other persons.
    pub fn from_item<R: Rng + ?Sized>(
        conjugator: &Conjugator<'_>,
        item: &QuizItem,
        rng: &mut R,
    ) -> Self {
        let verb = item.question_verb();
        let tense = item.question_tense();
        let pronoun = item.question_pronoun();

        let mut others: Vec<String> = Vec::new();
        for form in Pronoun::ALL
            .into_iter()
            .filter(|other| *other != pronoun)
            .filter_map(|other| conjugator.conjugate(verb, tense, other).ok())
        {
            if form != item.answer() && !others.contains(&form) {
                others.push(form);
            }
        }

        // We shuffle the answers so the correct one isn't always the first one
        let answers = {
            let mut shuffled_answers = vec![Answer::new(item.answer().to_string(), true)];
            shuffled_answers.extend(
                others
                    .into_iter()
                    .choose_multiple(rng, DISTRACTORS)
                    .into_iter()
                    .map(|form| Answer::new(form, false)),
            );
            shuffled_answers.shuffle(rng);
            shuffled_answers
        };

        let text = format!(
            "<b>{}</b> · <i>{}</i> ({})",
            pronoun,
            verb.infinitive(),
            tense.label()
        );

        Self {
            text,
            verb: verb.infinitive().to_string(),
            tense,
            pronoun,
            answers,
        }
    }

    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }

    /// Compares a typed reply with the correct answer, ignoring case and
    /// surrounding or repeated whitespace.
    pub fn is_correct(&self, reply: &str) -> bool {
        self.correct_answer()
            .is_some_and(|answer| normalize(&answer.text) == normalize(reply))
    }

    /// Re-checks the stored answer against the conjugation engine.
    pub fn verify(&self, conjugator: &Conjugator<'_>) -> Result<QuizItem> {
        let answer = self
            .correct_answer()
            .map(|answer| answer.text.clone())
            .unwrap_or_default();
        QuizItem::from_parts(
            conjugator,
            &[self.verb.as_str(), self.tense.name(), self.pronoun.name()],
            answer,
        )
    }

    /// Grades a typed reply against the engine's current form. A stored
    /// answer that no longer verifies is replaced by the recomputed one.
    pub fn grade(&self, conjugator: &Conjugator<'_>, reply: &str) -> Result<Grade> {
        let answer = match self.verify(conjugator) {
            Ok(item) => item.answer().to_string(),
            Err(err) => {
                log::warn!("stored answer for {} no longer verifies: {}", self.verb, err);
                let verb = conjugator.verb(&self.verb)?;
                conjugator.conjugate(&verb, self.tense, self.pronoun)?
            }
        };
        Ok(Grade {
            is_correct: normalize(&answer) == normalize(reply),
            answer,
        })
    }
}

/// Outcome of [`Question::grade`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub is_correct: bool,
    /// The form the reply was graded against.
    pub answer: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Answer {
    pub text: String,
    pub is_correct: bool,
}

impl Answer {
    pub fn new(text: String, is_correct: bool) -> Self {
        Self { text, is_correct }
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
