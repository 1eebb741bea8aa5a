use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConjugaError;

/// The eighteen tenses and moods a verb can be conjugated in.
///
/// The snake_case name of each variant is its wire name, used by the lexicon
/// data and by the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    Present,
    Preterite,
    Imperfect,
    Conditional,
    Future,
    PresentSubjunctive,
    ImperfectSubjunctiveRa,
    ImperfectSubjunctiveSe,
    PresentProgressive,
    PastProgressive,
    PresentPerfect,
    Pluperfect,
    FuturePerfect,
    PresentPerfectSubjunctive,
    PluperfectSubjunctiveRa,
    PluperfectSubjunctiveSe,
    AffirmativeImperative,
    NegativeImperative,
}

impl Tense {
    pub const ALL: [Tense; 18] = [
        Tense::Present,
        Tense::Preterite,
        Tense::Imperfect,
        Tense::Conditional,
        Tense::Future,
        Tense::PresentSubjunctive,
        Tense::ImperfectSubjunctiveRa,
        Tense::ImperfectSubjunctiveSe,
        Tense::PresentProgressive,
        Tense::PastProgressive,
        Tense::PresentPerfect,
        Tense::Pluperfect,
        Tense::FuturePerfect,
        Tense::PresentPerfectSubjunctive,
        Tense::PluperfectSubjunctiveRa,
        Tense::PluperfectSubjunctiveSe,
        Tense::AffirmativeImperative,
        Tense::NegativeImperative,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::Preterite => "preterite",
            Tense::Imperfect => "imperfect",
            Tense::Conditional => "conditional",
            Tense::Future => "future",
            Tense::PresentSubjunctive => "present_subjunctive",
            Tense::ImperfectSubjunctiveRa => "imperfect_subjunctive_ra",
            Tense::ImperfectSubjunctiveSe => "imperfect_subjunctive_se",
            Tense::PresentProgressive => "present_progressive",
            Tense::PastProgressive => "past_progressive",
            Tense::PresentPerfect => "present_perfect",
            Tense::Pluperfect => "pluperfect",
            Tense::FuturePerfect => "future_perfect",
            Tense::PresentPerfectSubjunctive => "present_perfect_subjunctive",
            Tense::PluperfectSubjunctiveRa => "pluperfect_subjunctive_ra",
            Tense::PluperfectSubjunctiveSe => "pluperfect_subjunctive_se",
            Tense::AffirmativeImperative => "affirmative_imperative",
            Tense::NegativeImperative => "negative_imperative",
        }
    }

    /// Spanish label shown to learners.
    pub fn label(self) -> &'static str {
        match self {
            Tense::Present => "presente",
            Tense::Preterite => "pretérito",
            Tense::Imperfect => "imperfecto",
            Tense::Conditional => "condicional",
            Tense::Future => "futuro",
            Tense::PresentSubjunctive => "presente de subjuntivo",
            Tense::ImperfectSubjunctiveRa => "imperfecto de subjuntivo (-ra)",
            Tense::ImperfectSubjunctiveSe => "imperfecto de subjuntivo (-se)",
            Tense::PresentProgressive => "presente progresivo",
            Tense::PastProgressive => "pasado progresivo",
            Tense::PresentPerfect => "pretérito perfecto",
            Tense::Pluperfect => "pluscuamperfecto",
            Tense::FuturePerfect => "futuro perfecto",
            Tense::PresentPerfectSubjunctive => "pretérito perfecto de subjuntivo",
            Tense::PluperfectSubjunctiveRa => "pluscuamperfecto de subjuntivo (-ra)",
            Tense::PluperfectSubjunctiveSe => "pluscuamperfecto de subjuntivo (-se)",
            Tense::AffirmativeImperative => "imperativo afirmativo",
            Tense::NegativeImperative => "imperativo negativo",
        }
    }

    /// Compound tenses are an estar/haber auxiliary followed by a participle.
    pub fn is_compound(self) -> bool {
        matches!(
            self,
            Tense::PresentProgressive
                | Tense::PastProgressive
                | Tense::PresentPerfect
                | Tense::Pluperfect
                | Tense::FuturePerfect
                | Tense::PresentPerfectSubjunctive
                | Tense::PluperfectSubjunctiveRa
                | Tense::PluperfectSubjunctiveSe
        )
    }

    pub fn is_imperative(self) -> bool {
        matches!(
            self,
            Tense::AffirmativeImperative | Tense::NegativeImperative
        )
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tense {
    type Err = ConjugaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tense::ALL
            .into_iter()
            .find(|tense| tense.name() == s)
            .ok_or_else(|| ConjugaError::InvalidTense(s.to_string()))
    }
}

/// Returns true if `tense` names one of the eighteen tenses.
pub fn is_valid_tense(tense: &str) -> bool {
    tense.parse::<Tense>().is_ok()
}
