pub mod pronoun;
pub mod tense;

mod compound;
mod regular;

use std::fmt;

use serde::Serialize;

use crate::error::{ConjugaError, Result};
use crate::lexicon::VerbLookup;
use crate::verb::Verb;

pub use pronoun::{is_valid_pronoun, Pronoun};
pub use tense::{is_valid_tense, Tense};

use compound::{Compound, Participle};
use regular::Rule;

/// How a tense is built.
enum Formation {
    Simple(Rule),
    Compound(Compound),
}

impl Tense {
    fn formation(self) -> Formation {
        match self {
            Tense::Present => Formation::Simple(regular::present),
            Tense::Preterite => Formation::Simple(regular::preterite),
            Tense::Imperfect => Formation::Simple(regular::imperfect),
            Tense::Conditional => Formation::Simple(regular::conditional),
            Tense::Future => Formation::Simple(regular::future),
            Tense::PresentSubjunctive => Formation::Simple(regular::present_subjunctive),
            Tense::ImperfectSubjunctiveRa => {
                Formation::Simple(regular::imperfect_subjunctive_ra)
            }
            Tense::ImperfectSubjunctiveSe => {
                Formation::Simple(regular::imperfect_subjunctive_se)
            }
            Tense::AffirmativeImperative => Formation::Simple(regular::affirmative_imperative),
            Tense::NegativeImperative => Formation::Simple(regular::negative_imperative),
            Tense::PresentProgressive => Formation::Compound(compound::PRESENT_PROGRESSIVE),
            Tense::PastProgressive => Formation::Compound(compound::PAST_PROGRESSIVE),
            Tense::PresentPerfect => Formation::Compound(compound::PRESENT_PERFECT),
            Tense::Pluperfect => Formation::Compound(compound::PLUPERFECT),
            Tense::FuturePerfect => Formation::Compound(compound::FUTURE_PERFECT),
            Tense::PresentPerfectSubjunctive => {
                Formation::Compound(compound::PRESENT_PERFECT_SUBJUNCTIVE)
            }
            Tense::PluperfectSubjunctiveRa => {
                Formation::Compound(compound::PLUPERFECT_SUBJUNCTIVE_RA)
            }
            Tense::PluperfectSubjunctiveSe => {
                Formation::Compound(compound::PLUPERFECT_SUBJUNCTIVE_SE)
            }
        }
    }
}

/// Resolves conjugations: irregular overrides first, regular rules otherwise.
///
/// A `Conjugator` only borrows the lookup, so it is cheap to build per request.
#[derive(Clone, Copy)]
pub struct Conjugator<'a> {
    lookup: &'a dyn VerbLookup,
}

impl<'a> Conjugator<'a> {
    pub fn new(lookup: &'a dyn VerbLookup) -> Self {
        Self { lookup }
    }

    /// Validates an infinitive against the lookup this conjugator uses.
    pub fn verb(&self, infinitive: &str) -> Result<Verb> {
        Verb::new(infinitive, self.lookup)
    }

    pub fn conjugate(&self, verb: &Verb, tense: Tense, pronoun: Pronoun) -> Result<String> {
        if tense.is_imperative() && pronoun == Pronoun::Yo {
            return Err(ConjugaError::NoFirstPersonImperative(tense));
        }
        log::trace!("conjugating {} in {} for {}", verb.key(), tense, pronoun);

        match tense.formation() {
            Formation::Compound(compound) => {
                let auxiliary = compound.auxiliary[pronoun.index()];
                let participle = self.participle(verb, tense, compound.participle)?;
                Ok(format!("{} {}", auxiliary, participle))
            }
            Formation::Simple(rule) => {
                if let Some(form) = self.irregular_form(verb, tense, pronoun)? {
                    return Ok(form);
                }
                rule(verb, pronoun).ok_or_else(|| not_found(verb, tense))
            }
        }
    }

    /// Same as [`Conjugator::conjugate`] for tense and pronoun names.
    pub fn conjugate_named(&self, verb: &Verb, tense: &str, pronoun: &str) -> Result<String> {
        let tense = tense.parse::<Tense>()?;
        let pronoun = pronoun.parse::<Pronoun>()?;
        self.conjugate(verb, tense, pronoun)
    }

    /// Every tense and person for one verb. Cells that fail are `None`.
    pub fn table(&self, verb: &Verb) -> ConjugationTable {
        let rows = Tense::ALL
            .into_iter()
            .map(|tense| {
                let forms = Pronoun::ALL.map(|pronoun| self.conjugate(verb, tense, pronoun).ok());
                TableRow { tense, forms }
            })
            .collect();

        ConjugationTable {
            infinitive: verb.infinitive().to_string(),
            rows,
        }
    }

    /// The stored override for a simple tense, if the verb is irregular and
    /// has one for this person.
    fn irregular_form(
        &self,
        verb: &Verb,
        tense: Tense,
        pronoun: Pronoun,
    ) -> Result<Option<String>> {
        if verb.is_regular() {
            return Ok(None);
        }
        let Some(forms) = self.lookup.get_override(verb.key(), tense) else {
            return Ok(None);
        };
        match &forms[pronoun.index()] {
            Some(form) if form.trim().is_empty() => {
                log::warn!("blank override for {} in {} ({})", verb.key(), tense, pronoun);
                Err(not_found(verb, tense))
            }
            Some(form) => Ok(Some(form.clone())),
            None => Ok(None),
        }
    }

    /// A blank participle override is a gap, like a blank tense cell.
    fn participle(&self, verb: &Verb, tense: Tense, kind: Participle) -> Result<String> {
        if !verb.is_regular() {
            if let Some(participles) = self.lookup.get_participles(verb.key()) {
                let participle = &participles[kind.index()];
                if participle.trim().is_empty() {
                    log::warn!("blank participle override for {} ({})", verb.key(), tense);
                    return Err(not_found(verb, tense));
                }
                return Ok(participle.clone());
            }
        }
        Ok(match kind {
            Participle::Present => regular::present_participle(verb),
            Participle::Past => regular::past_participle(verb),
        })
    }
}

fn not_found(verb: &Verb, tense: Tense) -> ConjugaError {
    ConjugaError::ConjugationNotFound {
        infinitive: verb.infinitive().to_string(),
        tense,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub tense: Tense,
    pub forms: [Option<String>; 6],
}

/// The full conjugation of one verb, rows in [`Tense::ALL`] order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConjugationTable {
    pub infinitive: String,
    pub rows: Vec<TableRow>,
}

impl ConjugationTable {
    pub fn get(&self, tense: Tense, pronoun: Pronoun) -> Option<&str> {
        self.rows
            .iter()
            .find(|row| row.tense == tense)
            .and_then(|row| row.forms[pronoun.index()].as_deref())
    }
}

impl fmt::Display for ConjugationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.infinitive)?;
        for row in &self.rows {
            writeln!(f, "{}", row.tense)?;
            for (pronoun, form) in Pronoun::ALL.iter().zip(&row.forms) {
                writeln!(f, "  {}: {}", pronoun, form.as_deref().unwrap_or("-"))?;
            }
        }
        Ok(())
    }
}
