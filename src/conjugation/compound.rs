//! Auxiliary paradigms for the compound tenses.

use crate::conjugation::regular::Paradigm;

/// Which participle follows the auxiliary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Participle {
    /// Gerund, used by the progressives.
    Present,
    /// Used by the perfects.
    Past,
}

impl Participle {
    /// Position in a `[present, past]` participle override.
    pub(crate) fn index(self) -> usize {
        match self {
            Participle::Present => 0,
            Participle::Past => 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Compound {
    pub(crate) auxiliary: &'static Paradigm,
    pub(crate) participle: Participle,
}

const ESTAR_PRESENT: Paradigm = ["estoy", "estás", "está", "estamos", "estáis", "están"];
const ESTAR_IMPERFECT: Paradigm = [
    "estaba",
    "estabas",
    "estaba",
    "estábamos",
    "estabais",
    "estaban",
];
const HABER_PRESENT: Paradigm = ["he", "has", "ha", "hemos", "habéis", "han"];
const HABER_IMPERFECT: Paradigm = [
    "había",
    "habías",
    "había",
    "habíamos",
    "habíais",
    "habían",
];
const HABER_FUTURE: Paradigm = ["habré", "habrás", "habrá", "habremos", "habréis", "habrán"];
const HABER_PRESENT_SUBJUNCTIVE: Paradigm = [
    "haya",
    "hayas",
    "haya",
    "hayamos",
    "hayáis",
    "hayan",
];
const HABER_IMPERFECT_SUBJUNCTIVE_RA: Paradigm =
    ["hubiera", "hubieras", "hubiera", "hubiéramos", "hubierais", "hubieran"];
const HABER_IMPERFECT_SUBJUNCTIVE_SE: Paradigm =
    ["hubiese", "hubieses", "hubiese", "hubiésemos", "hubieseis", "hubiesen"];

pub(crate) const PRESENT_PROGRESSIVE: Compound = Compound {
    auxiliary: &ESTAR_PRESENT,
    participle: Participle::Present,
};
pub(crate) const PAST_PROGRESSIVE: Compound = Compound {
    auxiliary: &ESTAR_IMPERFECT,
    participle: Participle::Present,
};
pub(crate) const PRESENT_PERFECT: Compound = Compound {
    auxiliary: &HABER_PRESENT,
    participle: Participle::Past,
};
pub(crate) const PLUPERFECT: Compound = Compound {
    auxiliary: &HABER_IMPERFECT,
    participle: Participle::Past,
};
pub(crate) const FUTURE_PERFECT: Compound = Compound {
    auxiliary: &HABER_FUTURE,
    participle: Participle::Past,
};
pub(crate) const PRESENT_PERFECT_SUBJUNCTIVE: Compound = Compound {
    auxiliary: &HABER_PRESENT_SUBJUNCTIVE,
    participle: Participle::Past,
};
pub(crate) const PLUPERFECT_SUBJUNCTIVE_RA: Compound = Compound {
    auxiliary: &HABER_IMPERFECT_SUBJUNCTIVE_RA,
    participle: Participle::Past,
};
pub(crate) const PLUPERFECT_SUBJUNCTIVE_SE: Compound = Compound {
    auxiliary: &HABER_IMPERFECT_SUBJUNCTIVE_SE,
    participle: Participle::Past,
};
