//! Regular conjugation rules, one per simple tense.
//!
//! Each ending class has a paradigm of six suffixes in pronoun order. Most
//! rules append a suffix to the stem; the conditional and future append to the
//! whole infinitive.

use crate::conjugation::Pronoun;
use crate::verb::{Ending, Verb};

/// Six forms or suffixes, indexed by [`Pronoun::index`].
pub(crate) type Paradigm = [&'static str; 6];

/// A regular rule. `None` means the tense has no form for that person.
pub(crate) type Rule = fn(&Verb, Pronoun) -> Option<String>;

/// A paradigm per ending class.
struct Suffixes {
    ar: Paradigm,
    er: Paradigm,
    ir: Paradigm,
}

impl Suffixes {
    fn for_ending(&self, ending: Ending) -> &Paradigm {
        match ending {
            Ending::Ar => &self.ar,
            Ending::Er => &self.er,
            Ending::Ir => &self.ir,
        }
    }
}

const PRESENT: Suffixes = Suffixes {
    ar: ["o", "as", "a", "amos", "áis", "an"],
    er: ["o", "es", "e", "emos", "éis", "en"],
    ir: ["o", "es", "e", "imos", "ís", "en"],
};

const PRETERITE_ER_IR: Paradigm = ["í", "iste", "ió", "imos", "isteis", "ieron"];
const PRETERITE: Suffixes = Suffixes {
    ar: ["é", "aste", "ó", "amos", "asteis", "aron"],
    er: PRETERITE_ER_IR,
    ir: PRETERITE_ER_IR,
};

const IMPERFECT_ER_IR: Paradigm = ["ía", "ías", "ía", "íamos", "íais", "ían"];
const IMPERFECT: Suffixes = Suffixes {
    ar: ["aba", "abas", "aba", "ábamos", "abais", "aban"],
    er: IMPERFECT_ER_IR,
    ir: IMPERFECT_ER_IR,
};

const CONDITIONAL: Paradigm = ["ía", "ías", "ía", "íamos", "íais", "ían"];
const FUTURE: Paradigm = ["é", "ás", "á", "emos", "éis", "án"];

const PRESENT_SUBJUNCTIVE_ER_IR: Paradigm = ["a", "as", "a", "amos", "áis", "an"];
const PRESENT_SUBJUNCTIVE: Suffixes = Suffixes {
    ar: ["e", "es", "e", "emos", "éis", "en"],
    er: PRESENT_SUBJUNCTIVE_ER_IR,
    ir: PRESENT_SUBJUNCTIVE_ER_IR,
};

const IMPERFECT_SUBJUNCTIVE_RA_ER_IR: Paradigm =
    ["iera", "ieras", "iera", "iéramos", "ierais", "ieran"];
const IMPERFECT_SUBJUNCTIVE_RA: Suffixes = Suffixes {
    ar: ["ara", "aras", "ara", "áramos", "arais", "aran"],
    er: IMPERFECT_SUBJUNCTIVE_RA_ER_IR,
    ir: IMPERFECT_SUBJUNCTIVE_RA_ER_IR,
};

const IMPERFECT_SUBJUNCTIVE_SE_ER_IR: Paradigm =
    ["iese", "ieses", "iese", "iésemos", "ieseis", "iesen"];
const IMPERFECT_SUBJUNCTIVE_SE: Suffixes = Suffixes {
    ar: ["ase", "ases", "ase", "ásemos", "aseis", "asen"],
    er: IMPERFECT_SUBJUNCTIVE_SE_ER_IR,
    ir: IMPERFECT_SUBJUNCTIVE_SE_ER_IR,
};

fn on_stem(suffixes: &Suffixes, verb: &Verb, pronoun: Pronoun) -> String {
    let suffix = suffixes.for_ending(verb.ending())[pronoun.index()];
    format!("{}{}", verb.stem(), suffix)
}

fn on_infinitive(paradigm: &Paradigm, verb: &Verb, pronoun: Pronoun) -> String {
    format!("{}{}", verb.key(), paradigm[pronoun.index()])
}

pub(crate) fn present(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    Some(on_stem(&PRESENT, verb, pronoun))
}

pub(crate) fn preterite(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    Some(on_stem(&PRETERITE, verb, pronoun))
}

pub(crate) fn imperfect(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    Some(on_stem(&IMPERFECT, verb, pronoun))
}

pub(crate) fn conditional(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    Some(on_infinitive(&CONDITIONAL, verb, pronoun))
}

pub(crate) fn future(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    Some(on_infinitive(&FUTURE, verb, pronoun))
}

pub(crate) fn present_subjunctive(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    Some(on_stem(&PRESENT_SUBJUNCTIVE, verb, pronoun))
}

pub(crate) fn imperfect_subjunctive_ra(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    Some(on_stem(&IMPERFECT_SUBJUNCTIVE_RA, verb, pronoun))
}

pub(crate) fn imperfect_subjunctive_se(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    Some(on_stem(&IMPERFECT_SUBJUNCTIVE_SE, verb, pronoun))
}

/// tú takes the él form of the present indicative, vosotros swaps the final
/// r of the infinitive for d, the rest borrow the present subjunctive.
pub(crate) fn affirmative_imperative(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    match pronoun {
        Pronoun::Yo => None,
        Pronoun::Tu => present(verb, Pronoun::ElEllaUsted),
        Pronoun::Vosotros => {
            let infinitive = verb.key();
            Some(format!("{}d", &infinitive[..infinitive.len() - 1]))
        }
        Pronoun::ElEllaUsted | Pronoun::Nosotros | Pronoun::EllosEllasUstedes => {
            present_subjunctive(verb, pronoun)
        }
    }
}

pub(crate) fn negative_imperative(verb: &Verb, pronoun: Pronoun) -> Option<String> {
    if pronoun == Pronoun::Yo {
        return None;
    }
    present_subjunctive(verb, pronoun).map(|form| format!("no {}", form))
}

pub(crate) fn present_participle(verb: &Verb) -> String {
    let suffix = match verb.ending() {
        Ending::Ar => "ando",
        Ending::Er | Ending::Ir => "iendo",
    };
    format!("{}{}", verb.stem(), suffix)
}

pub(crate) fn past_participle(verb: &Verb) -> String {
    let suffix = match verb.ending() {
        Ending::Ar => "ado",
        Ending::Er | Ending::Ir => "ido",
    };
    format!("{}{}", verb.stem(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::VerbTable;

    fn verb(infinitive: &str) -> Verb {
        let table = VerbTable::new()
            .insert_regular("hablar")
            .insert_regular("beber")
            .insert_regular("vivir");
        Verb::new(infinitive, &table).unwrap()
    }

    fn all(rule: Rule, infinitive: &str) -> Vec<Option<String>> {
        let verb = verb(infinitive);
        Pronoun::ALL.iter().map(|p| rule(&verb, *p)).collect()
    }

    fn forms(expected: [&str; 6]) -> Vec<Option<String>> {
        expected
            .iter()
            .map(|f| (!f.is_empty()).then(|| f.to_string()))
            .collect()
    }

    #[test]
    fn present_by_ending_class() {
        assert_eq!(
            all(present, "hablar"),
            forms(["hablo", "hablas", "habla", "hablamos", "habláis", "hablan"])
        );
        assert_eq!(
            all(present, "beber"),
            forms(["bebo", "bebes", "bebe", "bebemos", "bebéis", "beben"])
        );
        assert_eq!(
            all(present, "vivir"),
            forms(["vivo", "vives", "vive", "vivimos", "vivís", "viven"])
        );
    }

    #[test]
    fn preterite_accents_only_yo_and_el() {
        assert_eq!(
            all(preterite, "hablar"),
            forms(["hablé", "hablaste", "habló", "hablamos", "hablasteis", "hablaron"])
        );
        assert_eq!(
            all(preterite, "vivir"),
            forms(["viví", "viviste", "vivió", "vivimos", "vivisteis", "vivieron"])
        );
    }

    #[test]
    fn imperfect_shares_yo_and_el() {
        assert_eq!(
            all(imperfect, "hablar"),
            forms(["hablaba", "hablabas", "hablaba", "hablábamos", "hablabais", "hablaban"])
        );
        assert_eq!(
            all(imperfect, "beber"),
            forms(["bebía", "bebías", "bebía", "bebíamos", "bebíais", "bebían"])
        );
    }

    #[test]
    fn conditional_and_future_build_on_the_infinitive() {
        assert_eq!(
            all(conditional, "vivir"),
            forms(["viviría", "vivirías", "viviría", "viviríamos", "viviríais", "vivirían"])
        );
        assert_eq!(
            all(future, "hablar"),
            forms(["hablaré", "hablarás", "hablará", "hablaremos", "hablaréis", "hablarán"])
        );
    }

    #[test]
    fn subjunctives_swap_the_vowel() {
        assert_eq!(
            all(present_subjunctive, "hablar"),
            forms(["hable", "hables", "hable", "hablemos", "habléis", "hablen"])
        );
        assert_eq!(
            all(present_subjunctive, "beber"),
            forms(["beba", "bebas", "beba", "bebamos", "bebáis", "beban"])
        );
        assert_eq!(
            all(imperfect_subjunctive_ra, "beber"),
            forms(["bebiera", "bebieras", "bebiera", "bebiéramos", "bebierais", "bebieran"])
        );
        assert_eq!(
            all(imperfect_subjunctive_se, "hablar"),
            forms(["hablase", "hablases", "hablase", "hablásemos", "hablaseis", "hablasen"])
        );
    }

    #[test]
    fn imperatives_have_no_yo_form() {
        assert_eq!(
            all(affirmative_imperative, "hablar"),
            forms(["", "habla", "hable", "hablemos", "hablad", "hablen"])
        );
        assert_eq!(
            all(affirmative_imperative, "vivir"),
            forms(["", "vive", "viva", "vivamos", "vivid", "vivan"])
        );
        assert_eq!(
            all(negative_imperative, "beber"),
            forms(["", "no bebas", "no beba", "no bebamos", "no bebáis", "no beban"])
        );
    }

    #[test]
    fn participles_branch_on_ar() {
        assert_eq!(present_participle(&verb("hablar")), "hablando");
        assert_eq!(present_participle(&verb("beber")), "bebiendo");
        assert_eq!(past_participle(&verb("hablar")), "hablado");
        assert_eq!(past_participle(&verb("vivir")), "vivido");
    }
}
