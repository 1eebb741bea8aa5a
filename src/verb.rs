use std::fmt;

use crate::error::{ConjugaError, Result};
use crate::lexicon::VerbLookup;

/// The three infinitive endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ending {
    Ar,
    Er,
    Ir,
}

impl Ending {
    /// Reads the ending off a lowercased infinitive.
    pub fn of(infinitive: &str) -> Option<Ending> {
        if infinitive.chars().count() < 2 {
            return None;
        }
        if infinitive.ends_with("ar") {
            Some(Ending::Ar)
        } else if infinitive.ends_with("er") {
            Some(Ending::Er)
        } else if infinitive.ends_with("ir") {
            Some(Ending::Ir)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ending::Ar => "ar",
            Ending::Er => "er",
            Ending::Ir => "ir",
        }
    }
}

impl fmt::Display for Ending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated Spanish verb.
///
/// The infinitive keeps the caller's spelling for display. Lookups and
/// conjugation use the lowercased form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Verb {
    infinitive: String,
    lowercase: String,
    ending: Ending,
    is_regular: bool,
}

impl Verb {
    pub fn new(infinitive: &str, lookup: &dyn VerbLookup) -> Result<Self> {
        let lowercase = infinitive.to_lowercase();
        if !lookup.is_known_verb(&lowercase) {
            return Err(ConjugaError::InvalidVerb(infinitive.to_string()));
        }
        let ending = Ending::of(&lowercase)
            .ok_or_else(|| ConjugaError::InvalidVerb(infinitive.to_string()))?;

        Ok(Self {
            infinitive: infinitive.to_string(),
            is_regular: lookup.is_regular(&lowercase),
            lowercase,
            ending,
        })
    }

    /// The infinitive as the caller spelled it.
    pub fn infinitive(&self) -> &str {
        &self.infinitive
    }

    /// The lowercased infinitive, used as the lookup key.
    pub fn key(&self) -> &str {
        &self.lowercase
    }

    pub fn stem(&self) -> &str {
        // The ending is ASCII, so slicing off two bytes stays on a char boundary.
        &self.lowercase[..self.lowercase.len() - 2]
    }

    pub fn ending(&self) -> Ending {
        self.ending
    }

    pub fn is_regular(&self) -> bool {
        self.is_regular
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Verb: {}", self.infinitive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::VerbTable;

    fn table() -> VerbTable {
        VerbTable::builtin().expect("bundled lexicon parses")
    }

    #[test]
    fn accepts_regular_and_irregular_verbs() {
        let table = table();
        assert!(Verb::new("hablar", &table).is_ok());
        assert!(Verb::new("ser", &table).is_ok());
        assert!(Verb::new("HABLAR", &table).is_ok());
    }

    #[test]
    fn rejects_unknown_and_empty_infinitives() {
        let table = table();
        assert_eq!(
            Verb::new("abcd", &table),
            Err(ConjugaError::InvalidVerb("abcd".to_string()))
        );
        assert_eq!(
            Verb::new("", &table),
            Err(ConjugaError::InvalidVerb(String::new()))
        );
    }

    #[test]
    fn derives_stem_and_ending() {
        let table = table();
        let hablar = Verb::new("hablar", &table).unwrap();
        assert_eq!(hablar.stem(), "habl");
        assert_eq!(hablar.ending(), Ending::Ar);

        let hacer = Verb::new("hacer", &table).unwrap();
        assert_eq!(hacer.stem(), "hac");
        assert_eq!(hacer.ending(), Ending::Er);

        let decir = Verb::new("decir", &table).unwrap();
        assert_eq!(decir.stem(), "dec");
        assert_eq!(decir.ending(), Ending::Ir);

        let ir = Verb::new("ir", &table).unwrap();
        assert_eq!(ir.stem(), "");
        assert_eq!(ir.ending(), Ending::Ir);
    }

    #[test]
    fn keeps_display_case_but_derives_from_lowercase() {
        let table = table();
        let verb = Verb::new("HABLAR", &table).unwrap();
        assert_eq!(verb.infinitive(), "HABLAR");
        assert_eq!(verb.key(), "hablar");
        assert_eq!(verb.stem(), "habl");
        assert_eq!(verb.to_string(), "Verb: HABLAR");
    }

    #[test]
    fn regularity_comes_from_the_lookup() {
        let table = table();
        assert!(Verb::new("hablar", &table).unwrap().is_regular());
        assert!(!Verb::new("ser", &table).unwrap().is_regular());
    }

    #[test]
    fn ending_requires_two_characters() {
        assert_eq!(Ending::of("r"), None);
        assert_eq!(Ending::of("ir"), Some(Ending::Ir));
        assert_eq!(Ending::of("hablor"), None);
    }
}
