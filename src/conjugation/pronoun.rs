use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConjugaError;

/// Grammatical person. The declaration order is the column order of every
/// paradigm and override table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Pronoun {
    #[serde(rename = "yo")]
    Yo,
    #[serde(rename = "tú")]
    Tu,
    #[serde(rename = "él/ella/Ud.")]
    ElEllaUsted,
    #[serde(rename = "nosotros")]
    Nosotros,
    #[serde(rename = "vosotros")]
    Vosotros,
    #[serde(rename = "ellos/ellas/Uds.")]
    EllosEllasUstedes,
}

impl Pronoun {
    pub const ALL: [Pronoun; 6] = [
        Pronoun::Yo,
        Pronoun::Tu,
        Pronoun::ElEllaUsted,
        Pronoun::Nosotros,
        Pronoun::Vosotros,
        Pronoun::EllosEllasUstedes,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Pronoun::Yo => "yo",
            Pronoun::Tu => "tú",
            Pronoun::ElEllaUsted => "él/ella/Ud.",
            Pronoun::Nosotros => "nosotros",
            Pronoun::Vosotros => "vosotros",
            Pronoun::EllosEllasUstedes => "ellos/ellas/Uds.",
        }
    }
}

impl fmt::Display for Pronoun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Pronoun {
    type Err = ConjugaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pronoun::ALL
            .into_iter()
            .find(|pronoun| pronoun.name() == s)
            .ok_or_else(|| ConjugaError::InvalidPronoun(s.to_string()))
    }
}

/// Returns true if `pronoun` names one of the six persons.
pub fn is_valid_pronoun(pronoun: &str) -> bool {
    pronoun.parse::<Pronoun>().is_ok()
}
