//! Verb data: which infinitives exist, which are regular, and the stored forms
//! of the irregular ones.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use rand::seq::IteratorRandom;
use rand::Rng;
use serde::Deserialize;
use thiserror::Error;

use crate::conjugation::Tense;
use crate::verb::Ending;

/// Six stored forms in pronoun order. `None` means "use the regular rule".
pub type Forms = [Option<String>; 6];

/// `[present participle, past participle]`.
pub type Participles = [String; 2];

const BUILTIN_VERBS: &str = include_str!("../data/verbs.json");

/// The verb data the conjugation engine consults. Infinitives are passed
/// lowercased.
pub trait VerbLookup: Send + Sync {
    fn is_known_verb(&self, infinitive: &str) -> bool;

    fn is_regular(&self, infinitive: &str) -> bool;

    fn get_override(&self, infinitive: &str, tense: Tense) -> Option<&Forms>;

    fn get_participles(&self, infinitive: &str) -> Option<&Participles>;
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read verb data: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse verb data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{infinitive}: unknown tense {tense:?}")]
    UnknownTense { infinitive: String, tense: String },

    #[error("{infinitive}: {tense} is a compound tense and cannot be overridden")]
    CompoundOverride { infinitive: String, tense: Tense },

    #[error("{0:?} is not an -ar, -er or -ir infinitive")]
    BadInfinitive(String),
}

/// Stored forms for one irregular verb. Tenses without an entry use the
/// regular rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IrregularEntry {
    pub tenses: HashMap<Tense, Forms>,
    pub participles: Option<Participles>,
}

#[derive(Deserialize)]
struct RawTable {
    #[serde(default)]
    regular: Vec<String>,
    #[serde(default)]
    irregular: BTreeMap<String, RawEntry>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    participles: Option<Participles>,
    #[serde(default)]
    tenses: BTreeMap<String, Forms>,
}

/// In-memory [`VerbLookup`] backed by JSON.
#[derive(Debug, Clone, Default)]
pub struct VerbTable {
    regular: BTreeSet<String>,
    irregular: BTreeMap<String, IrregularEntry>,
}

impl VerbTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The verb list bundled with the crate.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_str(BUILTIN_VERBS)
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, LexiconError> {
        let raw: RawTable = serde_json::from_reader(reader)?;
        Self::from_raw(raw)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(json: &str) -> Result<Self, LexiconError> {
        let raw: RawTable = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawTable) -> Result<Self, LexiconError> {
        let mut table = Self::new();

        for infinitive in raw.regular {
            let infinitive = checked_infinitive(&infinitive)?;
            table.regular.insert(infinitive);
        }

        for (infinitive, raw_entry) in raw.irregular {
            let infinitive = checked_infinitive(&infinitive)?;
            let mut entry = IrregularEntry {
                participles: raw_entry.participles,
                ..Default::default()
            };
            for (name, forms) in raw_entry.tenses {
                let tense = name.parse::<Tense>().map_err(|_| LexiconError::UnknownTense {
                    infinitive: infinitive.clone(),
                    tense: name.clone(),
                })?;
                if tense.is_compound() {
                    return Err(LexiconError::CompoundOverride { infinitive, tense });
                }
                entry.tenses.insert(tense, forms);
            }
            if table.regular.contains(&infinitive) {
                log::warn!(
                    "{} is listed as regular and irregular, treating it as regular",
                    infinitive
                );
            }
            table.irregular.insert(infinitive, entry);
        }

        log::info!(
            "Loaded {} regular and {} irregular verbs",
            table.regular.len(),
            table.irregular.len()
        );
        Ok(table)
    }

    pub fn insert_regular(mut self, infinitive: &str) -> Self {
        self.regular.insert(infinitive.to_lowercase());
        self
    }

    pub fn insert_irregular(mut self, infinitive: &str, entry: IrregularEntry) -> Self {
        self.irregular.insert(infinitive.to_lowercase(), entry);
        self
    }

    /// Every known infinitive, sorted and without duplicates.
    pub fn infinitives(&self) -> Vec<&str> {
        let known: BTreeSet<&str> = self
            .regular
            .iter()
            .chain(self.irregular.keys())
            .map(String::as_str)
            .collect();
        known.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.infinitives().len()
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.irregular.is_empty()
    }

    /// Up to `count` distinct infinitives picked uniformly at random.
    pub fn random_verbs<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&str> {
        self.infinitives().into_iter().choose_multiple(rng, count)
    }
}

impl VerbLookup for VerbTable {
    fn is_known_verb(&self, infinitive: &str) -> bool {
        self.regular.contains(infinitive) || self.irregular.contains_key(infinitive)
    }

    fn is_regular(&self, infinitive: &str) -> bool {
        self.regular.contains(infinitive)
    }

    fn get_override(&self, infinitive: &str, tense: Tense) -> Option<&Forms> {
        self.irregular.get(infinitive)?.tenses.get(&tense)
    }

    fn get_participles(&self, infinitive: &str) -> Option<&Participles> {
        self.irregular.get(infinitive)?.participles.as_ref()
    }
}

fn checked_infinitive(infinitive: &str) -> Result<String, LexiconError> {
    let lowercase = infinitive.trim().to_lowercase();
    match Ending::of(&lowercase) {
        Some(_) => Ok(lowercase),
        None => Err(LexiconError::BadInfinitive(infinitive.to_string())),
    }
}
