//! Runtime settings, read once from the environment (and `.env`).

use std::env;
use std::path::PathBuf;

use thiserror::Error;

use crate::lexicon::{LexiconError, VerbTable};
use crate::quiz::{QuizOptions, MAX_QUIZ_ITEMS};

pub const DB_PATH_VAR: &str = "CONJUGA_DB_PATH";
pub const VERBS_PATH_VAR: &str = "CONJUGA_VERBS_PATH";
pub const MAX_QUIZ_ITEMS_VAR: &str = "CONJUGA_MAX_QUIZ_ITEMS";
pub const RANDOM_QUIZ_VERBS_VAR: &str = "CONJUGA_RANDOM_QUIZ_VERBS";
pub const RANDOM_QUIZ_ITEMS_VAR: &str = "CONJUGA_RANDOM_QUIZ_ITEMS";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive integer, got {value:?}")]
    NotANumber { var: &'static str, value: String },

    #[error("{var} ({value}) cannot exceed {max_var} ({max})")]
    AboveMaximum {
        var: &'static str,
        value: usize,
        max_var: &'static str,
        max: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// SQLite file holding dialogue state.
    pub database_path: String,
    /// Verb data to load instead of the bundled list.
    pub verbs_path: Option<PathBuf>,
    pub quiz: QuizOptions,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            database_path: "db.sqlite".to_string(),
            verbs_path: None,
            quiz: QuizOptions::default(),
        }
    }
}

impl BotConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Builds the config from any variable source. Unset or empty variables
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let quiz = QuizOptions {
            max_items: parse_count(MAX_QUIZ_ITEMS_VAR, get(MAX_QUIZ_ITEMS_VAR))?
                .unwrap_or(MAX_QUIZ_ITEMS),
            random_verbs: parse_count(RANDOM_QUIZ_VERBS_VAR, get(RANDOM_QUIZ_VERBS_VAR))?
                .unwrap_or(defaults.quiz.random_verbs),
            random_items: parse_count(RANDOM_QUIZ_ITEMS_VAR, get(RANDOM_QUIZ_ITEMS_VAR))?
                .unwrap_or(defaults.quiz.random_items),
        };
        if quiz.random_items > quiz.max_items {
            return Err(ConfigError::AboveMaximum {
                var: RANDOM_QUIZ_ITEMS_VAR,
                value: quiz.random_items,
                max_var: MAX_QUIZ_ITEMS_VAR,
                max: quiz.max_items,
            });
        }

        Ok(Self {
            database_path: get(DB_PATH_VAR).unwrap_or(defaults.database_path),
            verbs_path: get(VERBS_PATH_VAR).map(PathBuf::from),
            quiz,
        })
    }

    /// The configured lexicon, or the bundled one when no path is set.
    pub fn load_verbs(&self) -> Result<VerbTable, LexiconError> {
        match &self.verbs_path {
            Some(path) => VerbTable::open(path),
            None => VerbTable::builtin(),
        }
    }
}

fn parse_count(var: &'static str, value: Option<String>) -> Result<Option<usize>, ConfigError> {
    let Some(value) = value else {
        return Ok(None);
    };
    match value.trim().parse::<usize>() {
        Ok(count) if count > 0 => Ok(Some(count)),
        _ => Err(ConfigError::NotANumber { var, value }),
    }
}
