//! Text normalization: lowercase, tokenize, filter, lemmatize.

use std::collections::HashSet;

use crate::config::BiofeastConfig;
use crate::error::Result;
use crate::lemmatizer::{Lemmatizer, Lexicon, PosStrategy};
use crate::tokenizer::{is_alphanumeric, tokenize};

/// Reduces free text to a set of lowercase lemmas.
#[derive(Debug, Clone)]
pub struct Normalizer {
    lemmatizer: Lemmatizer,
    filter_non_alphanumeric: bool,
}

impl Normalizer {
    /// Creates a normalizer.
    pub fn new(lemmatizer: Lemmatizer, filter_non_alphanumeric: bool) -> Self {
        Self {
            lemmatizer,
            filter_non_alphanumeric,
        }
    }

    /// Embedded lexicon, cascade strategy, alphanumeric filter on.
    pub fn embedded() -> Result<Self> {
        Ok(Self::new(
            Lemmatizer::new(Lexicon::embedded()?, PosStrategy::default()),
            true,
        ))
    }

    /// Resolves the lexicon named by `config`.
    ///
    /// A WordNet directory takes precedence over a lexicon JSON path. Missing
    /// resources fail here, before any text is normalized.
    pub fn from_config(config: &BiofeastConfig) -> Result<Self> {
        let lexicon = match (&config.wordnet_dir, &config.lexicon_path) {
            (Some(dir), _) => Lexicon::from_wordnet_dir(dir)?,
            (None, Some(path)) => Lexicon::from_json_path(path)?,
            (None, None) => Lexicon::embedded()?,
        };
        Ok(Self::new(
            Lemmatizer::new(lexicon, config.pos_strategy),
            config.filter_non_alphanumeric,
        ))
    }

    /// Whether non-alphanumeric tokens are dropped.
    pub fn filters_non_alphanumeric(&self) -> bool {
        self.filter_non_alphanumeric
    }

    /// The lemmatizer in use.
    pub fn lemmatizer(&self) -> &Lemmatizer {
        &self.lemmatizer
    }

    /// Normalizes `text` into a set of lemmas. Empty text gives an empty set.
    pub fn normalize(&self, text: &str) -> HashSet<String> {
        tokenize(&text.to_lowercase())
            .into_iter()
            .filter(|token| !self.filter_non_alphanumeric || is_alphanumeric(token))
            .map(|token| self.lemmatizer.lemmatize(&token))
            .collect()
    }
}
