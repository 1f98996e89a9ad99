//! Configuration for the BIOFEAST responder.
//!
//! Configuration is loaded from environment variables or provided explicitly.
//! Every resource path is optional; when unset the data compiled into the
//! crate is used.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{BiofeastError, Result};
use crate::lemmatizer::PosStrategy;

/// Default location of the conversation log.
pub const DEFAULT_CHAT_LOG_PATH: &str = "chat_log.csv";

/// Configuration for the responder and its collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BiofeastConfig {
    /// Intent catalogue JSON file. `None` uses the embedded catalogue.
    pub catalogue_path: Option<PathBuf>,
    /// Lexicon JSON file. Ignored when `wordnet_dir` is set.
    pub lexicon_path: Option<PathBuf>,
    /// WordNet database directory (`index.noun`, `noun.exc`, ...).
    pub wordnet_dir: Option<PathBuf>,
    /// Conversation log written by the front ends.
    pub chat_log_path: PathBuf,
    /// Drop tokens that are not entirely alphanumeric before lemmatizing.
    pub filter_non_alphanumeric: bool,
    /// Which parts of speech the lemmatizer consults.
    pub pos_strategy: PosStrategy,
    /// Seed for reproducible response selection.
    pub seed: Option<u64>,
}

impl Default for BiofeastConfig {
    fn default() -> Self {
        Self {
            catalogue_path: None,
            lexicon_path: None,
            wordnet_dir: None,
            chat_log_path: PathBuf::from(DEFAULT_CHAT_LOG_PATH),
            filter_non_alphanumeric: true,
            pos_strategy: PosStrategy::default(),
            seed: None,
        }
    }
}

impl BiofeastConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - BIOFEAST_CATALOGUE_PATH: intent catalogue JSON
    /// - BIOFEAST_LEXICON_PATH: lexicon JSON
    /// - BIOFEAST_WORDNET_DIR: WordNet database directory
    /// - BIOFEAST_CHAT_LOG: conversation log path
    /// - BIOFEAST_FILTER_NON_ALNUM: `true`/`false`
    /// - BIOFEAST_POS_STRATEGY: `noun` or `cascade`
    /// - BIOFEAST_SEED: unsigned integer
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("BIOFEAST_CATALOGUE_PATH") {
            config.catalogue_path = Some(PathBuf::from(path));
        }

        if let Some(path) = lookup("BIOFEAST_LEXICON_PATH") {
            config.lexicon_path = Some(PathBuf::from(path));
        }

        if let Some(dir) = lookup("BIOFEAST_WORDNET_DIR") {
            config.wordnet_dir = Some(PathBuf::from(dir));
        }

        if let Some(path) = lookup("BIOFEAST_CHAT_LOG") {
            config.chat_log_path = PathBuf::from(path);
        }

        if let Some(val) = lookup("BIOFEAST_FILTER_NON_ALNUM") {
            config.filter_non_alphanumeric = parse_bool(&val).ok_or_else(|| {
                BiofeastError::config(format!("BIOFEAST_FILTER_NON_ALNUM: not a boolean: {val}"))
            })?;
        }

        if let Some(val) = lookup("BIOFEAST_POS_STRATEGY") {
            config.pos_strategy = val
                .parse()
                .map_err(|e: String| BiofeastError::config(format!("BIOFEAST_POS_STRATEGY: {e}")))?;
        }

        if let Some(val) = lookup("BIOFEAST_SEED") {
            let seed = val.trim().parse().map_err(|_| {
                BiofeastError::config(format!("BIOFEAST_SEED: not an unsigned integer: {val}"))
            })?;
            config.seed = Some(seed);
        }

        Ok(config)
    }

    /// Set the catalogue path.
    pub fn with_catalogue_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.catalogue_path = Some(path.into());
        self
    }

    /// Set the lexicon JSON path.
    pub fn with_lexicon_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.lexicon_path = Some(path.into());
        self
    }

    /// Set the WordNet database directory.
    pub fn with_wordnet_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.wordnet_dir = Some(dir.into());
        self
    }

    /// Set the conversation log path.
    pub fn with_chat_log_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.chat_log_path = path.into();
        self
    }

    /// Enable or disable the alphanumeric token filter.
    pub fn with_filter_non_alphanumeric(mut self, filter: bool) -> Self {
        self.filter_non_alphanumeric = filter;
        self
    }

    /// Set the lemmatizer part-of-speech strategy.
    pub fn with_pos_strategy(mut self, strategy: PosStrategy) -> Self {
        self.pos_strategy = strategy;
        self
    }

    /// Set the response selection seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Get the conversation log path.
    pub fn chat_log_path(&self) -> &Path {
        &self.chat_log_path
    }
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = BiofeastConfig::default();
        assert!(config.catalogue_path.is_none());
        assert!(config.filter_non_alphanumeric);
        assert_eq!(config.pos_strategy, PosStrategy::Cascade);
        assert_eq!(config.chat_log_path(), Path::new(DEFAULT_CHAT_LOG_PATH));
    }

    #[test]
    fn test_config_builder() {
        let config = BiofeastConfig::new()
            .with_catalogue_path("/srv/intents.json")
            .with_filter_non_alphanumeric(false)
            .with_pos_strategy(PosStrategy::NounOnly)
            .with_seed(7);

        assert_eq!(config.catalogue_path, Some(PathBuf::from("/srv/intents.json")));
        assert!(!config.filter_non_alphanumeric);
        assert_eq!(config.pos_strategy, PosStrategy::NounOnly);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_from_lookup() {
        let config = BiofeastConfig::from_lookup(lookup_from(&[
            ("BIOFEAST_CHAT_LOG", "/tmp/log.csv"),
            ("BIOFEAST_FILTER_NON_ALNUM", "off"),
            ("BIOFEAST_POS_STRATEGY", "noun"),
            ("BIOFEAST_SEED", "42"),
        ]))
        .unwrap();

        assert_eq!(config.chat_log_path(), Path::new("/tmp/log.csv"));
        assert!(!config.filter_non_alphanumeric);
        assert_eq!(config.pos_strategy, PosStrategy::NounOnly);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        let err = BiofeastConfig::from_lookup(lookup_from(&[("BIOFEAST_SEED", "-1")])).unwrap_err();
        assert!(matches!(err, BiofeastError::Config { .. }));

        let err = BiofeastConfig::from_lookup(lookup_from(&[("BIOFEAST_FILTER_NON_ALNUM", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("BIOFEAST_FILTER_NON_ALNUM"));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: BiofeastConfig =
            serde_json::from_str(r#"{"filter_non_alphanumeric": false}"#).unwrap();
        assert!(!config.filter_non_alphanumeric);
        assert_eq!(config.chat_log_path(), Path::new(DEFAULT_CHAT_LOG_PATH));
    }
}
