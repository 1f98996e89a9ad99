//! # BIOFEAST Plugin
//!
//! A single-turn, rule-based responder for questions about sustainable food
//! practices. User input is lowercased, tokenized and lemmatized into a set of
//! lemmas; every pattern in the intent catalogue is scored by how many lemmas
//! it shares with the input, and a random response from the best intent is
//! returned.
//!
//! ## Features
//!
//! - Treebank-style tokenization (contractions, punctuation)
//! - WordNet-style dictionary lemmatization (`geese` -> `goose`, `ran` -> `run`)
//! - First-found tie policy and a fixed fallback when nothing overlaps
//! - Injectable response selection for reproducible runs
//!
//! ## Example
//!
//! ```rust
//! use elizaos_plugin_biofeast::{BiofeastPlugin, FALLBACK_RESPONSE};
//!
//! let bot = BiofeastPlugin::new();
//! println!("{}", bot.get_greeting());
//! let response = bot.respond("How do I reduce my food waste?");
//! assert_ne!(response, FALLBACK_RESPONSE);
//! ```

#![warn(missing_docs)]

pub mod actions;
pub mod catalogue;
pub mod chat_log;
pub mod config;
pub mod error;
pub mod interop;
pub mod lemmatizer;
pub mod matcher;
pub mod normalizer;
pub mod providers;
pub mod selector;
pub mod tokenizer;

use std::collections::HashSet;

use lazy_static::lazy_static;

pub use catalogue::{Catalogue, Intent};
pub use chat_log::{ChatLog, ChatTurn};
pub use config::BiofeastConfig;
pub use error::{BiofeastError, Result};
pub use lemmatizer::{Lemmatizer, Lexicon, PartOfSpeech, PosStrategy};
pub use matcher::{IntentMatch, IntentMatcher, FALLBACK_RESPONSE};
pub use normalizer::Normalizer;
pub use selector::{FirstSelector, RandomSelector, ResponseSelector, SeededSelector};

/// Shown when a conversation starts.
pub const WELCOME_TEXT: &str = "Welcome to the Sustainable Food Practices Chatbot. \
Please type a message and press Enter to start the conversation.";

/// What the chatbot is for.
pub const ABOUT_TEXT: &str = "This chatbot promotes sustainable food practices. \
It helps users make informed decisions about food choices and reducing waste.";

/// The BIOFEAST responder.
///
/// Owns the catalogue, the normalizer and the compiled matcher. All of them
/// are read-only after construction, so one instance can be shared across
/// threads behind an `Arc` without locking.
pub struct BiofeastPlugin {
    catalogue: Catalogue,
    normalizer: Normalizer,
    matcher: IntentMatcher,
    selector: Box<dyn ResponseSelector>,
}

impl Default for BiofeastPlugin {
    fn default() -> Self {
        Self::new()
    }
}

impl BiofeastPlugin {
    /// Creates a responder from the catalogue and lexicon compiled into the crate.
    pub fn new() -> Self {
        Self::from_config(&BiofeastConfig::default()).expect("embedded data must be valid")
    }

    /// Creates a responder from the resources named by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`BiofeastError::CatalogueLoad`] or
    /// [`BiofeastError::ResourceUnavailable`] when a resource is missing or
    /// malformed. Nothing is matched against a partially loaded catalogue.
    pub fn from_config(config: &BiofeastConfig) -> Result<Self> {
        let catalogue = match &config.catalogue_path {
            Some(path) => Catalogue::from_path(path)?,
            None => Catalogue::embedded()?,
        };
        let normalizer = Normalizer::from_config(config)?;
        let selector: Box<dyn ResponseSelector> = match config.seed {
            Some(seed) => Box::new(SeededSelector::new(seed)),
            None => Box::new(RandomSelector),
        };
        Ok(Self::from_parts(catalogue, normalizer, selector))
    }

    /// Assembles a responder from already loaded parts.
    pub fn from_parts(
        catalogue: Catalogue,
        normalizer: Normalizer,
        selector: Box<dyn ResponseSelector>,
    ) -> Self {
        let matcher = IntentMatcher::new(&catalogue, &normalizer);
        tracing::debug!(
            intents = catalogue.len(),
            strategy = %normalizer.lemmatizer().strategy(),
            filter = normalizer.filters_non_alphanumeric(),
            "Built responder"
        );
        Self {
            catalogue,
            normalizer,
            matcher,
            selector,
        }
    }

    /// Replaces the response selector.
    pub fn with_selector<S: ResponseSelector + 'static>(mut self, selector: S) -> Self {
        self.selector = Box::new(selector);
        self
    }

    /// Normalizes text into its lemma set.
    pub fn normalize(&self, text: &str) -> HashSet<String> {
        self.normalizer.normalize(text)
    }

    /// Which intent `text` matches, if any.
    pub fn best_match(&self, text: &str) -> Option<IntentMatch> {
        self.matcher.best_match(&self.normalize(text))
    }

    /// Answers `text`. Never fails; unmatched input gets [`FALLBACK_RESPONSE`].
    pub fn respond(&self, text: &str) -> String {
        self.respond_with_match(text).0
    }

    /// Answers `text` and reports the intent that produced the answer.
    ///
    /// The match is `None` exactly when the fallback was used, even if a
    /// catalogue response happens to read the same as [`FALLBACK_RESPONSE`].
    pub fn respond_with_match(&self, text: &str) -> (String, Option<IntentMatch>) {
        let tokens = self.normalize(text);
        match self.matcher.resolve(&tokens, self.selector.as_ref()) {
            Some((found, response)) => (response.to_string(), Some(found)),
            None => (FALLBACK_RESPONSE.to_string(), None),
        }
    }

    /// The opening line of a conversation.
    pub fn get_greeting(&self) -> String {
        get_greeting()
    }

    /// The loaded catalogue.
    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    /// The normalizer in use.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}

lazy_static! {
    static ref DEFAULT_PLUGIN: BiofeastPlugin = BiofeastPlugin::new();
}

pub(crate) fn default_plugin() -> &'static BiofeastPlugin {
    &DEFAULT_PLUGIN
}

/// Answers `text` with a shared responder built from the embedded data.
pub fn respond(text: &str) -> String {
    DEFAULT_PLUGIN.respond(text)
}

/// Normalizes `text` with the shared responder's normalizer.
pub fn normalize(text: &str) -> HashSet<String> {
    DEFAULT_PLUGIN.normalize(text)
}

/// Returns the welcome message.
pub fn get_greeting() -> String {
    WELCOME_TEXT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_intent(patterns: &str, responses: &str) -> Catalogue {
        Catalogue::from_json_str(
            &format!(r#"{{"intents": [{{"tag": "t", "patterns": {patterns}, "responses": {responses}}}]}}"#),
            "test",
        )
        .unwrap()
    }

    #[test]
    fn test_plugin_creation() {
        let bot = BiofeastPlugin::new();
        assert!(!bot.catalogue().is_empty());
        assert!(bot.get_greeting().contains("Sustainable Food"));
    }

    #[test]
    fn test_food_waste_question_gets_an_answer() {
        let bot = BiofeastPlugin::new();
        let response = bot.respond("How do I reduce my food waste?");
        let intent = bot.catalogue().get("food_waste").unwrap();
        assert!(intent.responses.contains(&response), "{response}");
    }

    #[test]
    fn test_weather_question_falls_back() {
        let catalogue = one_intent(
            r#"["reduce food waste", "how can I reduce waste"]"#,
            r#"["Compost your scraps!", "Buy only what you need."]"#,
        );
        let bot = BiofeastPlugin::from_parts(
            catalogue,
            Normalizer::embedded().unwrap(),
            Box::new(RandomSelector),
        );
        assert_eq!(bot.respond("What's the weather today?"), FALLBACK_RESPONSE);
        assert_ne!(bot.respond("How do I reduce my food waste?"), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_empty_input_falls_back() {
        let bot = BiofeastPlugin::new();
        assert_eq!(bot.respond(""), FALLBACK_RESPONSE);
        assert_eq!(bot.respond("   ?!  "), FALLBACK_RESPONSE);
    }

    #[test]
    fn test_injected_selector_is_used() {
        let bot = BiofeastPlugin::new().with_selector(FirstSelector);
        let intent = bot.catalogue().get("composting").unwrap();
        assert_eq!(bot.respond("Composting kitchen scraps"), intent.responses[0]);
    }

    #[test]
    fn test_seeded_config_is_reproducible() {
        let config = BiofeastConfig::new().with_seed(11);
        let a = BiofeastPlugin::from_config(&config).unwrap();
        let b = BiofeastPlugin::from_config(&config).unwrap();
        for _ in 0..10 {
            assert_eq!(a.respond("meal planning tips"), b.respond("meal planning tips"));
        }
    }

    #[test]
    fn test_missing_catalogue_fails_fast() {
        let config = BiofeastConfig::new().with_catalogue_path("/nonexistent/intents.json");
        let err = BiofeastPlugin::from_config(&config).err().unwrap();
        assert!(err.is_fatal_at_startup());
    }

    #[test]
    fn test_best_match_reports_tag() {
        let bot = BiofeastPlugin::new();
        let found = bot.best_match("Why buy local food").unwrap();
        assert_eq!(found.tag, "local_food");
        assert!(bot.best_match("xyzzy plugh").is_none());
    }

    #[test]
    fn test_match_is_reported_even_when_response_reads_like_fallback() {
        let catalogue = one_intent(
            r#"["are you learning"]"#,
            &format!(r#"["{FALLBACK_RESPONSE}"]"#),
        );
        let bot = BiofeastPlugin::from_parts(
            catalogue,
            Normalizer::embedded().unwrap(),
            Box::new(FirstSelector),
        );

        let (response, found) = bot.respond_with_match("Are you still learning?");
        assert_eq!(response, FALLBACK_RESPONSE);
        assert_eq!(found.unwrap().tag, "t");

        let (response, found) = bot.respond_with_match("xyzzy");
        assert_eq!(response, FALLBACK_RESPONSE);
        assert!(found.is_none());
    }

    #[test]
    fn test_crate_level_functions() {
        assert_ne!(respond("How do I compost?"), FALLBACK_RESPONSE);
        assert!(normalize("Geese ate berries").contains("goose"));
        assert_eq!(get_greeting(), WELCOME_TEXT);
    }

    #[test]
    fn test_plugin_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BiofeastPlugin>();
    }
}
