//! Intent matching by token overlap.
//!
//! Every pattern is scored by how many lemmas it shares with the input. The
//! intent owning the highest-scoring pattern answers. Scoring uses a strict
//! `>`, so on equal overlap the pattern scanned first keeps the match, and an
//! overlap of zero never matches.

use std::collections::HashSet;

use serde::Serialize;

use crate::catalogue::Catalogue;
use crate::normalizer::Normalizer;
use crate::selector::ResponseSelector;

/// Returned when no pattern shares a lemma with the input.
pub const FALLBACK_RESPONSE: &str = "I'm still learning, please rephrase your question.";

/// Which pattern won, and by how much.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentMatch {
    /// Position of the intent in the catalogue.
    pub intent_index: usize,
    /// Position of the winning pattern within its intent.
    pub pattern_index: usize,
    /// Tag of the matched intent.
    pub tag: String,
    /// Number of shared lemmas.
    pub overlap: usize,
}

#[derive(Debug, Clone)]
struct CompiledIntent {
    tag: String,
    patterns: Vec<HashSet<String>>,
    responses: Vec<String>,
}

/// Catalogue with every pattern pre-normalized.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    intents: Vec<CompiledIntent>,
}

impl IntentMatcher {
    /// Normalizes every pattern of `catalogue` once.
    pub fn new(catalogue: &Catalogue, normalizer: &Normalizer) -> Self {
        let intents = catalogue
            .intents()
            .iter()
            .map(|intent| CompiledIntent {
                tag: intent.tag.clone(),
                patterns: intent
                    .patterns
                    .iter()
                    .map(|p| normalizer.normalize(p))
                    .collect(),
                responses: intent.responses.clone(),
            })
            .collect();
        Self { intents }
    }

    /// Finds the best-overlapping pattern, if any overlaps at all.
    pub fn best_match(&self, tokens: &HashSet<String>) -> Option<IntentMatch> {
        let mut best: Option<IntentMatch> = None;
        let mut max_overlap = 0;

        for (intent_index, intent) in self.intents.iter().enumerate() {
            for (pattern_index, pattern) in intent.patterns.iter().enumerate() {
                let overlap = tokens.intersection(pattern).count();
                if overlap > max_overlap {
                    max_overlap = overlap;
                    best = Some(IntentMatch {
                        intent_index,
                        pattern_index,
                        tag: intent.tag.clone(),
                        overlap,
                    });
                }
            }
        }

        best
    }

    /// Picks a response from the best-matching intent.
    ///
    /// `None` means nothing matched; callers answer with [`FALLBACK_RESPONSE`].
    pub fn match_tokens<'a>(
        &'a self,
        tokens: &HashSet<String>,
        selector: &dyn ResponseSelector,
    ) -> Option<&'a str> {
        self.resolve(tokens, selector).map(|(_, response)| response)
    }

    /// Like [`match_tokens`](Self::match_tokens), also reporting which pattern won.
    pub fn resolve<'a>(
        &'a self,
        tokens: &HashSet<String>,
        selector: &dyn ResponseSelector,
    ) -> Option<(IntentMatch, &'a str)> {
        let found = self.best_match(tokens)?;
        let response = selector.choose(&self.intents[found.intent_index].responses)?;
        Some((found, response))
    }
}
