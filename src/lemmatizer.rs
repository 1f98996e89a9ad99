//! WordNet-style lemmatization.
//!
//! A [`Lexicon`] holds the known lemmas and irregular-form exception lists for
//! each part of speech. The [`Lemmatizer`] runs the classic "morphy" procedure
//! over it: exception lookup first, otherwise one pass of suffix detachment
//! rules, keeping only candidates the lexicon knows. This is dictionary
//! lemmatization, not stemming: `geese` becomes `goose`, `ran` becomes `run`,
//! and `news` stays `news`.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{BiofeastError, Result};

/// Part of speech understood by the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    /// Nouns (`index.noun`, `noun.exc`).
    Noun,
    /// Verbs (`index.verb`, `verb.exc`).
    Verb,
    /// Adjectives (`index.adj`, `adj.exc`).
    Adjective,
    /// Adverbs (`index.adv`, `adv.exc`).
    Adverb,
}

impl PartOfSpeech {
    /// Every part of speech, in the order the cascade strategy consults them.
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Noun,
        PartOfSpeech::Verb,
        PartOfSpeech::Adjective,
        PartOfSpeech::Adverb,
    ];

    /// File suffix used by the WordNet database for this part of speech.
    pub fn wordnet_name(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adj",
            PartOfSpeech::Adverb => "adv",
        }
    }

    fn detachment_rules(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            PartOfSpeech::Noun => &[
                ("s", ""),
                ("ses", "s"),
                ("ves", "f"),
                ("xes", "x"),
                ("zes", "z"),
                ("ches", "ch"),
                ("shes", "sh"),
                ("men", "man"),
                ("ies", "y"),
            ],
            PartOfSpeech::Verb => &[
                ("s", ""),
                ("ies", "y"),
                ("es", "e"),
                ("es", ""),
                ("ed", "e"),
                ("ed", ""),
                ("ing", "e"),
                ("ing", ""),
            ],
            PartOfSpeech::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
            PartOfSpeech::Adverb => &[],
        }
    }
}

/// Which parts of speech a [`Lemmatizer`] consults for an untagged word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PosStrategy {
    /// Treat every word as a noun.
    NounOnly,
    /// Try noun, verb, adjective, adverb. The first part of speech that
    /// recognises the word decides its lemma, so a base-form noun such as
    /// `seed` is never reread as an inflected verb.
    #[default]
    Cascade,
}

impl FromStr for PosStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "noun" | "noun_only" | "noun-only" => Ok(PosStrategy::NounOnly),
            "cascade" | "all" => Ok(PosStrategy::Cascade),
            other => Err(format!("unknown part-of-speech strategy: {other}")),
        }
    }
}

impl fmt::Display for PosStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PosStrategy::NounOnly => write!(f, "noun_only"),
            PosStrategy::Cascade => write!(f, "cascade"),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    noun: Vec<String>,
    #[serde(default)]
    verb: Vec<String>,
    #[serde(default)]
    adj: Vec<String>,
    #[serde(default)]
    adv: Vec<String>,
    #[serde(default)]
    exceptions: ExceptionFile,
}

#[derive(Debug, Default, Deserialize)]
struct ExceptionFile {
    #[serde(default)]
    noun: HashMap<String, Vec<String>>,
    #[serde(default)]
    verb: HashMap<String, Vec<String>>,
    #[serde(default)]
    adj: HashMap<String, Vec<String>>,
    #[serde(default)]
    adv: HashMap<String, Vec<String>>,
}

/// Known lemmas and irregular forms, per part of speech.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    lemmas: HashMap<PartOfSpeech, HashSet<String>>,
    exceptions: HashMap<PartOfSpeech, HashMap<String, Vec<String>>>,
}

impl Lexicon {
    /// The compact English lexicon compiled into the crate.
    pub fn embedded() -> Result<Self> {
        let raw = include_str!("../data/lexicon.json");
        Self::from_json_str(raw).map_err(|e| BiofeastError::resource("embedded lexicon", e.to_string()))
    }

    /// Parses a lexicon from its JSON form.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(raw)?;
        let mut lexicon = Self::default();
        for (pos, words) in [
            (PartOfSpeech::Noun, file.noun),
            (PartOfSpeech::Verb, file.verb),
            (PartOfSpeech::Adjective, file.adj),
            (PartOfSpeech::Adverb, file.adv),
        ] {
            for word in words {
                lexicon.insert_lemma(pos, &word);
            }
        }
        for (pos, map) in [
            (PartOfSpeech::Noun, file.exceptions.noun),
            (PartOfSpeech::Verb, file.exceptions.verb),
            (PartOfSpeech::Adjective, file.exceptions.adj),
            (PartOfSpeech::Adverb, file.exceptions.adv),
        ] {
            for (form, bases) in map {
                lexicon.insert_exception(pos, &form, bases);
            }
        }
        Ok(lexicon)
    }

    /// Reads a lexicon JSON file.
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|e| BiofeastError::resource(path.display().to_string(), e.to_string()))?;
        let lexicon = Self::from_json_str(&raw)
            .map_err(|e| BiofeastError::resource(path.display().to_string(), e.to_string()))?;
        if lexicon.is_empty() {
            return Err(BiofeastError::resource(
                path.display().to_string(),
                "lexicon contains no lemmas",
            ));
        }
        tracing::info!(path = %path.display(), lemmas = lexicon.len(), "Loaded lexicon");
        Ok(lexicon)
    }

    /// Reads a WordNet database directory.
    ///
    /// `index.<pos>` files are required; `<pos>.exc` files are optional.
    pub fn from_wordnet_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(BiofeastError::resource(
                dir.display().to_string(),
                "WordNet directory not found",
            ));
        }

        let mut lexicon = Self::default();
        for pos in PartOfSpeech::ALL {
            let index_path = dir.join(format!("index.{}", pos.wordnet_name()));
            let index = fs::read_to_string(&index_path).map_err(|e| {
                BiofeastError::resource(index_path.display().to_string(), e.to_string())
            })?;
            for line in index.lines() {
                // License header lines are indented.
                if line.starts_with(' ') {
                    continue;
                }
                if let Some(lemma) = line.split_whitespace().next() {
                    lexicon.insert_lemma(pos, lemma);
                }
            }

            let exc_path = dir.join(format!("{}.exc", pos.wordnet_name()));
            match fs::read_to_string(&exc_path) {
                Ok(exc) => {
                    for line in exc.lines() {
                        let mut fields = line.split_whitespace();
                        if let Some(form) = fields.next() {
                            let bases: Vec<String> = fields.map(str::to_string).collect();
                            lexicon.insert_exception(pos, form, bases);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %exc_path.display(), error = %e, "No exception list");
                }
            }
        }

        tracing::info!(dir = %dir.display(), lemmas = lexicon.len(), "Loaded WordNet lexicon");
        Ok(lexicon)
    }

    /// Adds a lemma for a part of speech.
    pub fn insert_lemma(&mut self, pos: PartOfSpeech, lemma: &str) {
        self.lemmas
            .entry(pos)
            .or_default()
            .insert(lemma.to_lowercase());
    }

    /// Adds an irregular form. Its base forms become known lemmas.
    pub fn insert_exception(&mut self, pos: PartOfSpeech, form: &str, bases: Vec<String>) {
        let bases: Vec<String> = bases.into_iter().map(|b| b.to_lowercase()).collect();
        for base in &bases {
            self.insert_lemma(pos, base);
        }
        self.exceptions
            .entry(pos)
            .or_default()
            .insert(form.to_lowercase(), bases);
    }

    /// Whether `word` is a known lemma for `pos`.
    pub fn contains(&self, pos: PartOfSpeech, word: &str) -> bool {
        self.lemmas
            .get(&pos)
            .map(|set| set.contains(word))
            .unwrap_or(false)
    }

    fn exceptions_for(&self, pos: PartOfSpeech, word: &str) -> Option<&Vec<String>> {
        self.exceptions.get(&pos).and_then(|map| map.get(word))
    }

    /// Total number of lemmas across parts of speech.
    pub fn len(&self) -> usize {
        self.lemmas.values().map(HashSet::len).sum()
    }

    /// Whether the lexicon has no lemmas at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Dictionary lemmatizer over a [`Lexicon`].
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    lexicon: Lexicon,
    strategy: PosStrategy,
}

impl Lemmatizer {
    /// Creates a lemmatizer.
    pub fn new(lexicon: Lexicon, strategy: PosStrategy) -> Self {
        Self { lexicon, strategy }
    }

    /// The part-of-speech strategy in use.
    pub fn strategy(&self) -> PosStrategy {
        self.strategy
    }

    /// The underlying lexicon.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Candidate base forms of `word` for `pos`, in discovery order.
    pub fn morphy(&self, word: &str, pos: PartOfSpeech) -> Vec<String> {
        let mut forms = vec![word.to_string()];
        match self.lexicon.exceptions_for(pos, word) {
            Some(bases) => forms.extend(bases.iter().cloned()),
            None => {
                for (suffix, replacement) in pos.detachment_rules() {
                    if let Some(stem) = word.strip_suffix(suffix) {
                        forms.push(format!("{stem}{replacement}"));
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        forms
            .into_iter()
            .filter(|form| self.lexicon.contains(pos, form))
            .filter(|form| seen.insert(form.clone()))
            .collect()
    }

    /// Lemmatizes `word` as the given part of speech.
    ///
    /// Picks the shortest candidate (earliest on ties), or returns the word
    /// unchanged when the lexicon offers none.
    pub fn lemmatize_as(&self, word: &str, pos: PartOfSpeech) -> String {
        let mut best: Option<String> = None;
        for candidate in self.morphy(word, pos) {
            let shorter = best
                .as_ref()
                .map(|b| candidate.chars().count() < b.chars().count())
                .unwrap_or(true);
            if shorter {
                best = Some(candidate);
            }
        }
        best.unwrap_or_else(|| word.to_string())
    }

    /// Lemmatizes an untagged word according to the configured strategy.
    pub fn lemmatize(&self, word: &str) -> String {
        match self.strategy {
            PosStrategy::NounOnly => self.lemmatize_as(word, PartOfSpeech::Noun),
            PosStrategy::Cascade => PartOfSpeech::ALL
                .iter()
                .find(|pos| !self.morphy(word, **pos).is_empty())
                .map(|pos| self.lemmatize_as(word, *pos))
                .unwrap_or_else(|| word.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn embedded(strategy: PosStrategy) -> Lemmatizer {
        Lemmatizer::new(Lexicon::embedded().unwrap(), strategy)
    }

    #[test]
    fn test_embedded_lexicon_loads() {
        let lexicon = Lexicon::embedded().unwrap();
        assert!(!lexicon.is_empty());
        assert!(lexicon.contains(PartOfSpeech::Noun, "practice"));
        assert!(lexicon.contains(PartOfSpeech::Verb, "run"));
    }

    #[test]
    fn test_regular_noun_plurals() {
        let lem = embedded(PosStrategy::NounOnly);
        assert_eq!(lem.lemmatize("practices"), "practice");
        assert_eq!(lem.lemmatize("vegetables"), "vegetable");
        assert_eq!(lem.lemmatize("berries"), "berry");
        assert_eq!(lem.lemmatize("boxes"), "box");
        assert_eq!(lem.lemmatize("peaches"), "peach");
    }

    #[test]
    fn test_irregular_forms_use_exceptions() {
        let lem = embedded(PosStrategy::Cascade);
        assert_eq!(lem.lemmatize("running"), "run");
        assert_eq!(lem.lemmatize("ate"), "eat");
        assert_eq!(lem.lemmatize("geese"), "goose");
        assert_eq!(lem.lemmatize("leaves"), "leaf");
        assert_eq!(lem.lemmatize("better"), "good");
    }

    #[test]
    fn test_noun_only_leaves_verb_forms() {
        let lem = embedded(PosStrategy::NounOnly);
        assert_eq!(lem.lemmatize("running"), "running");
        assert_eq!(lem.lemmatize("ate"), "ate");
    }

    #[test]
    fn test_regular_verb_forms_in_cascade() {
        let lem = embedded(PosStrategy::Cascade);
        assert_eq!(lem.lemmatize("composting"), "compost");
        assert_eq!(lem.lemmatize("reduced"), "reduce");
        assert_eq!(lem.lemmatize("buying"), "buy");
    }

    #[test]
    fn test_food_vocabulary_plurals() {
        let lem = embedded(PosStrategy::Cascade);
        assert_eq!(lem.lemmatize("sources"), "source");
        assert_eq!(lem.lemmatize("seeds"), "seed");
        assert_eq!(lem.lemmatize("snacks"), "snack");
        assert_eq!(lem.lemmatize("onions"), "onion");
        assert_eq!(lem.lemmatize("tomatoes"), "tomato");
        assert_eq!(lem.lemmatize("eggshells"), "eggshell");
        assert_eq!(lem.lemmatize("shelves"), "shelf");
    }

    #[test]
    fn test_known_noun_is_not_reread_as_verb() {
        let lem = embedded(PosStrategy::Cascade);
        // "seed" would otherwise detach "ed" and land on the verb "see"
        assert_eq!(lem.lemmatize("seed"), "seed");
        assert_eq!(lem.lemmatize("evening"), "evening");
        assert_eq!(lem.lemmatize("wasting"), "waste");
        assert_eq!(lem.lemmatize("freezing"), "freeze");
    }

    #[test]
    fn test_function_words_are_not_mangled() {
        let lem = embedded(PosStrategy::Cascade);
        for word in ["as", "us", "this", "its", "his", "yes", "news", "the", "during"] {
            assert_eq!(lem.lemmatize(word), word);
        }
        assert_eq!(lem.lemmatize("is"), "be");
        assert_eq!(lem.lemmatize("has"), "have");
        assert_eq!(lem.lemmatize("does"), "do");
    }

    #[test]
    fn test_unknown_words_pass_through() {
        let lem = embedded(PosStrategy::Cascade);
        assert_eq!(lem.lemmatize("xyzzy"), "xyzzy");
        assert_eq!(lem.lemmatize("waste"), "waste");
        assert_eq!(lem.lemmatize(""), "");
    }

    #[test]
    fn test_morphy_candidates_filtered_by_lexicon() {
        let mut lexicon = Lexicon::default();
        lexicon.insert_lemma(PartOfSpeech::Noun, "glass");
        let lem = Lemmatizer::new(lexicon, PosStrategy::NounOnly);
        // "glasses" -> "glasse" (s), "glass" (ses); only "glass" is known
        assert_eq!(lem.morphy("glasses", PartOfSpeech::Noun), vec!["glass"]);
        assert!(lem.morphy("glasses", PartOfSpeech::Verb).is_empty());
    }

    #[test]
    fn test_shortest_candidate_wins() {
        let mut lexicon = Lexicon::default();
        lexicon.insert_lemma(PartOfSpeech::Verb, "us");
        lexicon.insert_lemma(PartOfSpeech::Verb, "use");
        let lem = Lemmatizer::new(lexicon, PosStrategy::Cascade);
        // "uses" -> "use" (s), "us" (es); "us" is shorter
        assert_eq!(lem.lemmatize_as("uses", PartOfSpeech::Verb), "us");
    }

    #[test]
    fn test_pos_strategy_parse() {
        assert_eq!("noun".parse::<PosStrategy>().unwrap(), PosStrategy::NounOnly);
        assert_eq!("Cascade".parse::<PosStrategy>().unwrap(), PosStrategy::Cascade);
        assert!("adverbial".parse::<PosStrategy>().is_err());
        assert_eq!(PosStrategy::NounOnly.to_string(), "noun_only");
    }

    #[test]
    fn test_from_wordnet_dir() {
        let dir = tempfile::tempdir().unwrap();
        for pos in PartOfSpeech::ALL {
            let mut index =
                fs::File::create(dir.path().join(format!("index.{}", pos.wordnet_name()))).unwrap();
            writeln!(index, "  1 This software and database is being provided").unwrap();
            match pos {
                PartOfSpeech::Noun => writeln!(index, "tomato n 1 1 @ 1 0 07734017").unwrap(),
                PartOfSpeech::Verb => writeln!(index, "grow v 10 3 @ ~ + 10 5 00230746").unwrap(),
                _ => {}
            }
        }
        fs::write(dir.path().join("noun.exc"), "tomatoes tomato\n").unwrap();
        fs::write(dir.path().join("verb.exc"), "grew grow\ngrown grow\n").unwrap();

        let lexicon = Lexicon::from_wordnet_dir(dir.path()).unwrap();
        assert!(lexicon.contains(PartOfSpeech::Noun, "tomato"));
        assert!(!lexicon.contains(PartOfSpeech::Noun, "1"));

        let lem = Lemmatizer::new(lexicon, PosStrategy::Cascade);
        assert_eq!(lem.lemmatize("tomatoes"), "tomato");
        assert_eq!(lem.lemmatize("grew"), "grow");
    }

    #[test]
    fn test_missing_wordnet_dir_is_unavailable() {
        let err = Lexicon::from_wordnet_dir(Path::new("/nonexistent/wordnet")).unwrap_err();
        assert!(matches!(err, BiofeastError::ResourceUnavailable { .. }));
    }

    #[test]
    fn test_missing_index_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.noun"), "apple n 1 0 1 0 07739125\n").unwrap();
        let err = Lexicon::from_wordnet_dir(dir.path()).unwrap_err();
        assert!(err.to_string().contains("index.verb"));
    }

    #[test]
    fn test_json_lexicon_round() {
        let lexicon = Lexicon::from_json_str(
            r#"{"noun": ["Mouse"], "exceptions": {"noun": {"mice": ["mouse"]}}}"#,
        )
        .unwrap();
        let lem = Lemmatizer::new(lexicon, PosStrategy::NounOnly);
        assert_eq!(lem.lemmatize("mice"), "mouse");
        assert_eq!(lem.lemmatize("mouses"), "mouse");
    }

    #[test]
    fn test_empty_json_lexicon_file_is_unavailable() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{}}").unwrap();
        let err = Lexicon::from_json_path(file.path()).unwrap_err();
        assert!(matches!(err, BiofeastError::ResourceUnavailable { .. }));
    }
}
