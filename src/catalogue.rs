//! The intent catalogue.
//!
//! An ordered list of intents, each with example patterns and candidate
//! responses. The catalogue is validated once at load and is read-only
//! afterwards.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BiofeastError, Result};

/// A labelled group of example phrases and candidate replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Intent label. Derived from the position when the resource omits it.
    #[serde(default)]
    pub tag: String,
    /// Example phrases, in scan order.
    pub patterns: Vec<String>,
    /// Candidate replies.
    pub responses: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogueFile {
    intents: Vec<Intent>,
}

/// Ordered, validated sequence of intents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalogue {
    intents: Vec<Intent>,
}

impl Catalogue {
    /// The sustainable-food catalogue compiled into the crate.
    pub fn embedded() -> Result<Self> {
        let raw = include_str!("../data/intents.json");
        Self::from_json_str(raw, "embedded catalogue")
    }

    /// Parses and validates a catalogue. `source_name` is used in errors.
    pub fn from_json_str(raw: &str, source_name: &str) -> Result<Self> {
        let file: CatalogueFile = serde_json::from_str(raw)
            .map_err(|e| BiofeastError::catalogue(source_name, e.to_string()))?;
        Self::from_intents(file.intents, source_name)
    }

    /// Reads a catalogue JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source_name = path.display().to_string();
        let raw = fs::read_to_string(path)
            .map_err(|e| BiofeastError::catalogue(&source_name, e.to_string()))?;
        let catalogue = Self::from_json_str(&raw, &source_name)?;
        tracing::info!(path = %source_name, intents = catalogue.len(), "Loaded catalogue");
        Ok(catalogue)
    }

    /// Builds a catalogue from intents already in memory.
    pub fn from_intents(mut intents: Vec<Intent>, source_name: &str) -> Result<Self> {
        if intents.is_empty() {
            return Err(BiofeastError::catalogue(source_name, "catalogue has no intents"));
        }

        for (index, intent) in intents.iter_mut().enumerate() {
            if intent.tag.trim().is_empty() {
                intent.tag = format!("intent-{index}");
            }
            if intent.patterns.is_empty() {
                return Err(BiofeastError::catalogue(
                    source_name,
                    format!("intent `{}` has no patterns", intent.tag),
                ));
            }
            if intent.responses.is_empty() {
                return Err(BiofeastError::catalogue(
                    source_name,
                    format!("intent `{}` has no responses", intent.tag),
                ));
            }
        }

        Ok(Self { intents })
    }

    /// Intents in catalogue order.
    pub fn intents(&self) -> &[Intent] {
        &self.intents
    }

    /// Looks up an intent by tag.
    pub fn get(&self, tag: &str) -> Option<&Intent> {
        self.intents.iter().find(|i| i.tag == tag)
    }

    /// Number of intents.
    pub fn len(&self) -> usize {
        self.intents.len()
    }

    /// Always false for a loaded catalogue.
    pub fn is_empty(&self) -> bool {
        self.intents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::io::Write;

    #[test]
    fn test_embedded_catalogue_integrity() {
        let catalogue = Catalogue::embedded().unwrap();
        assert!(!catalogue.is_empty());
        for intent in catalogue.intents() {
            assert!(!intent.patterns.is_empty(), "{}", intent.tag);
            assert!(!intent.responses.is_empty(), "{}", intent.tag);
        }
    }

    #[test]
    fn test_embedded_tags_are_unique() {
        let catalogue = Catalogue::embedded().unwrap();
        let mut seen = HashSet::new();
        let dupes: Vec<&str> = catalogue
            .intents()
            .iter()
            .map(|i| i.tag.as_str())
            .filter(|t| !seen.insert(*t))
            .collect();
        assert!(dupes.is_empty(), "duplicate tags: {:?}", dupes);
    }

    #[test]
    fn test_missing_tag_is_derived_and_extra_fields_ignored() {
        let catalogue = Catalogue::from_json_str(
            r#"{"intents": [
                {"patterns": ["hi"], "responses": ["hello"], "context": [""]},
                {"tag": "bye", "patterns": ["bye"], "responses": ["see you"]}
            ]}"#,
            "inline",
        )
        .unwrap();
        assert_eq!(catalogue.intents()[0].tag, "intent-0");
        assert_eq!(catalogue.get("bye").unwrap().responses, vec!["see you"]);
    }

    #[test]
    fn test_empty_patterns_fail_fast() {
        let err = Catalogue::from_json_str(
            r#"{"intents": [{"tag": "x", "patterns": [], "responses": ["r"]}]}"#,
            "inline",
        )
        .unwrap_err();
        assert!(matches!(err, BiofeastError::CatalogueLoad { .. }));
        assert!(err.to_string().contains("no patterns"));
    }

    #[test]
    fn test_empty_responses_fail_fast() {
        let err = Catalogue::from_json_str(
            r#"{"intents": [{"tag": "x", "patterns": ["p"], "responses": []}]}"#,
            "inline",
        )
        .unwrap_err();
        assert!(err.to_string().contains("no responses"));
    }

    #[test]
    fn test_malformed_shape_is_catalogue_error() {
        for raw in [r#"{"intents": 3}"#, r#"{"nothing": []}"#, "not json", r#"{"intents": []}"#] {
            let err = Catalogue::from_json_str(raw, "inline").unwrap_err();
            assert!(matches!(err, BiofeastError::CatalogueLoad { .. }), "{raw}");
        }
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"intents": [{{"tag": "t", "patterns": ["p"], "responses": ["r"]}}]}}"#
        )
        .unwrap();
        let catalogue = Catalogue::from_path(file.path()).unwrap();
        assert_eq!(catalogue.len(), 1);

        let err = Catalogue::from_path(Path::new("/nonexistent/intents.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/intents.json"));
    }
}
