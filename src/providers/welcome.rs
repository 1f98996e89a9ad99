//! Welcome provider
//!
//! Supplies the welcome line, the about text and the topics the catalogue
//! covers.

use super::{ProviderContext, ProviderResult};
use crate::{get_greeting, Catalogue, ABOUT_TEXT};

/// Provider for the BIOFEAST welcome message.
pub struct WelcomeProvider;

impl WelcomeProvider {
    /// Returns the provider name.
    pub fn name(&self) -> &'static str {
        "biofeast-welcome"
    }

    /// Returns the provider description.
    pub fn description(&self) -> &'static str {
        "Provides the BIOFEAST welcome message and the topics it can answer."
    }

    /// Gets the provider data for the embedded catalogue.
    pub fn get(&self, context: &ProviderContext) -> ProviderResult {
        let topics = Catalogue::embedded()
            .map(|c| topics_of(&c))
            .unwrap_or_default();
        self.build(context, topics)
    }

    /// Gets the provider data for a specific catalogue.
    pub fn get_for(&self, context: &ProviderContext, catalogue: &Catalogue) -> ProviderResult {
        self.build(context, topics_of(catalogue))
    }

    fn build(&self, context: &ProviderContext, topics: Vec<String>) -> ProviderResult {
        let greeting = get_greeting();

        ProviderResult {
            text: greeting.clone(),
            values: serde_json::json!({
                "greeting": greeting,
                "about": ABOUT_TEXT,
            }),
            data: serde_json::json!({
                "greeting": greeting,
                "about": ABOUT_TEXT,
                "topics": topics,
                "roomId": context.room_id,
            }),
        }
    }
}

fn topics_of(catalogue: &Catalogue) -> Vec<String> {
    catalogue.intents().iter().map(|i| i.tag.clone()).collect()
}
