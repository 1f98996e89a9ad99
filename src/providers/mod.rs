//! Context providers.
//!
//! A provider hands the agent runtime text and structured values to place in
//! the conversation context, here the welcome line and the topics the
//! catalogue answers.

mod welcome;

pub use welcome::WelcomeProvider;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Where the provider is being asked from.
#[derive(Debug, Clone, Default)]
pub struct ProviderContext {
    /// Conversation room, echoed back in the result data.
    pub room_id: Option<String>,
}

/// What a provider contributes to the context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderResult {
    /// Text for the prompt.
    pub text: String,
    /// Flat values for template substitution.
    pub values: Value,
    /// Everything else, including the catalogue topics.
    pub data: Value,
}

/// Every provider this plugin registers.
pub fn get_providers() -> Vec<WelcomeProvider> {
    vec![WelcomeProvider]
}

/// Looks up a provider by name.
pub fn find_provider(name: &str) -> Option<WelcomeProvider> {
    get_providers().into_iter().find(|provider| provider.name() == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_providers() {
        let providers = get_providers();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name(), "biofeast-welcome");
        assert!(find_provider("biofeast-welcome").is_some());
        assert!(find_provider("eliza-greeting").is_none());
    }
}
