//! Respond action
//!
//! Answers a sustainable-food question from the intent catalogue.

use super::{ActionExample, ActionResult};
use crate::BiofeastPlugin;

/// Action that answers user input with a catalogue response.
pub struct RespondAction;

impl RespondAction {
    /// Returns the action name.
    pub fn name(&self) -> &'static str {
        "respond"
    }

    /// Returns action aliases.
    pub fn similes(&self) -> Vec<&'static str> {
        vec!["CHAT", "ASK_BIOFEAST", "SUSTAINABLE_FOOD_HELP"]
    }

    /// Returns the action description.
    pub fn description(&self) -> &'static str {
        "Answer a question about sustainable food practices by matching it against the BIOFEAST intent catalogue."
    }

    /// Validates whether this action should handle the message.
    pub fn validate(&self, _message_text: &str) -> bool {
        true
    }

    /// Answers with the shared responder.
    pub fn handler(&self, user_input: &str) -> ActionResult {
        self.handle_with(crate::default_plugin(), user_input)
    }

    /// Answers with a caller-provided responder.
    pub fn handle_with(&self, plugin: &BiofeastPlugin, user_input: &str) -> ActionResult {
        if user_input.trim().is_empty() {
            return ActionResult {
                text: Some(
                    "Please type a question about food and I'll do my best to help.".to_string(),
                ),
                ..ActionResult::failure("No user input provided")
            };
        }
        let (response, found) = plugin.respond_with_match(user_input);
        ActionResult::answered(response, found.as_ref())
    }

    /// Returns action examples.
    pub fn examples(&self) -> Vec<ActionExample> {
        vec![
            ActionExample {
                input: "How can I reduce food waste at home?".to_string(),
                output: "Plan your meals, buy only what you need and eat leftovers first."
                    .to_string(),
            },
            ActionExample {
                input: "What can I put in compost?".to_string(),
                output: "Fruit and vegetable peels, coffee grounds, tea leaves and eggshells are great for compost."
                    .to_string(),
            },
        ]
    }
}
