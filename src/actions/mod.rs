//! Host-invocable actions.
//!
//! An action turns a message into a reply. Results are serialisable so the
//! IPC server can hand them back to the agent runtime unchanged.

mod respond;

pub use respond::RespondAction;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::IntentMatch;

/// Outcome of running an action.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResult {
    /// Whether the action produced a reply.
    pub success: bool,
    /// Reply text shown to the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Why the action failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Match details: `matched`, plus `tag` and `overlap` when an intent won.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ActionResult {
    /// A reply, annotated with the intent that produced it.
    pub fn answered(response: String, found: Option<&IntentMatch>) -> Self {
        let data = match found {
            Some(found) => serde_json::json!({
                "matched": true,
                "tag": found.tag,
                "overlap": found.overlap,
            }),
            None => serde_json::json!({ "matched": false }),
        };
        Self {
            success: true,
            text: Some(response),
            error: None,
            data: Some(data),
        }
    }

    /// A failed invocation.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Whether an intent (rather than the fallback) produced the reply.
    pub fn matched(&self) -> bool {
        self.data
            .as_ref()
            .and_then(|d| d.get("matched"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// A sample exchange, used in manifests and docs.
#[derive(Debug, Clone)]
pub struct ActionExample {
    /// What the user says.
    pub input: String,
    /// A reply the catalogue can give.
    pub output: String,
}

/// Every action this plugin registers.
pub fn get_actions() -> Vec<RespondAction> {
    vec![RespondAction]
}

/// Looks up an action by name.
pub fn find_action(name: &str) -> Option<RespondAction> {
    get_actions().into_iter().find(|action| action.name() == name)
}
