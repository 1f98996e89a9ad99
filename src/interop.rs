#![allow(missing_docs)]

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::actions::{find_action, RespondAction};
use crate::providers::{find_provider, ProviderContext, WelcomeProvider};
use crate::{BiofeastConfig, BiofeastPlugin};

pub use crate::actions::ActionResult;
pub use crate::providers::ProviderResult;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    pub name: String,
    pub description: String,
    pub version: String,
    pub language: String,
    pub interop_protocols: Vec<String>,
    pub actions: Vec<ActionManifest>,
    pub providers: Vec<ProviderManifest>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionManifest {
    pub name: String,
    pub description: String,
    pub similes: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderManifest {
    pub name: String,
    pub description: String,
}

impl Default for PluginManifest {
    fn default() -> Self {
        let action = RespondAction;
        let provider = WelcomeProvider;
        Self {
            name: "biofeast".to_string(),
            description: "Sustainable food practices chatbot - lemmatized intent matching, no LLM required"
                .to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            language: "rust".to_string(),
            interop_protocols: vec!["ipc".to_string()],
            actions: vec![ActionManifest {
                name: action.name().to_string(),
                description: action.description().to_string(),
                similes: action.similes().into_iter().map(str::to_string).collect(),
            }],
            providers: vec![ProviderManifest {
                name: provider.name().to_string(),
                description: provider.description().to_string(),
            }],
        }
    }
}

lazy_static::lazy_static! {
    static ref PLUGIN_INSTANCE: Mutex<Arc<BiofeastPlugin>> = Mutex::new(Arc::new(BiofeastPlugin::new()));
}

fn plugin() -> Result<Arc<BiofeastPlugin>, String> {
    PLUGIN_INSTANCE
        .lock()
        .map(|guard| Arc::clone(&guard))
        .map_err(|e| e.to_string())
}

pub fn get_manifest_json() -> String {
    serde_json::to_string(&PluginManifest::default())
        .unwrap_or_else(|e| format!(r#"{{"error": "{}"}}"#, e))
}

/// Rebuilds the shared responder from a JSON-encoded [`BiofeastConfig`].
///
/// An empty or `{}` config keeps the current instance.
pub fn init_plugin(config_json: &str) -> Result<(), String> {
    let trimmed = config_json.trim();
    if trimmed.is_empty() || trimmed == "null" || trimmed == "{}" {
        return Ok(());
    }
    let config: BiofeastConfig = serde_json::from_str(trimmed).map_err(|e| e.to_string())?;
    init_with_config(&config).map_err(|e| e.to_string())
}

/// Rebuilds the shared responder from `config`.
pub fn init_with_config(config: &BiofeastConfig) -> crate::Result<()> {
    let rebuilt = BiofeastPlugin::from_config(config)?;
    let intents = rebuilt.catalogue().len();
    match PLUGIN_INSTANCE.lock() {
        Ok(mut instance) => *instance = Arc::new(rebuilt),
        Err(poisoned) => *poisoned.into_inner() = Arc::new(rebuilt),
    }
    tracing::info!(intents, "Plugin initialized");
    Ok(())
}

pub fn validate_action(name: &str) -> bool {
    find_action(name).is_some()
}

pub fn invoke_action(name: &str, memory_json: &str, options_json: &str) -> ActionResult {
    let action = match find_action(name) {
        Some(action) => action,
        None => return ActionResult::failure(format!("Unknown action: {}", name)),
    };
    let input = extract_user_input(memory_json, options_json);
    match plugin() {
        Ok(instance) => action.handle_with(&instance, &input),
        Err(e) => ActionResult::failure(e),
    }
}

/// Runs the named provider against the shared responder's catalogue.
pub fn get_provider(name: &str, room_id: Option<String>) -> Option<ProviderResult> {
    let provider = find_provider(name)?;
    let context = ProviderContext { room_id };
    Some(match plugin() {
        Ok(instance) => provider.get_for(&context, instance.catalogue()),
        Err(_) => provider.get(&context),
    })
}

fn extract_user_input(memory_json: &str, options_json: &str) -> String {
    if let Ok(options) = serde_json::from_str::<Value>(options_json) {
        for key in ["input", "prompt", "text"] {
            if let Some(input) = options.get(key).and_then(|v| v.as_str()) {
                return input.to_string();
            }
        }
    }

    if let Ok(memory) = serde_json::from_str::<Value>(memory_json) {
        if let Some(text) = memory.pointer("/content/text").and_then(|v| v.as_str()) {
            return text.to_string();
        }
    }

    String::new()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcRequest {
    pub id: u64,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpcResponse {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IpcResponse {
    pub fn success(id: u64, result: Value) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: u64, error: &str) -> Self {
        Self {
            id,
            result: None,
            error: Some(error.to_string()),
        }
    }

    fn from_serializable<T: Serialize>(id: u64, value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Self::success(id, v),
            Err(e) => Self::error(id, &e.to_string()),
        }
    }
}

fn str_param<'a>(params: &'a Value, key: &str) -> &'a str {
    params.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn json_param(params: &Value, key: &str, default: &str) -> String {
    params
        .get(key)
        .map(|v| v.to_string())
        .unwrap_or_else(|| default.to_string())
}

pub fn handle_ipc_request(request: &IpcRequest) -> IpcResponse {
    let params = &request.params;
    match request.method.as_str() {
        "getManifest" => IpcResponse::from_serializable(request.id, &PluginManifest::default()),
        "init" => match init_plugin(&json_param(params, "config", "{}")) {
            Ok(()) => IpcResponse::success(request.id, serde_json::json!({"initialized": true})),
            Err(e) => IpcResponse::error(request.id, &e),
        },
        "getGreeting" => {
            IpcResponse::success(request.id, serde_json::json!({"greeting": crate::get_greeting()}))
        }
        "respond" => match plugin() {
            Ok(instance) => {
                let (response, found) = instance.respond_with_match(str_param(params, "input"));
                IpcResponse::success(
                    request.id,
                    serde_json::json!({"response": response, "matched": found.is_some()}),
                )
            }
            Err(e) => IpcResponse::error(request.id, &e),
        },
        "normalize" => match plugin() {
            Ok(instance) => {
                let mut tokens: Vec<String> =
                    instance.normalize(str_param(params, "text")).into_iter().collect();
                tokens.sort();
                IpcResponse::success(request.id, serde_json::json!({"tokens": tokens}))
            }
            Err(e) => IpcResponse::error(request.id, &e),
        },
        "match" => match plugin() {
            Ok(instance) => match instance.best_match(str_param(params, "input")) {
                Some(found) => IpcResponse::success(
                    request.id,
                    serde_json::json!({"tag": found.tag, "overlap": found.overlap}),
                ),
                None => IpcResponse::success(request.id, Value::Null),
            },
            Err(e) => IpcResponse::error(request.id, &e),
        },
        "validateAction" => {
            let valid = validate_action(str_param(params, "name"));
            IpcResponse::success(request.id, serde_json::json!({"valid": valid}))
        }
        "invokeAction" => {
            let result = invoke_action(
                str_param(params, "name"),
                &json_param(params, "memory", ""),
                &json_param(params, "options", "{}"),
            );
            IpcResponse::from_serializable(request.id, &result)
        }
        "getProvider" => {
            let room_id = params
                .get("roomId")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let name = str_param(params, "name");
            match get_provider(name, room_id) {
                Some(result) => IpcResponse::from_serializable(request.id, &result),
                None => IpcResponse::error(request.id, &format!("Unknown provider: {}", name)),
            }
        }
        _ => IpcResponse::error(request.id, &format!("Unknown method: {}", request.method)),
    }
}
