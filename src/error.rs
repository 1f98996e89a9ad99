//! Error types for the BIOFEAST responder.
//!
//! Only loading and collaborator I/O can fail. Matching itself is total: a
//! miss is answered with the fallback response, never with an error.

use thiserror::Error;

/// Result type for BIOFEAST operations.
pub type Result<T> = std::result::Result<T, BiofeastError>;

/// Errors that can occur while building or running the responder.
#[derive(Error, Debug)]
pub enum BiofeastError {
    /// The intent catalogue is missing, malformed or violates its invariants.
    #[error("Failed to load catalogue from {source_name}: {message}")]
    CatalogueLoad {
        /// Where the catalogue was read from.
        source_name: String,
        /// What went wrong.
        message: String,
    },

    /// Language data required by the normalizer could not be found or read.
    #[error("Language resource unavailable ({resource}): {message}")]
    ResourceUnavailable {
        /// The resource that was requested.
        resource: String,
        /// What went wrong.
        message: String,
    },

    /// The conversation log could not be written or read.
    #[error("Chat log error at {path}: {message}")]
    ChatLog {
        /// Path of the log file.
        path: String,
        /// What went wrong.
        message: String,
    },

    /// A configuration value was invalid.
    #[error("Invalid configuration: {message}")]
    Config {
        /// What went wrong.
        message: String,
    },

    /// JSON (de)serialization failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BiofeastError {
    /// Create a catalogue load error.
    pub fn catalogue<S: Into<String>, M: Into<String>>(source_name: S, message: M) -> Self {
        Self::CatalogueLoad {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Create a resource unavailable error.
    pub fn resource<S: Into<String>, M: Into<String>>(resource: S, message: M) -> Self {
        Self::ResourceUnavailable {
            resource: resource.into(),
            message: message.into(),
        }
    }

    /// Create a chat log error.
    pub fn chat_log<S: Into<String>, M: Into<String>>(path: S, message: M) -> Self {
        Self::ChatLog {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether this error must stop the caller from starting.
    pub fn is_fatal_at_startup(&self) -> bool {
        matches!(
            self,
            Self::CatalogueLoad { .. } | Self::ResourceUnavailable { .. } | Self::Config { .. }
        )
    }
}
