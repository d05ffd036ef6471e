//! Error types for the ai-toolbox-core library.
//!
//! Dispatch failures collapse into four variants whose `Display` output is the
//! short, generic message shown to end users. The underlying cause stays
//! attached (as `source` or `detail`) so it can be logged and inspected in
//! tests without ever leaking into the user-facing text.

use crate::backend::BackendError;
use thiserror::Error;

/// Message shown when no API key is configured.
pub const SERVICE_UNAVAILABLE: &str =
    "The AI service is unavailable: no API key is configured.";

/// Default wording for failed text and JSON requests.
pub const GENERIC_FAILURE: &str = "Unable to process your request. Please try again.";

/// Errors that can occur within the ai-toolbox-core library.
#[derive(Error, Debug)]
pub enum AppError {
    /// The API credential is missing. Raised before any network call.
    #[error("{}", SERVICE_UNAVAILABLE)]
    Configuration,

    /// The backend call itself failed.
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: BackendError,
    },

    /// The reply was not valid JSON or did not match the expected shape.
    #[error("{message}")]
    Parse { message: String, detail: String },

    /// The call succeeded but produced no usable text or image.
    #[error("{message}")]
    EmptyResult { message: String },

    /// A configuration value was present but unusable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A tool was invoked with missing or malformed input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Local image decoding or encoding failed.
    #[error("Image processing failed: {0}")]
    Image(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error outside the dispatch path.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an invalid-input error with the given message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an image processing error with the given message.
    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    pub(crate) fn transport(message: &str, source: BackendError) -> Self {
        Self::Transport {
            message: message.to_string(),
            source,
        }
    }

    pub(crate) fn parse(message: &str, detail: impl Into<String>) -> Self {
        Self::Parse {
            message: message.to_string(),
            detail: detail.into(),
        }
    }

    pub(crate) fn empty(message: &str) -> Self {
        Self::EmptyResult {
            message: message.to_string(),
        }
    }

    /// The text to display to an end user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether this error means the service was never contacted because no
    /// credential is configured.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration)
    }
}

/// A convenient alias for Result with [`AppError`].
pub type Result<T> = std::result::Result<T, AppError>;
