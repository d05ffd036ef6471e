//! The seam between the dispatch helpers and the remote generative service.
//!
//! [`GenerativeBackend`] is the only thing the dispatcher knows about the
//! network. [`GeminiBackend`] talks to Google Gemini; [`MockBackend`] replays
//! scripted replies for tests.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;

use crate::media::InlineImage;
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// One outbound request: a prompt, optional input images, optional JSON schema.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub images: Vec<InlineImage>,
    /// When set, the reply is constrained to JSON matching this schema.
    pub response_schema: Option<serde_json::Value>,
}

impl GenerationRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            images: Vec::new(),
            response_schema: None,
        }
    }

    pub fn with_images(mut self, images: Vec<InlineImage>) -> Self {
        self.images = images;
        self
    }

    pub fn with_response_schema(mut self, schema: serde_json::Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplyPart {
    Text(String),
    Image(InlineImage),
}

/// The parts of the first candidate returned by the service.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationReply {
    pub parts: Vec<ReplyPart>,
}

impl GenerationReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![ReplyPart::Text(text.into())],
        }
    }

    pub fn image(image: InlineImage) -> Self {
        Self {
            parts: vec![ReplyPart::Image(image)],
        }
    }

    /// Concatenation of all text parts, or `None` if there are none.
    pub fn joined_text(&self) -> Option<String> {
        let texts: Vec<&str> = self
            .parts
            .iter()
            .filter_map(|part| match part {
                ReplyPart::Text(text) => Some(text.as_str()),
                ReplyPart::Image(_) => None,
            })
            .collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    pub fn first_image(&self) -> Option<&InlineImage> {
        self.parts.iter().find_map(|part| match part {
            ReplyPart::Image(image) => Some(image),
            ReplyPart::Text(_) => None,
        })
    }
}

/// Failure of the remote call itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),
}

#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<GenerationReply, BackendError>;
}
