//! The three leaf helpers every tool is built on: text, structured JSON, image.
//!
//! Each helper checks the credential, sends exactly one request through the
//! injected backend, and turns whatever comes back into either a typed value
//! or one of the four dispatch errors. The `failure` argument is the wording
//! the end user sees if anything goes wrong at that call site.

use crate::backend::{BackendError, GenerationReply, GenerationRequest, GenerativeBackend};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::media::InlineImage;
use crate::schema::StructuredOutput;
use std::sync::Arc;

pub struct Dispatcher {
    config: Config,
    backend: Arc<dyn GenerativeBackend>,
}

impl Dispatcher {
    pub fn new(config: Config, backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sends `prompt` to the text model and returns the reply text untouched.
    ///
    /// # Errors
    ///
    /// - [`AppError::Configuration`] if no API key is set (nothing is sent).
    /// - [`AppError::Transport`] if the backend call fails or times out.
    /// - [`AppError::EmptyResult`] if the reply has no non-blank text.
    pub async fn generate_text(&self, prompt: String, failure: &str) -> Result<String> {
        let request = GenerationRequest::new(self.config.text_model.clone(), prompt);
        let reply = self.send("text", request, failure).await?;

        match reply.joined_text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => {
                log::warn!("text reply from {} was empty", self.config.text_model);
                Err(AppError::empty(failure))
            }
        }
    }

    /// Sends `prompt` with `T`'s schema and returns the reply parsed as `T`.
    ///
    /// The reply must be valid JSON, must satisfy the schema, and must
    /// deserialize into `T`; otherwise nothing is returned.
    ///
    /// # Errors
    ///
    /// - [`AppError::Configuration`] if no API key is set (nothing is sent).
    /// - [`AppError::Transport`] if the backend call fails or times out.
    /// - [`AppError::EmptyResult`] if the reply has no text at all.
    /// - [`AppError::Parse`] for invalid JSON or a schema mismatch.
    pub async fn generate_json<T: StructuredOutput>(&self, prompt: String, failure: &str) -> Result<T> {
        let schema = T::schema();
        let request = GenerationRequest::new(self.config.text_model.clone(), prompt)
            .with_response_schema(schema.to_json());
        let reply = self.send("json", request, failure).await?;

        let text = match reply.joined_text() {
            Some(text) if !text.trim().is_empty() => text,
            _ => {
                log::warn!("json reply from {} was empty", self.config.text_model);
                return Err(AppError::empty(failure));
            }
        };

        let value: serde_json::Value = serde_json::from_str(strip_code_fence(&text)).map_err(|e| {
            log::warn!("json reply did not parse: {}", e);
            AppError::parse(failure, e.to_string())
        })?;

        schema.validate(&value).map_err(|violation| {
            log::warn!("json reply did not match schema {}", violation);
            AppError::parse(failure, violation.to_string())
        })?;

        serde_json::from_value(value).map_err(|e| {
            log::warn!("json reply did not deserialize: {}", e);
            AppError::parse(failure, e.to_string())
        })
    }

    /// Sends `prompt` and up to two input images to the image model and
    /// returns the first image in the reply.
    ///
    /// # Errors
    ///
    /// - [`AppError::Configuration`] if no API key is set (nothing is sent).
    /// - [`AppError::Transport`] if the backend call fails or times out.
    /// - [`AppError::EmptyResult`] if the reply contains no image part.
    pub async fn generate_image(&self, prompt: String, images: &[InlineImage], failure: &str) -> Result<InlineImage> {
        let request = GenerationRequest::new(self.config.image_model.clone(), prompt)
            .with_images(images.to_vec());
        let reply = self.send("image", request, failure).await?;

        match reply.first_image() {
            Some(image) => Ok(image.clone()),
            None => {
                log::warn!("reply from {} contained no image part", self.config.image_model);
                Err(AppError::empty(failure))
            }
        }
    }

    async fn send(&self, helper: &str, request: GenerationRequest, failure: &str) -> Result<GenerationReply> {
        if self.config.api_key.is_none() {
            log::error!("{} request rejected: no API key configured", helper);
            return Err(AppError::Configuration);
        }

        log::debug!(
            "dispatching {} request to {} (prompt {} chars, {} images)",
            helper,
            request.model,
            request.prompt.len(),
            request.images.len()
        );

        let call = self.backend.generate(request);
        let outcome = match self.config.request_timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(outcome) => outcome,
                Err(_) => Err(BackendError::Timeout(limit)),
            },
            None => call.await,
        };

        outcome.map_err(|cause| {
            log::warn!("{} request failed: {}", helper, cause);
            AppError::transport(failure, cause)
        })
    }
}

/// Strips surrounding whitespace and a Markdown code fence, if any.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(inner) = inner.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line
    match inner.split_once('\n') {
        Some((_, body)) => body.trim(),
        None => {
            let inner = inner.trim();
            inner.strip_prefix("json").map_or(inner, str::trim_start)
        }
    }
}
