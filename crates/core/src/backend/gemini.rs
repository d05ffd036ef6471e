use super::{BackendError, GenerationReply, GenerationRequest, GenerativeBackend, ReplyPart};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::media::InlineImage;
use async_trait::async_trait;
use gemini_rust::{Blob, Content, Gemini, GenerationResponse, Message, Part, Role};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/";

/// Google Gemini over `gemini-rust`.
///
/// The SDK binds a client to one model, so one handle is built per model name
/// on first use and reused for every later request to that model.
pub struct GeminiBackend {
    api_key: String,
    base_url: url::Url,
    clients: Mutex<HashMap<String, Arc<Gemini>>>,
}

impl GeminiBackend {
    pub fn new(config: &Config) -> Result<Self> {
        // Explicit base URL avoids the SDK's BadScheme error
        let base_url = url::Url::parse(BASE_URL)
            .map_err(|e| AppError::config(format!("Invalid base URL: {}", e)))?;

        Ok(Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            base_url,
            clients: Mutex::new(HashMap::new()),
        })
    }

    fn client_for(&self, model: &str) -> std::result::Result<Arc<Gemini>, BackendError> {
        let mut clients = self
            .clients
            .lock()
            .map_err(|_| BackendError::Request("Gemini client cache poisoned".to_string()))?;

        if let Some(client) = clients.get(model) {
            return Ok(Arc::clone(client));
        }

        let model_url = format!("{}{}", self.base_url, qualified_model_name(model));
        let client = Gemini::with_model_and_base_url(&self.api_key, model_url, self.base_url.clone())
            .map_err(|e| BackendError::Request(format!("Failed to create Gemini client: {}", e)))?;
        let client = Arc::new(client);

        log::debug!("created Gemini client for {}", model);
        clients.insert(model.to_string(), Arc::clone(&client));
        Ok(client)
    }
}

fn qualified_model_name(model: &str) -> String {
    if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{}", model)
    }
}

/// Images first, then the instruction text.
fn build_message(prompt: String, images: Vec<InlineImage>) -> Message {
    let mut parts: Vec<Part> = images
        .into_iter()
        .map(|image| Part::InlineData {
            inline_data: Blob {
                mime_type: image.mime_type,
                data: image.data,
            },
            media_resolution: None,
        })
        .collect();

    parts.push(Part::Text {
        text: prompt,
        thought: None,
        thought_signature: None,
    });

    let content = Content {
        role: Some(Role::User),
        parts: Some(parts),
    };

    Message {
        role: Role::User,
        content,
    }
}

/// Text and image parts of the first candidate, in order. Thought summaries are dropped.
fn reply_from_response(response: &GenerationResponse) -> GenerationReply {
    let mut reply = GenerationReply::default();
    let Some(parts) = response
        .candidates
        .first()
        .and_then(|candidate| candidate.content.parts.as_ref())
    else {
        return reply;
    };

    for part in parts {
        match part {
            Part::Text { text, thought, .. } => {
                if !thought.unwrap_or(false) {
                    reply.parts.push(ReplyPart::Text(text.clone()));
                }
            }
            Part::InlineData { inline_data, .. } => {
                reply.parts.push(ReplyPart::Image(InlineImage::new(
                    inline_data.mime_type.clone(),
                    inline_data.data.clone(),
                )));
            }
            _ => {}
        }
    }
    reply
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, request: GenerationRequest) -> std::result::Result<GenerationReply, BackendError> {
        let client = self.client_for(&request.model)?;
        let message = build_message(request.prompt, request.images);

        let mut builder = client.generate_content().with_messages(vec![message]);
        if let Some(schema) = request.response_schema {
            builder = builder
                .with_response_mime_type("application/json")
                .with_response_schema(schema);
        }

        let response = builder
            .execute()
            .await
            .map_err(|e| BackendError::Request(format!("{:?}", e)))?;

        Ok(reply_from_response(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_names_are_qualified_once() {
        assert_eq!(qualified_model_name("gemini-2.5-flash"), "models/gemini-2.5-flash");
        assert_eq!(qualified_model_name("models/gemini-2.5-flash"), "models/gemini-2.5-flash");
    }

    #[test]
    fn images_precede_prompt() {
        let message = build_message(
            "swap them".to_string(),
            vec![
                InlineImage::new("image/png", "AAAA"),
                InlineImage::new("image/jpeg", "BBBB"),
            ],
        );
        let parts = message.content.parts.expect("parts");
        assert_eq!(parts.len(), 3);
        assert!(matches!(&parts[0], Part::InlineData { inline_data, .. } if inline_data.data == "AAAA"));
        assert!(matches!(&parts[1], Part::InlineData { inline_data, .. } if inline_data.mime_type == "image/jpeg"));
        assert!(matches!(&parts[2], Part::Text { text, .. } if text == "swap them"));
    }

    fn response(body: serde_json::Value) -> GenerationResponse {
        serde_json::from_value(body).expect("valid response")
    }

    #[test]
    fn reply_keeps_text_and_images_in_order_without_thoughts() {
        let reply = reply_from_response(&response(serde_json::json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "planning the swap", "thought": true },
                        { "text": "Here you go" },
                        { "inlineData": { "mimeType": "image/png", "data": "AAAA" } }
                    ]
                }
            }]
        })));

        assert_eq!(
            reply.parts,
            vec![
                ReplyPart::Text("Here you go".to_string()),
                ReplyPart::Image(InlineImage::new("image/png", "AAAA")),
            ]
        );
    }

    #[test]
    fn reply_without_candidates_is_empty() {
        let reply = reply_from_response(&response(serde_json::json!({ "candidates": [] })));
        assert!(reply.parts.is_empty());
    }
}
