//! Request and response types for the OpenAI Chat Completions API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A chat completion request.
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    /// Model to use.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of tokens to generate.
    pub max_tokens: u32,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
}

/// A single message in a chat request.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    /// Message role: "system" or "user".
    pub role: &'static str,
    /// Message content.
    pub content: MessageContent,
}

/// Message content: plain text or multimodal parts.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),
    /// Multimodal content (text plus images).
    Parts(Vec<ContentPart>),
}

/// One part of a multimodal message.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text part.
    Text {
        /// The text.
        text: String,
    },
    /// Image part, as a data URL.
    ImageUrl {
        /// Image reference.
        image_url: ImageUrl,
    },
}

/// Image reference inside a multimodal part.
#[derive(Debug, Serialize)]
pub struct ImageUrl {
    /// URL or data URL of the image.
    pub url: String,
}

/// A chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    /// Generated choices; the API returns at least one on success.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One generated choice.
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The generated message.
    pub message: ResponseMessage,
}

/// The assistant message inside a choice.
#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    /// Message content; absent for pure tool-call responses.
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

/// Assistant message content.
///
/// Normally a plain string, but some gateway deployments return content as
/// an array of typed blocks or a bare object, so all three shapes are
/// accepted.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ResponseContent {
    /// Plain string content.
    Text(String),
    /// Array of content blocks.
    Blocks(Vec<Value>),
    /// Any other JSON shape.
    Other(Value),
}

impl ChatResponse {
    /// Extract the text of the first choice, whatever shape it arrived in.
    ///
    /// Block arrays are joined on their `text` fields; a bare object falls
    /// back to its `text` field, then to its JSON serialization.
    #[must_use]
    pub fn extract_text(&self) -> Option<String> {
        let content = self.choices.first()?.message.content.as_ref()?;

        let text = match content {
            ResponseContent::Text(s) => s.clone(),
            ResponseContent::Blocks(blocks) => blocks
                .iter()
                .filter_map(|b| b.get("text").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(""),
            ResponseContent::Other(value) => value
                .get("text")
                .and_then(Value::as_str)
                .map_or_else(|| value.to_string(), ToOwned::to_owned),
        };

        if text.is_empty() { None } else { Some(text) }
    }
}
