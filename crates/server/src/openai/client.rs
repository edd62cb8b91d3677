//! OpenAI API client for chat completions.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::ai::{CompletionError, CompletionParams, TextCompletion, VisionCompletion};
use crate::config::OpenAiConfig;

use super::error::{ApiErrorResponse, OpenAiError};
use super::types::{
    ChatMessage, ChatRequest, ChatResponse, ContentPart, ImageUrl, MessageContent,
};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client.
///
/// Cheap to clone; the underlying HTTP client and model name are shared.
#[derive(Clone)]
pub struct OpenAiClient {
    inner: Arc<OpenAiClientInner>,
}

struct OpenAiClientInner {
    client: reqwest::Client,
    model: String,
}

impl OpenAiClient {
    /// Create a new OpenAI client.
    ///
    /// # Panics
    ///
    /// Panics if the API key contains invalid header characters.
    #[must_use]
    pub fn new(config: &OpenAiConfig) -> Self {
        let api_key = config.api_key.expose_secret();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {api_key}"))
                .expect("Invalid API key for header"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            inner: Arc::new(OpenAiClientInner {
                client,
                model: config.model.clone(),
            }),
        }
    }

    /// Send a chat request and return the model's text reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, returns an error response,
    /// or the reply contains no text.
    #[instrument(skip(self, messages), fields(model = %self.inner.model))]
    async fn chat(
        &self,
        messages: Vec<ChatMessage>,
        params: CompletionParams,
    ) -> Result<String, OpenAiError> {
        let request = ChatRequest {
            model: self.inner.model.clone(),
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            messages,
        };

        let response = self
            .inner
            .client
            .post(OPENAI_API_URL)
            .json(&request)
            .send()
            .await?;

        let response = self.handle_response(response).await?;
        response.extract_text().ok_or(OpenAiError::EmptyResponse)
    }

    /// Handle a successful response.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ChatResponse, OpenAiError> {
        let status = response.status();

        if status.is_success() {
            let body = response.text().await?;
            serde_json::from_str(&body)
                .map_err(|e| OpenAiError::Parse(format!("Failed to parse response: {e}")))
        } else {
            Err(self.handle_error_status(status, response).await)
        }
    }

    /// Handle an error status code.
    async fn handle_error_status(
        &self,
        status: reqwest::StatusCode,
        response: reqwest::Response,
    ) -> OpenAiError {
        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return OpenAiError::RateLimited(retry_after);
        }

        // Check for unauthorized
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return OpenAiError::Unauthorized("Invalid API key".to_string());
        }

        // Try to parse API error response
        match response.text().await {
            Ok(body) => {
                if let Ok(api_error) = serde_json::from_str::<ApiErrorResponse>(&body) {
                    OpenAiError::Api {
                        error_type: api_error.error.error_type,
                        message: api_error.error.message,
                    }
                } else {
                    OpenAiError::Api {
                        error_type: "unknown".to_string(),
                        message: body,
                    }
                }
            }
            Err(e) => OpenAiError::Http(e),
        }
    }
}

impl From<OpenAiError> for CompletionError {
    fn from(err: OpenAiError) -> Self {
        Self::Provider(err.to_string())
    }
}

impl TextCompletion for OpenAiClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: CompletionParams,
    ) -> Result<String, CompletionError> {
        let messages = vec![
            ChatMessage {
                role: "system",
                content: MessageContent::Text(system.to_string()),
            },
            ChatMessage {
                role: "user",
                content: MessageContent::Text(user.to_string()),
            },
        ];

        Ok(self.chat(messages, params).await?)
    }
}

impl VisionCompletion for OpenAiClient {
    async fn analyze(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
        params: CompletionParams,
    ) -> Result<String, CompletionError> {
        let encoded = BASE64.encode(image);
        let messages = vec![ChatMessage {
            role: "user",
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: format!("data:{mime_type};base64,{encoded}"),
                    },
                },
            ]),
        }];

        Ok(self.chat(messages, params).await?)
    }
}
