//! Content-generation pipelines and the provider seam they run against.
//!
//! Pipelines are pure prompt builders plus output normalization. They talk
//! to the upstream model through the [`TextCompletion`] and
//! [`VisionCompletion`] traits, so tests can substitute a scripted fake and
//! the production wiring can hand in the OpenAI client.

pub mod pipelines;
pub mod vision;

use shelftalk_core::{Marketplace, SocialChannel, Tone};

/// Error surfaced by a completion provider.
///
/// Pipelines never need to distinguish provider failure modes; retry and
/// backoff policy is the caller's concern, so this is deliberately opaque.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The provider rejected or failed the request.
    #[error("completion provider error: {0}")]
    Provider(String),
}

/// Sampling parameters for a single completion call.
#[derive(Debug, Clone, Copy)]
pub struct CompletionParams {
    /// Sampling temperature, pipeline-specific.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl CompletionParams {
    /// Default token ceiling; generous enough for every pipeline.
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;

    /// Parameters with the given temperature and the default token ceiling.
    #[must_use]
    pub const fn new(temperature: f32) -> Self {
        Self {
            temperature,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

/// Text completion against a chat model.
pub trait TextCompletion: Send + Sync {
    /// Run a system + user prompt pair and return the model's text reply.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] if the provider call fails.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: CompletionParams,
    ) -> Result<String, CompletionError>;
}

/// Vision-capable completion: a prompt plus an inline image.
pub trait VisionCompletion: Send + Sync {
    /// Analyze an image under the given prompt and return the text reply.
    ///
    /// # Errors
    ///
    /// Returns [`CompletionError`] if the provider call fails.
    async fn analyze(
        &self,
        prompt: &str,
        image: &[u8],
        mime_type: &str,
        params: CompletionParams,
    ) -> Result<String, CompletionError>;
}

/// Product facts every pipeline starts from.
#[derive(Debug, Clone)]
pub struct ProductInput {
    /// Product name.
    pub name: String,
    /// Free-form description, possibly enriched with vision analysis.
    pub description: Option<String>,
}

/// Inputs for the SEO title pipeline.
#[derive(Debug, Clone)]
pub struct TitleInput {
    /// Product facts.
    pub product: ProductInput,
    /// Maximum title length in characters.
    pub max_length: usize,
    /// Marketplace the title is aimed at.
    pub marketplace: Marketplace,
}

/// Inputs for the tag extraction pipeline.
#[derive(Debug, Clone)]
pub struct TagsInput {
    /// Product facts.
    pub product: ProductInput,
    /// Maximum number of tags to request.
    pub max_tags: usize,
}

/// Inputs for a single social-post variant.
#[derive(Debug, Clone)]
pub struct SocialPostInput {
    /// Product facts.
    pub product: ProductInput,
    /// Target network.
    pub channel: SocialChannel,
    /// Requested voice.
    pub tone: Tone,
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{CompletionError, CompletionParams, TextCompletion};

    /// Fake text provider that echoes the prompts it was called with.
    pub struct EchoCompletion;

    impl TextCompletion for EchoCompletion {
        async fn complete(
            &self,
            system: &str,
            user: &str,
            _params: CompletionParams,
        ) -> Result<String, CompletionError> {
            Ok(format!("system: {system}\nuser: {user}"))
        }
    }

    /// Fake text provider that returns a canned reply.
    pub struct CannedCompletion(pub &'static str);

    impl TextCompletion for CannedCompletion {
        async fn complete(
            &self,
            _system: &str,
            _user: &str,
            _params: CompletionParams,
        ) -> Result<String, CompletionError> {
            Ok(self.0.to_string())
        }
    }
}
