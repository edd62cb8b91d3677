//! Integration tests for ShelfTalk AI.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shelftalk-integration-tests
//! ```
//!
//! These tests drive the generation pipelines end to end against
//! [`FakeBackend`], a scripted provider that stands in for the OpenAI
//! client. No network access or database is required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Mutex, PoisonError};

use shelftalk_server::ai::{CompletionError, CompletionParams, TextCompletion, VisionCompletion};

/// Scripted completion provider for tests.
///
/// Text calls echo the user prompt back (so tests can assert on prompt
/// interpolation) unless a canned reply is configured. Calls whose prompt
/// contains `fail_when_prompt_contains` fail with a provider error, which
/// lets tests fault a single pipeline inside a fan-out.
pub struct FakeBackend {
    /// Canned text reply; `None` echoes the user prompt.
    pub text_reply: Option<&'static str>,
    /// Fail any text call whose system or user prompt contains this marker.
    pub fail_when_prompt_contains: Option<&'static str>,
    /// Vision reply, or a provider error message.
    pub vision_reply: Result<&'static str, &'static str>,
    /// User prompts of every text call, in completion order.
    pub calls: Mutex<Vec<String>>,
}

impl FakeBackend {
    /// A backend that echoes every text prompt and fails vision calls.
    #[must_use]
    pub fn echo() -> Self {
        Self {
            text_reply: None,
            fail_when_prompt_contains: None,
            vision_reply: Err("no vision scripted"),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// An echoing backend that fails any text call mentioning `marker`.
    #[must_use]
    pub fn failing_on(marker: &'static str) -> Self {
        Self {
            fail_when_prompt_contains: Some(marker),
            ..Self::echo()
        }
    }

    /// An echoing backend whose vision calls return `reply`.
    #[must_use]
    pub fn with_vision(reply: &'static str) -> Self {
        Self {
            vision_reply: Ok(reply),
            ..Self::echo()
        }
    }

    /// Number of text completion calls made so far.
    #[must_use]
    pub fn text_call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl TextCompletion for FakeBackend {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        _params: CompletionParams,
    ) -> Result<String, CompletionError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(user.to_string());

        if let Some(marker) = self.fail_when_prompt_contains {
            if system.contains(marker) || user.contains(marker) {
                return Err(CompletionError::Provider(format!(
                    "scripted failure on {marker}"
                )));
            }
        }

        match self.text_reply {
            Some(reply) => Ok(reply.to_string()),
            None => Ok(format!("system: {system}\nuser: {user}")),
        }
    }
}

impl VisionCompletion for FakeBackend {
    async fn analyze(
        &self,
        _prompt: &str,
        _image: &[u8],
        _mime_type: &str,
        _params: CompletionParams,
    ) -> Result<String, CompletionError> {
        self.vision_reply
            .map(ToOwned::to_owned)
            .map_err(|msg| CompletionError::Provider(msg.to_string()))
    }
}
