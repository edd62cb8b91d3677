//! OpenAI Chat Completions client.
//!
//! Implements the [`TextCompletion`](crate::ai::TextCompletion) and
//! [`VisionCompletion`](crate::ai::VisionCompletion) seams against the
//! OpenAI API.

mod client;
mod error;
mod types;

pub use client::OpenAiClient;
pub use error::OpenAiError;
