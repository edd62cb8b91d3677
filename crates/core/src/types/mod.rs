//! Shared type definitions.

pub mod channel;
pub mod email;
pub mod id;

pub use channel::{Marketplace, SocialChannel, Tone};
pub use email::{Email, EmailError};
pub use id::{GenerationId, ProductId, UserId};
