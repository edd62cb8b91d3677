//! ShelfTalk Core - Shared types library.
//!
//! This crate provides common types used across all ShelfTalk components:
//! - `server` - HTTP API for products and AI content generation
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and the
//!   content-generation enums (social channel, tone, marketplace)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
