//! ShelfTalk API server library.
//!
//! The binary in `main.rs` wires these modules into a running service; they
//! are exposed as a library so integration tests can drive the pipelines and
//! orchestrator with fake completion backends.
//!
//! # Architecture
//!
//! - Axum JSON API consumed by a separate React frontend
//! - `PostgreSQL` via sqlx for users, products, and generation history
//! - `OpenAI` Chat Completions for text generation and image analysis
//! - tower-sessions (Postgres-backed) for authentication

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod ai;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod openai;
pub mod routes;
pub mod services;
pub mod state;
