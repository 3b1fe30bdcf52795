//! # Kaigo Gemini
//!
//! Minimal client for the Gemini REST API (`generativelanguage.googleapis.com`).
//!
//! Only the two calls the report assistant needs are implemented: listing models and
//! generating content from a single text prompt. `GeminiClient` implements
//! `kaigo_core::TextGenerator`.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::GeminiClient;
pub use config::{GeminiConfig, DEFAULT_API_VERSION, DEFAULT_BASE_URL};
pub use error::{GeminiError, Result};
