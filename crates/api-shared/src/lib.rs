//! # API Shared
//!
//! Shared definitions for the report assistant's HTTP surface.
//!
//! Contains:
//! - Request/response types for the HTML form and the JSON API (`dto` module), with OpenAPI
//!   schemas
//! - Shared services like `HealthService`

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
