//! # Kaigo Core
//!
//! Core logic for the care incident report assistant.
//!
//! This crate contains the pure parts of a submission:
//! - the Incident Draft and the fixed form field table,
//! - presence validation for narrative fields,
//! - prompt construction,
//! - the Report Requester, which calls a `TextGenerator` once per submission.
//!
//! **No API concerns**: HTTP servers and the Gemini client belong in `api-rest` and
//! `kaigo-gemini`.

pub mod config;
pub mod constants;
pub mod form;
pub mod generator;
pub mod prompt;
pub mod requester;
pub mod validation;

mod error;
mod incident;

pub use config::CoreConfig;
pub use error::{ReportError, ReportResult};
pub use form::{FieldId, FieldKind};
pub use generator::{GeneratorError, TextGenerator};
pub use incident::IncidentDraft;
pub use kaigo_types::NonEmptyText;
pub use prompt::build_prompt;
pub use requester::{GeneratedReport, ReportRequester};
