//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services, so
//! request handlers never read process-wide environment variables.

use crate::constants::{DEFAULT_MODEL, FALLBACK_MODELS};
use crate::{ReportError, ReportResult};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    default_model: String,
    fallback_models: Vec<String>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The default model is placed first in the fallback list, followed by the built-in
    /// fallbacks without duplicates.
    pub fn new(default_model: String) -> ReportResult<Self> {
        let default_model = default_model.trim().to_string();
        if default_model.is_empty() {
            return Err(ReportError::InvalidInput(
                "default model cannot be empty".into(),
            ));
        }

        let mut fallback_models = vec![default_model.clone()];
        for model in FALLBACK_MODELS {
            if !fallback_models.iter().any(|m| m == model) {
                fallback_models.push((*model).to_string());
            }
        }

        Ok(Self {
            default_model,
            fallback_models,
        })
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }

    pub fn fallback_models(&self) -> &[String] {
        &self.fallback_models
    }

    /// Resolve the model for a submission, using the default when the choice is blank.
    ///
    /// A bare model id gets the `models/` prefix.
    pub fn resolve_model(&self, choice: Option<&str>) -> String {
        let model = choice
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(&self.default_model);

        if model.contains('/') {
            model.to_string()
        } else {
            format!("models/{model}")
        }
    }
}

/// Whether `model` is a `models/<id>` or `tunedModels/<id>` resource name.
///
/// The id may only contain ASCII letters, digits, `.`, `_` and `-`, and may not start with `.`.
pub fn is_valid_model_name(model: &str) -> bool {
    let id = model
        .strip_prefix("models/")
        .or_else(|| model.strip_prefix("tunedModels/"));

    match id {
        Some(id) => {
            !id.is_empty()
                && !id.starts_with('.')
                && id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        }
        None => false,
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_model: DEFAULT_MODEL.to_string(),
            fallback_models: FALLBACK_MODELS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Parse the default model from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the built-in default model.
pub fn default_model_from_env_value(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

/// Validate the API key read from the environment.
///
/// # Errors
///
/// Returns `ReportError::MissingCredential` if the key is absent or blank.
pub fn api_key_from_env_value(value: Option<String>) -> ReportResult<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ReportError::MissingCredential)
}
