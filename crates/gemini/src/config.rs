use kaigo_core::config::is_valid_model_name;

use crate::error::{GeminiError, Result};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";

/// Connection settings for the Gemini REST API.
#[derive(Clone)]
pub struct GeminiConfig {
    api_key: String,
    base_url: String,
    api_version: String,
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::api_key("API key cannot be empty"));
        }

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Overrides the base URL; a trailing slash is dropped.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_api_version<S: Into<String>>(mut self, api_version: S) -> Self {
        self.api_version = api_version.into().trim_matches('/').to_string();
        self
    }

    pub fn models_url(&self) -> String {
        format!("{}/{}/models", self.base_url, self.api_version)
    }

    /// URL for `generateContent` on `model`, which may be given with or without the `models/`
    /// prefix.
    ///
    /// # Errors
    ///
    /// Returns `GeminiError::InvalidModel` if the name is not a plain model resource name, so it
    /// can never address another path on the API host.
    pub fn generate_content_url(&self, model: &str) -> Result<String> {
        let model = qualified_model_name(model);
        if !is_valid_model_name(&model) {
            return Err(GeminiError::InvalidModel { model });
        }

        Ok(format!(
            "{}/{}/{}:generateContent",
            self.base_url, self.api_version, model
        ))
    }
}

/// Adds the `models/` prefix to a bare model id.
pub fn qualified_model_name(model: &str) -> String {
    let model = model.trim();
    if model.starts_with("models/") || model.starts_with("tunedModels/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}
