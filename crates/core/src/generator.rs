//! The seam between the Report Requester and the remote text-generation service.

use async_trait::async_trait;

/// Error returned by a text generator, kept opaque so its message can be shown verbatim.
pub type GeneratorError = Box<dyn std::error::Error + Send + Sync>;

/// A hosted text-generation model.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Lists models that can generate content, by full model name (e.g. `models/gemini-pro`).
    async fn list_models(&self) -> Result<Vec<String>, GeneratorError>;

    /// Sends `prompt` to `model` and returns the generated text.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, GeneratorError>;
}
