use crate::generator::GeneratorError;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("at least one narrative field must be filled in")]
    EmptyNarrative,
    #[error("model is not available: {0}")]
    UnsupportedModel(String),
    #[error("{} is not set", crate::constants::API_KEY_ENV_VAR)]
    MissingCredential,
    #[error("{0}")]
    Generation(#[source] GeneratorError),
}

impl ReportError {
    /// Message suitable for showing to the person filling in the form.
    ///
    /// Generation failures surface the raw upstream message unchanged.
    pub fn user_message(&self) -> String {
        match self {
            ReportError::EmptyNarrative => crate::constants::EMPTY_NARRATIVE_WARNING.to_string(),
            ReportError::MissingCredential => {
                crate::constants::MISSING_CREDENTIAL_MESSAGE.to_string()
            }
            ReportError::UnsupportedModel(model) => {
                format!("{}: {model}", crate::constants::UNSUPPORTED_MODEL_MESSAGE)
            }
            ReportError::InvalidInput(msg) => msg.clone(),
            ReportError::Generation(source) => format!("生成エラー: {source}"),
        }
    }
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
