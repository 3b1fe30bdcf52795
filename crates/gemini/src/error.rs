use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeminiError>;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("API key error: {message}")]
    ApiKey { message: String },

    #[error("configuration error: {message}")]
    Config { message: String },

    #[error("invalid model name: {model}")]
    InvalidModel { model: String },

    /// Error envelope returned by the API (`{"error": {"code", "message", "status"}}`).
    #[error("API error ({status_code} {error_type}): {message}")]
    Api {
        status_code: u16,
        error_type: String,
        message: String,
    },

    #[error("HTTP request failed ({status_code}): {body}")]
    Http { status_code: u16, body: String },

    #[error("network error: {message}")]
    Network { message: String },

    #[error("response parsing error: {message}")]
    Parse { message: String },

    #[error("model returned no text{}", .reason.as_deref().map(|r| format!(" ({r})")).unwrap_or_default())]
    EmptyResponse { reason: Option<String> },
}

impl GeminiError {
    pub fn api_key<S: Into<String>>(message: S) -> Self {
        Self::ApiKey {
            message: message.into(),
        }
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Parse {
                message: err.to_string(),
            }
        } else if err.is_connect() {
            Self::Network {
                message: format!("connection failed: {err}"),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for GeminiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}
