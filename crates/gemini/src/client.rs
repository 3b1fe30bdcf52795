use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use tracing::debug;

use kaigo_core::constants::GENERATE_CONTENT_METHOD;
use kaigo_core::{GeneratorError, TextGenerator};

use crate::config::GeminiConfig;
use crate::error::{GeminiError, Result};
use crate::types::{
    ErrorResponse, GenerateContentRequest, GenerateContentResponse, ListModelsResponse, ModelInfo,
};

const X_GOOG_API_KEY: &str = "x-goog-api-key";

const PAGE_SIZE: &str = "1000";

/// Upper bound on `models.list` pages followed for one listing.
const MAX_MODEL_PAGES: usize = 20;

/// HTTP client for the Gemini REST API.
///
/// No request timeout is set; the transport default applies.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut api_key = HeaderValue::from_str(config.api_key())
            .map_err(|_| GeminiError::api_key("API key contains invalid characters"))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(X_GOOG_API_KEY, api_key);

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| GeminiError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Lists every model visible to the API key, following `nextPageToken`.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = self.config.models_url();
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        for _page in 0..MAX_MODEL_PAGES {
            let mut request = self
                .http_client
                .get(&url)
                .query(&[("pageSize", PAGE_SIZE)]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let page: ListModelsResponse = Self::read_json(request.send().await?).await?;
            models.extend(page.models);

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = models.len(), "listed models");
        Ok(models)
    }

    /// Generates content for a single text prompt and returns the model's text verbatim.
    pub async fn generate_content(&self, model: &str, prompt: &str) -> Result<String> {
        let url = self.config.generate_content_url(model)?;
        debug!(model, "generating content");

        let request = GenerateContentRequest::from_prompt(prompt);
        let response = self.http_client.post(&url).json(&request).send().await?;
        let body: GenerateContentResponse = Self::read_json(response).await?;

        body.text().ok_or_else(|| GeminiError::EmptyResponse {
            reason: body.empty_reason(),
        })
    }

    async fn read_json<R: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        let status = response.status();

        if status.is_success() {
            let bytes = response.bytes().await?;
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body = response.text().await.unwrap_or_default();
        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&body) {
            return Err(GeminiError::Api {
                status_code: status.as_u16(),
                error_type: error_response.error.status,
                message: error_response.error.message,
            });
        }

        Err(GeminiError::Http {
            status_code: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn list_models(&self) -> std::result::Result<Vec<String>, GeneratorError> {
        let models = GeminiClient::list_models(self).await?;
        Ok(models
            .into_iter()
            .filter(|m| m.supports(GENERATE_CONTENT_METHOD))
            .map(|m| m.name)
            .collect())
    }

    async fn generate(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, GeneratorError> {
        Ok(self.generate_content(model, prompt).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{
        body_json, header, method, path, query_param, query_param_is_missing,
    };
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GeminiClient {
        let config = GeminiConfig::new("test-key")
            .unwrap()
            .with_base_url(server.uri());
        GeminiClient::new(config).unwrap()
    }

    #[tokio::test]
    async fn generate_content_returns_text_verbatim() {
        let server = MockServer::start().await;
        let reply = "1. 発生状況\n居室にて転倒しているところを発見。\n";

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-pro:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_json(json!({"contents":[{"parts":[{"text":"prompt 転倒"}]}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"content": {"parts": [{"text": reply}], "role": "model"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .generate_content("models/gemini-pro", "prompt 転倒")
            .await
            .unwrap();
        assert_eq!(text, reply);
    }

    #[tokio::test]
    async fn generate_content_maps_error_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/nope:generateContent"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "error": {"code": 404, "message": "models/nope is not found", "status": "NOT_FOUND"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_content("nope", "prompt")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error (404 NOT_FOUND): models/nope is not found"
        );
    }

    #[tokio::test]
    async fn generate_content_keeps_non_json_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_content("gemini-pro", "prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Http { status_code: 503, .. }));
        assert!(err.to_string().contains("upstream unavailable"));
    }

    #[tokio::test]
    async fn blocked_prompt_is_an_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"promptFeedback": {"blockReason": "SAFETY"}})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_content("gemini-pro", "prompt")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::EmptyResponse { reason: Some(ref r) } if r == "SAFETY"));
    }

    #[tokio::test]
    async fn list_models_follows_page_tokens() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .and(query_param_is_missing("pageToken"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{"name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent", "countTokens"]}],
                "nextPageToken": "p2"
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .and(query_param("pageToken", "p2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [{"name": "models/text-embedding-004", "supportedGenerationMethods": ["embedContent"]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let models = client_for(&server).list_models().await.unwrap();
        let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["models/gemini-1.5-flash", "models/text-embedding-004"]);
    }

    #[tokio::test]
    async fn text_generator_lists_only_generate_content_models() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "models": [
                    {"name": "models/gemini-pro", "supportedGenerationMethods": ["generateContent"]},
                    {"name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"]}
                ]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let names = TextGenerator::list_models(&client).await.unwrap();
        assert_eq!(names, vec!["models/gemini-pro".to_string()]);
    }

    #[tokio::test]
    async fn invalid_key_surfaces_api_message() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1beta/models"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}
            })))
            .mount(&server)
            .await;

        let err = TextGenerator::list_models(&client_for(&server))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("API key not valid"));
    }

    #[tokio::test]
    async fn path_like_model_never_reaches_another_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/files"))
            .respond_with(ResponseTemplate::new(200).set_body_string("reached files"))
            .expect(0)
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate_content("models/../files?", "p")
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::InvalidModel { ref model } if model == "models/../files?"));
    }

    #[test]
    fn new_rejects_key_with_control_characters() {
        let config = GeminiConfig::new("bad\nkey").unwrap();
        let err = GeminiClient::new(config).unwrap_err();
        assert!(matches!(err, GeminiError::ApiKey { .. }));
    }
}
