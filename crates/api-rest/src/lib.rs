//! # API REST
//!
//! HTTP surface of the care incident report assistant.
//!
//! Handles:
//! - the HTML incident form (`GET /`, `POST /report`)
//! - the JSON API (`/health`, `/api/models`, `/api/reports`) with OpenAPI/Swagger documentation
//! - REST-specific concerns (form decoding, JSON serialisation, CORS)
//!
//! Report logic lives in `kaigo-core`; this crate only translates between HTTP and the
//! `ReportRequester`.

#![warn(rust_2018_idioms)]

pub mod api;
pub mod pages;
pub mod views;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use api_shared::IncidentForm;
use kaigo_core::{FieldId, IncidentDraft, ReportRequester};

/// Application state shared across handlers.
///
/// Either a ready `ReportRequester`, or the configuration error found at startup. In the latter
/// case every page shows that single error and no request ever reaches the model API.
#[derive(Clone)]
pub struct AppState {
    service: Service,
}

#[derive(Clone)]
enum Service {
    Ready(ReportRequester),
    Unavailable(String),
}

impl AppState {
    pub fn new(requester: ReportRequester) -> Self {
        Self {
            service: Service::Ready(requester),
        }
    }

    /// State for a process started without a usable credential.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            service: Service::Unavailable(message.into()),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.service, Service::Ready(_))
    }

    /// Configuration error found at startup, if any.
    pub fn config_error(&self) -> Option<&str> {
        match &self.service {
            Service::Ready(_) => None,
            Service::Unavailable(message) => Some(message.as_str()),
        }
    }

    pub(crate) fn requester(&self) -> Result<&ReportRequester, &str> {
        match &self.service {
            Service::Ready(requester) => Ok(requester),
            Service::Unavailable(message) => Err(message.as_str()),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(api::health, api::list_models, api::create_report),
    components(schemas(
        api_shared::HealthRes,
        api_shared::IncidentForm,
        api_shared::GenerateReportRes,
        api_shared::ListModelsRes,
        api_shared::ErrorRes,
    ))
)]
pub struct ApiDoc;

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/report", post(pages::submit_report))
        .route("/health", get(api::health))
        .route("/api/models", get(api::list_models))
        .route("/api/reports", post(api::create_report))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Collects the Incident Draft from submitted form values.
pub(crate) fn draft_from_form(form: &IncidentForm) -> IncidentDraft {
    IncidentDraft::collect(FieldId::ALL.map(|f| (f, form.value(f.name()))))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use http_body_util::BodyExt;
    use kaigo_core::{CoreConfig, GeneratorError, ReportRequester, TextGenerator};
    use tower::ServiceExt;

    /// In-memory generator that counts calls.
    #[derive(Default)]
    pub struct FakeGenerator {
        pub models: Option<Vec<String>>,
        pub reply: Option<String>,
        pub generate_calls: AtomicUsize,
        pub list_calls: AtomicUsize,
        pub last_prompt: std::sync::Mutex<Option<String>>,
    }

    impl FakeGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: Some(reply.to_string()),
                ..Default::default()
            }
        }

        pub fn failing() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> usize {
            self.generate_calls.load(Ordering::SeqCst)
        }

        pub fn listings(&self) -> usize {
            self.list_calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn list_models(&self) -> Result<Vec<String>, GeneratorError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            self.models
                .clone()
                .ok_or_else(|| "API error (403 PERMISSION_DENIED): listing denied".into())
        }

        async fn generate(&self, _model: &str, prompt: &str) -> Result<String, GeneratorError> {
            self.generate_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
            self.reply
                .clone()
                .ok_or_else(|| "API error (429 RESOURCE_EXHAUSTED): quota exceeded".into())
        }
    }

    pub fn app_with(generator: Arc<FakeGenerator>) -> Router {
        let requester = ReportRequester::new(Arc::new(CoreConfig::default()), generator);
        super::build_router(super::AppState::new(requester))
    }

    pub fn app_without_credential() -> Router {
        super::build_router(super::AppState::unavailable(
            kaigo_core::constants::MISSING_CREDENTIAL_MESSAGE,
        ))
    }

    pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let res = app.clone().oneshot(request).await.unwrap();
        let status = res.status();
        let body = res.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    pub fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    pub fn post_form(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }
}
