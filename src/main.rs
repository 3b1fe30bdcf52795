use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::{AppState, build_router};
use kaigo_core::config::{api_key_from_env_value, default_model_from_env_value};
use kaigo_core::{CoreConfig, ReportRequester};
use kaigo_gemini::{GeminiClient, GeminiConfig, GeminiError};

/// Main entry point for the care incident report assistant
///
/// Serves the incident form and JSON API on `KAIGO_REST_ADDR` (default: "0.0.0.0:3000").
///
/// A missing or unusable API key does not stop the server: the form page shows a single
/// configuration error instead and no request reaches the model API.
///
/// # Environment Variables
/// - `GEMINI_API_KEY`: API key for the Gemini REST API (required for report generation)
/// - `GEMINI_BASE_URL`: API base URL (default: "https://generativelanguage.googleapis.com")
/// - `GEMINI_API_VERSION`: API version segment (default: "v1beta")
/// - `KAIGO_DEFAULT_MODEL`: model used for a blank model choice (default: "models/gemini-1.5-flash")
/// - `KAIGO_REST_ADDR`: server address (default: "0.0.0.0:3000")
///
/// # Errors
/// Returns an error if:
/// - the logging/tracing configuration cannot be initialised,
/// - the core configuration is invalid,
/// - the server address cannot be bound, or
/// - the HTTP server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kaigo_run=info".parse()?)
                .add_directive("kaigo_core=info".parse()?)
                .add_directive("kaigo_gemini=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("KAIGO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = Arc::new(CoreConfig::new(default_model_from_env_value(
        std::env::var("KAIGO_DEFAULT_MODEL").ok(),
    ))?);

    let state = app_state(
        cfg,
        std::env::var("GEMINI_API_KEY").ok(),
        non_empty_env("GEMINI_BASE_URL"),
        non_empty_env("GEMINI_API_VERSION"),
    );
    if let Some(message) = state.config_error() {
        tracing::error!("{}", message);
    }

    tracing::info!("++ Starting kaigo report assistant on {}", addr);

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Builds the application state from the Gemini settings.
///
/// A missing or unusable API key yields an unavailable state carrying the single
/// configuration error shown to users.
fn app_state(
    cfg: Arc<CoreConfig>,
    api_key: Option<String>,
    base_url: Option<String>,
    api_version: Option<String>,
) -> AppState {
    match gemini_client(api_key, base_url, api_version) {
        Ok(client) => {
            tracing::info!(
                "++ Using Gemini API at {} ({}), default model {}",
                client.config().base_url(),
                client.config().api_version(),
                cfg.default_model()
            );
            AppState::new(ReportRequester::new(cfg, Arc::new(client)))
        }
        Err(message) => AppState::unavailable(message),
    }
}

fn gemini_client(
    api_key: Option<String>,
    base_url: Option<String>,
    api_version: Option<String>,
) -> Result<GeminiClient, String> {
    let api_key = api_key_from_env_value(api_key).map_err(|e| e.user_message())?;

    let mut config = GeminiConfig::new(api_key).map_err(config_error)?;
    if let Some(base_url) = base_url {
        config = config.with_base_url(base_url);
    }
    if let Some(api_version) = api_version {
        config = config.with_api_version(api_version);
    }

    GeminiClient::new(config).map_err(config_error)
}

fn config_error(e: GeminiError) -> String {
    format!("Gemini API の設定に失敗しました: {e}")
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
