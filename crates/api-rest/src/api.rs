//! JSON API handlers.

use axum::{extract::State, http::StatusCode, response::Json};

use api_shared::{
    ErrorRes, GenerateReportRes, HealthRes, HealthService, IncidentForm, ListModelsRes,
};
use kaigo_core::constants::GENERATION_FAILURE_HINT;
use kaigo_core::ReportError;

use crate::{draft_from_form, AppState};

type ApiError = (StatusCode, Json<ErrorRes>);

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Used for monitoring and load balancer health checks. Never calls the model API.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.is_ready()))
}

#[utoipa::path(
    get,
    path = "/api/models",
    responses(
        (status = 200, description = "Selectable models", body = ListModelsRes),
        (status = 503, description = "No API key configured", body = ErrorRes)
    )
)]
/// List models that can generate content
///
/// Falls back to the built-in model list if the listing call fails.
#[axum::debug_handler]
pub async fn list_models(
    State(state): State<AppState>,
) -> Result<Json<ListModelsRes>, ApiError> {
    let requester = state.requester().map_err(unavailable)?;
    let models = requester.available_models().await;
    Ok(Json(ListModelsRes {
        models,
        default_model: requester.config().default_model().to_string(),
    }))
}

#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = IncidentForm,
    responses(
        (status = 200, description = "Report generated", body = GenerateReportRes),
        (status = 422, description = "Every narrative field is empty, or the model is not selectable", body = ErrorRes),
        (status = 502, description = "Model API call failed", body = ErrorRes),
        (status = 503, description = "No API key configured", body = ErrorRes)
    )
)]
/// Generate an incident report
///
/// Builds the prompt from the submitted fields and calls the model once. The returned text is
/// passed through unmodified.
///
/// # Errors
/// Returns:
/// - `422 Unprocessable Entity` if every narrative field is blank or the model is not one of the
///   selectable models (the model is not called),
/// - `502 Bad Gateway` with the raw upstream message if the model call fails,
/// - `503 Service Unavailable` if the process has no API key.
#[axum::debug_handler]
pub async fn create_report(
    State(state): State<AppState>,
    Json(form): Json<IncidentForm>,
) -> Result<Json<GenerateReportRes>, ApiError> {
    let requester = state.requester().map_err(unavailable)?;
    let draft = draft_from_form(&form);

    match requester.request_report(&draft, form.model.as_deref()).await {
        Ok(report) => Ok(Json(GenerateReportRes {
            submission_id: report.submission_id.to_string(),
            model: report.model,
            text: report.text,
            generated_at: report.generated_at.to_rfc3339(),
        })),
        Err(e @ (ReportError::EmptyNarrative | ReportError::UnsupportedModel(_))) => Err((
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorRes {
                message: e.user_message(),
                hint: None,
            }),
        )),
        Err(e) => Err((
            StatusCode::BAD_GATEWAY,
            Json(ErrorRes {
                message: e.user_message(),
                hint: Some(GENERATION_FAILURE_HINT.to_string()),
            }),
        )),
    }
}

fn unavailable(message: &str) -> ApiError {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(ErrorRes {
            message: message.to_string(),
            hint: None,
        }),
    )
}
