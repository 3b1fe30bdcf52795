//! HTML form handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};

use api_shared::IncidentForm;
use kaigo_core::ReportError;

use crate::views::{render_page, PageContext};
use crate::{draft_from_form, AppState};

/// Incident form page.
///
/// Without a usable credential this shows the configuration error and nothing else.
#[axum::debug_handler]
pub async fn index(State(state): State<AppState>) -> Response {
    let requester = match state.requester() {
        Ok(requester) => requester,
        Err(message) => {
            return page(
                StatusCode::SERVICE_UNAVAILABLE,
                PageContext::config_error(message),
            )
        }
    };

    let models = requester.available_models().await;
    let ctx = PageContext::form(
        &IncidentForm::default(),
        &models,
        requester.config().default_model(),
    );
    page(StatusCode::OK, ctx)
}

/// Form submission.
///
/// Re-renders the form with the submitted values plus one of: a warning (empty narrative or
/// unknown model), the generation error banner, or the generated report.
#[axum::debug_handler]
pub async fn submit_report(
    State(state): State<AppState>,
    Form(form): Form<IncidentForm>,
) -> Response {
    let requester = match state.requester() {
        Ok(requester) => requester,
        Err(message) => {
            return page(
                StatusCode::SERVICE_UNAVAILABLE,
                PageContext::config_error(message),
            )
        }
    };

    // The re-rendered model select and the model check share one listing call.
    let models = requester.available_models().await;
    let draft = draft_from_form(&form);
    let result = requester
        .request_report_among(&draft, form.model.as_deref(), &models)
        .await;
    let ctx = PageContext::form(&form, &models, requester.config().default_model());

    match result {
        Ok(report) => page(StatusCode::OK, ctx.with_report(&report)),
        Err(e @ (ReportError::EmptyNarrative | ReportError::UnsupportedModel(_))) => {
            tracing::warn!("report submission rejected: {}", e);
            page(
                StatusCode::UNPROCESSABLE_ENTITY,
                ctx.with_warning(e.user_message()),
            )
        }
        Err(e) => page(StatusCode::BAD_GATEWAY, ctx.with_error(e.user_message())),
    }
}

fn page(status: StatusCode, ctx: PageContext) -> Response {
    match render_page(&ctx) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Render page error: {:?}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error").into_response()
        }
    }
}
