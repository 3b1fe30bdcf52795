//! HTML rendering for the incident form page.
//!
//! One template serves every state of the page: the empty form, the form with a warning or an
//! error banner, the form followed by a generated report, and the configuration error page
//! (which has no form at all).

use std::sync::OnceLock;

use minijinja::Environment;
use serde::Serialize;

use api_shared::IncidentForm;
use kaigo_core::constants::{COPY_HINT, GENERATION_FAILURE_HINT};
use kaigo_core::{FieldId, FieldKind, GeneratedReport};

const INDEX_TEMPLATE: &str = "index.html";

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn environment() -> &'static Environment<'static> {
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        if let Err(e) = env.add_template(INDEX_TEMPLATE, include_str!("../templates/index.html")) {
            tracing::error!("failed to load {}: {}", INDEX_TEMPLATE, e);
        }
        env
    })
}

#[derive(Debug, Serialize)]
struct OptionView {
    value: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct FieldView {
    name: &'static str,
    label: &'static str,
    kind: &'static str,
    placeholder: &'static str,
    value: String,
    options: Vec<OptionView>,
}

#[derive(Debug, Serialize)]
struct ReportView {
    text: String,
    model: String,
    generated_at: String,
}

/// Everything the page template can show.
#[derive(Debug, Default, Serialize)]
pub struct PageContext {
    config_error: Option<String>,
    warning: Option<String>,
    error: Option<String>,
    error_hint: &'static str,
    copy_hint: &'static str,
    report: Option<ReportView>,
    fields: Vec<FieldView>,
    models: Vec<OptionView>,
}

impl PageContext {
    /// The form filled with `form`'s values (empty on first load).
    pub fn form(form: &IncidentForm, models: &[String], default_model: &str) -> Self {
        let chosen_model = form
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(default_model);

        Self {
            error_hint: GENERATION_FAILURE_HINT,
            copy_hint: COPY_HINT,
            fields: FieldId::ALL.iter().map(|f| field_view(*f, form)).collect(),
            models: models
                .iter()
                .map(|m| OptionView {
                    value: m.clone(),
                    selected: m == chosen_model,
                })
                .collect(),
            ..Default::default()
        }
    }

    /// The configuration error page; no form is rendered.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self {
            config_error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warning = Some(warning.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_report(mut self, report: &GeneratedReport) -> Self {
        self.report = Some(ReportView {
            text: report.text.clone(),
            model: report.model.clone(),
            generated_at: report.generated_at.to_rfc3339(),
        });
        self
    }
}

fn field_view(field: FieldId, form: &IncidentForm) -> FieldView {
    let value = form.value(field.name()).unwrap_or_default().to_string();
    let (kind, options) = match field.kind() {
        FieldKind::Select(options) => (
            "select",
            options
                .iter()
                .map(|o| OptionView {
                    value: (*o).to_string(),
                    selected: *o == value.trim(),
                })
                .collect(),
        ),
        FieldKind::Text => ("text", Vec::new()),
        FieldKind::TextArea => ("textarea", Vec::new()),
    };

    FieldView {
        name: field.name(),
        label: field.label(),
        kind,
        placeholder: field.placeholder(),
        value,
        options,
    }
}

/// Renders the page.
///
/// # Errors
///
/// Returns a `minijinja::Error` if the template is missing or fails to render.
pub fn render_page(ctx: &PageContext) -> Result<String, minijinja::Error> {
    environment().get_template(INDEX_TEMPLATE)?.render(ctx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models() -> Vec<String> {
        vec!["models/gemini-1.5-flash".into(), "models/gemini-pro".into()]
    }

    #[test]
    fn empty_form_renders_every_field() {
        let html = render_page(&PageContext::form(
            &IncidentForm::default(),
            &models(),
            "models/gemini-1.5-flash",
        ))
        .unwrap();

        for field in FieldId::ALL {
            assert!(
                html.contains(&format!("name=\"{}\"", field.name())),
                "missing {}",
                field.name()
            );
        }
        assert!(html.contains("name=\"model\""));
        assert!(html.contains("gemini-pro"));
        assert!(html.contains("例：朝食後、Aさんの薬をBさんに誤薬。バイタル異常なし。"));
    }

    #[test]
    fn submitted_values_are_kept() {
        let form = IncidentForm {
            category: Some("誤薬".into()),
            when: Some("朝食後".into()),
            ..Default::default()
        };
        let html = render_page(&PageContext::form(&form, &models(), "models/gemini-1.5-flash"))
            .unwrap();

        assert!(html.contains("<option value=\"誤薬\" selected>"));
        assert!(html.contains("value=\"朝食後\""));
    }

    #[test]
    fn user_text_is_escaped() {
        let form = IncidentForm {
            notes: Some("<script>alert(1)</script>".into()),
            ..Default::default()
        };
        let html = render_page(&PageContext::form(&form, &models(), "models/gemini-1.5-flash"))
            .unwrap();

        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
    }

    #[test]
    fn config_error_page_has_no_form() {
        let html = render_page(&PageContext::config_error("GEMINI_API_KEY missing")).unwrap();
        assert_eq!(html.matches("GEMINI_API_KEY").count(), 1);
        assert!(!html.contains("<form"));
    }
}
