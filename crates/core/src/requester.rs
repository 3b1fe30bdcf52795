//! The Report Requester.
//!
//! Builds a prompt from an Incident Draft and sends it to a `TextGenerator` exactly once. There
//! is no retry and no fallback content; failures are returned to the caller as `ReportError`.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::config::{is_valid_model_name, CoreConfig};
use crate::generator::TextGenerator;
use crate::prompt::build_prompt;
use crate::validation::ensure_narrative;
use crate::{IncidentDraft, ReportError, ReportResult};

/// Text returned by the model for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReport {
    /// Identifier used to correlate log lines for this submission.
    pub submission_id: Uuid,
    pub model: String,
    /// Model output, unmodified.
    pub text: String,
    pub generated_at: DateTime<Utc>,
}

/// Stateless prompt builder and caller. Cheap to clone.
#[derive(Clone)]
pub struct ReportRequester {
    cfg: Arc<CoreConfig>,
    generator: Arc<dyn TextGenerator>,
}

impl ReportRequester {
    pub fn new(cfg: Arc<CoreConfig>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { cfg, generator }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.cfg
    }

    /// Models to offer in the model-choice select.
    ///
    /// A failed or empty listing falls back to the configured models without surfacing an error.
    pub async fn available_models(&self) -> Vec<String> {
        match self.generator.list_models().await {
            Ok(models) if !models.is_empty() => models,
            Ok(_) => {
                tracing::warn!("model listing returned no generateContent models; using fallback");
                self.cfg.fallback_models().to_vec()
            }
            Err(e) => {
                tracing::warn!("model listing failed, using fallback: {}", e);
                self.cfg.fallback_models().to_vec()
            }
        }
    }

    /// Requests a written report for `draft` from `model`.
    ///
    /// A blank `model` uses the configured default. The choice must be one of
    /// [`available_models`](Self::available_models) or the configured fallbacks.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - `ReportError::EmptyNarrative` if every narrative field is blank (no remote call is made),
    /// - `ReportError::UnsupportedModel` if the model is not selectable (no generation call is made),
    /// - `ReportError::Generation` if the remote call fails for any reason.
    pub async fn request_report(
        &self,
        draft: &IncidentDraft,
        model: Option<&str>,
    ) -> ReportResult<GeneratedReport> {
        ensure_narrative(draft)?;
        let models = self.available_models().await;
        self.request_report_among(draft, model, &models).await
    }

    /// Same as [`request_report`](Self::request_report), checking the model choice against an
    /// already fetched model list instead of listing again.
    pub async fn request_report_among(
        &self,
        draft: &IncidentDraft,
        model: Option<&str>,
        models: &[String],
    ) -> ReportResult<GeneratedReport> {
        ensure_narrative(draft)?;

        let model = self.cfg.resolve_model(model);
        self.ensure_selectable(&model, models)?;

        let submission_id = Uuid::new_v4();
        let prompt = build_prompt(draft);

        tracing::info!(%submission_id, %model, prompt_chars = prompt.chars().count(), "requesting report");

        let text = self
            .generator
            .generate(&model, &prompt)
            .await
            .map_err(|e| {
                tracing::error!(%submission_id, %model, "generation failed: {}", e);
                ReportError::Generation(e)
            })?;

        tracing::info!(%submission_id, response_chars = text.chars().count(), "report generated");

        Ok(GeneratedReport {
            submission_id,
            model,
            text,
            generated_at: Utc::now(),
        })
    }

    fn ensure_selectable(&self, model: &str, models: &[String]) -> ReportResult<()> {
        let offered = models
            .iter()
            .chain(self.cfg.fallback_models())
            .any(|m| m == model);

        if offered && is_valid_model_name(model) {
            Ok(())
        } else {
            tracing::warn!(%model, "rejected model choice");
            Err(ReportError::UnsupportedModel(model.to_string()))
        }
    }
}
