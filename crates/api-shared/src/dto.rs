//! Request and response bodies.
//!
//! `IncidentForm` is accepted both as `application/x-www-form-urlencoded` from the HTML page and
//! as JSON from API clients. Every field is optional; blank strings count as unset.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub credential_configured: bool,
    pub message: String,
}

/// Raw values of the incident form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct IncidentForm {
    /// Model to use, e.g. `models/gemini-1.5-flash`; blank uses the server default.
    pub model: Option<String>,
    /// 身体状況: 全介助 / 一部介助 / 自立
    pub physical_status: Option<String>,
    /// 部位: 健側 / 患側 / 該当なし
    pub body_side: Option<String>,
    /// 事故種別: 内出血 / 誤薬 / 転倒 / その他
    pub category: Option<String>,
    pub when: Option<String>,
    pub place: Option<String>,
    pub who: Option<String>,
    pub what: Option<String>,
    pub why: Option<String>,
    pub how: Option<String>,
    pub vitals: Option<String>,
    pub actions_taken: Option<String>,
    pub notes: Option<String>,
}

impl IncidentForm {
    /// Looks up a submitted value by form parameter name.
    pub fn value(&self, name: &str) -> Option<&str> {
        let value = match name {
            "model" => &self.model,
            "physical_status" => &self.physical_status,
            "body_side" => &self.body_side,
            "category" => &self.category,
            "when" => &self.when,
            "place" => &self.place,
            "who" => &self.who,
            "what" => &self.what,
            "why" => &self.why,
            "how" => &self.how,
            "vitals" => &self.vitals,
            "actions_taken" => &self.actions_taken,
            "notes" => &self.notes,
            _ => return None,
        };
        value.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerateReportRes {
    pub submission_id: String,
    pub model: String,
    /// Model output, unmodified.
    pub text: String,
    /// RFC 3339 timestamp.
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListModelsRes {
    pub models: Vec<String>,
    pub default_model: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
