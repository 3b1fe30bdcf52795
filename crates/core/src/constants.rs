//! Constants used throughout the kaigo core crate.
//!
//! Select options, model names and the fixed user-facing messages live here so the HTML form,
//! the JSON API and the prompt builder all agree on them.

/// Options for the physical status (身体状況) select.
pub const PHYSICAL_STATUS_OPTIONS: &[&str] = &["全介助", "一部介助", "自立"];

/// Options for the body side (部位) select.
pub const BODY_SIDE_OPTIONS: &[&str] = &["健側", "患側", "該当なし"];

/// Options for the incident category (事故種別) select.
pub const CATEGORY_OPTIONS: &[&str] = &["内出血", "誤薬", "転倒", "その他"];

/// Model used when no model is chosen and `KAIGO_DEFAULT_MODEL` is unset.
pub const DEFAULT_MODEL: &str = "models/gemini-1.5-flash";

/// Models offered when the model listing call fails or returns nothing.
pub const FALLBACK_MODELS: &[&str] = &["models/gemini-1.5-flash", "models/gemini-pro"];

/// Generation method a listed model must support to be selectable.
pub const GENERATE_CONTENT_METHOD: &str = "generateContent";

/// Environment variable holding the Gemini API key.
pub const API_KEY_ENV_VAR: &str = "GEMINI_API_KEY";

/// Placeholder shown in the prompt for a select left unset.
pub const UNSELECTED: &str = "未選択";

/// Warning shown when every narrative field is empty.
pub const EMPTY_NARRATIVE_WARNING: &str = "状況メモ、または5W1Hのいずれかを入力してください。";

/// Error shown when the chosen model is not one of the selectable models.
pub const UNSUPPORTED_MODEL_MESSAGE: &str = "選択されたモデルは利用できません";

/// Configuration error shown when the API key is missing.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "環境変数 'GEMINI_API_KEY' が設定されていません。";

/// Hint shown beneath a generation error.
pub const GENERATION_FAILURE_HINT: &str =
    "APIキーの権限が不足しているか、モデル名が正しくありません。";

/// Note shown beneath a generated report.
pub const COPY_HINT: &str = "※この内容をコピーして介護ソフト等に貼り付けてください。";
