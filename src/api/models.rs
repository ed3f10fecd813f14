use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub fast_mode: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub query: String,
}

/// Checkbox form: the field is absent when unchecked.
#[derive(Debug, Deserialize)]
pub struct FastModeForm {
    pub enabled: Option<String>,
}

impl FastModeForm {
    pub fn is_enabled(&self) -> bool {
        matches!(
            self.enabled.as_deref(),
            Some("on" | "true" | "1")
        )
    }
}

/// Posted by keyword chips; the value is used as-is, untrimmed.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    #[serde(default)]
    pub keyword: String,
}
