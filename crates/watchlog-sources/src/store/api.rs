use serde::Deserialize;

/// Error body returned by the store on non-2xx responses
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn parse(text: &str) -> Self {
        serde_json::from_str(text).unwrap_or_default()
    }

    /// Machine-readable reason, preferring `reason` over `error`
    pub fn reason(&self) -> Option<String> {
        self.reason.clone().or_else(|| self.error.clone())
    }

    pub fn details_text(&self) -> Option<String> {
        self.details.as_ref().map(|d| match d {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }
}
