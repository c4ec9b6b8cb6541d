use serde::{Deserialize, Serialize};

/// Response of `GET /v1/search?type=track`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<TrackItem>,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artists: Vec<ArtistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistItem {
    pub name: String,
}

/// Error envelope returned by both the accounts and the API hosts.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: serde_json::Value,
    #[serde(default)]
    pub error_description: Option<String>,
}

impl ErrorResponse {
    pub fn message(&self) -> String {
        if let Some(description) = &self.error_description {
            return description.clone();
        }
        match &self.error {
            serde_json::Value::String(s) => s.clone(),
            other => other
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| other.to_string()),
        }
    }
}
