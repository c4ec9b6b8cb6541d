use serde::{Deserialize, Serialize};

/// Response of `GET /search`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchEnvelope {
    pub response: SearchResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "type", default)]
    pub kind: String,
    pub result: HitResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HitResult {
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub full_title: String,
    #[serde(default)]
    pub primary_artist: Option<PrimaryArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrimaryArtist {
    pub name: String,
}
