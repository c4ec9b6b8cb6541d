use serde::{Deserialize, Serialize};

/// One row of a weekly chart listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartEntry {
    pub title: String,
    pub artist: String,
}

impl ChartEntry {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Free-text query used by both search services: `"<title> <artist>"`.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}

/// Bearer token obtained through the client-credentials exchange.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: u64,
}

/// Audio attributes of a track as reported by the Spotify audio-features endpoint.
///
/// Ratios (danceability, valence, speechiness, ...) are in `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioFeatures {
    pub id: String,
    pub danceability: f64,
    pub valence: f64,
    pub speechiness: f64,
    #[serde(default)]
    pub energy: f64,
    #[serde(default)]
    pub key: i32,
    #[serde(default)]
    pub loudness: f64,
    #[serde(default)]
    pub mode: i32,
    #[serde(default)]
    pub acousticness: f64,
    #[serde(default)]
    pub instrumentalness: f64,
    #[serde(default)]
    pub liveness: f64,
    #[serde(default)]
    pub tempo: f64,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub time_signature: i32,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub track_href: String,
    #[serde(default)]
    pub analysis_url: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}
