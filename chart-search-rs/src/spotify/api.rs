use super::models::SearchResponse;
use crate::config::{Credentials, ServiceEndpoints};
use crate::error::{ChartSearchError, Result};
use crate::http::read_json;
use crate::models::{AccessToken, AudioFeatures, ChartEntry};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

pub struct SpotifyApi {
    client: Client,
    accounts_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyApi {
    pub fn new(endpoints: &ServiceEndpoints, credentials: &Credentials) -> Result<Self> {
        info!("Initializing Spotify API client");
        Ok(Self {
            client: endpoints.http_client()?,
            accounts_url: endpoints.spotify_accounts.clone(),
            api_url: endpoints.spotify_api.clone(),
            client_id: credentials.spotify_client_id.clone(),
            client_secret: credentials.spotify_client_secret.clone(),
        })
    }

    /// Exchange the client credentials for a short-lived bearer token.
    #[instrument(skip(self), fields(service = "spotify"))]
    pub async fn request_token(&self) -> Result<AccessToken> {
        let url = format!("{}/api/token", self.accounts_url);
        debug!("POST request to: {}", url);

        let response = self
            .client
            .post(&url)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
            ])
            .send()
            .await?;

        let token: AccessToken = read_json(response, "token").await.map_err(|e| match e {
            ChartSearchError::Api { message, .. } => ChartSearchError::Auth(message),
            other => other,
        })?;

        info!("Obtained access token, expires in {}s", token.expires_in);
        Ok(token)
    }

    /// Identifier of the first track matching the entry's search query.
    #[instrument(skip(self, token), fields(service = "spotify"))]
    pub async fn search_track_id(&self, token: &str, entry: &ChartEntry) -> Result<String> {
        let url = format!("{}/v1/search", self.api_url);
        let query = entry.search_query();
        debug!("GET request to: {} (q = {})", url, query);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("type", "track"),
                ("market", "US"),
                ("limit", "1"),
            ])
            .send()
            .await?;

        let search: SearchResponse = read_json(response, "search").await?;
        match search.tracks.items.into_iter().next() {
            Some(track) => {
                debug!("Matched '{}' to track {} ({})", query, track.id, track.name);
                Ok(track.id)
            }
            None => {
                warn!("No Spotify track found for '{}'", query);
                Err(ChartSearchError::NotFound(format!("track '{}'", query)))
            }
        }
    }

    /// Audio attributes of a track by identifier.
    #[instrument(skip(self, token), fields(service = "spotify"))]
    pub async fn get_audio_features(&self, token: &str, track_id: &str) -> Result<AudioFeatures> {
        let url = format!("{}/v1/audio-features/{}", self.api_url, track_id);
        debug!("GET request to: {}", url);

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        let features: Option<AudioFeatures> = read_json(response, "audio-features").await?;

        features.ok_or_else(|| {
            warn!("Spotify returned no audio features for {}", track_id);
            ChartSearchError::NotFound(format!("audio features for {}", track_id))
        })
    }
}
