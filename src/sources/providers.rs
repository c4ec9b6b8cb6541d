use super::{AudioFeaturesProvider, ChartProvider, LyricsProvider};
use async_trait::async_trait;
use chart_search_rs::{
    AudioFeatures, BillboardChartApi, ChartEntry, Credentials, GeniusApi, Result,
    ServiceEndpoints, SpotifyApi,
};
use chrono::NaiveDate;

/// Billboard Hot 100 chart pages
pub struct BillboardChartProvider {
    api: BillboardChartApi,
}

impl BillboardChartProvider {
    pub fn new(endpoints: &ServiceEndpoints) -> Result<Self> {
        Ok(Self {
            api: BillboardChartApi::new(endpoints)?,
        })
    }
}

#[async_trait]
impl ChartProvider for BillboardChartProvider {
    fn name(&self) -> &str {
        "billboard"
    }

    async fn weekly_chart(&self, week: NaiveDate) -> Result<Vec<ChartEntry>> {
        self.api.get_chart(week).await
    }
}

/// Spotify search and audio-features endpoints
pub struct SpotifyFeaturesProvider {
    api: SpotifyApi,
}

impl SpotifyFeaturesProvider {
    pub fn new(endpoints: &ServiceEndpoints, credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            api: SpotifyApi::new(endpoints, credentials)?,
        })
    }
}

#[async_trait]
impl AudioFeaturesProvider for SpotifyFeaturesProvider {
    fn name(&self) -> &str {
        "spotify"
    }

    async fn authorize(&self) -> Result<String> {
        Ok(self.api.request_token().await?.access_token)
    }

    async fn find_track(&self, token: &str, entry: &ChartEntry) -> Result<String> {
        self.api.search_track_id(token, entry).await
    }

    async fn audio_features(&self, token: &str, track_id: &str) -> Result<AudioFeatures> {
        self.api.get_audio_features(token, track_id).await
    }
}

/// Genius search API and lyric pages
pub struct GeniusLyricsProvider {
    api: GeniusApi,
}

impl GeniusLyricsProvider {
    pub fn new(endpoints: &ServiceEndpoints, credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            api: GeniusApi::new(endpoints, credentials)?,
        })
    }
}

#[async_trait]
impl LyricsProvider for GeniusLyricsProvider {
    fn name(&self) -> &str {
        "genius"
    }

    async fn find_lyrics(&self, entry: &ChartEntry) -> Result<String> {
        self.api.search_song_url(entry).await
    }

    async fn fetch_lyrics(&self, location: &str) -> Result<String> {
        self.api.get_lyrics(location).await
    }
}
