//! In-memory sources
//!
//! Serve fixed charts, features and lyrics, and record every lookup so
//! callers can assert on how much remote work an update would have done.

use super::{AudioFeaturesProvider, ChartProvider, LyricsProvider};
use async_trait::async_trait;
use chart_search_rs::{AudioFeatures, ChartEntry, ChartSearchError, Result};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Mutex;

fn lookup_key(title: &str, artist: &str) -> String {
    format!("{}:{}", title.to_lowercase(), artist.to_lowercase())
}

#[derive(Default)]
pub struct MockChartProvider {
    charts: HashMap<NaiveDate, Vec<ChartEntry>>,
    requested: Mutex<Vec<NaiveDate>>,
}

impl MockChartProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_week(mut self, week: NaiveDate, entries: Vec<ChartEntry>) -> Self {
        self.charts.insert(week, entries);
        self
    }

    /// Weeks requested so far, in call order.
    pub fn requested_weeks(&self) -> Vec<NaiveDate> {
        self.requested.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ChartProvider for MockChartProvider {
    fn name(&self) -> &str {
        "mock-chart"
    }

    async fn weekly_chart(&self, week: NaiveDate) -> Result<Vec<ChartEntry>> {
        if let Ok(mut requested) = self.requested.lock() {
            requested.push(week);
        }
        Ok(self.charts.get(&week).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
pub struct MockFeaturesProvider {
    tracks: HashMap<String, AudioFeatures>,
    lookups: Mutex<Vec<ChartEntry>>,
    fail_authorization: bool,
}

impl MockFeaturesProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a track; its id is taken from `features.id`.
    pub fn add_track(
        mut self,
        title: impl AsRef<str>,
        artist: impl AsRef<str>,
        features: AudioFeatures,
    ) -> Self {
        self.tracks
            .insert(lookup_key(title.as_ref(), artist.as_ref()), features);
        self
    }

    pub fn failing_authorization(mut self) -> Self {
        self.fail_authorization = true;
        self
    }

    /// Chart entries searched for so far.
    pub fn lookups(&self) -> Vec<ChartEntry> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl AudioFeaturesProvider for MockFeaturesProvider {
    fn name(&self) -> &str {
        "mock-features"
    }

    async fn authorize(&self) -> Result<String> {
        if self.fail_authorization {
            return Err(ChartSearchError::Auth("invalid client".to_string()));
        }
        Ok("mock-token".to_string())
    }

    async fn find_track(&self, _token: &str, entry: &ChartEntry) -> Result<String> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(entry.clone());
        }
        self.tracks
            .get(&lookup_key(&entry.title, &entry.artist))
            .map(|f| f.id.clone())
            .ok_or_else(|| ChartSearchError::NotFound(format!("track '{}'", entry.search_query())))
    }

    async fn audio_features(&self, _token: &str, track_id: &str) -> Result<AudioFeatures> {
        self.tracks
            .values()
            .find(|f| f.id == track_id)
            .cloned()
            .ok_or_else(|| ChartSearchError::NotFound(format!("audio features for {}", track_id)))
    }
}

#[derive(Default)]
pub struct MockLyricsProvider {
    lyrics: HashMap<String, String>,
}

impl MockLyricsProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_lyrics(
        mut self,
        title: impl AsRef<str>,
        artist: impl AsRef<str>,
        lyrics: impl Into<String>,
    ) -> Self {
        self.lyrics
            .insert(lookup_key(title.as_ref(), artist.as_ref()), lyrics.into());
        self
    }
}

#[async_trait]
impl LyricsProvider for MockLyricsProvider {
    fn name(&self) -> &str {
        "mock-lyrics"
    }

    async fn find_lyrics(&self, entry: &ChartEntry) -> Result<String> {
        let key = lookup_key(&entry.title, &entry.artist);
        if self.lyrics.contains_key(&key) {
            Ok(key)
        } else {
            Err(ChartSearchError::NotFound(format!(
                "lyrics page for '{}'",
                entry.search_query()
            )))
        }
    }

    async fn fetch_lyrics(&self, location: &str) -> Result<String> {
        self.lyrics
            .get(location)
            .cloned()
            .ok_or_else(|| ChartSearchError::NotFound(location.to_string()))
    }
}
