//! Remote data sources behind traits
//!
//! The updater only talks to these traits. [`providers`] wraps the HTTP
//! clients of `chart-search-rs`; [`mock`] keeps everything in memory for tests
//! and dry runs.

pub mod mock;
pub mod providers;

use async_trait::async_trait;
use chart_search_rs::{AudioFeatures, ChartEntry, Result};
use chrono::NaiveDate;

/// Weekly chart listings.
#[async_trait]
pub trait ChartProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Entries of the chart published for `week`, in page order.
    async fn weekly_chart(&self, week: NaiveDate) -> Result<Vec<ChartEntry>>;
}

/// Track search and audio attributes.
#[async_trait]
pub trait AudioFeaturesProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Obtain the bearer token used by the two lookups below.
    async fn authorize(&self) -> Result<String>;

    /// Identifier of the best match for a chart entry.
    async fn find_track(&self, token: &str, entry: &ChartEntry) -> Result<String>;

    async fn audio_features(&self, token: &str, track_id: &str) -> Result<AudioFeatures>;
}

/// Lyrics search and retrieval.
#[async_trait]
pub trait LyricsProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Location of the lyrics of the best match for a chart entry.
    async fn find_lyrics(&self, entry: &ChartEntry) -> Result<String>;

    /// Lyric text, one line per newline.
    async fn fetch_lyrics(&self, location: &str) -> Result<String>;
}
