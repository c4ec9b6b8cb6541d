//! Persistent song dataset
//!
//! A single JSON document `{"updated_week": "YYYY-MM-DD", "data": {key: record}}`
//! read and written wholesale. Entries are only ever added.

use anyhow::{Context, Result};
use chart_search_rs::AudioFeatures;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One enriched song: Spotify audio features, lyrics and text metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongRecord {
    #[serde(flatten)]
    pub features: AudioFeatures,
    pub title: String,
    pub artist: String,
    pub lyrics: String,
    pub fres: f64,
    pub vocab_complex: f64,
    pub sentence_length: f64,
    pub avg_syllable: f64,
    pub lang: String,
}

impl SongRecord {
    pub fn key(&self) -> String {
        song_key(&self.title, &self.artist)
    }
}

/// Cache key of a song: `"<title>_<artist>"` with underscores inside either
/// part replaced by spaces, so the separator stays unambiguous.
pub fn song_key(title: &str, artist: &str) -> String {
    format!("{}_{}", title.replace('_', " "), artist.replace('_', " "))
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetCache {
    /// Chart week (a Saturday) the dataset was last brought up to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_week: Option<NaiveDate>,
    #[serde(default)]
    pub data: BTreeMap<String, SongRecord>,
}

impl DatasetCache {
    /// Load the cache file.
    ///
    /// A missing or unreadable file yields an empty cache, which makes the
    /// next update a full bootstrap.
    pub fn open(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::info!("No cache at {} ({}), starting empty", path.display(), e);
                return Self::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(cache) => cache,
            Err(e) => {
                tracing::warn!(
                    "Cache at {} is unreadable ({}), starting empty",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Write the whole cache, replacing the file in place.
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string(self).context("Failed to serialize cache")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write cache: {}", path.display()))?;
        tracing::info!("Saved {} songs to {}", self.data.len(), path.display());
        Ok(())
    }

    /// True until the first update has recorded a chart week.
    pub fn is_empty(&self) -> bool {
        self.updated_week.is_none()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    pub fn insert(&mut self, record: SongRecord) {
        self.data.insert(record.key(), record);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}
