//! Trimmed dataset export
//!
//! Projects the cache into the flat table consumed by the recommender.

use crate::dataset::{DatasetCache, SongRecord};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedSong {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub danceability: f64,
    pub valence: f64,
    pub speechiness: f64,
    pub fres: f64,
    pub vocab_complex: f64,
    pub sentence_length: f64,
    pub avg_syllable: f64,
    pub lyrics: String,
    pub lang: String,
}

impl From<&SongRecord> for ExportedSong {
    fn from(record: &SongRecord) -> Self {
        Self {
            id: record.features.id.clone(),
            title: record.title.clone(),
            artist: record.artist.clone(),
            danceability: record.features.danceability,
            valence: record.features.valence,
            speechiness: record.features.speechiness,
            fres: record.fres,
            vocab_complex: record.vocab_complex,
            sentence_length: record.sentence_length,
            avg_syllable: record.avg_syllable,
            lyrics: record.lyrics.clone(),
            lang: record.lang.clone(),
        }
    }
}

/// Every cached record, in cache iteration order (sorted by key).
pub fn project(cache: &DatasetCache) -> Vec<ExportedSong> {
    cache.data.values().map(ExportedSong::from).collect()
}

/// Overwrite `path` with the songs as a 4-space indented JSON array.
pub fn write_export(path: &Path, songs: &[ExportedSong]) -> Result<()> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    songs
        .serialize(&mut serializer)
        .context("Failed to serialize export")?;

    std::fs::write(path, buf)
        .with_context(|| format!("Failed to write export: {}", path.display()))?;
    tracing::info!("Exported {} songs to {}", songs.len(), path.display());
    Ok(())
}

pub fn load_export(path: &Path) -> Result<Vec<ExportedSong>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read export: {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse export: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::tests::sample_record;

    #[test]
    fn test_project_keeps_cache_order_and_trims() {
        let mut cache = DatasetCache::default();
        cache.insert(sample_record("Zebra", "Z"));
        cache.insert(sample_record("Apple", "A"));

        let songs = project(&cache);
        let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Apple", "Zebra"]);
        assert_eq!(songs[0].id, "id-apple");
        assert_eq!(songs[0].danceability, 0.7);
    }

    #[test]
    fn test_write_export_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let mut cache = DatasetCache::default();
        cache.insert(sample_record("Houdini", "Dua Lipa"));

        write_export(&path, &project(&cache)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n    {\n        \"id\": \"id-houdini\""));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        let row = value[0].as_object().unwrap();
        let mut keys: Vec<&str> = row.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "artist",
                "avgSyllable",
                "danceability",
                "fres",
                "id",
                "lang",
                "lyrics",
                "sentenceLength",
                "speechiness",
                "title",
                "valence",
                "vocabComplex",
            ]
        );

        assert_eq!(load_export(&path).unwrap(), project(&cache));
    }

    #[test]
    fn test_empty_cache_exports_empty_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        write_export(&path, &project(&DatasetCache::default())).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(load_export(&path).unwrap().is_empty());
    }
}
