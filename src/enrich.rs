//! Turning a chart entry into a full [`SongRecord`]

use crate::dataset::SongRecord;
use crate::language::detect_language;
use crate::readability::{MetricError, PronouncingDictionary, TextMetrics};
use crate::sources::{AudioFeaturesProvider, LyricsProvider};
use chart_search_rs::{ChartEntry, ChartSearchError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("track lookup failed: {0}")]
    TrackLookup(#[source] ChartSearchError),
    #[error("audio features lookup failed: {0}")]
    AudioFeatures(#[source] ChartSearchError),
    #[error("lyrics lookup failed: {0}")]
    Lyrics(#[source] ChartSearchError),
    #[error("lyrics metrics failed: {0}")]
    Metrics(#[from] MetricError),
    #[error("language of the lyrics could not be detected")]
    UnknownLanguage,
}

pub struct SongEnricher<'a> {
    features: &'a dyn AudioFeaturesProvider,
    lyrics: &'a dyn LyricsProvider,
    dictionary: &'a PronouncingDictionary,
}

impl<'a> SongEnricher<'a> {
    pub fn new(
        features: &'a dyn AudioFeaturesProvider,
        lyrics: &'a dyn LyricsProvider,
        dictionary: &'a PronouncingDictionary,
    ) -> Self {
        Self {
            features,
            lyrics,
            dictionary,
        }
    }

    pub fn features_provider(&self) -> &'a dyn AudioFeaturesProvider {
        self.features
    }

    /// Look the entry up on both services and score its lyrics.
    ///
    /// `token` comes from [`AudioFeaturesProvider::authorize`], obtained once
    /// per batch.
    pub async fn enrich(
        &self,
        token: &str,
        entry: &ChartEntry,
    ) -> Result<SongRecord, EnrichmentError> {
        let track_id = self
            .features
            .find_track(token, entry)
            .await
            .map_err(EnrichmentError::TrackLookup)?;
        let features = self
            .features
            .audio_features(token, &track_id)
            .await
            .map_err(EnrichmentError::AudioFeatures)?;

        let location = self
            .lyrics
            .find_lyrics(entry)
            .await
            .map_err(EnrichmentError::Lyrics)?;
        let lyrics = self
            .lyrics
            .fetch_lyrics(&location)
            .await
            .map_err(EnrichmentError::Lyrics)?;

        let metrics = TextMetrics::compute(&lyrics, self.dictionary)?;
        let lang = detect_language(&lyrics).ok_or(EnrichmentError::UnknownLanguage)?;

        Ok(SongRecord {
            features,
            title: entry.title.replace('_', " "),
            artist: entry.artist.replace('_', " "),
            lyrics,
            fres: metrics.fres,
            vocab_complex: metrics.vocab_complexity,
            sentence_length: metrics.sentence_length,
            avg_syllable: metrics.avg_syllables,
            lang: lang.to_string(),
        })
    }
}
