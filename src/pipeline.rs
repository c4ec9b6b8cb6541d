//! Batch entry point: refresh the cache, then export it.

use crate::config::PipelineConfig;
use crate::dataset::DatasetCache;
use crate::enrich::SongEnricher;
use crate::export::{project, write_export};
use crate::readability::PronouncingDictionary;
use crate::sources::{AudioFeaturesProvider, ChartProvider, LyricsProvider};
use crate::updater::{DatasetUpdater, UpdateReport};
use anyhow::Result;
use chrono::NaiveDate;

/// The three remote sources an update draws from.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    pub charts: &'a dyn ChartProvider,
    pub features: &'a dyn AudioFeaturesProvider,
    pub lyrics: &'a dyn LyricsProvider,
}

/// Open the cache, bring it up to the chart of `today`, save it when it
/// changed and rewrite the export.
pub async fn run_batch(
    config: &PipelineConfig,
    sources: Sources<'_>,
    dictionary: &PronouncingDictionary,
    today: NaiveDate,
) -> Result<UpdateReport> {
    let mut cache = DatasetCache::open(&config.cache_path);
    tracing::info!(
        "Loaded cache with {} songs (last week: {})",
        cache.len(),
        cache
            .updated_week
            .map(|w| w.to_string())
            .unwrap_or_else(|| "never".to_string())
    );

    let enricher = SongEnricher::new(sources.features, sources.lyrics, dictionary);
    let updater = DatasetUpdater::new(sources.charts, enricher);
    let report = updater.update(&mut cache, today).await?;

    if report.changed() {
        cache.save(&config.cache_path)?;
    }
    for skipped in &report.skipped {
        tracing::debug!("Skipped {}: {}", skipped.key, skipped.error);
    }

    write_export(&config.export_path, &project(&cache))?;
    Ok(report)
}

/// Rewrite the export from the cache without touching the network.
pub fn export_only(config: &PipelineConfig) -> Result<usize> {
    let cache = DatasetCache::open(&config.cache_path);
    let songs = project(&cache);
    write_export(&config.export_path, &songs)?;
    Ok(songs.len())
}
