//! Weekly refresh of the dataset cache
//!
//! Decides between a one-year bootstrap, an incremental catch-up and a no-op,
//! collects the chart entries of every week to visit, and enriches only the
//! entries whose key is not cached yet.

use crate::dataset::{DatasetCache, song_key};
use crate::enrich::{EnrichmentError, SongEnricher};
use crate::sources::ChartProvider;
use anyhow::{Context, Result};
use chart_search_rs::ChartEntry;
use chrono::{Datelike, Duration, NaiveDate};
use std::collections::HashSet;
use std::fmt;

/// Weeks walked back on the first run.
pub const BOOTSTRAP_WEEKS: usize = 52;

/// Chart date for `today`: `today + (5 - weekday)` days with Monday = 0.
///
/// Monday to Saturday map to the Saturday of the same week, Sunday to the day
/// before.
pub fn chart_saturday(today: NaiveDate) -> NaiveDate {
    let weekday = today.weekday().num_days_from_monday() as i64;
    today + Duration::days(5 - weekday)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePlan {
    /// Empty cache: the last [`BOOTSTRAP_WEEKS`] charts.
    Bootstrap { weeks: Vec<NaiveDate> },
    /// Charts published after `since`, newest first.
    Incremental {
        since: NaiveDate,
        weeks: Vec<NaiveDate>,
    },
    UpToDate { week: NaiveDate },
}

impl UpdatePlan {
    pub fn weeks(&self) -> &[NaiveDate] {
        match self {
            UpdatePlan::Bootstrap { weeks } | UpdatePlan::Incremental { weeks, .. } => weeks,
            UpdatePlan::UpToDate { .. } => &[],
        }
    }

    pub fn mode(&self) -> &'static str {
        match self {
            UpdatePlan::Bootstrap { .. } => "bootstrap",
            UpdatePlan::Incremental { .. } => "incremental",
            UpdatePlan::UpToDate { .. } => "up-to-date",
        }
    }
}

/// Work needed to bring `cache` up to the chart of `today`.
///
/// The incremental walk stops at the first week not after the stored marker,
/// so a marker that is not a chart Saturday still terminates. It never walks
/// further back than a bootstrap would.
pub fn plan_update(cache: &DatasetCache, today: NaiveDate) -> UpdatePlan {
    let saturday = chart_saturday(today);

    let Some(last) = cache.updated_week else {
        let weeks = (0..BOOTSTRAP_WEEKS)
            .map(|i| saturday - Duration::weeks(i as i64))
            .collect();
        return UpdatePlan::Bootstrap { weeks };
    };

    if last == saturday {
        return UpdatePlan::UpToDate { week: saturday };
    }

    let weeks = (0..BOOTSTRAP_WEEKS)
        .map(|i| saturday - Duration::weeks(i as i64))
        .take_while(|week| *week > last)
        .collect();
    UpdatePlan::Incremental { since: last, weeks }
}

/// A chart entry that could not be enriched.
#[derive(Debug)]
pub struct SkippedSong {
    pub key: String,
    pub error: EnrichmentError,
}

/// Outcome of one update run.
#[derive(Debug)]
pub struct UpdateReport {
    pub plan: UpdatePlan,
    /// Distinct chart entries seen across the visited weeks.
    pub charted: usize,
    /// Entries skipped because their key was already cached.
    pub already_cached: usize,
    pub added: Vec<String>,
    pub skipped: Vec<SkippedSong>,
    pub total_songs: usize,
}

impl UpdateReport {
    pub fn changed(&self) -> bool {
        !matches!(self.plan, UpdatePlan::UpToDate { .. })
    }
}

impl fmt::Display for UpdateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} weeks, {} charted, {} cached, {} added, {} skipped, {} total",
            self.plan.mode(),
            self.plan.weeks().len(),
            self.charted,
            self.already_cached,
            self.added.len(),
            self.skipped.len(),
            self.total_songs
        )
    }
}

pub struct DatasetUpdater<'a> {
    charts: &'a dyn ChartProvider,
    enricher: SongEnricher<'a>,
}

impl<'a> DatasetUpdater<'a> {
    pub fn new(charts: &'a dyn ChartProvider, enricher: SongEnricher<'a>) -> Self {
        Self { charts, enricher }
    }

    /// Bring `cache` up to the chart of `today`.
    ///
    /// Chart fetch and token exchange failures abort the run; per-song
    /// failures are collected in the report. The caller persists the cache.
    pub async fn update(&self, cache: &mut DatasetCache, today: NaiveDate) -> Result<UpdateReport> {
        let plan = plan_update(cache, today);
        tracing::info!(
            "Update mode: {} ({} weeks to fetch)",
            plan.mode(),
            plan.weeks().len()
        );

        if let UpdatePlan::UpToDate { week } = plan {
            tracing::info!("Dataset is up to date (week {})", week);
            return Ok(UpdateReport {
                plan,
                charted: 0,
                already_cached: 0,
                added: Vec::new(),
                skipped: Vec::new(),
                total_songs: cache.len(),
            });
        }

        let entries = self.collect_entries(plan.weeks()).await?;
        let charted = entries.len();

        let pending: Vec<ChartEntry> = entries
            .into_iter()
            .filter(|e| !cache.contains(&song_key(&e.title, &e.artist)))
            .collect();
        let already_cached = charted - pending.len();
        tracing::info!(
            "{} distinct songs charted, {} already cached, {} to enrich",
            charted,
            already_cached,
            pending.len()
        );

        let mut added = Vec::new();
        let mut skipped = Vec::new();

        if !pending.is_empty() {
            let provider = self.enricher.features_provider();
            let token = provider
                .authorize()
                .await
                .with_context(|| format!("Failed to authorize with {}", provider.name()))?;

            for entry in pending {
                let key = song_key(&entry.title, &entry.artist);
                tracing::info!("Running: {}", key);
                match self.enricher.enrich(&token, &entry).await {
                    Ok(record) => {
                        cache.insert(record);
                        added.push(key);
                    }
                    Err(error) => {
                        tracing::warn!("Not found: {} ({})", key, error);
                        skipped.push(SkippedSong { key, error });
                    }
                }
            }
        }

        cache.updated_week = Some(chart_saturday(today));

        let report = UpdateReport {
            plan,
            charted,
            already_cached,
            added,
            skipped,
            total_songs: cache.len(),
        };
        tracing::info!("Data retrieved: {}", report);
        Ok(report)
    }

    /// Entries of all `weeks`, one per cache key, first appearance kept.
    ///
    /// Entries whose titles or artists differ only in `_` versus space share
    /// a key and are fetched once.
    async fn collect_entries(&self, weeks: &[NaiveDate]) -> Result<Vec<ChartEntry>> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();

        for &week in weeks {
            let chart = self
                .charts
                .weekly_chart(week)
                .await
                .with_context(|| format!("Failed to fetch {} chart for {}", self.charts.name(), week))?;
            tracing::debug!("Week {}: {} entries", week, chart.len());
            for entry in chart {
                if seen.insert(song_key(&entry.title, &entry.artist)) {
                    entries.push(entry);
                }
            }
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_chart_saturday() {
        // 2024-06-03 is a Monday
        assert_eq!(chart_saturday(date(2024, 6, 3)), date(2024, 6, 8));
        assert_eq!(chart_saturday(date(2024, 6, 7)), date(2024, 6, 8));
        assert_eq!(chart_saturday(date(2024, 6, 8)), date(2024, 6, 8));
        // Sunday goes back one day
        assert_eq!(chart_saturday(date(2024, 6, 9)), date(2024, 6, 8));
    }

    #[test]
    fn test_plan_bootstrap_walks_a_year() {
        let plan = plan_update(&DatasetCache::default(), date(2024, 6, 5));
        let weeks = plan.weeks();
        assert!(matches!(plan, UpdatePlan::Bootstrap { .. }));
        assert_eq!(weeks.len(), BOOTSTRAP_WEEKS);
        assert_eq!(weeks[0], date(2024, 6, 8));
        assert_eq!(weeks[1], date(2024, 6, 1));
        assert_eq!(weeks[51], date(2024, 6, 8) - Duration::weeks(51));
    }

    #[test]
    fn test_plan_up_to_date() {
        let cache = DatasetCache {
            updated_week: Some(date(2024, 6, 8)),
            ..Default::default()
        };
        assert_eq!(
            plan_update(&cache, date(2024, 6, 4)),
            UpdatePlan::UpToDate {
                week: date(2024, 6, 8)
            }
        );
    }

    #[test]
    fn test_plan_incremental_two_weeks() {
        let cache = DatasetCache {
            updated_week: Some(date(2024, 5, 25)),
            ..Default::default()
        };
        let plan = plan_update(&cache, date(2024, 6, 5));
        assert_eq!(
            plan,
            UpdatePlan::Incremental {
                since: date(2024, 5, 25),
                weeks: vec![date(2024, 6, 8), date(2024, 6, 1)],
            }
        );
    }

    #[test]
    fn test_plan_incremental_unaligned_marker_terminates() {
        let cache = DatasetCache {
            updated_week: Some(date(2024, 5, 29)),
            ..Default::default()
        };
        let plan = plan_update(&cache, date(2024, 6, 5));
        assert_eq!(plan.weeks(), &[date(2024, 6, 8), date(2024, 6, 1)]);
    }

    #[test]
    fn test_plan_incremental_is_capped() {
        let cache = DatasetCache {
            updated_week: Some(date(2015, 1, 3)),
            ..Default::default()
        };
        assert_eq!(plan_update(&cache, date(2024, 6, 5)).weeks().len(), BOOTSTRAP_WEEKS);
    }

    use crate::dataset::tests::sample_record;
    use crate::readability::PronouncingDictionary;
    use crate::sources::mock::{MockChartProvider, MockFeaturesProvider, MockLyricsProvider};

    const LYRICS: &str = "I came to dance tonight\nAnd every night I dance again";

    fn dictionary() -> PronouncingDictionary {
        PronouncingDictionary::parse("I  AY1\nDANCE  D AE1 N S\nNIGHT  N AY1 T\n")
    }

    #[tokio::test]
    async fn test_update_dedupes_and_skips_failures() {
        let today = date(2024, 6, 5);
        let charts = MockChartProvider::new()
            .add_week(
                date(2024, 6, 8),
                vec![ChartEntry::new("One", "A"), ChartEntry::new("Two", "B")],
            )
            .add_week(
                date(2024, 6, 1),
                vec![ChartEntry::new("Two", "B"), ChartEntry::new("Three", "C")],
            );
        let features = MockFeaturesProvider::new()
            .add_track("One", "A", sample_record("One", "A").features)
            .add_track("Two", "B", sample_record("Two", "B").features);
        let lyrics = MockLyricsProvider::new()
            .add_lyrics("One", "A", LYRICS)
            .add_lyrics("Two", "B", LYRICS)
            .add_lyrics("Three", "C", LYRICS);
        let dict = dictionary();

        let mut cache = DatasetCache {
            updated_week: Some(date(2024, 5, 25)),
            ..Default::default()
        };
        cache.insert(sample_record("One", "A"));

        let updater = DatasetUpdater::new(&charts, SongEnricher::new(&features, &lyrics, &dict));
        let report = updater.update(&mut cache, today).await.unwrap();

        assert_eq!(charts.requested_weeks(), vec![date(2024, 6, 8), date(2024, 6, 1)]);
        assert_eq!(report.charted, 3);
        assert_eq!(report.already_cached, 1);
        assert_eq!(report.added, vec!["Two_B".to_string()]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].key, "Three_C");
        assert!(matches!(
            report.skipped[0].error,
            EnrichmentError::TrackLookup(_)
        ));
        // "One" was cached, so it is never looked up
        let looked_up: Vec<String> = features.lookups().into_iter().map(|e| e.title).collect();
        assert_eq!(looked_up, vec!["Two", "Three"]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.updated_week, Some(date(2024, 6, 8)));
    }

    #[tokio::test]
    async fn test_update_fetches_colliding_keys_once() {
        let charts = MockChartProvider::new()
            .add_week(date(2024, 6, 8), vec![ChartEntry::new("Snake_Case", "Band")])
            .add_week(date(2024, 6, 1), vec![ChartEntry::new("Snake Case", "Band")]);
        let features = MockFeaturesProvider::new()
            .add_track("Snake_Case", "Band", sample_record("Snake Case", "Band").features)
            .add_track("Snake Case", "Band", sample_record("Snake Case", "Band").features);
        let lyrics = MockLyricsProvider::new()
            .add_lyrics("Snake_Case", "Band", LYRICS)
            .add_lyrics("Snake Case", "Band", LYRICS);
        let dict = dictionary();
        let mut cache = DatasetCache {
            updated_week: Some(date(2024, 5, 25)),
            ..Default::default()
        };

        let updater = DatasetUpdater::new(&charts, SongEnricher::new(&features, &lyrics, &dict));
        let report = updater.update(&mut cache, date(2024, 6, 5)).await.unwrap();

        assert_eq!(features.lookups(), vec![ChartEntry::new("Snake_Case", "Band")]);
        assert_eq!(report.charted, 1);
        assert_eq!(report.added, vec!["Snake Case_Band".to_string()]);
        assert_eq!(cache.len(), 1);
    }

    #[tokio::test]
    async fn test_update_same_week_is_noop() {
        let charts = MockChartProvider::new();
        let features = MockFeaturesProvider::new();
        let lyrics = MockLyricsProvider::new();
        let dict = dictionary();
        let mut cache = DatasetCache {
            updated_week: Some(date(2024, 6, 8)),
            ..Default::default()
        };
        cache.insert(sample_record("One", "A"));
        let before = cache.clone();

        let updater = DatasetUpdater::new(&charts, SongEnricher::new(&features, &lyrics, &dict));
        let report = updater.update(&mut cache, date(2024, 6, 6)).await.unwrap();

        assert!(!report.changed());
        assert_eq!(cache, before);
        assert!(charts.requested_weeks().is_empty());
        assert!(features.lookups().is_empty());
    }

    #[tokio::test]
    async fn test_update_without_new_songs_skips_authorization() {
        let charts =
            MockChartProvider::new().add_week(date(2024, 6, 8), vec![ChartEntry::new("One", "A")]);
        let features = MockFeaturesProvider::new().failing_authorization();
        let lyrics = MockLyricsProvider::new();
        let dict = dictionary();
        let mut cache = DatasetCache {
            updated_week: Some(date(2024, 6, 1)),
            ..Default::default()
        };
        cache.insert(sample_record("One", "A"));

        let updater = DatasetUpdater::new(&charts, SongEnricher::new(&features, &lyrics, &dict));
        let report = updater.update(&mut cache, date(2024, 6, 8)).await.unwrap();

        assert_eq!(report.already_cached, 1);
        assert!(report.added.is_empty());
        assert_eq!(cache.updated_week, Some(date(2024, 6, 8)));
    }

    #[tokio::test]
    async fn test_update_fails_when_authorization_fails() {
        let charts =
            MockChartProvider::new().add_week(date(2024, 6, 8), vec![ChartEntry::new("One", "A")]);
        let features = MockFeaturesProvider::new().failing_authorization();
        let lyrics = MockLyricsProvider::new();
        let dict = dictionary();
        let mut cache = DatasetCache::default();

        let updater = DatasetUpdater::new(&charts, SongEnricher::new(&features, &lyrics, &dict));
        let result = updater.update(&mut cache, date(2024, 6, 8)).await;

        assert!(result.is_err());
        assert!(cache.is_empty());
    }
}
